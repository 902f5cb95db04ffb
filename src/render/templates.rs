//! Askama-backed renderer for the two wiki screens.

use crate::domain::page_path;
use crate::render::{RenderError, Renderer, ViewModel, INDEX_TEMPLATE, PAGE_TEMPLATE};
use askama::Template;

/// A page entry on the home listing, with its link already encoded.
pub struct PageLink {
    pub name: String,
    pub href: String,
}

/// Home listing.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub title: &'a str,
    pub pages: Vec<PageLink>,
    pub backup_gist_url: Option<&'a str>,
}

/// Single page view with its edit form.
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate<'a> {
    pub title: &'a str,
    pub id: i64,
    pub new_page: &'a str,
    pub exists: bool,
    pub raw_content: &'a str,
    pub content: &'a str,
    pub timestamp: &'a str,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AskamaRenderer;

impl Renderer for AskamaRenderer {
    fn render(&self, model: &ViewModel, template: &str) -> Result<String, RenderError> {
        let html = match template {
            INDEX_TEMPLATE => IndexTemplate {
                title: &model.title,
                pages: model
                    .pages
                    .iter()
                    .map(|page| PageLink {
                        name: page.name.clone(),
                        href: page_path(&page.name),
                    })
                    .collect(),
                backup_gist_url: model.backup_gist_url.as_deref(),
            }
            .render()?,
            PAGE_TEMPLATE => PageTemplate {
                title: &model.title,
                id: model.id,
                new_page: &model.new_page,
                exists: model.new_page == "no",
                raw_content: &model.raw_content,
                content: &model.content,
                timestamp: &model.timestamp,
            }
            .render()?,
            other => return Err(RenderError::UnknownTemplate(other.to_string())),
        };

        Ok(html)
    }
}
