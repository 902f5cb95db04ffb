use pulldown_cmark::{html, Options as CmarkOptions, Parser};

/// Turns page markdown into HTML. Conversion is pure and cannot fail; malformed markdown
/// still renders as something.
pub trait MarkdownConverter: Send + Sync {
    fn to_html(&self, markdown: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PulldownMarkdown;

impl MarkdownConverter for PulldownMarkdown {
    fn to_html(&self, markdown: &str) -> String {
        compile_markdown_to_html(markdown)
    }
}

// compiles markdown content into HTML with the GFM-style extensions pages are written with
pub fn compile_markdown_to_html(markdown_content: &str) -> String {
    let mut options = CmarkOptions::empty();
    options.insert(CmarkOptions::ENABLE_STRIKETHROUGH);
    options.insert(CmarkOptions::ENABLE_TABLES);

    let parser = Parser::new_ext(markdown_content, options);

    let mut html_content = String::new();
    html::push_html(&mut html_content, parser);

    html_content
}
