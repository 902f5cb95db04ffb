use crate::domain::Page;
use derive_more::derive::Display;

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone, Display)]
#[display("{} (#{})", name, id)]
pub struct DbPage {
    pub id: i64,
    pub name: String,
    pub content: String,
}

impl From<DbPage> for Page {
    fn from(db_page: DbPage) -> Self {
        Page {
            id: db_page.id,
            name: db_page.name,
            raw_content: db_page.content,
        }
    }
}
