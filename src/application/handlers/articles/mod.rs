//! Article catalogue handlers.

mod create_article;
mod get_article;
mod list_articles;
mod list_unlocked_articles;

pub use create_article::{CreateArticleCommand, CreateArticleHandler};
pub use get_article::{GetArticleHandler, GetArticleQuery};
pub use list_articles::{ListArticlesHandler, ListArticlesQuery};
pub use list_unlocked_articles::{ListUnlockedArticlesHandler, ListUnlockedArticlesQuery};
