pub mod article;
pub mod fields;
pub mod view;

pub use article::Article;
pub use fields::{AuthorEntry, Authors, Media, TagEntry, Tags};
pub use view::{ArticleView, Icon};
