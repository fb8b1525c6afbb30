pub mod memory;

use crate::app::Result;
use crate::domain::Article;

pub use memory::MemoryStore;

/// Enriched article details keyed by article ID.
///
/// Append-only by key: the first record stored for an ID wins and later
/// inserts for the same ID are ignored.
pub trait DetailStore {
    fn get(&self, id: &str) -> Result<Option<Article>>;
    fn contains(&self, id: &str) -> Result<bool>;
    /// Returns `true` if the record was stored, `false` if the ID was already present.
    fn insert(&self, id: &str, article: Article) -> Result<bool>;
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
