use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::app::{PublicoError, Result};
use crate::domain::Article;
use crate::store::DetailStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    details: RwLock<HashMap<String, Article>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Article>>> {
        self.details
            .read()
            .map_err(|_| PublicoError::Other("detail store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Article>>> {
        self.details
            .write()
            .map_err(|_| PublicoError::Other("detail store lock poisoned".into()))
    }
}

impl DetailStore for MemoryStore {
    fn get(&self, id: &str) -> Result<Option<Article>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.read()?.contains_key(id))
    }

    fn insert(&self, id: &str, article: Article) -> Result<bool> {
        let mut details = self.write()?;
        if details.contains_key(id) {
            tracing::trace!(article_id = %id, "Detail already cached, keeping first record");
            return Ok(false);
        }
        details.insert(id.to_string(), article);
        Ok(true)
    }

    fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }
}
