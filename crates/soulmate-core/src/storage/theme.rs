//! Typed theme storage.

use crate::models::Theme;
use anyhow::Result;
use redb::Database;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ThemeStorage {
    inner: soulmate_storage::ThemeStorage,
}

impl ThemeStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        Ok(Self {
            inner: soulmate_storage::ThemeStorage::new(db)?,
        })
    }

    pub fn get(&self, id: &str) -> Result<Option<Theme>> {
        match self.inner.get_raw(id)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// All themes ordered by id, which keeps the built-in ones in their
    /// display order.
    pub fn list(&self) -> Result<Vec<Theme>> {
        let mut themes = Vec::new();
        for (_, bytes) in self.inner.list_raw()? {
            themes.push(serde_json::from_slice(&bytes)?);
        }
        Ok(themes)
    }

    pub fn count(&self) -> Result<usize> {
        self.inner.count()
    }

    /// Replace every stored theme, returning how many were removed.
    pub fn replace_all(&self, themes: &[Theme]) -> Result<usize> {
        let mut entries = Vec::with_capacity(themes.len());
        for theme in themes {
            entries.push((theme.id.clone(), serde_json::to_vec(theme)?));
        }
        self.inner.replace_all(&entries)
    }
}
