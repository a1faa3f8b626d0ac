//! Theme storage - conversation topics keyed by theme id.

use crate::{SimpleStorage, define_simple_storage};
use anyhow::Result;

define_simple_storage! {
    /// Theme storage with byte-level API.
    pub struct ThemeStorage { table: "themes" }
}

impl ThemeStorage {
    /// Drop every stored theme and insert the given ones in one transaction.
    ///
    /// Returns the number of themes that were removed.
    pub fn replace_all(&self, entries: &[(String, Vec<u8>)]) -> Result<usize> {
        <Self as SimpleStorage>::replace_all_raw(self, entries)
    }
}
