//! CLI setup module
//!
//! Opens the Soulmate core directly on the database file.

use anyhow::Result;
use soulmate_core::{AppCore, CoreSettings, paths};
use std::sync::Arc;

/// Build the embedded Soulmate core
pub async fn prepare_core(db_path: Option<String>) -> Result<Arc<AppCore>> {
    let db_path = match db_path {
        Some(path) => path,
        None => paths::ensure_database_path_string()?,
    };
    Ok(Arc::new(AppCore::new(&db_path, CoreSettings::default()).await?))
}
