use crate::{AppCore, Result, SoulmateError, models::Theme};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

/// List all themes in display order.
pub async fn list_themes(core: &Arc<AppCore>) -> Result<Vec<Theme>> {
    Ok(core
        .storage
        .themes
        .list()
        .context("Failed to list themes")?)
}

/// Get a theme by ID, failing with `NotFound` when it does not exist.
pub async fn get_theme(core: &Arc<AppCore>, id: &str) -> Result<Theme> {
    core.storage
        .themes
        .get(id)
        .with_context(|| format!("Failed to get theme {}", id))?
        .ok_or_else(|| SoulmateError::not_found(format!("Theme {}", id)))
}

/// Replace every theme with the built-in defaults.
///
/// Returns the themes now stored.
pub async fn seed_themes(core: &Arc<AppCore>) -> Result<Vec<Theme>> {
    let themes = crate::models::theme::default_themes()?;
    let removed = core
        .storage
        .themes
        .replace_all(&themes)
        .context("Failed to seed themes")?;
    info!(removed, inserted = themes.len(), "Themes reseeded");
    Ok(themes)
}
