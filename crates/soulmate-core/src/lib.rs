pub mod auth;
pub mod error;
pub mod models;
pub mod paths;
pub mod prompt;
pub mod services;
pub mod settings;
pub mod storage;

pub use error::{Result, SoulmateError};
pub use models::*;
pub use settings::CoreSettings;

use auth::TokenSigner;
use std::sync::Arc;
use storage::Storage;
use tracing::info;

/// Core application state shared by the server and the CLI.
pub struct AppCore {
    pub storage: Arc<Storage>,
    pub settings: CoreSettings,
    pub tokens: TokenSigner,
}

impl AppCore {
    pub async fn new(db_path: &str, settings: CoreSettings) -> anyhow::Result<Self> {
        let storage = Arc::new(Storage::new(db_path)?);

        // Seed the built-in themes on first run
        Self::ensure_default_themes(&storage)?;

        info!(db_path, "Initializing Soulmate core");

        Ok(Self {
            storage,
            tokens: TokenSigner::new(&settings.auth.jwt_secret),
            settings,
        })
    }

    /// Insert the default themes if the theme table is empty.
    fn ensure_default_themes(storage: &Storage) -> anyhow::Result<()> {
        if storage.themes.count()? == 0 {
            let themes = models::theme::default_themes()?;
            storage.themes.replace_all(&themes)?;
            info!(count = themes.len(), "Default themes created");
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_themes_seeded_once() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("soulmate.db");
        let path = db_path.to_str().unwrap();

        {
            let core = AppCore::new(path, CoreSettings::default()).await.unwrap();
            assert_eq!(core.storage.themes.count().unwrap(), 8);
            core.storage
                .themes
                .replace_all(&[Theme::new("custom", "Custom", "only one")])
                .unwrap();
        }

        let core = AppCore::new(path, CoreSettings::default()).await.unwrap();
        let themes = core.storage.themes.list().unwrap();
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].id, "custom");
    }
}
