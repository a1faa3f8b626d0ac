use crate::{AppCore, Result, SoulmateError, models::Approach};
use anyhow::Context;
use std::sync::Arc;

pub async fn list_approaches(core: &Arc<AppCore>) -> Result<Vec<Approach>> {
    Ok(core
        .storage
        .approaches
        .list()
        .context("Failed to list approaches")?)
}

pub async fn get_approach(core: &Arc<AppCore>, id: &str) -> Result<Approach> {
    core.storage
        .approaches
        .get(id)
        .with_context(|| format!("Failed to get approach {}", id))?
        .ok_or_else(|| SoulmateError::not_found(format!("Approach {}", id)))
}

/// Create an approach from a name and description.
pub async fn create_approach(core: &Arc<AppCore>, name: &str, description: &str) -> Result<Approach> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SoulmateError::validation("name", "Name is required"));
    }

    let approach = Approach::new(name, description.trim());
    core.storage
        .approaches
        .create(&approach)
        .with_context(|| format!("Failed to create approach {}", name))?;
    Ok(approach)
}

pub async fn delete_approach(core: &Arc<AppCore>, id: &str) -> Result<()> {
    let existed = core
        .storage
        .approaches
        .delete(id)
        .with_context(|| format!("Failed to delete approach {}", id))?;
    if !existed {
        return Err(SoulmateError::not_found(format!("Approach {}", id)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_core;

    #[tokio::test]
    async fn test_approach_lifecycle() {
        let (core, _temp_dir) = test_core().await;
        assert!(list_approaches(&core).await.unwrap().is_empty());

        let created = create_approach(&core, " 傾聴 ", "話をよく聴きます").await.unwrap();
        assert_eq!(created.name, "傾聴");

        let fetched = get_approach(&core, &created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(list_approaches(&core).await.unwrap().len(), 1);

        delete_approach(&core, &created.id).await.unwrap();
        assert!(matches!(
            delete_approach(&core, &created.id).await,
            Err(SoulmateError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let (core, _temp_dir) = test_core().await;
        let result = create_approach(&core, "  ", "x").await;
        assert!(matches!(result, Err(SoulmateError::Validation(_))));
    }
}
