use crate::models::{Profile, ProfileUpdate, ProfileView};
use crate::storage::AvatarBlob;
use crate::{AppCore, Result, SoulmateError};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

/// Largest accepted avatar upload.
pub const MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;

/// Raster formats accepted for avatars. Scriptable formats such as SVG are
/// rejected since avatars are served from the app's origin.
pub const AVATAR_CONTENT_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/webp"];

/// Stored profile, or a blank one when the user has not set it up yet.
pub async fn get_profile(core: &Arc<AppCore>, user_id: &str) -> Result<ProfileView> {
    let profile = core
        .storage
        .profiles
        .get(user_id)
        .with_context(|| format!("Failed to load profile {}", user_id))?
        .unwrap_or_else(|| Profile::blank(user_id));
    Ok(ProfileView::from(profile))
}

/// Validate and store the user-editable fields.
pub async fn save_profile(
    core: &Arc<AppCore>,
    user_id: &str,
    update: ProfileUpdate,
) -> Result<ProfileView> {
    let update = update.validate()?;
    let profile = core
        .storage
        .profiles
        .update(user_id, |profile| profile.apply(update))
        .with_context(|| format!("Failed to save profile {}", user_id))?;
    Ok(ProfileView::from(profile))
}

/// Store a new avatar image and point the profile at it.
pub async fn upload_avatar(
    core: &Arc<AppCore>,
    user_id: &str,
    content_type: &str,
    data: Vec<u8>,
) -> Result<ProfileView> {
    let content_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if !AVATAR_CONTENT_TYPES.contains(&content_type.as_str()) {
        return Err(SoulmateError::validation(
            "avatar",
            "Avatar must be a PNG, JPEG, GIF or WebP image",
        ));
    }
    if data.is_empty() {
        return Err(SoulmateError::validation("avatar", "Avatar is empty"));
    }
    if data.len() > MAX_AVATAR_BYTES {
        return Err(SoulmateError::PayloadTooLarge(format!(
            "Avatar must be at most {} bytes",
            MAX_AVATAR_BYTES
        )));
    }

    let size = data.len();
    let now = chrono::Utc::now().timestamp_millis();
    let profile = core
        .storage
        .avatars
        .put_with_profile(user_id, &AvatarBlob { content_type, data }, |profile| {
            profile.avatar_url = Some(format!("/api/public/avatars/{}?v={}", user_id, now));
            profile.updated_at = now;
        })
        .with_context(|| format!("Failed to store avatar for {}", user_id))?;

    info!(user_id, size, "Avatar uploaded");
    Ok(ProfileView::from(profile))
}

pub async fn get_avatar(core: &Arc<AppCore>, user_id: &str) -> Result<AvatarBlob> {
    core.storage
        .avatars
        .get(user_id)
        .with_context(|| format!("Failed to load avatar for {}", user_id))?
        .ok_or_else(|| SoulmateError::not_found(format!("Avatar for {}", user_id)))
}

/// Add one to the user's prompt counter, creating the profile if needed.
pub async fn increment_prompt_count(core: &Arc<AppCore>, user_id: &str) -> Result<u64> {
    let profile = core
        .storage
        .profiles
        .update(user_id, |profile| {
            profile.prompt_count = profile.prompt_count.saturating_add(1);
        })
        .with_context(|| format!("Failed to increment prompt count for {}", user_id))?;
    Ok(profile.prompt_count)
}
