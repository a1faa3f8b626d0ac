use anyhow::Result;
use soulmate_core::AppCore;
use soulmate_core::services::{auth, profile};
use std::sync::Arc;

use crate::commands::utils::format_timestamp;
use crate::output::{OutputFormat, json::print_json};

pub async fn run(core: Arc<AppCore>, email: &str, format: OutputFormat) -> Result<()> {
    let user = auth::find_user_by_email(&core, email).await?;
    let view = profile::get_profile(&core, &user.id).await?;

    if format.is_json() {
        return print_json(&view);
    }

    let profile = view.profile;
    let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

    println!("Email: {}", user.email);
    if view.needs_setup {
        println!("Profile not set up yet.");
    } else {
        println!("Username: {}", profile.username);
    }
    println!("Age group: {}", profile.age_group.label());
    println!("Gender: {}", profile.gender.label());
    println!("Occupation: {}", or_dash(profile.occupation));
    if profile.interests.is_empty() {
        println!("Interests: -");
    } else {
        println!("Interests: {}", profile.interests.join(", "));
    }
    println!("Bio: {}", or_dash(profile.bio));
    println!("Avatar: {}", or_dash(profile.avatar_url));
    println!("Prompts sent: {}", profile.prompt_count);
    println!("Updated: {}", format_timestamp(Some(profile.updated_at)));
    Ok(())
}
