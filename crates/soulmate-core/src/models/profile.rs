//! User profile metadata.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::validation::ValidationError;

pub const MAX_USERNAME_CHARS: usize = 50;
pub const MAX_OCCUPATION_CHARS: usize = 100;
pub const MAX_BIO_CHARS: usize = 500;

/// Interests a user can pick from.
pub const INTEREST_OPTIONS: [&str; 12] = [
    "読書",
    "音楽",
    "映画",
    "スポーツ",
    "料理",
    "旅行",
    "テクノロジー",
    "アート",
    "ファッション",
    "健康",
    "教育",
    "ビジネス",
];

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
pub enum AgeGroup {
    #[serde(rename = "10代")]
    Teens,
    #[serde(rename = "20代")]
    Twenties,
    #[serde(rename = "30代")]
    Thirties,
    #[serde(rename = "40代")]
    Forties,
    #[serde(rename = "50代以上")]
    FiftiesPlus,
    #[default]
    #[serde(rename = "未回答")]
    Unanswered,
}

impl AgeGroup {
    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Teens => "10代",
            AgeGroup::Twenties => "20代",
            AgeGroup::Thirties => "30代",
            AgeGroup::Forties => "40代",
            AgeGroup::FiftiesPlus => "50代以上",
            AgeGroup::Unanswered => "未回答",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
pub enum Gender {
    #[serde(rename = "男性")]
    Male,
    #[serde(rename = "女性")]
    Female,
    #[serde(rename = "その他")]
    Other,
    #[default]
    #[serde(rename = "未回答")]
    Unanswered,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "男性",
            Gender::Female => "女性",
            Gender::Other => "その他",
            Gender::Unanswered => "未回答",
        }
    }
}

/// Stored profile, keyed by the owning user's id.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct Profile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub age_group: AgeGroup,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    #[ts(type = "number")]
    pub prompt_count: u64,
    #[ts(type = "number")]
    pub updated_at: i64,
}

impl Profile {
    /// Blank profile shown before the user has filled anything in.
    pub fn blank(user_id: impl Into<String>) -> Self {
        Self {
            id: user_id.into(),
            username: String::new(),
            age_group: AgeGroup::default(),
            gender: Gender::default(),
            occupation: None,
            interests: Vec::new(),
            bio: None,
            avatar_url: None,
            prompt_count: 0,
            updated_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn needs_setup(&self) -> bool {
        self.username.trim().is_empty()
    }

    /// Apply a validated update, keeping the counter and avatar.
    pub fn apply(&mut self, update: ProfileUpdate) {
        self.username = update.username;
        self.age_group = update.age_group;
        self.gender = update.gender;
        self.occupation = update.occupation;
        self.interests = update.interests;
        self.bio = update.bio;
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }
}

/// Profile fields editable by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct ProfileUpdate {
    pub username: String,
    #[serde(default)]
    pub age_group: AgeGroup,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    #[ts(optional)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    #[ts(optional)]
    pub bio: Option<String>,
}

impl ProfileUpdate {
    /// Trim and check every field, returning the normalized update.
    ///
    /// Blank optional fields become `None`; interests keep their first
    /// occurrence order with duplicates removed.
    pub fn validate(self) -> Result<Self, ValidationError> {
        let username = self.username.trim().to_string();
        if username.is_empty() {
            return Err(ValidationError::new("username", "Username is required"));
        }
        if username.chars().count() > MAX_USERNAME_CHARS {
            return Err(ValidationError::new(
                "username",
                format!("Username must be at most {} characters", MAX_USERNAME_CHARS),
            ));
        }

        let occupation = normalize_optional(self.occupation);
        if let Some(occupation) = &occupation
            && occupation.chars().count() > MAX_OCCUPATION_CHARS
        {
            return Err(ValidationError::new(
                "occupation",
                format!("Occupation must be at most {} characters", MAX_OCCUPATION_CHARS),
            ));
        }

        let bio = normalize_optional(self.bio);
        if let Some(bio) = &bio
            && bio.chars().count() > MAX_BIO_CHARS
        {
            return Err(ValidationError::new(
                "bio",
                format!("Bio must be at most {} characters", MAX_BIO_CHARS),
            ));
        }

        let mut interests: Vec<String> = Vec::with_capacity(self.interests.len());
        for interest in self.interests {
            let interest = interest.trim().to_string();
            if !INTEREST_OPTIONS.contains(&interest.as_str()) {
                return Err(ValidationError::new(
                    "interests",
                    format!("Unknown interest: {}", interest),
                ));
            }
            if !interests.contains(&interest) {
                interests.push(interest);
            }
        }

        Ok(Self {
            username,
            age_group: self.age_group,
            gender: self.gender,
            occupation,
            interests,
            bio,
        })
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Profile plus whether the initial setup screen should be shown.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: Profile,
    pub needs_setup: bool,
}

impl From<Profile> for ProfileView {
    fn from(profile: Profile) -> Self {
        let needs_setup = profile.needs_setup();
        Self {
            profile,
            needs_setup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(username: &str) -> ProfileUpdate {
        ProfileUpdate {
            username: username.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_enum_labels_round_trip_through_serde() {
        assert_eq!(serde_json::to_string(&AgeGroup::FiftiesPlus).unwrap(), "\"50代以上\"");
        assert_eq!(serde_json::to_string(&Gender::Other).unwrap(), "\"その他\"");
        let parsed: AgeGroup = serde_json::from_str("\"20代\"").unwrap();
        assert_eq!(parsed, AgeGroup::Twenties);
        assert_eq!(AgeGroup::default().label(), "未回答");
        assert_eq!(Gender::default().label(), "未回答");
    }

    #[test]
    fn test_validate_requires_username() {
        let err = update("   ").validate().unwrap_err();
        assert_eq!(err.field, "username");

        let long = "あ".repeat(MAX_USERNAME_CHARS + 1);
        assert_eq!(update(&long).validate().unwrap_err().field, "username");

        let exact = "あ".repeat(MAX_USERNAME_CHARS);
        assert!(update(&exact).validate().is_ok());
    }

    #[test]
    fn test_validate_normalizes_fields() {
        let input = ProfileUpdate {
            username: "  taro ".to_string(),
            occupation: Some("   ".to_string()),
            bio: Some(" hello ".to_string()),
            interests: vec!["音楽".to_string(), "読書".to_string(), "音楽".to_string()],
            ..Default::default()
        };

        let normalized = input.validate().unwrap();
        assert_eq!(normalized.username, "taro");
        assert_eq!(normalized.occupation, None);
        assert_eq!(normalized.bio.as_deref(), Some("hello"));
        assert_eq!(normalized.interests, vec!["音楽", "読書"]);
    }

    #[test]
    fn test_validate_rejects_unknown_interest_and_long_bio() {
        let input = ProfileUpdate {
            username: "taro".to_string(),
            interests: vec!["釣り".to_string()],
            ..Default::default()
        };
        assert_eq!(input.validate().unwrap_err().field, "interests");

        let input = ProfileUpdate {
            username: "taro".to_string(),
            bio: Some("x".repeat(MAX_BIO_CHARS + 1)),
            ..Default::default()
        };
        assert_eq!(input.validate().unwrap_err().field, "bio");
    }

    #[test]
    fn test_apply_keeps_counter_and_avatar() {
        let mut profile = Profile::blank("u-1");
        profile.prompt_count = 7;
        profile.avatar_url = Some("/api/public/avatars/u-1?v=1".to_string());
        assert!(profile.needs_setup());

        profile.apply(update("hanako").validate().unwrap());
        assert_eq!(profile.username, "hanako");
        assert_eq!(profile.prompt_count, 7);
        assert!(profile.avatar_url.is_some());
        assert!(!ProfileView::from(profile).needs_setup);
    }

    #[test]
    fn test_view_flattens_profile() {
        let view = ProfileView::from(Profile::blank("u-1"));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], "u-1");
        assert_eq!(json["needs_setup"], true);
        assert_eq!(json["gender"], "未回答");
    }
}
