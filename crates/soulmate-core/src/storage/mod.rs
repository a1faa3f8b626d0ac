//! Storage layer with typed wrappers around soulmate-storage.
//!
//! Values are stored as JSON produced from the models in this crate.

pub mod approach;
pub mod avatar;
pub mod auth_session;
pub mod message;
pub mod profile;
pub mod theme;
pub mod user;

use anyhow::Result;
use redb::Database;
use std::sync::Arc;

pub use soulmate_storage::AvatarBlob;

pub use approach::ApproachStorage;
pub use auth_session::AuthSessionStorage;
pub use avatar::AvatarStorage;
pub use message::MessageStorage;
pub use profile::ProfileStorage;
pub use theme::ThemeStorage;
pub use user::UserStorage;

/// Central storage manager that opens every table on one database file.
pub struct Storage {
    pub users: UserStorage,
    pub auth_sessions: AuthSessionStorage,
    pub messages: MessageStorage,
    pub themes: ThemeStorage,
    pub approaches: ApproachStorage,
    pub profiles: ProfileStorage,
    pub avatars: AvatarStorage,
}

impl Storage {
    /// Create a new storage instance at the given path.
    pub fn new(path: &str) -> Result<Self> {
        let db = Arc::new(Database::create(path)?);

        Ok(Self {
            users: UserStorage::new(db.clone())?,
            auth_sessions: AuthSessionStorage::new(db.clone())?,
            messages: MessageStorage::new(db.clone())?,
            themes: ThemeStorage::new(db.clone())?,
            approaches: ApproachStorage::new(db.clone())?,
            profiles: ProfileStorage::new(db.clone())?,
            avatars: AvatarStorage::new(db)?,
        })
    }
}
