//! Soulmate Storage - Low-level storage abstraction layer
//!
//! This crate provides the persistence layer for Soulmate, using redb as the
//! embedded database. It exposes byte-level APIs so that it does not depend on
//! the domain models defined in soulmate-core.
//!
//! # Tables
//!
//! - `users` / `users:email_index` - Accounts and their unique e-mail index
//! - `auth_sessions` - Sign-in sessions backing bearer tokens
//! - `messages` / `messages:user_index` / `messages:seq` - Chat messages
//!   ordered per user by creation time and insertion order
//! - `themes`, `approaches` - Conversation themes and styles
//! - `profiles` - User profiles keyed by user id
//! - `avatars` / `avatars:content_type` - Uploaded avatar images

pub mod approach;
pub mod auth_session;
pub mod avatar;
pub mod message;
pub mod paths;
pub mod profile;
pub mod range_utils;
pub mod simple_storage;
pub mod theme;
pub mod user;

pub use approach::ApproachStorage;
pub use auth_session::AuthSessionStorage;
pub use avatar::{AvatarBlob, AvatarStorage};
pub use message::MessageStorage;
pub use profile::ProfileStorage;
pub use simple_storage::SimpleStorage;
pub use theme::ThemeStorage;
pub use user::UserStorage;
