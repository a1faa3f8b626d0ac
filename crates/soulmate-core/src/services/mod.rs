pub mod approaches;
pub mod auth;
pub mod chat;
pub mod history;
pub mod profile;
pub mod themes;
