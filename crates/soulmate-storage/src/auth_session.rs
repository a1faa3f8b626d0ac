//! Sign-in session storage keyed by session id.

use crate::define_simple_storage;

define_simple_storage! {
    /// Auth session storage with byte-level API.
    pub struct AuthSessionStorage { table: "auth_sessions" }
}
