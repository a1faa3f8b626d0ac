//! Filesystem locations, resolved by the storage crate.

pub use soulmate_storage::paths::{
    ensure_database_path_string, ensure_soulmate_dir, logs_dir, resolve_soulmate_dir,
};
