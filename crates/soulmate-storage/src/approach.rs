//! Approach storage - optional conversational styles keyed by id.

use crate::define_simple_storage;

define_simple_storage! {
    /// Approach storage with byte-level API.
    pub struct ApproachStorage { table: "approaches" }
}
