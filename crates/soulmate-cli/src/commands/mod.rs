pub mod approach;
pub mod history;
pub mod profile;
pub mod theme;
pub mod user;
pub mod utils;
