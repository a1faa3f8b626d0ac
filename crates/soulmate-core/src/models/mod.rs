pub mod approach;
pub mod auth;
pub mod history;
pub mod message;
pub mod profile;
pub mod theme;
pub mod validation;

pub use approach::Approach;
pub use auth::{AuthContext, AuthSession, SessionInfo, SignInResponse, UserAccount, UserInfo};
pub use history::{Exchange, HistorySession, HistorySessionView};
pub use message::{Message, MessageRole};
pub use profile::{AgeGroup, Gender, INTEREST_OPTIONS, Profile, ProfileUpdate, ProfileView};
pub use theme::Theme;
pub use validation::ValidationError;
