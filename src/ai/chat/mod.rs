pub mod core;
pub mod models;
pub mod session;

pub use self::core::{Chat, ChatBuilder};
pub use models::{Domain, Model, Speaker, Tier, Transcript, Turn};
pub use session::{ResetPolicy, Session, SessionState};
