//! Small domain types shared by the API client and the CLI.

pub mod invite;
pub mod presence;
pub mod typing;

pub use invite::InviteCode;
pub use presence::Presence;
pub use typing::TypingMessage;
