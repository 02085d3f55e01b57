use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// User presence as understood by the server.
///
/// Clients often label `Busy` as "Do not disturb" and `Invisible` as
/// "Offline"; both aliases parse.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Presence {
    Online,
    Idle,
    Focus,
    #[strum(to_string = "Busy", serialize = "dnd")]
    Busy,
    #[strum(to_string = "Invisible", serialize = "offline")]
    Invisible,
}

impl Presence {
    /// Short explanation shown next to presences that change behaviour.
    pub fn explainer(self) -> Option<&'static str> {
        match self {
            Self::Online | Self::Idle => None,
            Self::Busy => Some("You will not receive any notifications."),
            Self::Focus => Some("You will only receive notifications for mentions."),
            Self::Invisible => Some("You will appear offline to others."),
        }
    }
}
