/// Which typing-indicator message fits a number of typing users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingMessage {
    /// Nobody is typing; the indicator is hidden.
    Blank,
    One,
    /// Two to four users, listed by name.
    Many,
    /// Five or more; names are no longer listed.
    Several,
}

impl TypingMessage {
    pub fn for_count(count: usize) -> Self {
        match count {
            0 => Self::Blank,
            1 => Self::One,
            2..=4 => Self::Many,
            _ => Self::Several,
        }
    }

    pub fn is_visible(self) -> bool {
        self != Self::Blank
    }

    /// English text for the given display names.
    pub fn render(names: &[&str]) -> String {
        match Self::for_count(names.len()) {
            Self::Blank => String::new(),
            Self::One => format!("{} is typing…", names[0]),
            Self::Many => format!("{} are typing…", names.join(", ")),
            Self::Several => "Several people are typing…".to_string(),
        }
    }
}
