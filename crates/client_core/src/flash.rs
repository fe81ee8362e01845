use std::{fmt, time::Duration};

/// How long outcome messages stay up before clearing themselves.
pub const FLASH_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MessageClass {
    #[default]
    Info,
    Success,
    Danger,
}

impl MessageClass {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageClass::Info => "info",
            MessageClass::Success => "success",
            MessageClass::Danger => "danger",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            MessageClass::Info => "text-info",
            MessageClass::Success => "text-success",
            MessageClass::Danger => "text-danger",
        }
    }
}

impl fmt::Display for MessageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The flashed status banner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub class: MessageClass,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, class: MessageClass) -> Self {
        Self {
            text: text.into(),
            class,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
