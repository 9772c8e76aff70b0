//! Transient user-visible notices.
//!
//! Three severities, matching what the detail views render as success
//! banner, info banner, and error banner. Permission denials and
//! informational domain rejections must stay distinguishable from real
//! errors.

/// A transient notice raised by a controller action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Info(m) | Self::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
