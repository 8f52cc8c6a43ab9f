pub mod admin;
pub mod landing;
pub mod market;
pub mod ticker;

/// A one-shot user-facing outcome message, the console's stand-in for a
/// toast. Drained and printed after the operation that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Error(String),
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice::Success(message.into())
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice::Info(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::Error(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Info(m) | Notice::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}
