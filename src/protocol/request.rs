//! Request parsing and validation.
//!
//! Wire format: byte 0 is the category code (`M`, `V` or `P`), byte 1 is an
//! ASCII digit `1`–`9` giving the nominal service time in seconds. Anything
//! beyond the first two bytes is forwarded verbatim but carries no meaning
//! here.

use thiserror::Error;

/// Minimum number of bytes a well-formed request occupies.
pub const MIN_REQUEST_LEN: usize = 2;

/// Media category a client asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Music,
    Video,
    Premium,
}

impl Category {
    /// Map a wire code to its category.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            b'M' => Some(Category::Music),
            b'V' => Some(Category::Video),
            b'P' => Some(Category::Premium),
            _ => None,
        }
    }

    /// The wire code for this category.
    pub fn code(&self) -> u8 {
        match self {
            Category::Music => b'M',
            Category::Video => b'V',
            Category::Premium => b'P',
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Music => write!(f, "music"),
            Category::Video => write!(f, "video"),
            Category::Premium => write!(f, "premium"),
        }
    }
}

/// A validated client request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    /// Requested media category.
    pub category: Category,
    /// Declared service time in seconds, in 1..=9.
    pub duration: u8,
}

/// Reasons a raw request is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("request too short: got {0} bytes, need at least {MIN_REQUEST_LEN}")]
    TooShort(usize),
    #[error("unknown category code: {0:#04x}")]
    UnknownCategory(u8),
    #[error("invalid duration byte: {0:#04x} (expected ASCII '1'..='9')")]
    InvalidDuration(u8),
}

impl Request {
    /// Parse raw client bytes into a request.
    ///
    /// A non-digit duration byte is rejected outright rather than being
    /// interpreted numerically.
    pub fn parse(raw: &[u8]) -> Result<Self, RequestError> {
        if raw.len() < MIN_REQUEST_LEN {
            return Err(RequestError::TooShort(raw.len()));
        }

        let category = Category::from_code(raw[0]).ok_or(RequestError::UnknownCategory(raw[0]))?;

        let duration_byte = raw[1];
        if !duration_byte.is_ascii_digit() || duration_byte == b'0' {
            return Err(RequestError::InvalidDuration(duration_byte));
        }

        Ok(Request {
            category,
            duration: duration_byte - b'0',
        })
    }
}
