//! Value objects: session identity and display names.

use std::fmt;

use uuid::Uuid;

use super::error::UsernameError;

/// Maximum number of characters in a display name.
pub const USERNAME_MAX_CHARS: usize = 32;

/// Identity of one accepted connection.
///
/// Assigned at accept time and never reused, so a reconnecting client is a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random session id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated display name.
///
/// ## Rules
///
/// - not empty
/// - at most [`USERNAME_MAX_CHARS`] characters
/// - no code point `<= 32` (control characters and space) and no `127` (delete)
///
/// Uniqueness is not a property of the value itself; it is checked against the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate an already trimmed name.
    pub fn new(value: String) -> Result<Self, UsernameError> {
        if value.is_empty() {
            return Err(UsernameError::EmptyName);
        }
        if value.chars().count() > USERNAME_MAX_CHARS {
            return Err(UsernameError::NameTooLong);
        }
        if value.chars().any(is_non_printable) {
            return Err(UsernameError::NonPrintableCharacter);
        }
        Ok(Self(value))
    }

    /// Parse a raw input line: surrounding spaces, `\r` and `\n` are trimmed before validation.
    ///
    /// Tabs are not trimmed and are therefore rejected as non-printable.
    pub fn parse_input(line: &str) -> Result<Self, UsernameError> {
        Self::new(line.trim_matches([' ', '\r', '\n']).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_non_printable(c: char) -> bool {
    let code = u32::from(c);
    code <= 32 || code == 127
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
