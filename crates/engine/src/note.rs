use std::fmt;

use crate::{EngineError, ResultEngine};

/// Free-text description attached to a record.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Note(String);

impl Note {
    pub const MAX_LEN: usize = 500;

    /// Trims `text` and validates it is non-empty and at most 500 characters.
    pub fn new(text: &str) -> ResultEngine<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidNote);
        }
        let len = trimmed.chars().count();
        if len > Self::MAX_LEN {
            return Err(EngineError::NoteTooLong {
                len,
                max: Self::MAX_LEN,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_text() {
        assert_eq!(Note::new("  Groceries  ").unwrap().as_str(), "Groceries");
    }

    #[test]
    fn rejects_blank() {
        assert_eq!(Note::new(" \t "), Err(EngineError::InvalidNote));
    }

    #[test]
    fn length_limit_counts_characters() {
        assert!(Note::new(&"é".repeat(500)).is_ok());
        assert_eq!(
            Note::new(&"a".repeat(501)),
            Err(EngineError::NoteTooLong { len: 501, max: 500 })
        );
    }
}
