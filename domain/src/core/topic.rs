//! Topic value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The subject of the debate (Value Object)
///
/// Set once at session start and read by every node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    content: String,
}

impl Topic {
    /// Create a topic, rejecting empty or whitespace-only content
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidConfiguration(
                "topic cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Topic {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Topic::new(s)
    }
}

impl TryFrom<String> for Topic {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Topic::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_creation() {
        let topic = Topic::new("Should AI be regulated like medicine?").unwrap();
        assert_eq!(topic.content(), "Should AI be regulated like medicine?");
    }

    #[test]
    fn test_topic_is_trimmed() {
        let topic = Topic::new("  free will  \n").unwrap();
        assert_eq!(topic.content(), "free will");
    }

    #[test]
    fn test_empty_topic_rejected() {
        assert!(matches!(
            Topic::new(""),
            Err(DomainError::InvalidConfiguration(_))
        ));
        assert!(Topic::new("   \t").is_err());
    }

    #[test]
    fn test_try_from() {
        let topic: Topic = "Is math discovered?".try_into().unwrap();
        assert_eq!(topic.to_string(), "Is math discovered?");
    }
}
