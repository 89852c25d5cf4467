pub type CoreResult<T> = Result<T, CoreError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid pattern '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },

    #[error("unknown ease '{0}'")]
    UnknownEase(String),

    #[error("invalid field params: {0}")]
    InvalidParams(String),

    #[error("pattern set is empty")]
    NoPatterns,
}

impl CoreError {
    pub fn pattern(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn params(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_pattern() {
        let msg = CoreError::pattern("pulse", "duration must be positive").to_string();
        assert!(msg.contains("'pulse'"));
        assert!(msg.contains("duration must be positive"));
    }

    #[test]
    fn unknown_ease_quotes_input() {
        assert_eq!(
            CoreError::UnknownEase("wobble".into()).to_string(),
            "unknown ease 'wobble'"
        );
    }
}
