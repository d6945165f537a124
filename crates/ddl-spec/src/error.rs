//! Error types for the specification model
//!
//! Provides error handling for:
//! - Parsing specification text into a document
//! - Building specification documents from blueprints

/// Errors while reading a specification document
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    /// Input text is not well-formed JSON
    #[error("malformed specification: {message}")]
    MalformedSpecification { message: String },

    /// Input is well-formed but its root is not an object
    #[error("specification root must be an object, found {found}")]
    InvalidRoot { found: &'static str },
}

impl SpecError {
    /// Create malformed specification error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedSpecification {
            message: message.into(),
        }
    }

    /// Parser-facing message, without the error kind prefix
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::MalformedSpecification { message } => message.clone(),
            Self::InvalidRoot { .. } => self.to_string(),
        }
    }
}

impl From<serde_json::Error> for SpecError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed(err.to_string())
    }
}

/// Errors while building a specification from a blueprint
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Agent name is empty
    #[error("agent name must not be empty")]
    EmptyAgentName,

    /// Tool is missing parts needed to describe its resource
    #[error("tool {tool}: missing required fields: {}", fields.join(", "))]
    MissingFields {
        tool: String,
        fields: Vec<&'static str>,
    },
}

impl BuildError {
    /// Create missing fields error for tool
    pub fn missing_fields(tool: impl Into<String>, fields: Vec<&'static str>) -> Self {
        Self::MissingFields {
            tool: tool.into(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display() {
        let err = SpecError::malformed("expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "malformed specification: expected value at line 1 column 1"
        );
        assert_eq!(err.detail(), "expected value at line 1 column 1");
    }

    #[test]
    fn invalid_root_display() {
        let err = SpecError::InvalidRoot { found: "array" };
        assert_eq!(
            err.detail(),
            "specification root must be an object, found array"
        );
    }

    #[test]
    fn from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SpecError = json_err.into();
        assert!(matches!(err, SpecError::MalformedSpecification { .. }));
    }

    #[test]
    fn missing_fields_lists_every_field() {
        let err = BuildError::missing_fields("Sales", vec!["stage", "schema"]);
        assert_eq!(
            err.to_string(),
            "tool Sales: missing required fields: stage, schema"
        );
    }
}
