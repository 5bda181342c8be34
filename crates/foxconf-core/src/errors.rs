use std::fmt;

use thiserror::Error;

/// Result type alias using SubsystemError
pub type Result<T> = std::result::Result<T, SubsystemError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every [`SubsystemError`] variant maps to exactly one kind. Each kind maps
/// to a stable error code that can be used for programmatic error handling,
/// testing, and reporting back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // Parse-time
    /// An element, attribute or namespace absent from the vocabulary
    UnknownToken,
    /// A known token in a position the schema forbids, or malformed markup
    MalformedStructure,

    // Apply-time
    /// An enumerated attribute holds a value outside its legal set
    InvalidEnumValue,
    /// An Add targets an address that is already occupied
    DuplicateResource,
    /// An Add that does not fit the resource tree (missing parent, undeclared attribute)
    InvalidOperation,

    // Integration/IO
    Io,
    Serialization,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::UnknownToken => "ERR_UNKNOWN_TOKEN",
            ErrorKind::MalformedStructure => "ERR_MALFORMED_STRUCTURE",
            ErrorKind::InvalidEnumValue => "ERR_INVALID_ENUM_VALUE",
            ErrorKind::DuplicateResource => "ERR_DUPLICATE_RESOURCE",
            ErrorKind::InvalidOperation => "ERR_INVALID_OPERATION",
            ErrorKind::Io => "ERR_IO",
            ErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// 1-based line/column location inside a configuration document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Resolve a byte offset into `input` to a line/column pair
    pub fn from_offset(input: &str, offset: usize) -> Self {
        let offset = offset.min(input.len());
        let mut line = 1;
        let mut line_start = 0;
        for (idx, byte) in input.as_bytes()[..offset].iter().enumerate() {
            if *byte == b'\n' {
                line += 1;
                line_start = idx + 1;
            }
        }
        let column = input
            .get(line_start..offset)
            .map_or(offset - line_start, |s| s.chars().count())
            + 1;
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for parsing, applying and marshalling subsystem configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubsystemError {
    // ===== Parse Errors: unknown tokens =====
    /// Element name not in the vocabulary
    #[error("Unknown element '{name}' at {position}")]
    UnknownElement { name: String, position: Position },

    /// Attribute name not in the vocabulary
    #[error("Unknown attribute '{name}' on element '{element}' at {position}")]
    UnknownAttribute {
        name: String,
        element: String,
        position: Position,
    },

    /// Subsystem namespace not supported
    #[error("Unknown namespace '{uri}' at {position}")]
    UnknownNamespace { uri: String, position: Position },

    // ===== Parse Errors: structure =====
    /// Known element in a position the schema forbids
    #[error("Unexpected element '{element}' inside '{parent}' at {position}")]
    UnexpectedElement {
        element: String,
        parent: String,
        position: Position,
    },

    /// Known attribute on an element that does not accept it
    #[error("Unexpected attribute '{attribute}' on element '{element}' at {position}")]
    UnexpectedAttribute {
        attribute: String,
        element: String,
        position: Position,
    },

    /// Required markup attribute is missing
    #[error("Missing required attribute '{attribute}' on element '{element}' at {position}")]
    MissingAttribute {
        attribute: String,
        element: String,
        position: Position,
    },

    /// Required child element is missing
    #[error("Missing required element '{element}' inside '{parent}' at {position}")]
    MissingElement {
        element: String,
        parent: String,
        position: Position,
    },

    /// Element that may appear at most once appeared again
    #[error("Duplicate element '{element}' inside '{parent}' at {position}")]
    DuplicateElement {
        element: String,
        parent: String,
        position: Position,
    },

    /// Non-whitespace text inside a container element
    #[error("Unexpected text content inside '{element}' at {position}")]
    UnexpectedText { element: String, position: Position },

    /// Markup attribute with a value of the wrong shape (e.g. non-boolean `default`)
    #[error("Invalid value '{value}' for attribute '{attribute}' at {position}: {reason}")]
    InvalidAttributeValue {
        attribute: String,
        value: String,
        reason: String,
        position: Position,
    },

    /// The document is not well-formed markup
    #[error("Malformed document at {position}: {message}")]
    Xml { message: String, position: Position },

    // ===== Apply Errors =====
    /// Enumerated attribute value outside its legal set
    #[error("Invalid value '{value}' for attribute '{attribute}', expected one of: {allowed}")]
    InvalidEnumValue {
        attribute: String,
        value: String,
        allowed: String,
    },

    /// Address already occupied
    #[error("A {resource_type} with name '{name}' already exists.")]
    DuplicateResource { resource_type: String, name: String },

    /// Parent of the target address does not exist
    #[error("Cannot add {address}: parent resource {parent} does not exist")]
    ParentNotFound { address: String, parent: String },

    /// Attribute not declared for the target resource type
    #[error("Attribute '{attribute}' is not declared for resource type '{resource_type}'")]
    UndeclaredAttribute {
        attribute: String,
        resource_type: String,
    },

    /// Attribute value has the wrong shape for its declaration
    #[error("Attribute '{attribute}' of resource {address} expects {expected}, got {actual}")]
    AttributeTypeMismatch {
        address: String,
        attribute: String,
        expected: String,
        actual: String,
    },

    /// Address that does not match any resource type layout
    #[error("Invalid resource address: {address}")]
    InvalidAddress { address: String },

    // ===== Generic Errors =====
    /// IO error reading or writing a document
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization error (JSON encoding, markup writing)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl SubsystemError {
    /// Classify this error into its canonical kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            SubsystemError::UnknownElement { .. }
            | SubsystemError::UnknownAttribute { .. }
            | SubsystemError::UnknownNamespace { .. } => ErrorKind::UnknownToken,

            SubsystemError::UnexpectedElement { .. }
            | SubsystemError::UnexpectedAttribute { .. }
            | SubsystemError::MissingAttribute { .. }
            | SubsystemError::MissingElement { .. }
            | SubsystemError::DuplicateElement { .. }
            | SubsystemError::UnexpectedText { .. }
            | SubsystemError::InvalidAttributeValue { .. }
            | SubsystemError::Xml { .. } => ErrorKind::MalformedStructure,

            SubsystemError::InvalidEnumValue { .. } => ErrorKind::InvalidEnumValue,
            SubsystemError::DuplicateResource { .. } => ErrorKind::DuplicateResource,

            SubsystemError::ParentNotFound { .. }
            | SubsystemError::UndeclaredAttribute { .. }
            | SubsystemError::AttributeTypeMismatch { .. }
            | SubsystemError::InvalidAddress { .. } => ErrorKind::InvalidOperation,

            SubsystemError::Io { .. } => ErrorKind::Io,
            SubsystemError::Serialization { .. } => ErrorKind::Serialization,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Document position of a parse error, if any
    pub fn position(&self) -> Option<Position> {
        match self {
            SubsystemError::UnknownElement { position, .. }
            | SubsystemError::UnknownAttribute { position, .. }
            | SubsystemError::UnknownNamespace { position, .. }
            | SubsystemError::UnexpectedElement { position, .. }
            | SubsystemError::UnexpectedAttribute { position, .. }
            | SubsystemError::MissingAttribute { position, .. }
            | SubsystemError::MissingElement { position, .. }
            | SubsystemError::DuplicateElement { position, .. }
            | SubsystemError::UnexpectedText { position, .. }
            | SubsystemError::InvalidAttributeValue { position, .. }
            | SubsystemError::Xml { position, .. } => Some(*position),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SubsystemError {
    fn from(err: std::io::Error) -> Self {
        SubsystemError::Io {
            message: err.to_string(),
        }
    }
}

/// Conversion from serde_json::Error to SubsystemError
impl From<serde_json::Error> for SubsystemError {
    fn from(err: serde_json::Error) -> Self {
        SubsystemError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ErrorKind::UnknownToken, "ERR_UNKNOWN_TOKEN"),
            (ErrorKind::MalformedStructure, "ERR_MALFORMED_STRUCTURE"),
            (ErrorKind::InvalidEnumValue, "ERR_INVALID_ENUM_VALUE"),
            (ErrorKind::DuplicateResource, "ERR_DUPLICATE_RESOURCE"),
            (ErrorKind::InvalidOperation, "ERR_INVALID_OPERATION"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_duplicate_resource_message_format() {
        let err = SubsystemError::DuplicateResource {
            resource_type: "process engine".to_string(),
            name: "__test".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "A process engine with name '__test' already exists."
        );
        assert_eq!(err.kind(), ErrorKind::DuplicateResource);
        assert!(err.position().is_none());
    }

    #[test]
    fn test_position_from_offset() {
        let input = "<a>\n  <b/>\n</a>";
        assert_eq!(Position::from_offset(input, 0), Position { line: 1, column: 1 });
        assert_eq!(Position::from_offset(input, 6), Position { line: 2, column: 3 });
        assert_eq!(
            Position::from_offset(input, 1_000),
            Position { line: 3, column: 5 }
        );
    }

    #[test]
    fn test_parse_errors_carry_position() {
        let err = SubsystemError::UnknownElement {
            name: "engine".to_string(),
            position: Position { line: 4, column: 9 },
        };
        assert_eq!(err.kind(), ErrorKind::UnknownToken);
        assert_eq!(err.position(), Some(Position { line: 4, column: 9 }));
        assert!(err.to_string().contains("line 4, column 9"));
    }
}
