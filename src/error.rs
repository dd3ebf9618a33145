use crate::serialization::TypeTag;

/// Why a document could not be read as a JSON object with a numeric field.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    #[error("not a JSON object")]
    NotAnObject,

    #[error("field {field} is not a number")]
    NotANumber { field: String },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed document: {0}")]
    MalformedDocument(#[from] DocumentError),

    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Buffer underflow: need {needed} bytes, {remaining} remaining")]
    BufferUnderflow { needed: usize, remaining: usize },

    #[error("Invalid UTF-8 string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid length prefix: {0}")]
    InvalidLength(i32),

    #[error("Length {0} does not fit an i32 prefix")]
    LengthOverflow(usize),

    #[error("Only identified data serializable objects are supported")]
    NotIdentified,

    #[error("No decoder registered for factory id: {0}")]
    UnknownFactory(i32),

    #[error("No decoder registered for {0}")]
    UnknownType(TypeTag),

    #[error("Decoder already registered for {0}")]
    DuplicateTypeTag(TypeTag),

    #[error("Decoded {found}, expected {expected}")]
    UnexpectedType { expected: TypeTag, found: TypeTag },

    #[error("Invalid {kind} value: {value}")]
    InvalidEnumValue { kind: &'static str, value: i32 },

    #[error("Page size must be greater than 0, got {0}")]
    InvalidPageSize(i32),

    #[error("Page must be positive or 0, got {0}")]
    InvalidPage(i32),

    #[error("Unknown iteration type: {0}")]
    UnknownIterationType(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedDocument(DocumentError::Parse(err))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
