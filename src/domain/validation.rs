use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    IdTooLong { max: usize, actual: usize },
    PageSizeOutOfRange { min: u32, max: u32, actual: u32 },
    InvalidPhoneNumber { input: String },
    InvalidBaseUrl { input: String },
    MissingEnvVar { name: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::IdTooLong { max, actual } => {
                write!(f, "id too long: {actual} characters (max {max})")
            }
            Self::PageSizeOutOfRange { min, max, actual } => {
                write!(f, "page size out of range: {actual} (expected {min}..={max})")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidBaseUrl { input } => write!(f, "invalid base url: {input}"),
            Self::MissingEnvVar { name } => {
                write!(f, "{name} environment variable is required")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
