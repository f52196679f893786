use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    InvalidUrl { input: String },
    InvalidCountryCode { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidUrl { input } => write!(f, "invalid callback url: {input}"),
            Self::InvalidCountryCode { input } => {
                write!(f, "invalid country code: {input} (expected two letters)")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "To" };
        assert_eq!(err.to_string(), "To must not be empty");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");

        let err = ValidationError::InvalidUrl {
            input: "nope".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid callback url: nope");

        let err = ValidationError::InvalidCountryCode {
            input: "USA".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "invalid country code: USA (expected two letters)"
        );
    }
}
