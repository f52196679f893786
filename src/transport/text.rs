use serde::Deserialize;

/// Scalar Twilio sometimes returns as a JSON string and sometimes as a number
/// (`price`, `num_segments`, and `status` on error bodies).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(super) enum TransportText {
    String(String),
    Number(serde_json::Number),
}

impl TransportText {
    pub(super) fn into_string(self) -> String {
        match self {
            Self::String(value) => value,
            Self::Number(value) => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_strings_and_numbers() {
        let value: TransportText = serde_json::from_str(r#""-0.00750""#).unwrap();
        assert_eq!(value.into_string(), "-0.00750");

        let value: TransportText = serde_json::from_str("2").unwrap();
        assert_eq!(value.into_string(), "2");
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(serde_json::from_str::<TransportText>("true").is_err());
        assert!(serde_json::from_str::<TransportText>("{}").is_err());
    }
}
