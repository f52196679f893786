use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of decoding one Twilio response body.
///
/// Twilio reports failures as an object with a `message` field instead of the
/// expected resource, so every body is decoded once and then classified here.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Success(T),
    Failure(ProviderError),
}

impl<T> Reply<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        match self {
            Self::Success(value) => Reply::Success(f(value)),
            Self::Failure(err) => Reply::Failure(err),
        }
    }
}

/// Error fields laid next to the expected payload.
///
/// The payload types keep every field optional or defaulted so that an error
/// body still decodes; `status` is left to the payload because resources use
/// it for their own (string) status.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    more_info: Option<String>,
    #[serde(flatten)]
    payload: T,
}

pub(super) fn decode_reply<T: DeserializeOwned>(json: &str) -> Result<Reply<T>, TransportError> {
    let parsed: Envelope<T> = serde_json::from_str(json)?;

    match parsed.message {
        Some(message) if !message.is_empty() => Ok(Reply::Failure(ProviderError {
            message,
            code: parsed.code,
            more_info: parsed.more_info,
            status: None,
        })),
        _ => Ok(Reply::Success(parsed.payload)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Payload {
        sid: String,
    }

    #[test]
    fn message_field_turns_reply_into_failure() {
        let json = r#"
        {
          "code": 21211,
          "message": "invalid number",
          "more_info": "https://www.twilio.com/docs/errors/21211",
          "status": 400
        }
        "#;

        let reply = decode_reply::<Payload>(json).unwrap();
        match reply {
            Reply::Failure(err) => {
                assert_eq!(err.message, "invalid number");
                assert_eq!(err.code, Some(21211));
                assert_eq!(
                    err.more_info.as_deref(),
                    Some("https://www.twilio.com/docs/errors/21211")
                );
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[test]
    fn missing_or_empty_message_is_success() {
        let reply = decode_reply::<Payload>(r#"{"sid": "SM1"}"#).unwrap();
        assert_eq!(
            reply,
            Reply::Success(Payload {
                sid: "SM1".to_owned()
            })
        );

        let reply = decode_reply::<Payload>(r#"{"sid": "SM2", "message": ""}"#).unwrap();
        assert!(matches!(reply, Reply::Success(_)));

        let reply = decode_reply::<Payload>(r#"{"sid": "SM3", "message": null}"#).unwrap();
        assert!(matches!(reply, Reply::Success(_)));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            decode_reply::<Payload>("{ not json }"),
            Err(TransportError::Json(_))
        ));
        assert!(decode_reply::<Payload>("[]").is_err());
    }

    #[test]
    fn reply_map_leaves_failures_untouched() {
        let ok: Reply<u8> = Reply::Success(1);
        assert_eq!(ok.map(|it| it + 1), Reply::Success(2));

        let failed: Reply<u8> = Reply::Failure(ProviderError::new("boom"));
        assert_eq!(
            failed.map(|it| it + 1),
            Reply::Failure(ProviderError::new("boom"))
        );
    }
}
