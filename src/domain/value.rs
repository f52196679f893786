use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Twilio account SID.
///
/// Used both as the basic-auth username and as the `Accounts/{sid}` path segment.
///
/// Invariant: non-empty after trimming.
pub struct AccountSid(String);

impl AccountSid {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "AccountSid";

    /// Create a validated [`AccountSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated SID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Auth token paired with an [`AccountSid`].
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct AuthToken(String);

impl AuthToken {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "AuthToken";

    /// Create a validated [`AuthToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the token as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS body text (`Body`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageBody(String);

impl MessageBody {
    /// Form field name used by Twilio (`Body`).
    pub const FIELD: &'static str = "Body";

    /// Create a validated message body.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the body as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Twilio message SID (`SM...`).
///
/// Invariant: non-empty after trimming.
pub struct MessageSid(String);

impl MessageSid {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "MessageSid";

    /// Create a validated [`MessageSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated message SID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number as sent to Twilio (`To`, `From`, `PhoneNumber`).
///
/// Invariant: non-empty after trimming. No further normalization is applied;
/// use [`PhoneNumber`] to parse into E.164 first.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "PhoneNumber";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to Twilio.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Twilio expects E.164, so the normalized form is what goes on the wire.
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "PhoneNumber";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Webhook URL template Twilio calls for inbound SMS on a purchased number (`SmsUrl`).
///
/// Invariant: an absolute `http` or `https` URL. The original string is sent verbatim.
pub struct CallbackUrl(String);

impl CallbackUrl {
    /// Form field name used by Twilio (`SmsUrl`).
    pub const FIELD: &'static str = "SmsUrl";

    /// Create a validated [`CallbackUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = url::Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl {
            input: trimmed.to_owned(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidUrl {
                input: trimmed.to_owned(),
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the URL as provided (trimmed).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// ISO 3166-1 alpha-2 country code used in the number search path.
///
/// Invariant: exactly two ASCII letters, stored upper-cased.
pub struct CountryCode(String);

impl CountryCode {
    /// Create a validated [`CountryCode`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.len() != 2 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCountryCode {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn us() -> Self {
        Self("US".to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CountryCode {
    fn default() -> Self {
        Self::us()
    }
}
