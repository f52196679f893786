use crate::domain::value::{CallbackUrl, CountryCode, MessageBody, RawPhoneNumber};

/// One outbound text message.
#[derive(Debug, Clone)]
pub struct SendMessage {
    from: RawPhoneNumber,
    to: RawPhoneNumber,
    body: MessageBody,
}

impl SendMessage {
    pub fn new(from: RawPhoneNumber, to: RawPhoneNumber, body: MessageBody) -> Self {
        Self { from, to, body }
    }

    pub fn from(&self) -> &RawPhoneNumber {
        &self.from
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn body(&self) -> &MessageBody {
        &self.body
    }
}

/// Filter for listing messages. Unset sides are not constrained.
#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    pub from: Option<RawPhoneNumber>,
    pub to: Option<RawPhoneNumber>,
    /// `PageSize`; Twilio returns 50 messages per page when unset.
    pub page_size: Option<u32>,
}

impl MessageFilter {
    /// Messages sent from `from` to `to`, one direction only.
    pub fn between(from: RawPhoneNumber, to: RawPhoneNumber) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            page_size: None,
        }
    }
}

/// Constraints for searching purchasable local numbers.
///
/// The default searches the `US` inventory for SMS-capable numbers in any region.
#[derive(Debug, Clone)]
pub struct NumberSearch {
    pub country: CountryCode,
    /// Two-letter state/province (`InRegion`), e.g. `TX`.
    pub in_region: Option<String>,
    pub sms_enabled: Option<bool>,
    pub mms_enabled: Option<bool>,
    pub voice_enabled: Option<bool>,
}

impl Default for NumberSearch {
    fn default() -> Self {
        Self {
            country: CountryCode::default(),
            in_region: None,
            sms_enabled: Some(true),
            mms_enabled: None,
            voice_enabled: None,
        }
    }
}

impl NumberSearch {
    pub fn in_region(mut self, region: impl Into<String>) -> Self {
        self.in_region = Some(region.into());
        self
    }
}

/// Purchase request for a number returned by a search.
#[derive(Debug, Clone)]
pub struct PurchaseNumber {
    phone_number: RawPhoneNumber,
    sms_url: Option<CallbackUrl>,
}

impl PurchaseNumber {
    pub fn new(phone_number: RawPhoneNumber, sms_url: Option<CallbackUrl>) -> Self {
        Self {
            phone_number,
            sms_url,
        }
    }

    pub fn phone_number(&self) -> &RawPhoneNumber {
        &self.phone_number
    }

    pub fn sms_url(&self) -> Option<&CallbackUrl> {
        self.sms_url.as_ref()
    }
}
