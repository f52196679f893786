//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{MessageFilter, NumberSearch, PurchaseNumber, SendMessage};
pub use response::{AvailableNumber, Capabilities, Message, ProviderError, Thread};
pub use validation::ValidationError;
pub use value::{
    AccountSid, AuthToken, CallbackUrl, CountryCode, MessageBody, MessageSid, PhoneNumber,
    RawPhoneNumber,
};
