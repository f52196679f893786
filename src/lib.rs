//! Typed Rust client for the Twilio SMS REST API.
//!
//! The crate is split into a domain layer of strong types, a transport layer
//! for Twilio's wire-format quirks (form encoding, the `message` error field),
//! and a small client layer issuing authenticated requests.
//!
//! ```rust,no_run
//! use twilio_sms::{Credentials, MessageBody, RawPhoneNumber, TwilioClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), twilio_sms::TwilioError> {
//!     let client = TwilioClient::builder(Credentials::new("AC...", "...")?)
//!         .default_from(RawPhoneNumber::new("+15550000001")?)
//!         .build()?;
//!     let to = RawPhoneNumber::new("+15551234567")?;
//!     let _message = client.send(to, MessageBody::new("hello")?).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Credentials, TwilioClient, TwilioClientBuilder, TwilioError};
pub use domain::{
    AccountSid, AuthToken, AvailableNumber, CallbackUrl, Capabilities, CountryCode, Message,
    MessageBody, MessageFilter, MessageSid, NumberSearch, PhoneNumber, ProviderError,
    PurchaseNumber, RawPhoneNumber, SendMessage, Thread, ValidationError,
};
