use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// A sent or received SMS as reported by Twilio.
///
/// Timestamps and most fields are passed through as the provider formats them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    pub sid: String,
    pub account_sid: String,
    pub date_created: String,
    pub date_updated: String,
    pub date_sent: String,
    pub to: String,
    pub from: String,
    pub body: String,
    pub direction: String,
    pub status: String,
    pub num_segments: Option<String>,
    pub price: Option<String>,
    pub price_unit: Option<String>,
    pub uri: String,
}

impl Message {
    /// Parse `date_sent` (RFC 2822, e.g. `Wed, 18 Aug 2010 20:01:40 +0000`).
    ///
    /// Returns `None` when the field is empty or not in the provider's format.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        parse_provider_time(&self.date_sent)
    }

    /// Parse `date_created` with the same format as [`Message::sent_at`].
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_provider_time(&self.date_created)
    }
}

fn parse_provider_time(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|it| it.with_timezone(&Utc))
}

/// Messages exchanged between two numbers, most recent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Thread {
    pub messages: Vec<Message>,
}

impl Thread {
    /// Concatenate both directions and order by sent time, descending.
    ///
    /// Messages without a parseable `date_sent` sort as the earliest instant.
    /// Ties keep their concatenation order (`forward` before `reverse`).
    pub fn merge(forward: Vec<Message>, reverse: Vec<Message>) -> Self {
        let mut messages = forward;
        messages.extend(reverse);

        for message in &messages {
            if !message.date_sent.trim().is_empty() && message.sent_at().is_none() {
                tracing::warn!(
                    sid = %message.sid,
                    date_sent = %message.date_sent,
                    "unparseable date_sent; ordering message as earliest"
                );
            }
        }

        messages.sort_by_cached_key(|message| Reverse(message.sent_at()));
        Self { messages }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

impl IntoIterator for Thread {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Capabilities {
    pub voice: bool,
    pub sms: bool,
    pub mms: bool,
}

/// A phone number offered for purchase, or the number resource returned after buying one.
///
/// Fields Twilio returns that are not modeled here are kept in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailableNumber {
    pub sid: Option<String>,
    pub account_sid: Option<String>,
    pub friendly_name: String,
    pub phone_number: String,
    pub region: Option<String>,
    pub iso_country: Option<String>,
    pub sms_url: Option<String>,
    pub date_created: Option<String>,
    pub date_updated: Option<String>,
    pub capabilities: Capabilities,
    pub beta: bool,
    pub api_version: Option<String>,
    pub uri: Option<String>,
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Error reported by Twilio in a response body.
///
/// Displays as exactly the provider's `message`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
    pub code: Option<i64>,
    pub more_info: Option<String>,
    pub status: Option<u16>,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            more_info: None,
            status: None,
        }
    }
}
