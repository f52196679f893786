use serde::Deserialize;

use super::envelope::{Reply, TransportError, decode_reply};
use super::text::TransportText;
use crate::domain::{Message, MessageBody, MessageFilter, SendMessage};

const TO: &str = "To";
const FROM: &str = "From";
const PAGE_SIZE: &str = "PageSize";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct MessageJson {
    sid: Option<String>,
    account_sid: Option<String>,
    date_created: Option<String>,
    date_updated: Option<String>,
    date_sent: Option<String>,
    to: Option<String>,
    from: Option<String>,
    body: Option<String>,
    direction: Option<String>,
    status: Option<TransportText>,
    num_segments: Option<TransportText>,
    price: Option<TransportText>,
    price_unit: Option<String>,
    uri: Option<String>,
}

impl From<MessageJson> for Message {
    fn from(value: MessageJson) -> Self {
        Self {
            sid: value.sid.unwrap_or_default(),
            account_sid: value.account_sid.unwrap_or_default(),
            date_created: value.date_created.unwrap_or_default(),
            date_updated: value.date_updated.unwrap_or_default(),
            date_sent: value.date_sent.unwrap_or_default(),
            to: value.to.unwrap_or_default(),
            from: value.from.unwrap_or_default(),
            body: value.body.unwrap_or_default(),
            direction: value.direction.unwrap_or_default(),
            status: value
                .status
                .map(TransportText::into_string)
                .unwrap_or_default(),
            num_segments: value.num_segments.map(TransportText::into_string),
            price: value.price.map(TransportText::into_string),
            price_unit: value.price_unit,
            uri: value.uri.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct MessageListJson {
    messages: Vec<MessageJson>,
}

/// `To`, `From`, `Body`, in that order.
pub fn encode_send_message_form(request: &SendMessage) -> Vec<(String, String)> {
    vec![
        (TO.to_owned(), request.to().raw().to_owned()),
        (FROM.to_owned(), request.from().raw().to_owned()),
        (
            MessageBody::FIELD.to_owned(),
            request.body().as_str().to_owned(),
        ),
    ]
}

pub fn encode_message_filter_query(filter: &MessageFilter) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();
    if let Some(to) = filter.to.as_ref() {
        params.push((TO.to_owned(), to.raw().to_owned()));
    }
    if let Some(from) = filter.from.as_ref() {
        params.push((FROM.to_owned(), from.raw().to_owned()));
    }
    if let Some(page_size) = filter.page_size {
        params.push((PAGE_SIZE.to_owned(), page_size.to_string()));
    }
    params
}

pub fn decode_message_json_response(json: &str) -> Result<Reply<Message>, TransportError> {
    let reply = decode_reply::<MessageJson>(json)?;
    Ok(reply.map(Message::from))
}

pub fn decode_message_list_json_response(
    json: &str,
) -> Result<Reply<Vec<Message>>, TransportError> {
    let reply = decode_reply::<MessageListJson>(json)?;
    Ok(reply.map(|list| list.messages.into_iter().map(Message::from).collect()))
}

#[cfg(test)]
mod tests {
    use crate::domain::{MessageBody, RawPhoneNumber};

    use super::*;

    fn phone(value: &str) -> RawPhoneNumber {
        RawPhoneNumber::new(value).unwrap()
    }

    #[test]
    fn encode_send_form_keeps_to_from_body_order() {
        let request = SendMessage::new(
            phone("+15557654321"),
            phone("+15551234567"),
            MessageBody::new("see you at 5?").unwrap(),
        );

        assert_eq!(
            encode_send_message_form(&request),
            vec![
                ("To".to_owned(), "+15551234567".to_owned()),
                ("From".to_owned(), "+15557654321".to_owned()),
                ("Body".to_owned(), "see you at 5?".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_filter_skips_unset_sides() {
        assert!(encode_message_filter_query(&MessageFilter::default()).is_empty());

        let filter = MessageFilter {
            to: Some(phone("+15551234567")),
            ..Default::default()
        };
        assert_eq!(
            encode_message_filter_query(&filter),
            vec![("To".to_owned(), "+15551234567".to_owned())]
        );

        let filter = MessageFilter::between(phone("+1555000111"), phone("+1555000222"));
        assert_eq!(
            encode_message_filter_query(&filter),
            vec![
                ("To".to_owned(), "+1555000222".to_owned()),
                ("From".to_owned(), "+1555000111".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_filter_includes_page_size() {
        let filter = MessageFilter {
            page_size: Some(200),
            ..Default::default()
        };
        assert_eq!(
            encode_message_filter_query(&filter),
            vec![("PageSize".to_owned(), "200".to_owned())]
        );
    }

    #[test]
    fn decode_message_maps_provider_fields() {
        let json = r#"
        {
          "sid": "SM1234",
          "account_sid": "AC1234",
          "date_created": "Wed, 18 Aug 2010 20:01:40 +0000",
          "date_updated": "Wed, 18 Aug 2010 20:01:41 +0000",
          "date_sent": null,
          "to": "+15551234567",
          "from": "+15557654321",
          "body": "hello",
          "direction": "outbound-api",
          "status": "queued",
          "num_segments": "1",
          "price": null,
          "price_unit": "USD",
          "error_code": null,
          "error_message": null,
          "uri": "/2010-04-01/Accounts/AC1234/Messages/SM1234.json"
        }
        "#;

        let message = match decode_message_json_response(json).unwrap() {
            Reply::Success(message) => message,
            other => panic!("unexpected reply: {other:?}"),
        };
        assert_eq!(message.sid, "SM1234");
        assert_eq!(message.account_sid, "AC1234");
        assert_eq!(message.date_sent, "");
        assert_eq!(message.to, "+15551234567");
        assert_eq!(message.from, "+15557654321");
        assert_eq!(message.body, "hello");
        assert_eq!(message.direction, "outbound-api");
        assert_eq!(message.status, "queued");
        assert_eq!(message.num_segments.as_deref(), Some("1"));
        assert_eq!(message.price, None);
        assert_eq!(message.price_unit.as_deref(), Some("USD"));
        assert_eq!(
            message.uri,
            "/2010-04-01/Accounts/AC1234/Messages/SM1234.json"
        );
        assert!(message.created_at().is_some());
    }

    #[test]
    fn decode_message_surfaces_provider_error_with_numeric_status() {
        let json = r#"
        {
          "code": 21211,
          "message": "The 'To' number +1555 is not a valid phone number.",
          "more_info": "https://www.twilio.com/docs/errors/21211",
          "status": 400
        }
        "#;

        match decode_message_json_response(json).unwrap() {
            Reply::Failure(err) => {
                assert_eq!(
                    err.message,
                    "The 'To' number +1555 is not a valid phone number."
                );
                assert_eq!(err.code, Some(21211));
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[test]
    fn decode_message_list_reads_messages_array() {
        let json = r#"
        {
          "first_page_uri": "/2010-04-01/Accounts/AC1/Messages.json?PageSize=50&Page=0",
          "next_page_uri": null,
          "page": 0,
          "page_size": 50,
          "messages": [
            {"sid": "SM1", "date_sent": "Mon, 01 Jan 2024 10:00:00 +0000", "price": "-0.00750"},
            {"sid": "SM2", "date_sent": "Mon, 01 Jan 2024 11:00:00 +0000", "price": -0.0075}
          ]
        }
        "#;

        let messages = match decode_message_list_json_response(json).unwrap() {
            Reply::Success(messages) => messages,
            other => panic!("unexpected reply: {other:?}"),
        };
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sid, "SM1");
        assert_eq!(messages[0].price.as_deref(), Some("-0.00750"));
        assert_eq!(messages[1].sid, "SM2");
        assert_eq!(messages[1].price.as_deref(), Some("-0.0075"));
    }

    #[test]
    fn decode_message_list_without_array_is_empty() {
        match decode_message_list_json_response("{}").unwrap() {
            Reply::Success(messages) => assert!(messages.is_empty()),
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[test]
    fn decode_message_list_rejects_wrong_shape() {
        assert!(decode_message_list_json_response(r#"{"messages": "nope"}"#).is_err());
        assert!(decode_message_list_json_response("not json").is_err());
    }
}
