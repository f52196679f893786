//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod envelope;
mod messages;
mod numbers;
mod text;

pub use envelope::{Reply, TransportError};
pub use messages::{
    decode_message_json_response, decode_message_list_json_response,
    encode_message_filter_query, encode_send_message_form,
};
pub use numbers::{
    decode_available_numbers_json_response, decode_incoming_number_json_response,
    encode_number_search_query, encode_purchase_number_form,
};

/// Encode ordered form params as an `application/x-www-form-urlencoded` body.
///
/// Keys and values are escaped independently and keep their order.
pub fn encode_form_body(params: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_body_escapes_each_value_and_keeps_order() {
        let params = vec![
            ("To".to_owned(), "+15551234567".to_owned()),
            ("From".to_owned(), "+15557654321".to_owned()),
            ("Body".to_owned(), "hi & bye = 100%".to_owned()),
        ];

        assert_eq!(
            encode_form_body(&params),
            "To=%2B15551234567&From=%2B15557654321&Body=hi+%26+bye+%3D+100%25"
        );
    }

    #[test]
    fn form_body_of_no_params_is_empty() {
        assert_eq!(encode_form_body(&[]), "");
    }
}
