use std::collections::BTreeMap;

use serde::Deserialize;

use super::envelope::{Reply, TransportError, decode_reply};
use crate::domain::{
    AvailableNumber, CallbackUrl, Capabilities, NumberSearch, PurchaseNumber, RawPhoneNumber,
};

const IN_REGION: &str = "InRegion";
const SMS_ENABLED: &str = "SmsEnabled";
const MMS_ENABLED: &str = "MmsEnabled";
const VOICE_ENABLED: &str = "VoiceEnabled";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CapabilitiesJson {
    voice: bool,
    // Search results spell these `SMS`/`MMS`, number resources `sms`/`mms`.
    #[serde(alias = "SMS")]
    sms: bool,
    #[serde(alias = "MMS")]
    mms: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AvailableNumberJson {
    sid: Option<String>,
    account_sid: Option<String>,
    friendly_name: Option<String>,
    phone_number: Option<String>,
    region: Option<String>,
    iso_country: Option<String>,
    sms_url: Option<String>,
    date_created: Option<String>,
    date_updated: Option<String>,
    capabilities: Option<CapabilitiesJson>,
    beta: Option<bool>,
    api_version: Option<String>,
    uri: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

impl From<AvailableNumberJson> for AvailableNumber {
    fn from(value: AvailableNumberJson) -> Self {
        let capabilities = value.capabilities.unwrap_or_default();
        Self {
            sid: value.sid,
            account_sid: value.account_sid,
            friendly_name: value.friendly_name.unwrap_or_default(),
            phone_number: value.phone_number.unwrap_or_default(),
            region: value.region,
            iso_country: value.iso_country,
            sms_url: value.sms_url,
            date_created: value.date_created,
            date_updated: value.date_updated,
            capabilities: Capabilities {
                voice: capabilities.voice,
                sms: capabilities.sms,
                mms: capabilities.mms,
            },
            beta: value.beta.unwrap_or_default(),
            api_version: value.api_version,
            uri: value.uri,
            extra: value.extra,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AvailableNumbersJson {
    available_phone_numbers: Vec<AvailableNumberJson>,
}

pub fn encode_number_search_query(search: &NumberSearch) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();
    if let Some(region) = search.in_region.as_ref() {
        params.push((IN_REGION.to_owned(), region.clone()));
    }
    for (key, flag) in [
        (SMS_ENABLED, search.sms_enabled),
        (MMS_ENABLED, search.mms_enabled),
        (VOICE_ENABLED, search.voice_enabled),
    ] {
        if let Some(flag) = flag {
            params.push((key.to_owned(), flag.to_string()));
        }
    }
    params
}

/// `PhoneNumber`, then `SmsUrl` when a callback is configured.
pub fn encode_purchase_number_form(request: &PurchaseNumber) -> Vec<(String, String)> {
    let mut params = vec![(
        RawPhoneNumber::FIELD.to_owned(),
        request.phone_number().raw().to_owned(),
    )];
    if let Some(sms_url) = request.sms_url() {
        params.push((CallbackUrl::FIELD.to_owned(), sms_url.as_str().to_owned()));
    }
    params
}

pub fn decode_available_numbers_json_response(
    json: &str,
) -> Result<Reply<Vec<AvailableNumber>>, TransportError> {
    let reply = decode_reply::<AvailableNumbersJson>(json)?;
    Ok(reply.map(|list| {
        list.available_phone_numbers
            .into_iter()
            .map(AvailableNumber::from)
            .collect()
    }))
}

pub fn decode_incoming_number_json_response(
    json: &str,
) -> Result<Reply<AvailableNumber>, TransportError> {
    let reply = decode_reply::<AvailableNumberJson>(json)?;
    Ok(reply.map(AvailableNumber::from))
}
