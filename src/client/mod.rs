//! Client layer: builds authenticated requests, runs them, and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::{
    AccountSid, AuthToken, AvailableNumber, CallbackUrl, Message, MessageBody, MessageFilter,
    MessageSid, NumberSearch, ProviderError, PurchaseNumber, RawPhoneNumber, SendMessage, Thread,
    ValidationError,
};
use crate::transport::{Reply, TransportError};

const DEFAULT_BASE_URL: &str = "https://api.twilio.com";
const DEFAULT_API_VERSION: &str = "2010-04-01";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone)]
struct HttpRequest {
    method: HttpMethod,
    url: Url,
    credentials: Credentials,
    /// Already-encoded `application/x-www-form-urlencoded` body.
    form: Option<String>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'_, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'_, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let builder = match request.method {
                HttpMethod::Get => self.client.get(request.url),
                HttpMethod::Post => self.client.post(request.url),
            };
            let mut builder = builder.basic_auth(
                request.credentials.account_sid.as_str(),
                Some(request.credentials.auth_token.as_str()),
            );
            if let Some(form) = request.form {
                builder = builder
                    .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
                    .body(form);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Account SID and auth token sent as HTTP basic auth on every request.
pub struct Credentials {
    account_sid: AccountSid,
    auth_token: AuthToken,
}

impl Credentials {
    /// Validate both parts; see [`AccountSid::new`] and [`AuthToken::new`].
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            account_sid: AccountSid::new(account_sid)?,
            auth_token: AuthToken::new(auth_token)?,
        })
    }

    pub fn account_sid(&self) -> &AccountSid {
        &self.account_sid
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`TwilioClient`].
pub enum TwilioError {
    /// The request could not be sent or the response body could not be read.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status whose body carried no Twilio error message.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Twilio answered with an error `message`; displays exactly that message.
    #[error(transparent)]
    Provider(ProviderError),

    /// Response body was not the expected JSON shape.
    #[error("decode error: {0}")]
    Decode(#[source] Box<dyn StdError + Send + Sync>),

    /// A number search returned no candidates, so nothing was purchased.
    #[error("No numbers available")]
    NoNumbersAvailable,

    /// [`TwilioClient::send`] was called on a client without a default sender.
    #[error("no default sender number configured")]
    MissingDefaultFrom,

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl TwilioError {
    /// The provider error, when Twilio itself rejected the request.
    pub fn provider(&self) -> Option<&ProviderError> {
        match self {
            Self::Provider(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`TwilioClient`].
///
/// Use this to set a default sender, the `SmsUrl` given to purchased numbers,
/// the number search constraints, or to point at another API host.
pub struct TwilioClientBuilder {
    credentials: Credentials,
    base_url: String,
    api_version: String,
    default_from: Option<RawPhoneNumber>,
    sms_url: Option<CallbackUrl>,
    number_search: NumberSearch,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TwilioClientBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_version: DEFAULT_API_VERSION.to_owned(),
            default_from: None,
            sms_url: None,
            number_search: NumberSearch::default(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Sender used by [`TwilioClient::send`]. Must belong to the account.
    pub fn default_from(mut self, from: RawPhoneNumber) -> Self {
        self.default_from = Some(from);
        self
    }

    /// Inbound SMS webhook attached to numbers bought by [`TwilioClient::acquire_number`].
    pub fn sms_url(mut self, sms_url: CallbackUrl) -> Self {
        self.sms_url = Some(sms_url);
        self
    }

    /// Search constraints used by [`TwilioClient::acquire_number`].
    pub fn number_search(mut self, search: NumberSearch) -> Self {
        self.number_search = search;
        self
    }

    /// Override the API host (default `https://api.twilio.com`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the API version path segment (default `2010-04-01`).
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Set an HTTP client timeout applied to each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<TwilioClient, TwilioError> {
        parse_base_url(&self.base_url)?;
        if self.api_version.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "api_version",
            }
            .into());
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| TwilioError::Transport(Box::new(err)))?;

        Ok(TwilioClient {
            credentials: self.credentials,
            base_url: self.base_url,
            api_version: self.api_version.trim().to_owned(),
            default_from: self.default_from,
            sms_url: self.sms_url,
            number_search: self.number_search,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Twilio SMS client.
///
/// Immutable after construction; clone it or share it by reference across tasks.
/// Every call performs its own HTTP exchange(s) and nothing is retried.
pub struct TwilioClient {
    credentials: Credentials,
    base_url: String,
    api_version: String,
    default_from: Option<RawPhoneNumber>,
    sms_url: Option<CallbackUrl>,
    number_search: NumberSearch,
    http: Arc<dyn HttpTransport>,
}

impl TwilioClient {
    /// Create a client against `https://api.twilio.com` with no default sender.
    ///
    /// For more customization, use [`TwilioClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_version: DEFAULT_API_VERSION.to_owned(),
            default_from: None,
            sms_url: None,
            number_search: NumberSearch::default(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    pub fn builder(credentials: Credentials) -> TwilioClientBuilder {
        TwilioClientBuilder::new(credentials)
    }

    pub fn default_from(&self) -> Option<&RawPhoneNumber> {
        self.default_from.as_ref()
    }

    /// Send a text from the configured default number.
    ///
    /// Errors:
    /// - [`TwilioError::MissingDefaultFrom`] when no default sender was configured,
    /// - [`TwilioError::Provider`] when Twilio rejects the message.
    pub async fn send(&self, to: RawPhoneNumber, body: MessageBody) -> Result<Message, TwilioError> {
        let from = self
            .default_from
            .clone()
            .ok_or(TwilioError::MissingDefaultFrom)?;
        self.send_message(SendMessage::new(from, to, body)).await
    }

    /// Send a text from an explicit sender number.
    pub async fn send_with_number(
        &self,
        from: RawPhoneNumber,
        to: RawPhoneNumber,
        body: MessageBody,
    ) -> Result<Message, TwilioError> {
        self.send_message(SendMessage::new(from, to, body)).await
    }

    /// POST `Messages.json` with `To`, `From` and `Body`.
    pub async fn send_message(&self, request: SendMessage) -> Result<Message, TwilioError> {
        let url = self.resource_url(&["Messages.json"])?;
        let form = crate::transport::encode_send_message_form(&request);
        let response = self.post_form(url, &form).await?;
        let message = decode(&response, crate::transport::decode_message_json_response)?;

        tracing::debug!(sid = %message.sid, status = %message.status, "message accepted");
        Ok(message)
    }

    /// GET `Messages/{sid}.json`.
    pub async fn fetch_message(&self, sid: &MessageSid) -> Result<Message, TwilioError> {
        let resource = format!("{}.json", sid.as_str());
        let url = self.resource_url(&["Messages", &resource])?;
        let response = self.get(url, &[]).await?;
        decode(&response, crate::transport::decode_message_json_response)
    }

    /// GET `Messages.json` filtered by `To` and/or `From`. Returns the first page only.
    pub async fn list_messages(&self, filter: &MessageFilter) -> Result<Vec<Message>, TwilioError> {
        let url = self.resource_url(&["Messages.json"])?;
        let query = crate::transport::encode_message_filter_query(filter);
        let response = self.get(url, &query).await?;
        let messages = decode(
            &response,
            crate::transport::decode_message_list_json_response,
        )?;

        tracing::debug!(count = messages.len(), "listed messages");
        Ok(messages)
    }

    /// Messages exchanged between `a` and `b` in both directions, most recent first.
    ///
    /// Issues `From=a&To=b` then `From=b&To=a`; the second query is not sent if
    /// the first fails.
    #[tracing::instrument(level = "debug", skip_all, fields(a = %a.raw(), b = %b.raw()))]
    pub async fn get_thread(
        &self,
        a: &RawPhoneNumber,
        b: &RawPhoneNumber,
    ) -> Result<Thread, TwilioError> {
        let forward = self
            .list_messages(&MessageFilter::between(a.clone(), b.clone()))
            .await?;
        let reverse = self
            .list_messages(&MessageFilter::between(b.clone(), a.clone()))
            .await?;

        Ok(Thread::merge(forward, reverse))
    }

    /// GET `AvailablePhoneNumbers/{country}/Local.json` with the given constraints.
    pub async fn search_numbers(
        &self,
        search: &NumberSearch,
    ) -> Result<Vec<AvailableNumber>, TwilioError> {
        let url = self.resource_url(&[
            "AvailablePhoneNumbers",
            search.country.as_str(),
            "Local.json",
        ])?;
        let query = crate::transport::encode_number_search_query(search);
        let response = self.get(url, &query).await?;
        let numbers = decode(
            &response,
            crate::transport::decode_available_numbers_json_response,
        )?;

        tracing::debug!(count = numbers.len(), "searched available numbers");
        Ok(numbers)
    }

    /// POST `IncomingPhoneNumbers/Local.json` with `PhoneNumber` and optional `SmsUrl`.
    pub async fn purchase_number(
        &self,
        request: PurchaseNumber,
    ) -> Result<AvailableNumber, TwilioError> {
        let url = self.resource_url(&["IncomingPhoneNumbers", "Local.json"])?;
        let form = crate::transport::encode_purchase_number_form(&request);
        let response = self.post_form(url, &form).await?;
        decode(
            &response,
            crate::transport::decode_incoming_number_json_response,
        )
    }

    /// Search with the configured [`NumberSearch`] and buy the first candidate.
    ///
    /// The purchased number gets the configured `SmsUrl`, if any.
    ///
    /// Errors:
    /// - [`TwilioError::NoNumbersAvailable`] when the search yields no usable
    ///   candidate; no purchase is attempted,
    /// - [`TwilioError::Provider`] from either step. A failed purchase is not retried.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn acquire_number(&self) -> Result<AvailableNumber, TwilioError> {
        let candidates = self.search_numbers(&self.number_search).await?;
        let phone_number = candidates
            .into_iter()
            .next()
            .and_then(|candidate| RawPhoneNumber::new(candidate.phone_number).ok())
            .ok_or(TwilioError::NoNumbersAvailable)?;

        tracing::debug!(phone_number = %phone_number.raw(), "purchasing number");
        self.purchase_number(PurchaseNumber::new(phone_number, self.sms_url.clone()))
            .await
    }

    /// `{base}/{version}/Accounts/{sid}/{segments...}`.
    fn resource_url(&self, segments: &[&str]) -> Result<Url, TwilioError> {
        let mut url = parse_base_url(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| ValidationError::InvalidUrl {
                input: self.base_url.clone(),
            })?
            .pop_if_empty()
            .push(&self.api_version)
            .push("Accounts")
            .push(self.credentials.account_sid.as_str())
            .extend(segments);
        Ok(url)
    }

    async fn get(
        &self,
        mut url: Url,
        query: &[(String, String)],
    ) -> Result<HttpResponse, TwilioError> {
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        self.execute(HttpMethod::Get, url, None).await
    }

    async fn post_form(
        &self,
        url: Url,
        form: &[(String, String)],
    ) -> Result<HttpResponse, TwilioError> {
        let body = crate::transport::encode_form_body(form);
        self.execute(HttpMethod::Post, url, Some(body)).await
    }

    async fn execute(
        &self,
        method: HttpMethod,
        url: Url,
        form: Option<String>,
    ) -> Result<HttpResponse, TwilioError> {
        tracing::debug!(?method, path = url.path(), "sending request");

        let response = self
            .http
            .execute(HttpRequest {
                method,
                url,
                credentials: self.credentials.clone(),
                form,
            })
            .await
            .map_err(TwilioError::Transport)?;

        tracing::debug!(status = response.status, "received response");
        Ok(response)
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, TwilioError> {
    let invalid = || ValidationError::InvalidUrl {
        input: base_url.to_owned(),
    };
    let url = Url::parse(base_url).map_err(|_| invalid())?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid().into());
    }
    Ok(url)
}

/// Decode once, then classify: a provider message wins over the HTTP status,
/// a non-2xx status wins over a decode failure.
fn decode<T, F>(response: &HttpResponse, decoder: F) -> Result<T, TwilioError>
where
    F: FnOnce(&str) -> Result<Reply<T>, TransportError>,
{
    let success = (200..=299).contains(&response.status);

    match decoder(&response.body) {
        Ok(Reply::Failure(mut err)) => {
            err.status = Some(response.status);
            Err(TwilioError::Provider(err))
        }
        Ok(Reply::Success(value)) if success => Ok(value),
        Err(err) if success => Err(TwilioError::Decode(Box::new(err))),
        _ => {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body.clone())
            };
            Err(TwilioError::HttpStatus {
                status: response.status,
                body,
            })
        }
    }
}
