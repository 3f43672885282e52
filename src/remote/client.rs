//! HTTP client for the translation endpoint.

use super::prompts::{instruction_for, RECOMMENDATION};
use crate::config::Config;
use crate::core::types::{Mode, Style};
use crate::error::RemoteError;
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::time::Duration;

/// Live response body of a streamed translation.
pub type ByteStream = Box<dyn Read + Send>;

/// What a translation call hands back.
pub enum Translation {
    Complete(String),
    Stream(ByteStream),
}

/// Payload for one translation call. Text is already truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRequest {
    pub text: String,
    pub mode: Mode,
    pub style: Style,
    pub instruction: &'static str,
}

impl TranslationRequest {
    /// Builds a request, silently cutting `text` to `max_chars` characters.
    pub fn new(text: &str, mode: Mode, style: Style, max_chars: usize) -> Self {
        Self {
            text: truncate_chars(text, max_chars),
            mode,
            style,
            instruction: instruction_for(mode.wire_name()),
        }
    }
}

/// Anything that can run a remote translation.
pub trait Translator {
    /// Waits for the whole result.
    fn fetch(&self, request: &TranslationRequest) -> Result<String, RemoteError>;

    /// Opens an event stream; the caller reads it to the end.
    fn open_stream(&self, request: &TranslationRequest) -> Result<ByteStream, RemoteError>;

    fn translate(&self, request: &TranslationRequest, streaming: bool) -> Result<Translation, RemoteError> {
        if streaming {
            self.open_stream(request).map(Translation::Stream)
        } else {
            self.fetch(request).map(Translation::Complete)
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    translated_text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`Translator`] backed by the public HTTP endpoint.
#[derive(Clone)]
pub struct HttpTranslator {
    base_url: String,
    max_query_chars: usize,
    http: Client,
}

impl HttpTranslator {
    pub fn new(config: &Config) -> Result<Self, RemoteError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            base_url: config.api_url.clone(),
            max_query_chars: config.max_query_chars,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Legacy five-emoji recommendation. The query travels without a mode,
    /// which is how the endpoint tells this path apart.
    pub fn recommend(&self, query: &str) -> Result<ByteStream, RemoteError> {
        let query = truncate_chars(query, self.max_query_chars);
        tracing::debug!(chars = query.chars().count(), "requesting emoji recommendation");
        let response = self
            .http
            .get(&self.base_url)
            .header(ACCEPT, "text/event-stream")
            .query(&[("query", query.as_str()), ("instruction", RECOMMENDATION)])
            .send()?;
        Ok(Box::new(check_status(response)?))
    }
}

impl Translator for HttpTranslator {
    fn fetch(&self, request: &TranslationRequest) -> Result<String, RemoteError> {
        tracing::debug!(mode = %request.mode, style = %request.style, "posting translation request");
        let response = self.http.post(&self.base_url).json(request).send()?;
        let response = check_status(response)?;

        let body: TranslationResponse = serde_json::from_str(&response.text()?)?;
        if body.success == Some(false) {
            return Err(RemoteError::Rejected(
                body.error.unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }
        body.translated_text
            .ok_or_else(|| RemoteError::Rejected("response carried no translatedText".to_string()))
    }

    fn open_stream(&self, request: &TranslationRequest) -> Result<ByteStream, RemoteError> {
        tracing::debug!(mode = %request.mode, style = %request.style, "opening translation stream");
        let response = self
            .http
            .get(&self.base_url)
            .header(ACCEPT, "text/event-stream")
            .query(&[
                ("text", request.text.as_str()),
                ("mode", request.mode.wire_name()),
                ("style", request.style.name()),
                ("stream", "true"),
                ("instruction", request.instruction),
            ])
            .send()?;
        Ok(Box::new(check_status(response)?))
    }
}

/// Turns a non-2xx response into [`RemoteError::Status`], preferring the
/// server's `error` field, then the raw body.
fn check_status(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.error,
        Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
        Err(_) => body.trim().to_string(),
    };
    tracing::warn!(status = status.as_u16(), %message, "translation endpoint refused request");
    Err(RemoteError::Status {
        status: status.as_u16(),
        message,
    })
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}
