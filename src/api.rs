//! Script API client for the generation service.
//!
//! The service exposes two trigger endpoints. Generated text itself arrives
//! separately over the token socket; these calls only start work and
//! report success.

use crate::config::DEFAULT_API_HOST;
use crate::error::{Error, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response envelope used by every endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse<T = Value> {
    /// Present when the request failed.
    pub error: Option<String>,
    /// Present when the request succeeded.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Turn an `error` field into [`Error::Api`].
    pub fn into_result(self) -> Result<Option<T>> {
        match self.error {
            Some(message) => Err(Error::Api(message)),
            None => Ok(self.data),
        }
    }
}

/// Prompt flavour understood by `/generateScript`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScriptKind {
    /// Free-form audience prompt.
    #[serde(rename = "dark")]
    Dark,
    /// Person / place / thing prompt.
    #[serde(rename = "ppt_v3")]
    PersonPlaceThing,
}

#[derive(Debug, Serialize)]
struct GenerateScriptRequest<'a> {
    prompt: &'a str,
    #[serde(rename = "type")]
    kind: ScriptKind,
}

#[derive(Debug, Serialize)]
struct SpeakTextRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    voice: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<f32>,
}

/// Blocking client for the script service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    host: String,
    http: Client,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_HOST)
    }
}

impl ApiClient {
    /// Create a client for the service at `host` (e.g. `http://localhost:3001`).
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into().trim_end_matches('/').to_string();
        Self {
            host,
            http: Client::new(),
        }
    }

    /// Base URL of the service.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Ask the service to generate a script from a free-form prompt.
    pub fn generate_script(&self, prompt: &str) -> Result<()> {
        self.post_generate(prompt, ScriptKind::Dark)
    }

    /// Ask the service to generate a script from a person, place and thing.
    pub fn generate_script_ppt(&self, person: &str, place: &str, thing: &str) -> Result<()> {
        let prompt = person_place_thing_prompt(person, place, thing);
        self.post_generate(&prompt, ScriptKind::PersonPlaceThing)
    }

    /// Ask the service to speak `text` aloud.
    pub fn speak_text(&self, text: &str, voice: Option<&str>, speed: Option<f32>) -> Result<()> {
        let body = SpeakTextRequest { text, voice, speed };
        self.post::<_, Value>("/speakText", &body)?;
        Ok(())
    }

    fn post_generate(&self, prompt: &str, kind: ScriptKind) -> Result<()> {
        tracing::info!(?kind, prompt_len = prompt.len(), "requesting script");
        let body = GenerateScriptRequest { prompt, kind };
        self.post::<_, Value>("/generateScript", &body)?;
        Ok(())
    }

    fn post<B, T>(&self, path: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{path}", self.host);
        let response: ApiResponse<T> = self
            .http
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()?
            .json()?;

        response.into_result().inspect_err(|e| {
            tracing::warn!(%url, error = %e, "service rejected request");
        })
    }
}

/// Prompt text for a person / place / thing request.
pub fn person_place_thing_prompt(person: &str, place: &str, thing: &str) -> String {
    format!("Person: {person}\nPlace: {place}\nThing: {thing}")
}
