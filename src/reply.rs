//! Reply generation
//!
//! Builds the assistant prompt from the conversation window and the cascade's
//! recommendations, then produces a reply through a prioritized provider
//! chain: providers are tried in order and the first success wins. The canned
//! provider sits last so chat never hard-fails when the LLM is unreachable.

use crate::dataset::DestinationView;
use crate::error::AppError;
use crate::session::{Message, Role};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Destinations included in a prompt or chat response
pub const MENTIONED_LIMIT: usize = 6;

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const SYSTEM_PROMPT: &str =
    "Eres un asistente turístico colombiano: breve, útil, cálido y directo.";
const CANNED_REPLY: &str =
    "Puedo darte recomendaciones turísticas. ¿Qué destino de Colombia te interesa?";

/// Build the user-turn prompt: recent exchange, recommended destinations,
/// and the new message
pub fn build_prompt(user_msg: &str, history: &[Message], destinations: &[DestinationView]) -> String {
    let mut recent = String::new();
    for message in history {
        let tag = match message.role {
            Role::User => "Usuario",
            Role::Assistant => "Asistente",
        };
        recent.push_str(&format!("{}: {}\n", tag, message.content));
    }

    let mut recommended = String::from("DESTINOS RECOMENDADOS:\n");
    for destination in destinations.iter().take(MENTIONED_LIMIT) {
        let price = destination
            .price
            .map(|p| format!("${}", p))
            .unwrap_or_else(|| "precio por consultar".to_string());
        recommended.push_str(&format!(
            "- {} ({}), aprox {}, clima {}\n",
            destination.name, destination.department, price, destination.climate
        ));
    }

    format!(
        "CONTEXTO RECIENTE:\n{}\n{}\nUSUARIO: {}\n\n\
         RESPUESTA (máx 3 oraciones, concisa, turística, menciona clima/actividades/precio):\n",
        recent, recommended, user_msg
    )
}

/// Greeting shown when a session opens
pub fn build_greeting(total_destinations: usize, featured: &[DestinationView]) -> String {
    let example = featured
        .first()
        .map(|d| {
            let price = d
                .price
                .map(|p| format!("cuesta aprox ${}", p))
                .unwrap_or_else(|| "tiene precio por consultar".to_string());
            format!("Por ejemplo, {} {}. ", d.name, price)
        })
        .unwrap_or_default();

    format!(
        "¡Hola! Soy tu asistente turístico de Colombia. \
         Tengo {} destinos para recomendarte. {}¿Qué tipo de destino buscas?",
        total_destinations, example
    )
}

/// One reply backend
pub enum ReplyProvider {
    OpenAi(OpenAiProvider),
    /// Always succeeds with a fixed fallback line
    Canned,
}

impl ReplyProvider {
    async fn reply(&self, prompt: &str) -> Result<String, AppError> {
        match self {
            ReplyProvider::OpenAi(provider) => provider.reply(prompt).await,
            ReplyProvider::Canned => Ok(CANNED_REPLY.to_string()),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ReplyProvider::OpenAi(_) => "openai",
            ReplyProvider::Canned => "canned",
        }
    }
}

/// Prioritized provider list with first-success selection
pub struct ReplyChain {
    providers: Vec<ReplyProvider>,
}

impl ReplyChain {
    pub fn new(providers: Vec<ReplyProvider>) -> Self {
        Self { providers }
    }

    /// Build the chain from the environment: OpenAI when `OPENAI_API_KEY` is
    /// set, always ending in the canned fallback
    pub fn from_env() -> Self {
        let mut providers = Vec::new();
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.trim().is_empty() {
                providers.push(ReplyProvider::OpenAi(OpenAiProvider::new(key)));
            }
        }
        providers.push(ReplyProvider::Canned);
        Self::new(providers)
    }

    /// Try each provider in order; the first success is returned
    pub async fn reply(&self, prompt: &str) -> Result<String, AppError> {
        let mut last_error = AppError::ReplyFailed("no reply providers configured".to_string());
        for provider in &self.providers {
            match provider.reply(prompt).await {
                Ok(text) => {
                    debug!("Reply produced by provider '{}'", provider.name());
                    return Ok(text);
                }
                Err(err) => {
                    warn!("Provider '{}' failed: {}", provider.name(), err);
                    last_error = err;
                }
            }
        }
        Err(last_error)
    }
}

/// Chat-completions backed provider
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("destinos/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self {
            api_key,
            model: "gpt-4o-mini".to_string(),
            client,
        }
    }

    async fn reply(&self, prompt: &str) -> Result<String, AppError> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::ReplyFailed("OpenAI API key is empty".to_string()));
        }

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "max_tokens": 150,
            "temperature": 0.7,
        });

        let response = self
            .client
            .post(OPENAI_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let payload: serde_json::Value = response.json().await?;
        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(|text| text.trim().to_string())
            .ok_or_else(|| AppError::ReplyFailed("malformed chat completion response".to_string()))
    }
}
