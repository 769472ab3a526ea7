use std::time::Duration;

use serde_json::{json, Value};

use crate::assistant::retry::RetryPolicy;
use crate::config::settings::AssistantConfig;

pub const MISSING_KEY_ANSWER: &str =
    "দুঃখিত, এআই ফিচারটি সক্রিয় করার জন্য একটি বৈধ API Key প্রয়োজন।";
pub const QUOTA_ANSWER: &str =
    "দুঃখিত, বর্তমানে সার্ভারে কোটা শেষ হয়ে গেছে। দয়া করে কিছুক্ষণ পর চেষ্টা করুন।";
pub const FAILURE_ANSWER: &str = "দুঃখিত, বর্তমানে সিস্টেমে কিছু সমস্যা হচ্ছে।";
pub const EMPTY_ANSWER: &str = "আমি উত্তর দিতে পারছি না।";

const ANSWER_SYSTEM_INSTRUCTION: &str =
    "You are a helpful Islamic assistant. Always answer politely in Bengali. Base answers on Quran and Sunnah.";

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("no API key configured")]
    MissingCredential,
    #[error("rate limited by the model service")]
    RateLimited,
    #[error("model service returned HTTP {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, GatewayError::RateLimited)
    }
}

/// One text generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: Option<String>,
    /// When set the model is asked for JSON matching this schema.
    pub response_schema: Option<Value>,
}

pub trait ModelBackend {
    /// Returns the text of the first candidate.
    fn generate(&self, request: &GenerateRequest) -> Result<String, GatewayError>;
}

/// Gemini `generateContent` over HTTPS.
pub struct GeminiClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

pub fn request_body(request: &GenerateRequest) -> Value {
    let mut body = json!({
        "contents": [{ "parts": [{ "text": request.prompt }] }],
    });
    if let Some(instruction) = &request.system_instruction {
        body["systemInstruction"] = json!({ "parts": [{ "text": instruction }] });
    }
    if let Some(schema) = &request.response_schema {
        body["generationConfig"] = json!({
            "responseMimeType": "application/json",
            "responseSchema": schema,
        });
    }
    body
}

pub fn response_text(response: &Value) -> Result<String, GatewayError> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| GatewayError::InvalidResponse("no candidate text".to_string()))
}

impl ModelBackend for GeminiClient {
    fn generate(&self, request: &GenerateRequest) -> Result<String, GatewayError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, request.model
        );
        let body = request_body(request).to_string();

        let response = self
            .agent
            .post(&url)
            .query("key", &self.api_key)
            .set("Content-Type", "application/json")
            .send_string(&body);

        let response = match response {
            Ok(r) => r,
            Err(ureq::Error::Status(429, _)) => return Err(GatewayError::RateLimited),
            Err(ureq::Error::Status(code, _)) => return Err(GatewayError::Status(code)),
            Err(ureq::Error::Transport(t)) => return Err(GatewayError::Transport(t.to_string())),
        };

        let text = response
            .into_string()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let json: Value = serde_json::from_str(&text)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        response_text(&json)
    }
}

/// Entry point for everything that talks to the model.
pub struct Gateway {
    backend: Option<Box<dyn ModelBackend>>,
    retry: RetryPolicy,
    answer_model: String,
    quote_model: String,
}

impl Gateway {
    /// Without a usable credential the gateway never touches the network.
    pub fn from_config(config: &AssistantConfig) -> Self {
        let backend = config.resolved_api_key().map(|key| {
            Box::new(GeminiClient::new(
                &config.base_url,
                key,
                Duration::from_secs(config.timeout_secs),
            )) as Box<dyn ModelBackend>
        });
        if backend.is_none() {
            log::debug!("No API key configured, assistant runs offline");
        }
        Self {
            backend,
            retry: RetryPolicy::from_config(config),
            answer_model: config.answer_model.clone(),
            quote_model: config.quote_model.clone(),
        }
    }

    #[cfg(test)]
    pub fn with_backend(
        backend: Option<Box<dyn ModelBackend>>,
        retry: RetryPolicy,
        config: &AssistantConfig,
    ) -> Self {
        Self {
            backend,
            retry,
            answer_model: config.answer_model.clone(),
            quote_model: config.quote_model.clone(),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.backend.is_some()
    }

    pub fn quote_model(&self) -> &str {
        &self.quote_model
    }

    /// Generate with retry on rate limits.
    pub fn generate(&self, request: &GenerateRequest) -> Result<String, GatewayError> {
        let backend = self.backend.as_ref().ok_or(GatewayError::MissingCredential)?;
        self.retry
            .run(|| backend.generate(request), GatewayError::is_rate_limit)
    }

    /// Answer a question in Bengali. Never fails; problems become a
    /// localized apology.
    pub fn ask(&self, question: &str) -> String {
        let request = GenerateRequest {
            model: self.answer_model.clone(),
            prompt: format!(
                "একজন ইসলামি জ্ঞানসম্পন্ন সহকারী হিসেবে বাংলায় উত্তর দিন: {}",
                question
            ),
            system_instruction: Some(ANSWER_SYSTEM_INSTRUCTION.to_string()),
            response_schema: None,
        };

        match self.generate(&request) {
            Ok(text) if text.trim().is_empty() => EMPTY_ANSWER.to_string(),
            Ok(text) => text,
            Err(GatewayError::MissingCredential) => MISSING_KEY_ANSWER.to_string(),
            Err(GatewayError::RateLimited) => {
                log::warn!("Assistant quota exhausted");
                QUOTA_ANSWER.to_string()
            }
            Err(e) => {
                log::warn!("Assistant request failed: {}", e);
                FAILURE_ANSWER.to_string()
            }
        }
    }
}
