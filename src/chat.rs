use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use serde::{Deserialize, Serialize};

use crate::data::export::to_csv;
use crate::data::model::Dataset;
use crate::error::ChatError;

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

/// Anything that can answer a question about the dataset.
pub trait ChatAssistant: Send + Sync {
    fn ask(&self, question: &str, preview: &str) -> Result<String, ChatError>;
}

/// First `rows` rows of the dataset as CSV text, for the prompt.
pub fn dataset_preview(dataset: &Dataset, rows: usize) -> String {
    match to_csv(&dataset.head(rows)) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            log::error!("Could not render dataset preview: {e}");
            String::new()
        }
    }
}

/// Run `assistant.ask` on a worker thread; the answer arrives on the receiver.
pub fn ask_in_background(
    assistant: Arc<dyn ChatAssistant>,
    question: String,
    preview: String,
) -> Receiver<Result<String, ChatError>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let answer = assistant.ask(&question, &preview);
        if let Err(e) = &answer {
            log::error!("Chat request failed: {e}");
        }
        // The UI may have gone away; nothing to do then.
        let _ = tx.send(answer);
    });
    rx
}

// ---------------------------------------------------------------------------
// OpenAI-compatible chat completions
// ---------------------------------------------------------------------------

const SYSTEM_PROMPT: &str = "You are a helpful assistant answering questions about a product \
model cross-reference table. Each row maps a model of the base brand to equivalent models \
of competing brands. Answer only from the data provided.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for any `/chat/completions` endpoint speaking the OpenAI format.
pub struct OpenAiAssistant {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiAssistant {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request_body<'a>(&'a self, question: &str, preview: &str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!(
                        "Here is a preview of the dataset (CSV):\n\n{preview}\n\nQuestion: {question}"
                    ),
                },
            ],
            temperature: 0.2,
        }
    }
}

impl ChatAssistant for OpenAiAssistant {
    fn ask(&self, question: &str, preview: &str) -> Result<String, ChatError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ChatError::EmptyQuestion);
        }

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.request_body(question, preview))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json()?;
        first_answer(parsed)
    }
}

fn first_answer(response: ChatResponse) -> Result<String, ChatError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ChatError::EmptyResponse)
}
