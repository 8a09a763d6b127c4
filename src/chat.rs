//! Mascot chat: a thin pass-through to the Gemini generateContent API.
//!
//! Nothing here feeds the data pipeline; the backend trait exists so the CLI
//! can run against a canned responder in tests.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::ClubConfig;

pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-flash-preview-04-17";

const BUSY_REPLY: &str = "I'm a bit busy right now! Please try again in a moment.";

#[derive(Debug, Clone)]
struct Turn {
    role: &'static str,
    text: String,
}

/// Conversation history; one session per chat widget instance.
#[derive(Debug, Default)]
pub struct ChatSession {
    turns: Vec<Turn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }
}

pub trait ChatBackend {
    fn send(&self, session: &mut ChatSession, message: &str) -> Result<String>;
}

pub struct GeminiChat {
    api_key: String,
    model: String,
    system_prompt: String,
    client: Client,
}

impl GeminiChat {
    /// Reads `GEMINI_API_KEY` (or the legacy `API_KEY`) and an optional
    /// `CHAT_MODEL` override.
    pub fn from_env(config: &ClubConfig) -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .context("chat api key not configured; set GEMINI_API_KEY")?;
        let model = env::var("CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build chat http client")?;
        Ok(Self {
            api_key,
            model,
            system_prompt: mascot_prompt(&config.team_name),
            client,
        })
    }
}

impl ChatBackend for GeminiChat {
    fn send(&self, session: &mut ChatSession, message: &str) -> Result<String> {
        session.turns.push(Turn {
            role: "user",
            text: message.to_string(),
        });

        let request = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &self.system_prompt,
                }],
            },
            contents: session
                .turns
                .iter()
                .map(|t| Content {
                    role: Some(t.role),
                    parts: vec![Part { text: &t.text }],
                })
                .collect(),
            generation_config: GenerationConfig { temperature: 0.7 },
        };

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .context("chat request failed");
        let resp = match resp {
            Ok(resp) => resp,
            Err(err) => {
                session.turns.pop();
                return Err(err);
            }
        };

        if resp.status() == StatusCode::TOO_MANY_REQUESTS {
            // Rate limited; the mascot stays friendly instead of erroring.
            session.turns.pop();
            return Ok(BUSY_REPLY.to_string());
        }
        if !resp.status().is_success() {
            let status = resp.status();
            session.turns.pop();
            bail!("chat request returned {status}");
        }

        let root: GenerateResponse = resp.json().context("invalid chat response json")?;
        let Some(reply) = extract_reply(&root) else {
            session.turns.pop();
            bail!("chat response had no text");
        };
        session.turns.push(Turn {
            role: "model",
            text: reply.clone(),
        });
        Ok(reply)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

fn extract_reply(root: &GenerateResponse) -> Option<String> {
    let content = root.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();
    if text.is_empty() { None } else { Some(text) }
}

fn mascot_prompt(team_name: &str) -> String {
    format!(
        "You are \"Toasty\", the official AI mascot for {team_name}, a passionate and \
         friendly local soccer team. Engage with fans, answer their questions about the \
         team (you can make up fun, plausible details if you don't have specific info, \
         always staying positive about {team_name}), share fun soccer facts, and build \
         excitement. Keep your tone enthusiastic, positive, and suitable for all ages. \
         Be concise and conversational."
    )
}
