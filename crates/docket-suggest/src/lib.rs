//! Assessment-topic suggestions from an OpenAI-compatible chat endpoint.
//!
//! Entirely optional: when no credential is configured the client reports
//! [`Error::NotConfigured`] at call time and nothing else in the system is
//! affected. Calls hold no store lock and carry their own HTTP timeout, so a
//! slow or dead service can only ever stall the suggestion feature itself.

pub mod error;

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

pub use error::{Error, Result};

/// The model used when the deployment doesn't pick one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Endpoint prefix for the hosted OpenAI API; self-hosted compatible
/// gateways override it.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const TOPIC_COUNT: usize = 3;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Connection settings for the suggestion service, loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
  /// Bearer credential. `None` disables the feature without disabling the
  /// server.
  pub api_key:  Option<String>,
  pub model:    String,
  pub base_url: String,
}

impl Default for SuggestConfig {
  fn default() -> Self {
    Self {
      api_key:  None,
      model:    DEFAULT_MODEL.to_owned(),
      base_url: DEFAULT_BASE_URL.to_owned(),
    }
  }
}

/// What we know about the student asking for ideas.
#[derive(Debug, Clone, Default)]
pub struct StudentProfile {
  /// Free-text interests and career goals.
  pub interests:          String,
  /// Grade level, when volunteered.
  pub grade:              Option<String>,
  /// Subjects the student wants the topics anchored in.
  pub preferred_subjects: Vec<String>,
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async HTTP client for the chat-completions suggestion call.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct SuggestClient {
  client: Client,
  config: SuggestConfig,
}

impl SuggestClient {
  pub fn new(config: SuggestConfig) -> Result<Self> {
    let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    Ok(Self { client, config })
  }

  /// Whether a credential is configured at all. Lets the surface report
  /// feature availability without firing a request.
  pub fn is_configured(&self) -> bool {
    self.config.api_key.is_some()
  }

  /// Ask for assessment-topic ideas matching `profile`.
  ///
  /// Returns the ordered topic list, or an [`Error`] the caller should
  /// present as "recommendations unavailable".
  pub async fn suggest(&self, profile: &StudentProfile) -> Result<Vec<String>> {
    let api_key =
      self.config.api_key.as_deref().ok_or(Error::NotConfigured)?;

    let url = format!(
      "{}/chat/completions",
      self.config.base_url.trim_end_matches('/')
    );
    let body = ChatRequest {
      model: &self.config.model,
      messages: vec![
        ChatMessage { role: "system", content: SYSTEM_PROMPT.to_owned() },
        ChatMessage { role: "user", content: user_prompt(profile) },
      ],
      max_tokens: 600,
      temperature: 0.7,
    };

    let response = self
      .client
      .post(&url)
      .bearer_auth(api_key)
      .json(&body)
      .send()
      .await?;

    if !response.status().is_success() {
      return Err(Error::Service { status: response.status() });
    }

    let parsed: ChatResponse = response.json().await?;
    let content = parsed
      .choices
      .into_iter()
      .next()
      .and_then(|choice| choice.message.content)
      .ok_or(Error::EmptyResponse)?;

    let topics = parse_topics(&content);
    if topics.is_empty() {
      return Err(Error::EmptyResponse);
    }
    Ok(topics)
  }
}

// ─── Prompt ──────────────────────────────────────────────────────────────────

const SYSTEM_PROMPT: &str = "You are an education consultant helping \
secondary-school students plan performance assessments. Suggest concrete, \
achievable project topics with clear curriculum ties.";

fn user_prompt(profile: &StudentProfile) -> String {
  let subjects = if profile.preferred_subjects.is_empty() {
    "any subject".to_owned()
  } else {
    profile.preferred_subjects.join(", ")
  };
  let grade = profile.grade.as_deref().unwrap_or("not given");

  format!(
    "Grade level: {grade}\n\
     Interests and career goals: {interests}\n\
     Preferred subjects: {subjects}\n\n\
     Suggest {TOPIC_COUNT} performance-assessment topics for this student. \
     Reply with exactly one topic per line and no other commentary.",
    interests = profile.interests.trim(),
  )
}

/// Turn the model's reply into an ordered topic list: one topic per line,
/// with bullets and numbering stripped and blank lines dropped.
fn parse_topics(content: &str) -> Vec<String> {
  content
    .lines()
    .map(strip_list_marker)
    .filter(|line| !line.is_empty())
    .map(str::to_owned)
    .collect()
}

fn strip_list_marker(line: &str) -> &str {
  let line = line.trim();
  let line = line
    .strip_prefix("- ")
    .or_else(|| line.strip_prefix("* "))
    .or_else(|| line.strip_prefix("• "))
    .unwrap_or(line);

  // "1. topic" / "2) topic" style numbering.
  let digits = line.chars().take_while(char::is_ascii_digit).count();
  if digits > 0 {
    let rest = &line[digits..];
    if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')'))
    {
      return rest.trim();
    }
  }
  line
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
  model:       &'a str,
  messages:    Vec<ChatMessage<'a>>,
  max_tokens:  u32,
  temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
  role:    &'a str,
  content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
  #[serde(default)]
  choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
  message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
  content: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_plain_lines() {
    let topics = parse_topics("Build a weather station\nWrite a play\n");
    assert_eq!(topics, ["Build a weather station", "Write a play"]);
  }

  #[test]
  fn parse_strips_bullets_and_numbering() {
    let content = "1. Build a weather station\n\
                   2) Write a one-act play\n\
                   - Survey local water quality\n\
                   * Chart family migration history";
    let topics = parse_topics(content);
    assert_eq!(topics, [
      "Build a weather station",
      "Write a one-act play",
      "Survey local water quality",
      "Chart family migration history",
    ]);
  }

  #[test]
  fn parse_drops_blank_lines() {
    let topics = parse_topics("\nBuild a bridge model\n\n\n");
    assert_eq!(topics, ["Build a bridge model"]);
  }

  #[test]
  fn unnumbered_digits_survive() {
    let topics = parse_topics("3D print a terrain map");
    assert_eq!(topics, ["3D print a terrain map"]);
  }

  #[tokio::test]
  async fn missing_credential_is_not_configured() {
    let client = SuggestClient::new(SuggestConfig::default()).unwrap();
    assert!(!client.is_configured());

    let result = client
      .suggest(&StudentProfile {
        interests: "robotics".to_owned(),
        ..Default::default()
      })
      .await;
    assert!(matches!(result, Err(Error::NotConfigured)));
  }
}
