use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Local;
use reqwest::{header, Client};
use tracing::{debug, warn};

use super::time::date_key;
use super::types::*;
use crate::config::Config;
use crate::error::ScheduleError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Anything that can turn a prompt into a scheduling intent. The session
/// controller and the tests talk to this seam; `GeminiClient` is the one
/// production implementation.
#[async_trait]
pub trait IntentSource {
    /// `Ok(None)` means the service made no call for this prompt, which is a
    /// different outcome from a communication failure.
    async fn scheduling_intent(
        &self,
        prompt: &str,
    ) -> Result<Option<SchedulingIntent>, ScheduleError>;
}

pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.api_key().context("API key not configured")?;

        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model: config.model.clone(),
        })
    }

    /// Point the client at a different endpoint (testing or proxies).
    pub fn with_base_url(config: &Config, base_url: String) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.base_url = base_url;
        Ok(client)
    }

    /// Ask the reasoning service to map `prompt` onto the scheduleEvent
    /// schema. Returns the first function call it makes, or `None` if it
    /// makes none. No retries, and no validation of the returned fields;
    /// that belongs to the event builder.
    pub async fn request_scheduling_intent(
        &self,
        prompt: &str,
    ) -> Result<Option<SchedulingIntent>, ScheduleError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );
        let request = build_request(prompt, &date_key(Local::now().date_naive()));

        debug!("requesting scheduling intent from {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("reasoning service returned {}: {}", status, body);
            return Err(ScheduleError::Api(format!("{}: {}", status, body)));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ScheduleError::Api(format!("unparseable response: {} - {}", e, body)))?;

        let call = first_function_call(parsed);
        debug!(
            "reasoning service {} a function call",
            if call.is_some() { "made" } else { "did not make" }
        );
        Ok(call)
    }
}

#[async_trait]
impl IntentSource for GeminiClient {
    async fn scheduling_intent(
        &self,
        prompt: &str,
    ) -> Result<Option<SchedulingIntent>, ScheduleError> {
        self.request_scheduling_intent(prompt).await
    }
}

/// Assemble the generateContent body: the user prompt, the fixed
/// scheduleEvent tool, and a system instruction carrying today's date so
/// relative expressions like "tomorrow" resolve on the service side.
fn build_request(prompt: &str, today: &str) -> GenerateContentRequest {
    let system_instruction = format!(
        "You are an expert scheduling assistant. Based on the user's request, call the \
         necessary functions to manage the calendar. Today's date is {}. If the user \
         provides a relative date like 'tomorrow', calculate the actual date. If a \
         duration is given without an end time, calculate the end time. Dates must use \
         YYYY-MM-DD format and times must use 24-hour HH:MM format.",
        today
    );

    GenerateContentRequest {
        system_instruction: SystemInstruction {
            parts: vec![Part::text(system_instruction)],
        },
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part::text(prompt)],
        }],
        tools: vec![Tool {
            function_declarations: vec![schedule_event_declaration()],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_prompt_tool_and_todays_date() {
        let request = build_request("Lunch with Sam on Friday at noon", "2025-06-02");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json["contents"][0]["parts"][0]["text"],
            "Lunch with Sam on Friday at noon"
        );
        assert_eq!(
            json["tools"][0]["functionDeclarations"][0]["name"],
            "scheduleEvent"
        );
        let instruction = json["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap();
        assert!(instruction.contains("2025-06-02"));
        assert!(instruction.contains("HH:MM"));
    }
}
