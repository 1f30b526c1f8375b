use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Name of the single callable operation exposed to the reasoning service.
pub const SCHEDULE_EVENT: &str = "scheduleEvent";

// ============================================================================
// Request body for generateContent
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    #[serde(rename = "systemInstruction")]
    pub system_instruction: SystemInstruction,
    pub contents: Vec<Content>,
    pub tools: Vec<Tool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One part of a content block. Requests only ever send `text`; responses
/// may carry either `text` or `functionCall`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        rename = "functionCall",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub function_call: Option<SchedulingIntent>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            function_call: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    #[serde(rename = "functionDeclarations")]
    pub function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Schema,
}

/// Subset of the service's OpenAPI-style schema language, enough to declare
/// the scheduleEvent parameters.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl Schema {
    fn string(description: &str) -> Self {
        Self {
            schema_type: "STRING".to_string(),
            description: Some(description.to_string()),
            properties: None,
            items: None,
            required: None,
        }
    }

    fn string_array(description: &str) -> Self {
        Self {
            schema_type: "ARRAY".to_string(),
            description: Some(description.to_string()),
            properties: None,
            items: Some(Box::new(Self {
                schema_type: "STRING".to_string(),
                description: None,
                properties: None,
                items: None,
                required: None,
            })),
            required: None,
        }
    }
}

/// The fixed, versionless declaration of the one operation the service may
/// call: scheduleEvent with required title/date/startTime/endTime and
/// optional attendees.
pub fn schedule_event_declaration() -> FunctionDeclaration {
    let mut properties = BTreeMap::new();
    properties.insert(
        "title".to_string(),
        Schema::string("The title of the event."),
    );
    properties.insert(
        "date".to_string(),
        Schema::string("The date of the event in YYYY-MM-DD format."),
    );
    properties.insert(
        "startTime".to_string(),
        Schema::string("The start time of the event in 24-hour HH:MM format."),
    );
    properties.insert(
        "endTime".to_string(),
        Schema::string("The end time of the event in 24-hour HH:MM format."),
    );
    properties.insert(
        "attendees".to_string(),
        Schema::string_array("A list of attendees for the event."),
    );

    FunctionDeclaration {
        name: SCHEDULE_EVENT.to_string(),
        description: "Schedules a calendar event with specified details.".to_string(),
        parameters: Schema {
            schema_type: "OBJECT".to_string(),
            description: None,
            properties: Some(properties),
            items: None,
            required: Some(vec![
                "title".to_string(),
                "date".to_string(),
                "startTime".to_string(),
                "endTime".to_string(),
            ]),
        },
    }
}

// ============================================================================
// Response body for generateContent
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

/// The structured call the service chose to make, if any. The args mapping
/// is untyped on purpose: field presence and types are the validator's job,
/// not the wire layer's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingIntent {
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Map<String, Value>,
}

/// The first function call anywhere in the response, in candidate and part
/// order, or `None` if the service produced only text (it could not map the
/// prompt onto the schema).
pub fn first_function_call(response: GenerateContentResponse) -> Option<SchedulingIntent> {
    response
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .find_map(|part| part.function_call)
}
