use thiserror::Error;

/// Everything that can go wrong between a prompt and a placed event. All
/// variants are caught at the session controller and flattened into a single
/// displayed string; nothing propagates past it.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The HTTP call to the reasoning service could not complete.
    #[error("request to the reasoning service failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered, but not successfully (bad status or body the
    /// client could not parse).
    #[error("reasoning service error: {0}")]
    Api(String),

    /// The service made no function call for the prompt.
    #[error("the service could not map the prompt to a scheduling action")]
    NoMatch,

    /// One or more of the required intent fields was absent or empty.
    #[error("intent was missing required fields")]
    IncompleteIntent,

    /// A start or end time that is not a valid 24-hour HH:MM string.
    #[error("malformed event time {0:?}")]
    MalformedTime(String),
}

impl ScheduleError {
    /// The sentence shown to the user. Communication failures share one
    /// generic message; the two validation failures tell the user what to
    /// change.
    pub fn user_message(&self) -> String {
        match self {
            ScheduleError::Http(_) | ScheduleError::Api(_) => {
                "There was an issue communicating with the AI assistant.".to_string()
            }
            ScheduleError::NoMatch => "I wasn't able to schedule an event from your request. \
                 Please try rephrasing it, for example: 'Schedule a meeting with John for \
                 tomorrow at 2 PM about the project launch.'"
                .to_string(),
            ScheduleError::IncompleteIntent => "I couldn't figure out all the event details. \
                 Please provide a title, date, start time, and end time."
                .to_string(),
            ScheduleError::MalformedTime(value) => format!(
                "I couldn't read {:?} as a time. Please use a 24-hour HH:MM time.",
                value
            ),
        }
    }
}
