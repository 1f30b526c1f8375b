mod client;
mod time;
mod types;

pub use client::{GeminiClient, IntentSource};
pub use time::{date_key, time_to_minutes, week_days};
pub use types::{first_function_call, schedule_event_declaration, SchedulingIntent, SCHEDULE_EVENT};
