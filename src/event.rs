//! The event record model and the validator that builds records out of raw
//! scheduling intents.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::api::{time_to_minutes, SchedulingIntent, SCHEDULE_EVENT};
use crate::error::ScheduleError;

/// Categorical display tag. Only the five `PALETTE` colors are handed out at
/// creation; blue and green exist for the seed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventColor {
    Red,
    Yellow,
    Indigo,
    Pink,
    Purple,
    Blue,
    Green,
}

/// The fixed palette new events draw from.
pub const PALETTE: [EventColor; 5] = [
    EventColor::Red,
    EventColor::Yellow,
    EventColor::Indigo,
    EventColor::Pink,
    EventColor::Purple,
];

/// Picks a color for a newly built event. Injected so tests can pin the
/// choice instead of depending on thread-local randomness.
pub trait PaletteSelector {
    fn select(&mut self) -> EventColor;
}

/// Uniform random draw from `PALETTE`.
#[derive(Debug, Default)]
pub struct RandomPalette;

impl PaletteSelector for RandomPalette {
    fn select(&mut self) -> EventColor {
        PALETTE[rand::thread_rng().gen_range(0..PALETTE.len())]
    }
}

/// One scheduled calendar entry. Immutable after creation; removed only by
/// dropping the owning collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    /// ISO "YYYY-MM-DD", no timezone component.
    pub date: String,
    /// 24-hour "HH:MM". End-after-start is not enforced by the model.
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    #[serde(default)]
    pub attendees: Vec<String>,
    pub color: EventColor,
}

/// Validate a raw scheduling intent and build the event record for it.
///
/// The four required textual fields are copied verbatim; `attendees`
/// defaults to empty. Start and end times must parse as HH:MM, but their
/// ordering is deliberately not checked here.
pub fn build_event(
    intent: Option<SchedulingIntent>,
    palette: &mut dyn PaletteSelector,
) -> Result<EventRecord, ScheduleError> {
    let intent = intent.ok_or(ScheduleError::NoMatch)?;
    if intent.name != SCHEDULE_EVENT {
        return Err(ScheduleError::NoMatch);
    }

    let title = required_field(&intent, "title")?;
    let date = required_field(&intent, "date")?;
    let start_time = required_field(&intent, "startTime")?;
    let end_time = required_field(&intent, "endTime")?;

    for time in [&start_time, &end_time] {
        if time_to_minutes(time).is_none() {
            return Err(ScheduleError::MalformedTime(time.clone()));
        }
    }

    let attendees = intent
        .args
        .get("attendees")
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(|name| name.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    Ok(EventRecord {
        id: Uuid::new_v4().to_string(),
        title,
        date,
        start_time,
        end_time,
        attendees,
        color: palette.select(),
    })
}

/// Every field access on the untyped args mapping is fallible: absent,
/// non-string, and empty all count as missing.
fn required_field(intent: &SchedulingIntent, name: &str) -> Result<String, ScheduleError> {
    intent
        .args
        .get(name)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(String::from)
        .ok_or(ScheduleError::IncompleteIntent)
}

/// The two demo records a fresh session starts with.
pub fn seed_events(today: NaiveDate) -> Vec<EventRecord> {
    vec![
        EventRecord {
            id: "1".to_string(),
            title: "Project Kickoff".to_string(),
            date: crate::api::date_key(today),
            start_time: "10:00".to_string(),
            end_time: "11:30".to_string(),
            attendees: vec!["Alice".to_string(), "Bob".to_string()],
            color: EventColor::Blue,
        },
        EventRecord {
            id: "2".to_string(),
            title: "Design Review".to_string(),
            date: crate::api::date_key(today + Duration::days(2)),
            start_time: "14:00".to_string(),
            end_time: "15:00".to_string(),
            attendees: vec!["Charlie".to_string(), "Dana".to_string()],
            color: EventColor::Green,
        },
    ]
}
