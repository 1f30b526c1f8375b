//! End-to-end scheduling flow against a canned intent source.

use async_trait::async_trait;
use chrono::{Duration, Local};

use weekplan::api::{date_key, SCHEDULE_EVENT};
use weekplan::{
    EventColor, IntentSource, PaletteSelector, ScheduleError, SchedulerSession, SchedulingIntent,
    ViewWindow, PALETTE,
};

/// Stands in for the reasoning service: one prompt, one canned call.
struct MeetingWithJohn;

#[async_trait]
impl IntentSource for MeetingWithJohn {
    async fn scheduling_intent(
        &self,
        prompt: &str,
    ) -> Result<Option<SchedulingIntent>, ScheduleError> {
        assert!(prompt.contains("John"));
        let tomorrow = date_key(Local::now().date_naive() + Duration::days(1));
        Ok(Some(SchedulingIntent {
            name: SCHEDULE_EVENT.to_string(),
            args: serde_json::json!({
                "title": "Meeting with John",
                "date": tomorrow,
                "startTime": "14:00",
                "endTime": "15:00",
                "attendees": ["John"]
            })
            .as_object()
            .unwrap()
            .clone(),
        }))
    }
}

struct AlwaysIndigo;

impl PaletteSelector for AlwaysIndigo {
    fn select(&mut self) -> EventColor {
        EventColor::Indigo
    }
}

#[tokio::test]
async fn prompt_becomes_a_placed_calendar_event() {
    let mut session =
        SchedulerSession::with_palette(MeetingWithJohn, Box::new(AlwaysIndigo));

    session
        .submit("Schedule a meeting with John tomorrow at 2pm for one hour")
        .await;

    // Exactly one record, fields copied verbatim from the intent.
    assert_eq!(session.events().len(), 1);
    let event = &session.events()[0];
    let tomorrow = date_key(Local::now().date_naive() + Duration::days(1));
    assert_eq!(event.title, "Meeting with John");
    assert_eq!(event.date, tomorrow);
    assert_eq!(event.start_time, "14:00");
    assert_eq!(event.end_time, "15:00");
    assert_eq!(event.attendees, vec!["John".to_string()]);
    assert_eq!(event.color, EventColor::Indigo);
    assert!(PALETTE.contains(&event.color));

    // Back to idle with no error.
    assert!(!session.is_pending());
    assert!(session.error().is_none());

    // The new event lands on tomorrow's column, 6 fractional hours below
    // the 08:00 window top, one hour long.
    let layout = session.layout(
        Local::now().date_naive() + Duration::days(1),
        ViewWindow::default(),
    );
    let placement = layout
        .days
        .iter()
        .flat_map(|day| day.placements.iter())
        .find(|placement| placement.event.id == event.id)
        .expect("event should be placed in the week grid");
    assert_eq!(placement.geometry.top_offset, 6.0);
    assert_eq!(placement.geometry.length, 1.0);
    assert!(layout.dropped.is_empty());
}
