//! The weekly calendar layout engine: pure geometry, no rendering.

use chrono::NaiveDate;

use crate::api::{date_key, time_to_minutes, week_days};
use crate::event::EventRecord;

/// The half-open clock-time interval visible in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewWindow {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl Default for ViewWindow {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 18,
        }
    }
}

impl ViewWindow {
    fn start_minutes(&self) -> i32 {
        self.start_hour as i32 * 60
    }
}

/// Vertical position of one event within its day column, in fractional
/// hours from the top of the view window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub top_offset: f32,
    pub length: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub event: EventRecord,
    pub geometry: Geometry,
}

/// One of the seven day columns, placements in chronological start order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    /// ISO key the partition was matched against.
    pub key: String,
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    /// Always exactly seven columns, Sunday first.
    pub days: Vec<DayColumn>,
    /// Events in this week that were excluded from their column: they start
    /// before the view window, or carry a time string the grid cannot place.
    /// Exposed so the exclusion is observable rather than silent.
    pub dropped: Vec<EventRecord>,
}

/// Map the event collection onto the week containing `reference`.
///
/// Partitioning is exact string equality between `event.date` and the seven
/// ISO day keys. Events that begin before the window vanish from their
/// column (reported in `dropped`); overlapping events get independent,
/// unclamped geometry. Pure and idempotent; the input is never mutated.
pub fn layout_week(events: &[EventRecord], reference: NaiveDate, window: ViewWindow) -> WeekLayout {
    let mut dropped = Vec::new();
    let days = week_days(reference)
        .into_iter()
        .map(|date| {
            let key = date_key(date);
            let mut timed: Vec<(i32, Placement)> = Vec::new();

            for event in events.iter().filter(|event| event.date == key) {
                let times = (
                    time_to_minutes(&event.start_time),
                    time_to_minutes(&event.end_time),
                );
                let (Some(start), Some(end)) = times else {
                    dropped.push(event.clone());
                    continue;
                };

                let top_minutes = start - window.start_minutes();
                if top_minutes < 0 {
                    // Starts before the visible window; not clamped.
                    dropped.push(event.clone());
                    continue;
                }

                timed.push((
                    start,
                    Placement {
                        event: event.clone(),
                        geometry: Geometry {
                            top_offset: top_minutes as f32 / 60.0,
                            length: (end - start) as f32 / 60.0,
                        },
                    },
                ));
            }

            timed.sort_by_key(|(start, _)| *start);
            DayColumn {
                date,
                key,
                placements: timed.into_iter().map(|(_, placement)| placement).collect(),
            }
        })
        .collect();

    WeekLayout { days, dropped }
}
