//! Natural-language event scheduling on a weekly calendar grid.
//!
//! A prompt goes to the Gemini API constrained to a single `scheduleEvent`
//! function schema; the returned call is validated into an [`EventRecord`];
//! the [`layout`] engine maps the event collection onto a Sunday-first week
//! grid. [`SchedulerSession`] ties the pipeline together and is the only
//! mutation surface the rendering layer sees. Rendering itself, the input
//! widget, and the reasoning model are external to this crate.

pub mod api;
pub mod config;
pub mod error;
pub mod event;
pub mod layout;
pub mod scheduler;

pub use api::{GeminiClient, IntentSource, SchedulingIntent};
pub use config::Config;
pub use error::ScheduleError;
pub use event::{
    build_event, seed_events, EventColor, EventRecord, PaletteSelector, RandomPalette, PALETTE,
};
pub use layout::{layout_week, DayColumn, Geometry, Placement, ViewWindow, WeekLayout};
pub use scheduler::SchedulerSession;
