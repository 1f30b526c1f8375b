//! The scheduling session controller: one prompt in flight at a time,
//! append-only event collection, single displayed error.

use chrono::{Local, NaiveDate};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::IntentSource;
use crate::event::{build_event, seed_events, EventRecord, PaletteSelector, RandomPalette};
use crate::layout::{layout_week, ViewWindow, WeekLayout};

/// Prefix on every displayed scheduling failure.
const ERROR_PREFIX: &str = "Failed to schedule event";

/// Owns the event collection and the pending/error/selection state for one
/// scheduling session. The only mutation paths are `submit`, `select_event`
/// and `clear_selection`; everything else is read-only.
pub struct SchedulerSession<S: IntentSource> {
    source: S,
    palette: Box<dyn PaletteSelector + Send>,
    events: Vec<EventRecord>,
    /// Shared so the render boundary can watch it while a submit future is
    /// suspended on the external call.
    pending: Arc<AtomicBool>,
    error: Option<String>,
    selected: Option<String>,
}

/// Releases the pending flag when the submit future finishes or is dropped
/// mid-flight, so a cancelled request can never wedge the session.
struct PendingGuard(Arc<AtomicBool>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<S: IntentSource> SchedulerSession<S> {
    pub fn new(source: S) -> Self {
        Self::with_palette(source, Box::new(RandomPalette))
    }

    /// Inject a palette selector (tests pin the color draw through this).
    pub fn with_palette(source: S, palette: Box<dyn PaletteSelector + Send>) -> Self {
        Self {
            source,
            palette,
            events: Vec::new(),
            pending: Arc::new(AtomicBool::new(false)),
            error: None,
            selected: None,
        }
    }

    /// A session pre-populated with the demo events for today.
    pub fn seeded(source: S) -> Self {
        let mut session = Self::new(source);
        session.events = seed_events(Local::now().date_naive());
        session
    }

    /// Run one scheduling request end to end: prompt to the intent source,
    /// raw intent through the validator, event into the collection.
    ///
    /// No-op on an empty or whitespace prompt and while a request is already
    /// pending. Any failure becomes a single human-readable message that
    /// stays visible until the next successful submit.
    pub async fn submit(&mut self, prompt: &str) {
        if prompt.trim().is_empty() {
            return;
        }
        if self.pending.swap(true, Ordering::SeqCst) {
            debug!("submit ignored, a request is already pending");
            return;
        }
        let _pending = PendingGuard(Arc::clone(&self.pending));

        self.error = None;

        let outcome = self
            .source
            .scheduling_intent(prompt)
            .await
            .and_then(|intent| build_event(intent, self.palette.as_mut()));

        match outcome {
            Ok(event) => {
                debug!("scheduled {:?} on {}", event.title, event.date);
                self.events.push(event);
            }
            Err(error) => {
                warn!("scheduling failed: {}", error);
                self.error = Some(format!("{}: {}", ERROR_PREFIX, error.user_message()));
            }
        }
    }

    /// Mark an event as selected for the detail display. Independent of the
    /// scheduling state machine; callable at any time.
    pub fn select_event(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_event(&self) -> Option<&EventRecord> {
        let id = self.selected.as_deref()?;
        self.events.iter().find(|event| event.id == id)
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// A handle on the pending flag that stays readable while a `submit`
    /// future holds the session borrow (the render boundary's loading
    /// indicator reads through this).
    pub fn pending_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.pending)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Lay the current collection out on the week containing `reference`.
    pub fn layout(&self, reference: NaiveDate, window: ViewWindow) -> WeekLayout {
        layout_week(&self.events, reference, window)
    }
}
