//! Debug telemetry.
//!
//! The component reports structured events to an injected [`EventSink`]. With
//! telemetry disabled no event is ever constructed: callers go through
//! [`Telemetry::record_with`], whose closure only runs when a sink is present.

use crate::sync::SyncTrigger;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Severity of a recorded event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

/// What happened.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    UserEdit {
        len: usize,
        adopted: bool,
    },
    OwnerUpdate {
        len: usize,
        rewrote_native: bool,
    },
    ProgrammaticSet {
        len: usize,
    },
    /// Native raw value and authoritative value disagree after a step.
    Divergence {
        native_len: usize,
        authoritative_len: usize,
        consecutive_passes: u32,
    },
    SyncScheduled {
        triggers: SyncTrigger,
    },
    SyncSuperseded,
    SyncExecuted {
        triggers: SyncTrigger,
        scrollbar_width: f64,
    },
    SyncCancelled,
    AutoResize {
        height: f64,
    },
    Misaligned {
        width_delta: f64,
        scroll_delta: f64,
    },
    ScrollToPosition {
        offset: usize,
        top: f64,
    },
}

impl EventKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UserEdit { .. } => "user_edit",
            Self::OwnerUpdate { .. } => "owner_update",
            Self::ProgrammaticSet { .. } => "programmatic_set",
            Self::Divergence { .. } => "divergence",
            Self::SyncScheduled { .. } => "sync_scheduled",
            Self::SyncSuperseded => "sync_superseded",
            Self::SyncExecuted { .. } => "sync_executed",
            Self::SyncCancelled => "sync_cancelled",
            Self::AutoResize { .. } => "auto_resize",
            Self::Misaligned { .. } => "misaligned",
            Self::ScrollToPosition { .. } => "scroll_to_position",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugEvent {
    /// Monotonic per component instance.
    pub sequence: u64,
    pub severity: Severity,
    pub kind: EventKind,
}

/// Narrow capability the core depends on.
pub trait EventSink {
    fn record(&mut self, event: &DebugEvent);
}

impl<F> EventSink for F
where
    F: FnMut(&DebugEvent),
{
    fn record(&mut self, event: &DebugEvent) {
        self(event);
    }
}

/// Bounded in-memory event log. Clones share the same buffer.
#[derive(Clone, Debug)]
pub struct EventRecorder {
    events: Rc<RefCell<VecDeque<DebugEvent>>>,
    max_events: usize,
}

impl EventRecorder {
    /// Keep at most `max_events` events, dropping the oldest.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Rc::new(RefCell::new(VecDeque::with_capacity(max_events.min(1024)))),
            max_events,
        }
    }

    #[must_use]
    pub fn events(&self) -> Vec<DebugEvent> {
        self.events.borrow().iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Number of retained events with the given [`EventKind::name`].
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.kind.name() == name)
            .count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl EventSink for EventRecorder {
    fn record(&mut self, event: &DebugEvent) {
        if self.max_events == 0 {
            return;
        }
        let mut events = self.events.borrow_mut();
        while events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event.clone());
    }
}

/// Forwards events to `tracing` at the matching level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: &DebugEvent) {
        let name = event.kind.name();
        let seq = event.sequence;
        match event.severity {
            Severity::Debug => tracing::debug!(seq, name, kind = ?event.kind, "overlay event"),
            Severity::Info => tracing::info!(seq, name, kind = ?event.kind, "overlay event"),
            Severity::Warn => tracing::warn!(seq, name, kind = ?event.kind, "overlay event"),
            Severity::Error => tracing::error!(seq, name, kind = ?event.kind, "overlay event"),
        }
    }
}

/// The component's handle on its sink.
#[derive(Default)]
pub struct Telemetry {
    sink: Option<Box<dyn EventSink>>,
    sequence: u64,
}

impl Telemetry {
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(sink: Box<dyn EventSink>) -> Self {
        Self {
            sink: Some(sink),
            sequence: 0,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Record an event built lazily; a no-op without a sink.
    pub fn record_with(&mut self, severity: Severity, kind: impl FnOnce() -> EventKind) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        self.sequence += 1;
        sink.record(&DebugEvent {
            sequence: self.sequence,
            severity,
            kind: kind(),
        });
    }
}

impl std::fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telemetry")
            .field("enabled", &self.is_enabled())
            .field("sequence", &self.sequence)
            .finish()
    }
}
