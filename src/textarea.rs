//! The highlight textarea component.
//!
//! [`HighlightTextarea`] owns one native widget, one overlay surface and one
//! frame host. Host events come in through the `handle_*` entry points; value
//! changes are reconciled synchronously and re-rendered into the overlay, and
//! every event source requests a coalesced sync pass that runs on the next
//! frame (see [`sync`](crate::sync)).
//!
//! # Example
//!
//! ```
//! use textarea_overlay::widget::headless::{HeadlessOverlay, HeadlessTextarea};
//! use textarea_overlay::{HighlightTextarea, ManualFrameHost, OverlayOptions};
//!
//! let options = OverlayOptions::new()
//!     .with_default_value("hello world")
//!     .highlight(6, 11, "#ffeb3b");
//! let mut textarea = HighlightTextarea::new(options, ManualFrameHost::new()).unwrap();
//! textarea.attach(HeadlessTextarea::new(240.0, 80.0), HeadlessOverlay::new());
//! textarea.advance_frame();
//!
//! assert_eq!(textarea.value(), "hello world");
//! assert!(textarea.alignment().unwrap().is_aligned());
//! ```

use crate::error::Result;
use crate::event::{DebugEvent, EventKind, EventRecorder, EventSink, Severity, Telemetry};
use crate::geometry::{self, AlignmentReport, ScrollOffset};
use crate::options::OverlayOptions;
use crate::reconcile::{ChangeListener, OwnershipMode, ValueReconciler};
use crate::render::OverlayDocument;
use crate::sync::{FrameHandle, FrameHost, ManualFrameHost, SyncScheduler, SyncStats, SyncTrigger};
use crate::widget::{NativeWidget, OverlaySurface, ScrollBehavior};

/// Default gap left above a segment by [`HighlightTextarea::scroll_to_position`].
pub const DEFAULT_SCROLL_MARGIN_PX: f64 = 40.0;

pub struct HighlightTextarea<W: NativeWidget, O: OverlaySurface, F: FrameHost> {
    options: OverlayOptions,
    reconciler: ValueReconciler,
    scheduler: SyncScheduler,
    frames: F,
    widget: Option<W>,
    overlay: Option<O>,
    document: OverlayDocument,
    recorder: EventRecorder,
    /// Active telemetry; disabled unless `debug` is on.
    telemetry: Telemetry,
    /// The other half of the debug toggle.
    parked: Telemetry,
    on_change: Box<ChangeListener>,
}

fn build_telemetry(recorder: &EventRecorder, extra: Option<Box<dyn EventSink>>) -> Telemetry {
    let mut recorder = recorder.clone();
    match extra {
        None => Telemetry::new(Box::new(recorder)),
        Some(mut sink) => Telemetry::new(Box::new(move |event: &DebugEvent| {
            recorder.record(event);
            sink.record(event);
        })),
    }
}

impl<W: NativeWidget, O: OverlaySurface, F: FrameHost> HighlightTextarea<W, O, F> {
    /// Create a detached component.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`](crate::Error::InvalidOption) when the
    /// options fail validation.
    pub fn new(options: OverlayOptions, frames: F) -> Result<Self> {
        options.validate()?;
        let reconciler = ValueReconciler::new(options.value.as_deref(), &options.default_value);
        let document = OverlayDocument::build(
            reconciler.value(),
            &options.highlights,
            &options.line_highlights,
            options.direction,
        );
        let recorder = EventRecorder::new(options.max_events);
        let full = build_telemetry(&recorder, None);
        let (telemetry, parked) = if options.debug {
            (full, Telemetry::disabled())
        } else {
            (Telemetry::disabled(), full)
        };
        Ok(Self {
            options,
            reconciler,
            scheduler: SyncScheduler::new(),
            frames,
            widget: None,
            overlay: None,
            document,
            recorder,
            telemetry,
            parked,
            on_change: Box::new(|_| {}),
        })
    }

    /// Forward events to `sink` in addition to the built-in recorder.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Box<dyn EventSink>) -> Self {
        let full = build_telemetry(&self.recorder, Some(sink));
        if self.options.debug {
            self.telemetry = full;
        } else {
            self.parked = full;
        }
        self
    }

    /// Register the change listener, called on every user edit and every
    /// programmatic [`set_value`](Self::set_value).
    #[must_use]
    pub fn on_change(mut self, listener: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Box::new(listener);
        self
    }

    // ---- lifecycle ----

    /// Mount the surfaces. The authoritative value is written into the widget
    /// and the document rendered into the overlay; geometry follows on the
    /// next frame.
    pub fn attach(&mut self, mut widget: W, mut overlay: O) {
        widget.set_direction(self.options.direction);
        widget.set_rows(self.options.rows);
        self.reconciler.attach(&mut widget, &mut self.telemetry);
        overlay.render(&self.document);
        self.widget = Some(widget);
        self.overlay = Some(overlay);
        self.schedule(SyncTrigger::VALUE | SyncTrigger::RESIZE);
    }

    /// Unmount, cancelling any pending pass. Returns the surfaces.
    pub fn detach(&mut self) -> Option<(W, O)> {
        if self.scheduler.cancel(&mut self.frames) {
            self.telemetry
                .record_with(Severity::Debug, || EventKind::SyncCancelled);
        }
        let widget = self.widget.take();
        let overlay = self.overlay.take();
        widget.zip(overlay)
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.widget.is_some() && self.overlay.is_some()
    }

    /// Apply new options from the owner.
    ///
    /// In controlled mode the owner's `value` is reconciled immediately. The
    /// ownership mode itself never changes after construction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`](crate::Error::InvalidOption) when the
    /// options fail validation; the current options are kept.
    pub fn update_options(&mut self, options: OverlayOptions) -> Result<()> {
        options.validate()?;
        let controlled = self.reconciler.mode() == OwnershipMode::Controlled;
        if options.is_controlled() != controlled {
            tracing::warn!(
                controlled,
                "ignoring ownership switch; mode is fixed at construction"
            );
        }
        if options.debug != self.options.debug {
            std::mem::swap(&mut self.telemetry, &mut self.parked);
        }

        let restyle = options.highlights != self.options.highlights
            || options.line_highlights != self.options.line_highlights
            || options.direction != self.options.direction;
        let direction_changed = options.direction != self.options.direction;
        let rows_changed = options.rows != self.options.rows;
        let auto_resize_stopped = self.options.enable_auto_resize && !options.enable_auto_resize;
        self.options = options;

        let mut value_changed = false;
        if controlled {
            if let Some(value) = self.options.value.as_deref() {
                value_changed =
                    self.reconciler
                        .owner_update(self.widget.as_mut(), value, &mut self.telemetry);
            }
        }
        if let Some(widget) = self.widget.as_mut() {
            if direction_changed {
                widget.set_direction(self.options.direction);
            }
            // Without auto-resize the widget sits at its `rows` height.
            if !self.options.enable_auto_resize && (rows_changed || auto_resize_stopped) {
                widget.set_rows(self.options.rows);
            }
        }
        if value_changed || restyle {
            self.rerender();
        }

        let mut trigger = SyncTrigger::OPTIONS;
        if value_changed {
            trigger |= SyncTrigger::VALUE;
        }
        self.schedule(trigger);
        Ok(())
    }

    // ---- host events ----

    /// The native widget reported a new raw value.
    pub fn handle_input(&mut self, raw: &str) {
        let changed = self.reconciler.user_edit(
            self.widget.as_mut(),
            raw,
            &mut *self.on_change,
            &mut self.telemetry,
        );
        if changed {
            self.rerender();
        }
        self.schedule(SyncTrigger::VALUE);
    }

    pub fn handle_scroll(&mut self) {
        self.schedule(SyncTrigger::SCROLL);
    }

    pub fn handle_selection_change(&mut self) {
        self.schedule(SyncTrigger::SELECTION);
    }

    /// The widget's own size changed.
    pub fn handle_resize(&mut self) {
        self.schedule(SyncTrigger::RESIZE);
    }

    /// A frame requested from the host fired.
    ///
    /// Runs the pending sync pass when `handle` belongs to it; returns whether
    /// a pass ran.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        let Some(triggers) = self.scheduler.fire(handle) else {
            return false;
        };
        let (Some(widget), Some(overlay)) = (self.widget.as_mut(), self.overlay.as_mut()) else {
            return false;
        };

        if self.options.enable_auto_resize {
            let before = widget.outer_height();
            let border = widget.computed_style().border.vertical();
            widget.set_rows(self.options.rows);
            let height = widget.scroll_height() + border;
            widget.set_height(height);
            if (height - before).abs() > f64::EPSILON {
                self.telemetry
                    .record_with(Severity::Debug, || EventKind::AutoResize { height });
            }
        }

        let snapshot = geometry::mirror_style(&*widget, overlay);
        geometry::mirror_scroll(&*widget, overlay);
        let report = geometry::alignment(&*widget, &*overlay);
        tracing::debug!(
            ?triggers,
            scrollbar_width = snapshot.scrollbar_width,
            "sync pass"
        );

        let scrollbar_width = snapshot.scrollbar_width;
        self.telemetry.record_with(Severity::Debug, || EventKind::SyncExecuted {
            triggers,
            scrollbar_width,
        });
        if !report.is_aligned() {
            tracing::debug!(
                width_delta = report.width_delta(),
                scroll_delta = report.scroll_delta(),
                "overlay misaligned after sync"
            );
            self.telemetry.record_with(Severity::Warn, || EventKind::Misaligned {
                width_delta: report.width_delta(),
                scroll_delta: report.scroll_delta(),
            });
        }
        true
    }

    // ---- imperative handle ----

    pub fn focus(&mut self) {
        if let Some(widget) = self.widget.as_mut() {
            widget.focus();
        }
    }

    pub fn blur(&mut self) {
        if let Some(widget) = self.widget.as_mut() {
            widget.blur();
        }
    }

    /// Select the whole value.
    pub fn select(&mut self) {
        if let Some(widget) = self.widget.as_mut() {
            widget.select_all();
            self.schedule(SyncTrigger::SELECTION);
        }
    }

    pub fn set_selection_range(&mut self, start: usize, end: usize) {
        if let Some(widget) = self.widget.as_mut() {
            widget.set_selection_range(start, end);
            self.schedule(SyncTrigger::SELECTION);
        }
    }

    /// The authoritative value (the rendered mirror in controlled mode).
    #[must_use]
    pub fn value(&self) -> &str {
        self.reconciler.value()
    }

    /// Write `value` through to the widget and notify the listener.
    ///
    /// A no-op while detached.
    pub fn set_value(&mut self, value: &str) {
        if self.widget.is_none() {
            return;
        }
        let changed = self.reconciler.set_value(
            self.widget.as_mut(),
            value,
            &mut *self.on_change,
            &mut self.telemetry,
        );
        if changed {
            self.rerender();
        }
        self.schedule(SyncTrigger::VALUE);
    }

    /// Scroll so the segment starting at `offset` sits 40px below the top.
    pub fn scroll_to_position(&mut self, offset: usize) -> bool {
        self.scroll_to_position_with(offset, DEFAULT_SCROLL_MARGIN_PX, ScrollBehavior::Instant)
    }

    /// Scroll the widget to the segment whose absolute start is `offset`.
    ///
    /// Returns `false` when no segment starts there or the overlay has not
    /// been laid out yet.
    pub fn scroll_to_position_with(
        &mut self,
        offset: usize,
        margin: f64,
        behavior: ScrollBehavior,
    ) -> bool {
        let Some((line, local)) = self.document.span_starting_at(offset) else {
            return false;
        };
        let (Some(widget), Some(overlay)) = (self.widget.as_mut(), self.overlay.as_ref()) else {
            return false;
        };
        let Some(position) = overlay.segment_top(line, local) else {
            return false;
        };
        let top = (position - margin).max(0.0);
        let left = widget.scroll_offset().left;
        widget.scroll_to(ScrollOffset::new(top, left), behavior);
        self.telemetry
            .record_with(Severity::Debug, || EventKind::ScrollToPosition { offset, top });
        self.schedule(SyncTrigger::SCROLL);
        true
    }

    // ---- accessors ----

    #[must_use]
    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    #[must_use]
    pub fn mode(&self) -> OwnershipMode {
        self.reconciler.mode()
    }

    #[must_use]
    pub fn document(&self) -> &OverlayDocument {
        &self.document
    }

    #[must_use]
    pub fn widget(&self) -> Option<&W> {
        self.widget.as_ref()
    }

    /// Direct access for hosts that drive the widget themselves. Report the
    /// resulting edits through [`handle_input`](Self::handle_input).
    pub fn widget_mut(&mut self) -> Option<&mut W> {
        self.widget.as_mut()
    }

    #[must_use]
    pub fn overlay(&self) -> Option<&O> {
        self.overlay.as_ref()
    }

    #[must_use]
    pub fn frames(&self) -> &F {
        &self.frames
    }

    /// Events retained by the built-in recorder.
    #[must_use]
    pub fn events(&self) -> Vec<DebugEvent> {
        self.recorder.events()
    }

    #[must_use]
    pub fn recorder(&self) -> &EventRecorder {
        &self.recorder
    }

    #[must_use]
    pub fn sync_stats(&self) -> SyncStats {
        self.scheduler.stats()
    }

    #[must_use]
    pub fn has_pending_sync(&self) -> bool {
        self.scheduler.pending().is_some()
    }

    /// Current alignment between widget and overlay, when attached.
    #[must_use]
    pub fn alignment(&self) -> Option<AlignmentReport> {
        let (widget, overlay) = (self.widget.as_ref()?, self.overlay.as_ref()?);
        Some(geometry::alignment(widget, overlay))
    }

    // ---- internals ----

    fn rerender(&mut self) {
        self.document = OverlayDocument::build(
            self.reconciler.value(),
            &self.options.highlights,
            &self.options.line_highlights,
            self.options.direction,
        );
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.render(&self.document);
        }
    }

    fn schedule(&mut self, trigger: SyncTrigger) {
        if self.widget.is_none() {
            return;
        }
        let (token, superseded) = self.scheduler.schedule(&mut self.frames, trigger);
        if superseded {
            self.telemetry
                .record_with(Severity::Debug, || EventKind::SyncSuperseded);
        }
        self.telemetry.record_with(Severity::Debug, || EventKind::SyncScheduled {
            triggers: token.triggers,
        });
    }
}

impl<W: NativeWidget, O: OverlaySurface> HighlightTextarea<W, O, ManualFrameHost> {
    /// Fire every frame due on the manual host. Returns the passes run.
    pub fn advance_frame(&mut self) -> usize {
        let due = self.frames.take_due();
        due.into_iter().filter(|handle| self.on_frame(*handle)).count()
    }
}

impl<W: NativeWidget, O: OverlaySurface, F: FrameHost> Drop for HighlightTextarea<W, O, F> {
    fn drop(&mut self) {
        self.scheduler.cancel(&mut self.frames);
    }
}

impl<W: NativeWidget, O: OverlaySurface, F: FrameHost> std::fmt::Debug
    for HighlightTextarea<W, O, F>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlightTextarea")
            .field("options", &self.options)
            .field("reconciler", &self.reconciler)
            .field("scheduler", &self.scheduler)
            .field("attached", &self.is_attached())
            .field("telemetry", &self.telemetry)
            .finish_non_exhaustive()
    }
}
