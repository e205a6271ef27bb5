//! Value ownership and reconciliation.
//!
//! The native widget's raw value and the authoritative text value are kept in
//! agreement by direct write-through: native edit notifications are the single
//! input path, and the owner's value or a programmatic `set_value` is written
//! back to the widget immediately. Nothing is polled or observed.
//!
//! After every step the two values are compared. A mismatch is a
//! non-fatal anomaly reported to telemetry and healed by the next owner pass;
//! a mismatch surviving two consecutive passes is reported as a defect.

use crate::event::{EventKind, Severity, Telemetry};
use crate::widget::NativeWidget;

/// Who holds the authoritative text value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OwnershipMode {
    /// An external owner supplies the value on every update.
    Controlled,
    /// The component owns the value, seeded once.
    Uncontrolled,
}

/// Observable reconciler state. `Reconciling` never outlives a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconcileState {
    Idle,
    Reconciling,
}

/// Change listener signature.
pub type ChangeListener = dyn FnMut(&str);

#[derive(Debug)]
pub struct ValueReconciler {
    mode: OwnershipMode,
    /// Uncontrolled: the value. Controlled: mirror of the last owner value.
    value: String,
    state: ReconcileState,
    /// Controlled user edit notified, owner response not seen yet.
    awaiting_owner: bool,
    divergent_passes: u32,
}

impl ValueReconciler {
    /// Controlled when `value` is present, else uncontrolled from `default_value`.
    #[must_use]
    pub fn new(value: Option<&str>, default_value: &str) -> Self {
        let (mode, initial) = match value {
            Some(v) => (OwnershipMode::Controlled, v),
            None => (OwnershipMode::Uncontrolled, default_value),
        };
        Self {
            mode,
            value: initial.to_string(),
            state: ReconcileState::Idle,
            awaiting_owner: false,
            divergent_passes: 0,
        }
    }

    #[must_use]
    pub fn mode(&self) -> OwnershipMode {
        self.mode
    }

    #[must_use]
    pub fn state(&self) -> ReconcileState {
        self.state
    }

    /// The authoritative value (the rendered mirror when controlled).
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consecutive passes that ended with a divergence.
    #[must_use]
    pub fn divergent_passes(&self) -> u32 {
        self.divergent_passes
    }

    /// The native widget reported a new raw value.
    ///
    /// Returns `true` when the authoritative value changed.
    pub fn user_edit<W: NativeWidget + ?Sized>(
        &mut self,
        widget: Option<&mut W>,
        raw: &str,
        notify: &mut ChangeListener,
        telemetry: &mut Telemetry,
    ) -> bool {
        let Some(widget) = widget else {
            return false;
        };
        self.begin();
        let adopted = self.mode == OwnershipMode::Uncontrolled;
        let changed = adopted && self.value != raw;
        if adopted {
            if changed {
                raw.clone_into(&mut self.value);
            }
        } else {
            self.awaiting_owner = true;
        }
        notify(raw);
        telemetry.record_with(Severity::Debug, || EventKind::UserEdit {
            len: raw.chars().count(),
            adopted,
        });
        if adopted {
            self.check_divergence(&*widget, telemetry);
        }
        self.end();
        changed
    }

    /// The owner supplied a value (controlled mode only).
    ///
    /// Adopted even while detached; the widget is rewritten whenever its raw
    /// value disagrees. Returns `true` when the authoritative value changed.
    pub fn owner_update<W: NativeWidget + ?Sized>(
        &mut self,
        widget: Option<&mut W>,
        value: &str,
        telemetry: &mut Telemetry,
    ) -> bool {
        if self.mode != OwnershipMode::Controlled {
            return false;
        }
        self.begin();
        let changed = self.value != value;
        if changed {
            value.clone_into(&mut self.value);
        }
        self.awaiting_owner = false;
        if let Some(widget) = widget {
            let rewrote_native = widget.value() != self.value;
            if rewrote_native {
                widget.set_value(&self.value);
            }
            telemetry.record_with(Severity::Debug, || EventKind::OwnerUpdate {
                len: value.chars().count(),
                rewrote_native,
            });
            self.check_divergence(&*widget, telemetry);
        }
        self.end();
        changed
    }

    /// Programmatic write: widget, then value, then listener.
    ///
    /// A no-op without a widget. Returns `true` when the value changed.
    pub fn set_value<W: NativeWidget + ?Sized>(
        &mut self,
        widget: Option<&mut W>,
        value: &str,
        notify: &mut ChangeListener,
        telemetry: &mut Telemetry,
    ) -> bool {
        let Some(widget) = widget else {
            return false;
        };
        self.begin();
        widget.set_value(value);
        let changed = self.value != value;
        value.clone_into(&mut self.value);
        notify(value);
        telemetry.record_with(Severity::Debug, || EventKind::ProgrammaticSet {
            len: value.chars().count(),
        });
        self.check_divergence(&*widget, telemetry);
        self.end();
        changed
    }

    /// Push the authoritative value into a freshly attached widget.
    pub fn attach<W: NativeWidget + ?Sized>(&mut self, widget: &mut W, telemetry: &mut Telemetry) {
        self.begin();
        if widget.value() != self.value {
            widget.set_value(&self.value);
        }
        self.awaiting_owner = false;
        self.check_divergence(&*widget, telemetry);
        self.end();
    }

    /// Compare native and authoritative values; returns `true` when equal.
    pub fn check_divergence<W: NativeWidget + ?Sized>(
        &mut self,
        widget: &W,
        telemetry: &mut Telemetry,
    ) -> bool {
        if self.awaiting_owner {
            return true;
        }
        let native = widget.value();
        if native == self.value {
            self.divergent_passes = 0;
            return true;
        }
        self.divergent_passes += 1;
        let passes = self.divergent_passes;
        let severity = if passes > 1 {
            tracing::warn!(
                passes,
                native_len = native.len(),
                value_len = self.value.len(),
                "native value diverged across consecutive passes"
            );
            Severity::Error
        } else {
            Severity::Warn
        };
        let value = &self.value;
        telemetry.record_with(severity, || EventKind::Divergence {
            native_len: native.chars().count(),
            authoritative_len: value.chars().count(),
            consecutive_passes: passes,
        });
        false
    }

    fn begin(&mut self) {
        debug_assert_eq!(self.state, ReconcileState::Idle);
        self.state = ReconcileState::Reconciling;
    }

    fn end(&mut self) {
        self.state = ReconcileState::Idle;
    }
}
