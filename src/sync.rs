//! Frame-coalesced synchronization scheduling.
//!
//! Value changes, scrolls, selection changes and size changes all ask for a
//! sync pass. Requests made before the next frame collapse into one pending
//! [`SyncToken`]: a new request cancels the outstanding frame callback and
//! replaces it, carrying over the union of triggers. There is never a
//! backlog, and work requested while a pass runs lands on a later frame, which
//! is what breaks "observe my size, then resize myself" loops.

use bitflags::bitflags;

bitflags! {
    /// Why a sync pass was requested.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SyncTrigger: u8 {
        const VALUE     = 0x01;
        const SCROLL    = 0x02;
        const SELECTION = 0x04;
        const RESIZE    = 0x08;
        const OPTIONS   = 0x10;
    }
}

/// Opaque id of a requested frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// One-shot, cancelable "run on the next frame" facility.
pub trait FrameHost {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// The single pending pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncToken {
    pub handle: FrameHandle,
    pub triggers: SyncTrigger,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub scheduled: u64,
    /// Pending tokens replaced by a newer request.
    pub superseded: u64,
    pub executed: u64,
    pub cancelled: u64,
    /// Frames that fired for a token that was no longer current.
    pub stale: u64,
}

#[derive(Debug, Default)]
pub struct SyncScheduler {
    pending: Option<SyncToken>,
    stats: SyncStats,
}

impl SyncScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a pass, superseding any pending one.
    ///
    /// Returns the token now pending and whether an older one was replaced.
    pub fn schedule<H: FrameHost + ?Sized>(
        &mut self,
        host: &mut H,
        trigger: SyncTrigger,
    ) -> (SyncToken, bool) {
        let mut triggers = trigger;
        let superseded = if let Some(previous) = self.pending.take() {
            host.cancel_frame(previous.handle);
            triggers |= previous.triggers;
            self.stats.superseded += 1;
            true
        } else {
            false
        };
        let token = SyncToken {
            handle: host.request_frame(),
            triggers,
        };
        self.pending = Some(token);
        self.stats.scheduled += 1;
        (token, superseded)
    }

    /// Claim the pending token if `handle` is its frame.
    ///
    /// Returns the triggers to act on; `None` for stale or unknown frames.
    pub fn fire(&mut self, handle: FrameHandle) -> Option<SyncTrigger> {
        match self.pending {
            Some(token) if token.handle == handle => {
                self.pending = None;
                self.stats.executed += 1;
                Some(token.triggers)
            }
            _ => {
                self.stats.stale += 1;
                None
            }
        }
    }

    /// Discard the pending token without running it.
    pub fn cancel<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let Some(token) = self.pending.take() else {
            return false;
        };
        host.cancel_frame(token.handle);
        self.stats.cancelled += 1;
        true
    }

    #[must_use]
    pub fn pending(&self) -> Option<SyncToken> {
        self.pending
    }

    #[must_use]
    pub fn stats(&self) -> SyncStats {
        self.stats
    }
}

/// Frame host driven explicitly by the caller.
///
/// Frames fire only when [`ManualFrameHost::take_due`] hands them out.
#[derive(Debug, Default)]
pub struct ManualFrameHost {
    next_id: u64,
    live: Vec<FrameHandle>,
    cancelled: u64,
}

impl ManualFrameHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the frames requested and not cancelled so far.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.live)
    }

    #[must_use]
    pub fn live_frames(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameHost for ManualFrameHost {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.live.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.live.len();
        self.live.retain(|h| *h != handle);
        if self.live.len() < before {
            self.cancelled += 1;
        }
    }
}
