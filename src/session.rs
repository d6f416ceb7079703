//! Mounted widget session: the event-dispatch shim around the click engine.
//!
//! Owns the current [`ClickState`], the explosions still on screen, the
//! milestone notice and the golden flash. Async remote results come back
//! through [`deliver_remote`], which drops them once the session is gone.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::config::{ms_to_ticks, MILESTONE_NOTICE_MS};
use crate::engine::{
    apply_global_count, register_click, ClickState, NormalSoundPolicy, ParticleBatch,
    RandomSource, SoundId,
};
use crate::remote::RemoteError;

/// Explosions kept on screen at once; the oldest is dropped beyond this.
pub const MAX_LIVE_BATCHES: usize = 24;

/// Ticks the button art stays "pressed" after a click.
const PRESS_TICKS: u32 = 3;

/// An explosion being animated.
#[derive(Clone, Debug)]
pub struct LiveBatch {
    pub batch: ParticleBatch,
    pub ticks_left: u32,
    pub max_ticks: u32,
}

impl LiveBatch {
    fn new(batch: ParticleBatch) -> Self {
        let max_ticks = ms_to_ticks(batch.lifetime_ms());
        Self {
            batch,
            ticks_left: max_ticks,
            max_ticks,
        }
    }

    /// 0.0 when spawned, approaching 1.0 at expiry.
    pub fn progress(&self) -> f64 {
        if self.max_ticks == 0 {
            return 1.0;
        }
        1.0 - self.ticks_left as f64 / self.max_ticks as f64
    }
}

/// Transient milestone notification.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub text: &'static str,
    pub ticks_left: u32,
}

/// What the shell has to do after a click.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickEffects {
    pub sound: SoundId,
    /// Local count to persist.
    pub save: u64,
}

/// Which remote call a result belongs to (for logging).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoteCall {
    Fetch,
    Increment,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RemoteUpdate {
    Applied(u64),
    /// Logged; global count left as it was.
    Failed,
    /// The session was torn down while the call was in flight.
    Discarded,
}

/// Shared flag that in-flight callbacks check before touching state.
#[derive(Clone, Debug)]
pub struct Liveness(Rc<Cell<bool>>);

impl Liveness {
    fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_live(&self) -> bool {
        self.0.get()
    }

    fn end(&self) {
        self.0.set(false);
    }
}

pub struct Session<R: RandomSource> {
    state: ClickState,
    rng: R,
    policy: NormalSoundPolicy,
    batches: Vec<LiveBatch>,
    notice: Option<Notice>,
    golden_flash: u32,
    press_flash: u32,
    /// Incremented every tick; drives the shake alternation.
    anim_frame: u32,
    live: Liveness,
}

impl<R: RandomSource> Session<R> {
    /// Mount with the persisted count, if any.
    pub fn mount(saved_clicks: Option<u64>, policy: NormalSoundPolicy, rng: R) -> Self {
        Self {
            state: ClickState::new(saved_clicks.unwrap_or(0)),
            rng,
            policy,
            batches: Vec::new(),
            notice: None,
            golden_flash: 0,
            press_flash: 0,
            anim_frame: 0,
            live: Liveness::new(),
        }
    }

    pub fn state(&self) -> &ClickState {
        &self.state
    }

    pub fn batches(&self) -> &[LiveBatch] {
        &self.batches
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_golden_flash(&self) -> bool {
        self.golden_flash > 0
    }

    pub fn is_pressed(&self) -> bool {
        self.press_flash > 0
    }

    pub fn anim_frame(&self) -> u32 {
        self.anim_frame
    }

    pub fn is_live(&self) -> bool {
        self.live.is_live()
    }

    /// Token for an async call started now. It goes dead on unmount and is
    /// not revived by a later remount.
    pub fn liveness(&self) -> Liveness {
        self.live.clone()
    }

    /// Handle one click. Ignored after unmount.
    pub fn click(&mut self) -> Option<ClickEffects> {
        if !self.is_live() {
            return None;
        }
        let out = register_click(&self.state, &self.policy, &mut self.rng);
        self.state = out.state;

        if out.milestone_changed {
            self.notice = Some(Notice {
                text: self.state.milestone_message(),
                ticks_left: ms_to_ticks(MILESTONE_NOTICE_MS),
            });
        }

        let golden = out.is_golden();
        let live = LiveBatch::new(out.batch);
        if golden {
            log::info!(
                "golden lizard at click {} ({} particles)",
                self.state.local_clicks(),
                live.batch.len()
            );
            self.golden_flash = live.max_ticks;
        }
        self.batches.push(live);
        if self.batches.len() > MAX_LIVE_BATCHES {
            self.batches.remove(0);
        }
        self.press_flash = PRESS_TICKS;

        Some(ClickEffects {
            sound: out.sound,
            save: self.state.local_clicks(),
        })
    }

    /// Advance timers by `delta_ticks`, expiring batches and the notice.
    pub fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks == 0 {
            return;
        }
        self.anim_frame = self.anim_frame.wrapping_add(delta_ticks);

        for b in &mut self.batches {
            b.ticks_left = b.ticks_left.saturating_sub(delta_ticks);
        }
        self.batches.retain(|b| b.ticks_left > 0);

        if let Some(notice) = &mut self.notice {
            notice.ticks_left = notice.ticks_left.saturating_sub(delta_ticks);
            if notice.ticks_left == 0 {
                self.notice = None;
            }
        }

        self.golden_flash = self.golden_flash.saturating_sub(delta_ticks);
        self.press_flash = self.press_flash.saturating_sub(delta_ticks);
    }

    /// Merge a remote result. Failures are logged and leave the count alone.
    pub fn apply_remote(&mut self, call: RemoteCall, result: Result<u64, RemoteError>) -> RemoteUpdate {
        if !self.is_live() {
            return RemoteUpdate::Discarded;
        }
        match result {
            Ok(count) => {
                self.state = apply_global_count(&self.state, count);
                RemoteUpdate::Applied(count)
            }
            Err(e) => {
                match call {
                    RemoteCall::Fetch => log::error!("Error fetching clicks: {e}"),
                    RemoteCall::Increment => log::error!("Error updating global clicks: {e}"),
                }
                RemoteUpdate::Failed
            }
        }
    }

    /// Tear down. In-flight results arriving later are discarded.
    pub fn unmount(&mut self) {
        self.live.end();
        self.batches.clear();
        self.notice = None;
    }

    /// Start a new mounted lifetime from the persisted count, keeping the
    /// random source and sound policy. The global count is unknown again.
    pub fn remount(&mut self, saved_clicks: Option<u64>) {
        self.live.end();
        self.state = ClickState::new(saved_clicks.unwrap_or(0));
        self.batches.clear();
        self.notice = None;
        self.golden_flash = 0;
        self.press_flash = 0;
        self.anim_frame = 0;
        self.live = Liveness::new();
    }
}

/// Deliver an async result to a session that may no longer exist.
///
/// `token` is the session's [`Liveness`] taken when the call was spawned; a
/// result from an earlier mounted lifetime is dropped even if the session
/// object was remounted since.
pub fn deliver_remote<R: RandomSource>(
    handle: &Weak<RefCell<Session<R>>>,
    token: &Liveness,
    call: RemoteCall,
    result: Result<u64, RemoteError>,
) -> RemoteUpdate {
    if !token.is_live() {
        return RemoteUpdate::Discarded;
    }
    match handle.upgrade() {
        Some(session) => session.borrow_mut().apply_remote(call, result),
        None => RemoteUpdate::Discarded,
    }
}
