//! The solve timer: a state machine driven by moves and snapshots from a smart cube.
//!
//! ```text
//! Idle --move--> Scrambling --(no moves for a while)--> Inspection --(countdown)--> Solving
//!   ^                ^                                                               |
//!   |                +--------------------------move--- Complete <--solved snapshot--+
//!   +--reset (any state) / stop (solving)
//! ```
//!
//! The timer never reads a clock. Every input carries `now` in milliseconds and the timer keeps
//! its pending deadlines as plain fields, which [`SolveTimer::poll`] fires. Stopping, resetting and
//! completing clear every deadline so nothing fires into a discarded solve.

pub mod config;
pub mod history;
pub mod record;

pub use config::TimerConfig;
pub use history::{FileStore, HistoryStore, MemoryStore, SolveHistory};
pub use record::{CurrentSolve, MoveRecord, PhaseRecord, SolveRecord};

use crate::cfop::{Phase, PhaseDetector};
use crate::cube333::{CubieConverter, Facelets, PieceConverter, Side};
use crate::error::LinkError;
use crate::link::{CubeEvent, CubeLink};

use log::{debug, info, warn};

/// Where the timer is in a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerState {
    /// Waiting for the first scrambling move.
    Idle,
    /// Moves are arriving; waiting for the cube to settle.
    Scrambling,
    /// Counting down before the solve.
    Inspection,
    /// The clock is running.
    Solving,
    /// The last solve finished; the next move starts a new one.
    Complete,
}

/// Something observers of the timer may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    /// The timer changed state.
    StateChanged {
        /// State before the change.
        from: TimerState,
        /// State after the change.
        to: TimerState,
    },
    /// A phase split was recorded.
    PhaseCompleted(PhaseRecord),
    /// A solve finished and was added to history.
    SolveCompleted(SolveRecord),
}

/// Tracks solves from a live cube.
pub struct SolveTimer<L: CubeLink, S: HistoryStore, C: PieceConverter = CubieConverter> {
    config: TimerConfig,
    link: L,
    history: SolveHistory<S>,
    detector: PhaseDetector<C>,
    state: TimerState,
    session: Option<CurrentSolve>,
    last_solve: Option<SolveRecord>,
    settle_deadline: Option<u64>,
    inspection_deadline: Option<u64>,
    facelets_due: Option<u64>,
}

impl<L: CubeLink, S: HistoryStore> SolveTimer<L, S, CubieConverter> {
    /// Create a timer that reads F2L pairs with the built in converter.
    pub fn new(config: TimerConfig, link: L, store: S) -> Self {
        Self::with_detector(config, link, store, PhaseDetector::new(CubieConverter))
    }
}

impl<L: CubeLink, S: HistoryStore, C: PieceConverter> SolveTimer<L, S, C> {
    /// Create a timer with a custom phase detector.
    pub fn with_detector(
        config: TimerConfig,
        link: L,
        store: S,
        detector: PhaseDetector<C>,
    ) -> Self {
        let history = SolveHistory::new(store, config.history_capacity);
        Self {
            config,
            link,
            history,
            detector,
            state: TimerState::Idle,
            session: None,
            last_solve: None,
            settle_deadline: None,
            inspection_deadline: None,
            facelets_due: None,
        }
    }

    /// The current state.
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// The solve in progress, if any.
    pub fn session(&self) -> Option<&CurrentSolve> {
        self.session.as_ref()
    }

    /// The most recently completed solve.
    pub fn last_solve(&self) -> Option<&SolveRecord> {
        self.last_solve.as_ref()
    }

    /// Stored solves.
    pub fn history(&self) -> &SolveHistory<S> {
        &self.history
    }

    /// Stored solves, for deleting or clearing.
    pub fn history_mut(&mut self) -> &mut SolveHistory<S> {
        &mut self.history
    }

    /// The active configuration.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Change the cross colour used for phase detection from the next snapshot on.
    pub fn set_cross_face(&mut self, face: Side) {
        self.config.cross_face = face;
    }

    /// The cube link, for sending commands directly.
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Tell the cube its current state is solved, for when its tracking has drifted from the
    /// real puzzle. Also drops any session in progress, since its snapshots would no longer
    /// mean anything.
    pub fn resync_cube(&mut self) -> Result<Vec<TimerEvent>, LinkError> {
        self.link.reset()?;
        info!("cube state reset to solved");
        Ok(self.reset())
    }

    fn transition(&mut self, to: TimerState, events: &mut Vec<TimerEvent>) {
        let from = self.state;
        debug!("timer {from:?} -> {to:?}");
        self.state = to;
        events.push(TimerEvent::StateChanged { from, to });
    }

    fn clear_deadlines(&mut self) {
        self.settle_deadline = None;
        self.inspection_deadline = None;
        self.facelets_due = None;
    }

    /// Feed an event from the cube.
    pub fn handle_event(&mut self, now: u64, event: &CubeEvent) -> Vec<TimerEvent> {
        match event {
            CubeEvent::Move(mv) => self.handle_move(now, mv),
            CubeEvent::Facelets(f) => self.handle_facelets(now, f),
        }
    }

    /// Feed a move from the cube.
    pub fn handle_move(&mut self, now: u64, mv: &str) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        match self.state {
            TimerState::Idle | TimerState::Complete => {
                let mut session = CurrentSolve::new(now);
                session.scramble.push(mv.to_string());
                self.session = Some(session);
                self.settle_deadline = Some(now + self.config.scramble_settle_ms);
                self.transition(TimerState::Scrambling, &mut events);
            }
            TimerState::Scrambling => {
                if let Some(session) = &mut self.session {
                    session.scramble.push(mv.to_string());
                }
                self.settle_deadline = Some(now + self.config.scramble_settle_ms);
            }
            TimerState::Inspection => debug!("ignoring {mv} during inspection"),
            TimerState::Solving => {
                if let Some(session) = &mut self.session {
                    session.record_move(mv, now);
                }
                self.facelets_due = Some(now + self.config.facelets_debounce_ms);
            }
        }
        events
    }

    /// Feed a snapshot from the cube. Snapshots that arrive outside of a solve are stale replies
    /// and are dropped.
    pub fn handle_facelets(&mut self, now: u64, facelets: &str) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if self.state != TimerState::Solving {
            debug!("ignoring snapshot while {:?}", self.state);
            return events;
        }
        let facelets: Facelets = match facelets.parse() {
            Ok(f) => f,
            Err(e) => {
                warn!("ignoring snapshot `{facelets}`: {e}");
                return events;
            }
        };
        let Some(session) = &mut self.session else {
            return events;
        };

        let detected = self
            .detector
            .detect_cfop_phases(&facelets, self.config.cross_face);
        // the snapshot reflects every move so far, so phases end at the latest move
        let boundary = session.last_move_at().unwrap_or(now);
        for phase in Phase::ORDER {
            if detected.contains(&phase) && !session.is_completed(phase) {
                let record = session.complete_phase(phase, boundary);
                info!("{phase} done in {}ms", record.duration);
                events.push(TimerEvent::PhaseCompleted(record));
            }
        }

        if facelets.is_solved() {
            self.complete(boundary, &mut events);
        }
        events
    }

    fn complete(&mut self, end: u64, events: &mut Vec<TimerEvent>) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        if session.is_completed(Phase::Oll) && !session.is_completed(Phase::Pll) {
            let record = session.complete_phase(Phase::Pll, end);
            events.push(TimerEvent::PhaseCompleted(record));
        }

        let solve_start = session.solve_start.unwrap_or(end);
        let total_time = end.saturating_sub(solve_start);
        let move_count = session.moves.len();
        let record = SolveRecord {
            started_at: session.started_at,
            scramble: session.scramble.join(" "),
            total_time,
            move_count,
            tps: record::tps(move_count, total_time),
            moves: session.moves,
            phases: session.phases,
            method: self.config.method.clone(),
            cross_face: self.config.cross_face,
        };
        info!("solve finished in {total_time}ms with {move_count} moves");

        self.clear_deadlines();
        self.history.append(record.clone());
        self.last_solve = Some(record.clone());
        self.transition(TimerState::Complete, events);
        events.push(TimerEvent::SolveCompleted(record));
    }

    /// Fire every deadline that has passed by `now`.
    pub fn poll(&mut self, now: u64) -> Vec<TimerEvent> {
        let mut events = Vec::new();

        if let Some(at) = self.settle_deadline.filter(|&at| at <= now) {
            self.settle_deadline = None;
            if self.state == TimerState::Scrambling {
                self.inspection_deadline = Some(at + self.config.inspection_ms);
                self.transition(TimerState::Inspection, &mut events);
            }
        }

        if let Some(at) = self.inspection_deadline.filter(|&at| at <= now) {
            self.inspection_deadline = None;
            if self.state == TimerState::Inspection {
                if let Some(session) = &mut self.session {
                    session.begin_solving(at);
                }
                self.transition(TimerState::Solving, &mut events);
            }
        }

        if self.facelets_due.is_some_and(|at| at <= now) {
            self.facelets_due = None;
            if self.state == TimerState::Solving {
                if let Err(e) = self.link.request_facelets() {
                    warn!("snapshot request failed: {e}");
                }
            }
        }

        events
    }

    /// When the caller should next [`poll`](Self::poll): the earliest pending deadline, or the
    /// next display tick while the clock or countdown is showing.
    pub fn next_wakeup(&self, now: u64) -> Option<u64> {
        let tick = matches!(self.state, TimerState::Inspection | TimerState::Solving)
            .then(|| now + self.config.tick_ms);
        [
            self.settle_deadline,
            self.inspection_deadline,
            self.facelets_due,
            tick,
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Time left in the inspection countdown.
    pub fn inspection_remaining(&self, now: u64) -> Option<u64> {
        self.inspection_deadline.map(|at| at.saturating_sub(now))
    }

    /// Time on the solve clock: running while solving, frozen once complete.
    pub fn elapsed(&self, now: u64) -> Option<u64> {
        match self.state {
            TimerState::Solving => self
                .session
                .as_ref()
                .and_then(|s| s.solve_start)
                .map(|start| now.saturating_sub(start)),
            TimerState::Complete => self.last_solve.as_ref().map(|r| r.total_time),
            _ => None,
        }
    }

    /// Abandon a running solve without saving it.
    pub fn stop(&mut self) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if self.state == TimerState::Solving {
            self.clear_deadlines();
            self.session = None;
            self.transition(TimerState::Idle, &mut events);
        } else {
            debug!("nothing to stop while {:?}", self.state);
        }
        events
    }

    /// Drop whatever is in progress and go back to idle.
    pub fn reset(&mut self) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        self.clear_deadlines();
        self.session = None;
        if self.state != TimerState::Idle {
            self.transition(TimerState::Idle, &mut events);
        }
        events
    }
}
