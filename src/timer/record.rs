//! What a solve leaves behind: per move timings, per phase splits and the finished record.

use crate::cfop::Phase;
use crate::cube333::Side;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One move made while solving. Times are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The move as reported by the cube.
    #[serde(rename = "move")]
    pub mv: String,
    /// When the move arrived.
    pub timestamp: u64,
    /// Time since the solve started.
    pub since_start: u64,
    /// Time since the previous move, or since the start for the first move.
    pub since_previous: u64,
}

/// A split for one completed phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRecord {
    /// The phase that was completed.
    pub name: Phase,
    /// When work on the phase began (the end of the previous phase).
    pub start: u64,
    /// When the phase was completed.
    pub end: u64,
    /// `end - start`.
    pub duration: u64,
    /// Moves made during the phase.
    pub moves: usize,
    /// Turns per second over the phase.
    pub tps: f64,
}

/// A finished solve, as kept in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRecord {
    /// When scrambling began.
    pub started_at: u64,
    /// Moves seen while scrambling, space separated.
    pub scramble: String,
    /// Time from the end of inspection to the final move.
    pub total_time: u64,
    /// Moves made while solving.
    pub move_count: usize,
    /// Turns per second over the whole solve.
    pub tps: f64,
    /// Every solving move.
    pub moves: Vec<MoveRecord>,
    /// Splits for each phase reached.
    pub phases: Vec<PhaseRecord>,
    /// Solving method.
    pub method: String,
    /// Cross colour, as a face of the physical cube.
    pub cross_face: Side,
}

pub(crate) fn tps(moves: usize, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        0.0
    } else {
        moves as f64 * 1000.0 / duration_ms as f64
    }
}

/// The solve in progress, from the first scrambling move until it completes or is discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSolve {
    /// When scrambling began.
    pub started_at: u64,
    /// Moves seen while scrambling.
    pub scramble: Vec<String>,
    /// When inspection ended and solving began.
    pub solve_start: Option<u64>,
    /// Moves made while solving.
    pub moves: Vec<MoveRecord>,
    /// Completed phases in order.
    pub phases: Vec<PhaseRecord>,
    completed: BTreeSet<Phase>,
    phase_start: u64,
    attributed: usize,
}

impl CurrentSolve {
    pub(crate) fn new(started_at: u64) -> Self {
        Self {
            started_at,
            scramble: Vec::new(),
            solve_start: None,
            moves: Vec::new(),
            phases: Vec::new(),
            completed: BTreeSet::new(),
            phase_start: started_at,
            attributed: 0,
        }
    }

    /// Start the solving clock, forgetting any phase bookkeeping.
    pub(crate) fn begin_solving(&mut self, at: u64) {
        self.solve_start = Some(at);
        self.moves.clear();
        self.phases.clear();
        self.completed.clear();
        self.phase_start = at;
        self.attributed = 0;
    }

    pub(crate) fn record_move(&mut self, mv: &str, at: u64) {
        let start = self.solve_start.unwrap_or(at);
        let previous = self.moves.last().map_or(start, |m| m.timestamp);
        self.moves.push(MoveRecord {
            mv: mv.to_string(),
            timestamp: at,
            since_start: at.saturating_sub(start),
            since_previous: at.saturating_sub(previous),
        });
    }

    pub(crate) fn last_move_at(&self) -> Option<u64> {
        self.moves.last().map(|m| m.timestamp)
    }

    /// Whether `phase` has been recorded in this solve.
    pub fn is_completed(&self, phase: Phase) -> bool {
        self.completed.contains(&phase)
    }

    /// The phase currently being worked on, or `None` once everything is done.
    pub fn current_phase(&self) -> Option<Phase> {
        Phase::ORDER
            .into_iter()
            .find(|p| !self.completed.contains(p))
    }

    /// Close the active window at `end`, crediting it to `phase`, and start the next one.
    pub(crate) fn complete_phase(&mut self, phase: Phase, end: u64) -> PhaseRecord {
        let start = self.phase_start;
        let end = end.max(start);
        let in_window = self.moves[self.attributed..]
            .iter()
            .take_while(|m| m.timestamp <= end)
            .count();
        self.attributed += in_window;

        let duration = end - start;
        let record = PhaseRecord {
            name: phase,
            start,
            end,
            duration,
            moves: in_window,
            tps: tps(in_window, duration),
        };
        self.phases.push(record.clone());
        self.completed.insert(phase);
        self.phase_start = end;
        record
    }
}
