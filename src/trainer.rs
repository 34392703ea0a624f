//! A notation drill: the user is shown a move sequence and performs it on a connected cube.
//!
//! Every reported move is checked against the next expected one. A wrong move doesn't end the
//! drill; instead its inverse becomes a correction the user must perform before carrying on, and
//! further mistakes while correcting are added to the front of that correction. Smart cubes report
//! half turns as two quarter turns, so an expected `R2` is matched by `R R` or `R' R'`.
//!
//! Accuracy counts the positions that were performed right on the first attempt.

use crate::cube333::notation::{parse, Turn};
use crate::cube333::StickerCube;
use crate::error::TrainerError;
use crate::moves::{Cancellation, Move, MoveSequence};

use log::{debug, warn};

/// Where the trainer is in a drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrainerState {
    /// No drill running.
    Inactive,
    /// Waiting for the next move of the sequence.
    Normal,
    /// The first quarter of an expected half turn was made.
    HalfMovePending,
    /// Waiting for the user to undo a mistake.
    Correcting,
    /// The whole sequence was performed.
    Done,
}

/// The result of feeding one move to the trainer.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainerOutcome {
    /// No drill is running, or the move couldn't be read.
    Ignored,
    /// Half of an expected half turn; judged on the next move.
    Pending,
    /// The move at `index` was performed.
    Correct {
        /// Position in the sequence that was completed.
        index: usize,
        /// The move that completed it, with half turns combined.
        mv: Turn,
    },
    /// A mistake was made; these moves undo it.
    Incorrect {
        /// The moves left to perform before the drill resumes.
        correction: MoveSequence<Turn>,
    },
    /// A correction move was performed and more remain.
    Correcting {
        /// Correction moves still to perform.
        remaining: usize,
    },
    /// The correction is finished and the drill resumes.
    Corrected,
    /// The last move of the sequence was performed.
    Complete {
        /// Percentage of positions performed right first time.
        accuracy: f64,
    },
}

/// Uppercase a move and replace the various prime glyphs cubes and keyboards produce with `'`.
pub fn normalize(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2032}' | '`' | '\u{00b4}' => '\'',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

/// Checks live moves against a target sequence and builds corrections for mistakes.
#[derive(Debug, Clone)]
pub struct NotationTrainer {
    state: TrainerState,
    target: MoveSequence<Turn>,
    cursor: usize,
    first_try: Vec<bool>,
    had_error: Vec<bool>,
    correction: MoveSequence<Turn>,
    correction_cursor: usize,
    half: Option<Turn>,
}

impl Default for NotationTrainer {
    fn default() -> Self {
        Self::new()
    }
}

impl NotationTrainer {
    /// An inactive trainer.
    pub fn new() -> Self {
        Self {
            state: TrainerState::Inactive,
            target: MoveSequence::default(),
            cursor: 0,
            first_try: Vec::new(),
            had_error: Vec::new(),
            correction: MoveSequence::default(),
            correction_cursor: 0,
            half: None,
        }
    }

    /// Begin a drill on `sequence`.
    pub fn start(&mut self, sequence: &str) -> Result<(), TrainerError> {
        let target = parse(&normalize_sequence(sequence));
        if target.is_empty() {
            return Err(TrainerError::EmptySequence);
        }
        debug!("training {target}");
        self.first_try = vec![false; target.len()];
        self.had_error = vec![false; target.len()];
        self.target = target;
        self.cursor = 0;
        self.correction = MoveSequence::default();
        self.correction_cursor = 0;
        self.half = None;
        self.state = TrainerState::Normal;
        Ok(())
    }

    /// End the drill.
    pub fn stop(&mut self) {
        *self = Self::new();
    }

    /// The current state.
    pub fn state(&self) -> TrainerState {
        self.state
    }

    /// The sequence being drilled.
    pub fn target(&self) -> &MoveSequence<Turn> {
        &self.target
    }

    /// Completed positions and the sequence length.
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor, self.target.len())
    }

    /// The move the trainer is waiting for: a correction move while correcting, otherwise the
    /// next move of the sequence.
    pub fn expected(&self) -> Option<&Turn> {
        match self.state {
            TrainerState::Correcting => self.correction.get(self.correction_cursor),
            TrainerState::Normal | TrainerState::HalfMovePending => self.target.get(self.cursor),
            TrainerState::Inactive | TrainerState::Done => None,
        }
    }

    /// Correction moves still to perform.
    pub fn correction(&self) -> MoveSequence<Turn> {
        if self.state != TrainerState::Correcting {
            return MoveSequence::default();
        }
        self.correction.0[self.correction_cursor..]
            .iter()
            .cloned()
            .collect()
    }

    /// Percentage of the sequence performed right first time.
    pub fn accuracy(&self) -> f64 {
        if self.target.is_empty() {
            return 0.0;
        }
        let clean = self.first_try.iter().filter(|&&ok| ok).count();
        clean as f64 * 100.0 / self.target.len() as f64
    }

    /// Where `start` ends up once the whole sequence is performed. Works on a copy.
    pub fn target_cube(&self, start: &StickerCube) -> StickerCube {
        start.clone().make_moves(&self.target)
    }

    /// Where `start` should be given the positions completed so far.
    pub fn expected_cube(&self, start: &StickerCube) -> StickerCube {
        self.target
            .iter()
            .take(self.cursor)
            .fold(start.clone(), |c, m| c.make_move(m))
    }

    /// Feed a move reported by the cube.
    pub fn process_move(&mut self, text: &str) -> TrainerOutcome {
        if matches!(self.state, TrainerState::Inactive | TrainerState::Done) {
            return TrainerOutcome::Ignored;
        }
        let performed = match Turn::parse_one(&normalize(text)) {
            Ok(mv) => mv,
            Err(e) => {
                warn!("trainer ignoring move: {e}");
                return TrainerOutcome::Ignored;
            }
        };
        let Some(expected) = self.target.get(self.cursor).cloned() else {
            return TrainerOutcome::Ignored;
        };

        match self.state {
            TrainerState::Normal => self.on_normal(performed, expected),
            TrainerState::HalfMovePending => self.on_half(performed, expected),
            TrainerState::Correcting => self.on_correcting(performed),
            TrainerState::Inactive | TrainerState::Done => TrainerOutcome::Ignored,
        }
    }

    fn on_normal(&mut self, performed: Turn, expected: Turn) -> TrainerOutcome {
        if expected.is_double() && performed.face == expected.face && !performed.is_double() {
            self.half = Some(performed);
            self.state = TrainerState::HalfMovePending;
            return TrainerOutcome::Pending;
        }
        if performed == expected {
            return self.advance(expected);
        }
        self.mistake(vec![performed.inverse()])
    }

    fn on_half(&mut self, performed: Turn, expected: Turn) -> TrainerOutcome {
        let Some(first) = self.half.take() else {
            self.state = TrainerState::Normal;
            return self.on_normal(performed, expected);
        };
        match first.clone().cancel(performed.clone()) {
            Cancellation::OneMove(combined) if combined == expected => self.advance(combined),
            // Neither half is the expected move on its own, so both are undone, latest first.
            _ => self.mistake(vec![performed.inverse(), first.inverse()]),
        }
    }

    fn on_correcting(&mut self, performed: Turn) -> TrainerOutcome {
        let Some(want) = self.correction.get(self.correction_cursor).cloned() else {
            self.state = TrainerState::Normal;
            return TrainerOutcome::Corrected;
        };

        // Turning the right face by the wrong amount just changes how much is left to undo.
        match performed.clone().inverse().cancel(want) {
            Cancellation::NoMove => {
                self.correction_cursor += 1;
                let remaining = self.correction.len() - self.correction_cursor;
                if remaining == 0 {
                    self.correction = MoveSequence::default();
                    self.correction_cursor = 0;
                    self.state = TrainerState::Normal;
                    TrainerOutcome::Corrected
                } else {
                    TrainerOutcome::Correcting { remaining }
                }
            }
            Cancellation::OneMove(rest) => {
                self.correction.0[self.correction_cursor] = rest;
                TrainerOutcome::Incorrect {
                    correction: self.correction(),
                }
            }
            Cancellation::TwoMove(undo, _) => {
                self.correction
                    .splice_at(self.correction_cursor, std::iter::once(undo));
                TrainerOutcome::Incorrect {
                    correction: self.correction(),
                }
            }
        }
    }

    fn advance(&mut self, mv: Turn) -> TrainerOutcome {
        let index = self.cursor;
        if !self.had_error[index] {
            self.first_try[index] = true;
        }
        self.cursor += 1;
        self.state = TrainerState::Normal;

        if self.cursor == self.target.len() {
            self.state = TrainerState::Done;
            let accuracy = self.accuracy();
            debug!("drill complete, accuracy {accuracy:.0}%");
            TrainerOutcome::Complete { accuracy }
        } else {
            TrainerOutcome::Correct { index, mv }
        }
    }

    fn mistake(&mut self, undo: Vec<Turn>) -> TrainerOutcome {
        self.had_error[self.cursor] = true;
        self.correction = MoveSequence(undo);
        self.correction_cursor = 0;
        self.state = TrainerState::Correcting;
        TrainerOutcome::Incorrect {
            correction: self.correction(),
        }
    }
}

fn normalize_sequence(sequence: &str) -> String {
    sequence
        .split_whitespace()
        .map(normalize)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube333::notation::apply_sequence;

    fn turn(text: &str) -> Turn {
        Turn::parse_one(text).unwrap()
    }

    fn seq(text: &str) -> MoveSequence<Turn> {
        parse(text)
    }

    fn drill(target: &str) -> NotationTrainer {
        let mut trainer = NotationTrainer::new();
        trainer.start(target).unwrap();
        trainer
    }

    #[test]
    fn clean_run() {
        let mut trainer = drill("R U");
        assert_eq!(
            trainer.process_move("R"),
            TrainerOutcome::Correct {
                index: 0,
                mv: turn("R")
            }
        );
        assert_eq!(
            trainer.process_move("U"),
            TrainerOutcome::Complete { accuracy: 100.0 }
        );
        assert_eq!(trainer.state(), TrainerState::Done);
        assert_eq!(trainer.process_move("U"), TrainerOutcome::Ignored);
    }

    #[test]
    fn corrected_mistake_costs_accuracy() {
        let mut trainer = drill("R U");
        assert_eq!(
            trainer.process_move("L"),
            TrainerOutcome::Incorrect {
                correction: seq("L'")
            }
        );
        assert_eq!(trainer.state(), TrainerState::Correcting);
        assert_eq!(trainer.expected(), Some(&turn("L'")));
        assert_eq!(trainer.process_move("L'"), TrainerOutcome::Corrected);
        // the undo move only exits correcting; R still has to be performed
        assert_eq!(trainer.progress(), (0, 2));
        assert!(matches!(
            trainer.process_move("R"),
            TrainerOutcome::Correct { index: 0, .. }
        ));
        assert_eq!(
            trainer.process_move("U"),
            TrainerOutcome::Complete { accuracy: 50.0 }
        );
    }

    #[test]
    fn mistakes_while_correcting_stack() {
        let mut trainer = drill("R U");
        trainer.process_move("L");
        assert_eq!(
            trainer.process_move("F"),
            TrainerOutcome::Incorrect {
                correction: seq("F' L'")
            }
        );
        assert_eq!(
            trainer.process_move("D2"),
            TrainerOutcome::Incorrect {
                correction: seq("D2 F' L'")
            }
        );
        assert_eq!(
            trainer.process_move("D2"),
            TrainerOutcome::Correcting { remaining: 2 }
        );
        assert_eq!(
            trainer.process_move("F'"),
            TrainerOutcome::Correcting { remaining: 1 }
        );
        assert_eq!(trainer.process_move("L'"), TrainerOutcome::Corrected);
        assert_eq!(trainer.state(), TrainerState::Normal);
        assert!(trainer.correction().is_empty());
    }

    #[test]
    fn wrong_amount_while_correcting() {
        let mut trainer = drill("R");
        trainer.process_move("U2");
        // a quarter of the U2 undo leaves a quarter to go
        assert_eq!(
            trainer.process_move("U"),
            TrainerOutcome::Incorrect {
                correction: seq("U")
            }
        );
        assert_eq!(trainer.process_move("U"), TrainerOutcome::Corrected);
        assert_eq!(
            trainer.process_move("R"),
            TrainerOutcome::Complete { accuracy: 0.0 }
        );
    }

    #[test]
    fn half_turn_from_quarters() {
        let mut trainer = drill("R2 U");
        assert_eq!(trainer.process_move("R"), TrainerOutcome::Pending);
        assert_eq!(trainer.state(), TrainerState::HalfMovePending);
        assert_eq!(
            trainer.process_move("R"),
            TrainerOutcome::Correct {
                index: 0,
                mv: turn("R2")
            }
        );

        let mut trainer = drill("R2 U");
        trainer.process_move("R'");
        assert!(matches!(
            trainer.process_move("R'"),
            TrainerOutcome::Correct { index: 0, .. }
        ));
        assert_eq!(
            trainer.process_move("U"),
            TrainerOutcome::Complete { accuracy: 100.0 }
        );
    }

    #[test]
    fn half_turn_interrupted() {
        let mut trainer = drill("R2 U");
        trainer.process_move("R");
        let outcome = trainer.process_move("U");
        assert_eq!(
            outcome,
            TrainerOutcome::Incorrect {
                correction: seq("U' R'")
            }
        );
        assert_eq!(trainer.state(), TrainerState::Correcting);

        // mixed directions cancel out physically but still count as a mistake
        let mut trainer = drill("R2");
        trainer.process_move("R");
        assert_eq!(
            trainer.process_move("R'"),
            TrainerOutcome::Incorrect {
                correction: seq("R R'")
            }
        );
    }

    #[test]
    fn quarter_then_half_undoes_both() {
        // R then R2 leaves the cube at R', so undoing only the first quarter would leave the
        // expected R2 already applied while the drill still waits for it
        let mut trainer = drill("R2 U");
        trainer.process_move("R");
        assert_eq!(
            trainer.process_move("R2"),
            TrainerOutcome::Incorrect {
                correction: seq("R2 R'")
            }
        );
        trainer.process_move("R2");
        assert_eq!(trainer.process_move("R'"), TrainerOutcome::Corrected);
        assert_eq!(trainer.progress(), (0, 2));
        assert_eq!(trainer.expected(), Some(&turn("R2")));
    }

    #[test]
    fn overturned_undo_leaves_remainder() {
        let mut trainer = drill("R");
        trainer.process_move("U");
        assert_eq!(trainer.expected(), Some(&turn("U'")));
        assert_eq!(
            trainer.process_move("U"),
            TrainerOutcome::Incorrect {
                correction: seq("U2")
            }
        );
        assert_eq!(trainer.process_move("U2"), TrainerOutcome::Corrected);
    }

    #[test]
    fn whole_half_turn_accepted() {
        let mut trainer = drill("R2");
        assert_eq!(
            trainer.process_move("R2"),
            TrainerOutcome::Complete { accuracy: 100.0 }
        );
    }

    #[test]
    fn normalized_input() {
        let mut trainer = drill("r\u{2019} x");
        assert_eq!(trainer.target(), &seq("R' x"));
        assert!(matches!(
            trainer.process_move("R\u{2032}"),
            TrainerOutcome::Correct { .. }
        ));
        assert_eq!(
            trainer.process_move("X"),
            TrainerOutcome::Complete { accuracy: 100.0 }
        );
        assert_eq!(normalize(" u` "), "U'");
    }

    #[test]
    fn unreadable_and_inactive() {
        let mut trainer = NotationTrainer::new();
        assert_eq!(trainer.process_move("R"), TrainerOutcome::Ignored);
        assert_eq!(trainer.start("   "), Err(TrainerError::EmptySequence));

        trainer.start("R").unwrap();
        assert_eq!(trainer.process_move("R U"), TrainerOutcome::Ignored);
        assert_eq!(trainer.state(), TrainerState::Normal);
        trainer.stop();
        assert_eq!(trainer.state(), TrainerState::Inactive);
        assert_eq!(trainer.expected(), None);
    }

    #[test]
    fn cube_states() {
        let mut trainer = drill("R U R' U'");
        let solved = StickerCube::SOLVED;
        assert_eq!(
            trainer.target_cube(&solved),
            apply_sequence(&solved, "R U R' U'")
        );
        trainer.process_move("R");
        trainer.process_move("U");
        assert_eq!(
            trainer.expected_cube(&solved),
            apply_sequence(&solved, "R U")
        );
        assert_eq!(solved, StickerCube::SOLVED);
    }

    #[test]
    fn restart_resets_progress() {
        let mut trainer = drill("R U");
        trainer.process_move("L");
        trainer.start("F").unwrap();
        assert_eq!(trainer.state(), TrainerState::Normal);
        assert!(trainer.correction().is_empty());
        assert_eq!(
            trainer.process_move("F"),
            TrainerOutcome::Complete { accuracy: 100.0 }
        );
    }
}
