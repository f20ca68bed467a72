//! Quiz gate — the state machine guarding next-period targets.
//!
//! RULE: the gate only opens through a fully-correct submission, and
//! once open it never closes. Every other transition (answer, cursor
//! moves, failed attempts, deferred resets) leaves it shut.
//!
//! Failed attempts schedule a reset instead of clearing immediately:
//! the caller keeps the score on screen for `delay`, then hands the
//! token back via `fire_reset`. Tokens are generation-stamped so a
//! newer submission supersedes any token still in flight.

use crate::dataset::QuizQuestion;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long a failed attempt stays on screen before its reset lands.
pub const RESET_DELAY: Duration = Duration::from_secs(3);

/// Deferred reset issued by a failed submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReset {
    /// Gate generation this token was issued against.
    pub generation: u64,
    /// How long the caller should wait before firing it.
    pub delay:      Duration,
}

/// Outcome of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// The gate is already open; nothing was graded.
    AlreadyPassed,
    /// Not every question has an answer; state unchanged.
    Incomplete { answered: usize, total: usize },
    /// Every answer correct. The gate is open for good.
    Passed,
    /// At least one wrong answer. Score plus a deferred reset.
    Failed {
        correct: usize,
        total:   usize,
        reset:   PendingReset,
    },
}

/// Interactive quiz state: one cursor, one answer slot per question.
#[derive(Debug, Clone)]
pub struct QuizGate {
    questions:  Vec<QuizQuestion>,
    cursor:     usize,
    answers:    Vec<Option<usize>>,
    passed:     bool,
    generation: u64,
}

impl QuizGate {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            questions,
            cursor: 0,
            answers,
            passed: false,
            generation: 0,
        }
    }

    // ── Accessors ─────────────────────────────────

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn answered(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// The recorded answer for a question, if any.
    pub fn answer(&self, question: usize) -> Option<usize> {
        self.answers.get(question).copied().flatten()
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.cursor)
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    // ── Transitions ───────────────────────────────

    /// Record an answer for the question under the cursor. Never
    /// advances the cursor. Re-answering overwrites.
    pub fn select_answer(&mut self, option: usize) -> bool {
        if self.passed {
            log::warn!("Quiz: answer ignored, gate already open");
            return false;
        }
        let in_range = self
            .questions
            .get(self.cursor)
            .map(|q| option < q.options.len())
            .unwrap_or(false);
        if !in_range {
            log::warn!(
                "Quiz: option {option} out of range for question {}",
                self.cursor
            );
            return false;
        }
        self.answers[self.cursor] = Some(option);
        true
    }

    /// Advance the cursor. Requires the current question answered;
    /// stops at the last question.
    pub fn next(&mut self) -> bool {
        if self.passed || self.questions.is_empty() {
            return false;
        }
        if self.answers[self.cursor].is_none() {
            return false;
        }
        if self.cursor + 1 >= self.questions.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Step the cursor back. Allowed whether or not anything is
    /// answered; stops at the first question.
    pub fn prev(&mut self) -> bool {
        if self.passed || self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Grade the attempt.
    ///
    /// Incomplete attempts are rejected without touching state. A pass
    /// is terminal. A fail keeps the answers in place and returns a
    /// generation-stamped reset for the caller to fire after `delay`.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.passed {
            return SubmitOutcome::AlreadyPassed;
        }
        let total = self.questions.len();
        let answered = self.answered();
        if answered < total {
            log::debug!("Quiz: submit rejected, {answered}/{total} answered");
            return SubmitOutcome::Incomplete { answered, total };
        }
        let correct = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| **a == Some(q.correct))
            .count();
        self.generation += 1;
        if correct == total {
            self.passed = true;
            log::info!("Quiz: passed, targets unlocked");
            SubmitOutcome::Passed
        } else {
            log::info!("Quiz: failed with {correct}/{total}, reset scheduled");
            SubmitOutcome::Failed {
                correct,
                total,
                reset: PendingReset {
                    generation: self.generation,
                    delay:      RESET_DELAY,
                },
            }
        }
    }

    /// Apply a deferred reset: cursor back to the first question, all
    /// answers cleared. Ignored when the token is stale (a newer
    /// submission superseded it) or the gate opened in the meantime.
    pub fn fire_reset(&mut self, reset: PendingReset) -> bool {
        if self.passed || reset.generation != self.generation {
            log::debug!(
                "Quiz: reset token for generation {} ignored (at {})",
                reset.generation,
                self.generation
            );
            return false;
        }
        self.cursor = 0;
        for answer in &mut self.answers {
            *answer = None;
        }
        self.generation += 1;
        log::info!("Quiz: attempt cleared for retake");
        true
    }
}
