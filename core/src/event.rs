//! State-change notifications emitted by the engine.
//!
//! RULE: events describe what the engine did, never what a caller asked
//! for. An action that changes nothing emits nothing. Presentation
//! layers re-derive their views after any event; they never patch state
//! from event payloads alone.

use crate::{quiz::PendingReset, selection::ClusterSelection, types::StoreName};
use serde::{Deserialize, Serialize};

/// Every notification the engine can emit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashEvent {
    // ── View state ────────────────────────────────
    SelectionChanged {
        selection: ClusterSelection,
    },
    HoverChanged {
        store: Option<StoreName>,
    },

    // ── Quiz gate ─────────────────────────────────
    AnswerRecorded {
        question: usize,
        option:   usize,
    },
    CursorMoved {
        cursor: usize,
    },
    /// Submission rejected: not every question is answered.
    QuizRejected {
        answered: usize,
        total:    usize,
    },
    /// Submission graded and failed; the reset token is the caller's
    /// to fire once its delay elapses.
    QuizFailed {
        correct: usize,
        total:   usize,
        reset:   PendingReset,
    },
    QuizPassed,
    /// A deferred reset landed; the attempt is cleared for retake.
    QuizReset {
        generation: u64,
    },
}
