use crate::{selection::ClusterSelection, types::StoreName};
use serde::{Deserialize, Serialize};

/// All user-issued actions.
/// Every action is accepted in every state — one that cannot apply
/// degrades to a no-op, never to an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DashAction {
    // ── View state ────────────────────────────────
    SelectCluster { selection: ClusterSelection },
    HoverStore { store: StoreName },
    ClearHover,

    // ── Quiz gate ─────────────────────────────────
    SelectAnswer { option: usize },
    NextQuestion,
    PrevQuestion,
    SubmitQuiz,
}
