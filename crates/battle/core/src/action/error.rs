//! Action and setup error types.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::CombatantId;

/// Rejection of a requested action before resolution.
///
/// Never fatal: the caller requests a different action for players, and the
/// enemy selector falls back down its preference chain.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("combat already ended")]
    CombatOver,

    #[error("actor {0:?} is not part of this combat")]
    UnknownActor(CombatantId),

    #[error("actor {0:?} is defeated and cannot act")]
    ActorDefeated(CombatantId),

    #[error("a status effect prevents this actor from using {action}")]
    Restricted { action: &'static str },

    #[error("insufficient SP: need {required}, have {available}")]
    InsufficientSp { required: u32, available: u32 },

    #[error("unknown skill id {0:?}")]
    UnknownSkill(String),

    #[error("unknown item id {0:?}")]
    UnknownItem(String),

    #[error("no {item:?} left to use")]
    ItemExhausted { item: String },

    #[error("target {0:?} is not part of this combat")]
    UnknownTarget(CombatantId),

    #[error("target {0:?} is already defeated")]
    TargetDefeated(CombatantId),

    #[error("target selection does not match the capability's targeting")]
    InvalidTarget,

    #[error("no action was queued for {0:?}")]
    MissingAction(CombatantId),
}

impl CombatError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::InsufficientSp { .. }
            | ActionError::Restricted { .. }
            | ActionError::TargetDefeated(_)
            | ActionError::ItemExhausted { .. }
            | ActionError::MissingAction(_) => ErrorSeverity::Recoverable,

            ActionError::CombatOver
            | ActionError::UnknownActor(_)
            | ActionError::ActorDefeated(_)
            | ActionError::UnknownSkill(_)
            | ActionError::UnknownItem(_)
            | ActionError::UnknownTarget(_)
            | ActionError::InvalidTarget => ErrorSeverity::Validation,
        }
    }
}

/// Failure to start combat. Fatal: the encounter never begins.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("party roster is empty")]
    EmptyParty,

    #[error("encounter has no enemies")]
    EmptyEncounter,

    #[error("unknown enemy template {0:?}")]
    UnknownTemplate(String),

    #[error("{kind} id {id:?} referenced by the encounter does not resolve")]
    UnknownContent { kind: &'static str, id: String },
}

impl CombatError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }
}
