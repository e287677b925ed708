//! Immutable records of resolved turns.
//!
//! A [`TurnResult`] is the engine's only output channel: the presentation
//! layer animates from it, logs replay it, and tests assert on it. Results
//! are append-only during resolution and summarized once at the end.

use crate::action::CombatAction;
use crate::state::CombatantId;

/// What produced this result.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TurnOrigin {
    /// A resolved combat action.
    Action(CombatAction),
    /// Start-of-turn periodic effects for the given combatant.
    StatusTick(CombatantId),
    /// End-of-round duration countdown.
    RoundEnd,
}

/// Per-sub-hit outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HitOutcome {
    Hit,
    Critical,
    Miss,
}

/// Value applied by one sub-hit or effect resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AppliedValue {
    /// HP removed after shields and clamping.
    Damage { amount: u32 },
    /// HP restored after clamping to max.
    Healing { amount: u32 },
    /// SP restored after clamping to max.
    SpRestored { amount: u32 },
    /// The sub-hit resolved with no HP/SP change.
    None,
}

/// One sub-hit against one target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitRecord {
    /// The combatant that actually received the value.
    pub target: CombatantId,
    pub outcome: HitOutcome,
    pub value: AppliedValue,
    /// Set when a redirect effect rerouted this hit; holds the combatant the
    /// hit was originally aimed at.
    pub redirected_from: Option<CombatantId>,
    /// Damage soaked by an absorption shield before HP was touched.
    pub absorbed: u32,
}

impl HitRecord {
    pub fn miss(target: CombatantId) -> Self {
        Self {
            target,
            outcome: HitOutcome::Miss,
            value: AppliedValue::None,
            redirected_from: None,
            absorbed: 0,
        }
    }
}

/// Aggregated totals for quick access without iterating sub-hits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnSummary {
    pub total_damage: u32,
    pub total_healing: u32,
    pub any_critical: bool,
}

/// The immutable record of one resolved action or tick.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnResult {
    pub origin: TurnOrigin,
    /// Sub-hit records in resolution order.
    pub hits: Vec<HitRecord>,
    /// States applied, as (owner, state id) in application order.
    pub states_applied: Vec<(CombatantId, String)>,
    /// States removed (expiry, cure, depleted shield), in removal order.
    pub states_removed: Vec<(CombatantId, String)>,
    /// Combatants whose HP reached 0 during this resolution.
    pub deaths: Vec<CombatantId>,
    /// True when this action ended combat by successful escape.
    pub fled: bool,
    pub summary: TurnSummary,
}

impl TurnResult {
    pub fn new(origin: TurnOrigin) -> Self {
        Self {
            origin,
            hits: Vec::new(),
            states_applied: Vec::new(),
            states_removed: Vec::new(),
            deaths: Vec::new(),
            fled: false,
            summary: TurnSummary::default(),
        }
    }

    /// Recomputes the summary from the recorded sub-hits.
    pub fn finish(mut self) -> Self {
        let mut summary = TurnSummary::default();
        for hit in &self.hits {
            match hit.value {
                AppliedValue::Damage { amount } => summary.total_damage += amount,
                AppliedValue::Healing { amount } => summary.total_healing += amount,
                AppliedValue::SpRestored { .. } | AppliedValue::None => {}
            }
            if hit.outcome == HitOutcome::Critical {
                summary.any_critical = true;
            }
        }
        self.summary = summary;
        self
    }

    /// True when nothing observable happened (no hits, states, or deaths).
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
            && self.states_applied.is_empty()
            && self.states_removed.is_empty()
            && self.deaths.is_empty()
            && !self.fled
    }
}
