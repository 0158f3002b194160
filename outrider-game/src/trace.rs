//! Explainability telemetry for weighted mount selection.
//!
//! Every weighted draw records the pool it ran over, the roll it used,
//! and the per-candidate weight factors, so hosts can surface or log
//! why a particular species was picked.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Maximum factor capacity stored inline without additional allocations.
pub type FactorSet = SmallVec<[WeightFactor; 4]>;

/// Single multiplicative weight factor applied during selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightFactor {
    pub label: String,
    pub value: f64,
}

impl WeightFactor {
    #[must_use]
    pub fn new(label: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// Candidate weight telemetry captured during a draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCandidate {
    pub id: String,
    pub base_weight: f64,
    /// Multipliers applied in order.
    #[serde(default)]
    pub multipliers: FactorSet,
    pub final_weight: f64,
}

/// Random roll value used by weighted selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RollValue {
    U32(u32),
    F64(f64),
}

/// Trace of one weighted species draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountDecisionTrace {
    /// Identifier for the selection pool (e.g., `outrider.mount.in_biome`).
    pub pool_id: String,
    /// Random draw used to select from the weighted pool.
    pub roll: RollValue,
    /// Candidate weights considered during selection.
    pub candidates: Vec<WeightedCandidate>,
    /// Identifier of the selected candidate.
    pub chosen_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_trace_roundtrips() {
        let mut multipliers = FactorSet::new();
        multipliers.push(WeightFactor::new("wildness_penalty", 0.8));
        let trace = MountDecisionTrace {
            pool_id: String::from("outrider.mount.in_biome"),
            roll: RollValue::F64(1.25),
            candidates: vec![WeightedCandidate {
                id: String::from("horse"),
                base_weight: 2.1,
                multipliers,
                final_weight: 1.68,
            }],
            chosen_id: String::from("horse"),
        };

        let json = serde_json::to_string(&trace).expect("serialize");
        let restored: MountDecisionTrace = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, trace);
    }
}
