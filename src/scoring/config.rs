use serde::{Deserialize, Serialize};

use super::categories::*;
use super::rules::{RuleStore, ScoringRule};

/// Scoring section of the pool config.
///
/// Holds the flat rule table. When `rules` is omitted the default table is used.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   rules:
///     - { id: 1, category: weekly_events, subcategory: hoh_winner, points: 10 }
///     - { id: 2, category: weekly_events, subcategory: survival, points: 2 }
///     - { id: 3, category: special_events, subcategory: won_prize, points: 2 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default)]
    pub rules: Option<Vec<ScoringRule>>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            rules: Some(default_rules()),
        }
    }
}

impl ScoringConfig {
    /// Rules in effect: the configured table, or the defaults when none is given.
    pub fn effective_rules(&self) -> Vec<ScoringRule> {
        self.rules.clone().unwrap_or_else(default_rules)
    }

    pub fn rule_store(&self) -> RuleStore {
        RuleStore::new(self.effective_rules())
    }
}

/// The stock rule table for a new pool.
pub fn default_rules() -> Vec<ScoringRule> {
    let table: [(&str, &str, i32); 16] = [
        (WEEKLY_EVENTS, HOH_WINNER, 10),
        (WEEKLY_EVENTS, POV_WINNER, 5),
        (WEEKLY_EVENTS, POV_USED_ON, 3),
        (WEEKLY_EVENTS, NOMINEE, -2),
        (WEEKLY_EVENTS, REPLACEMENT_NOMINEE, -1),
        (WEEKLY_EVENTS, ARENA_WINNER, 3),
        (WEEKLY_EVENTS, SURVIVAL, 2),
        (SPECIAL_EVENTS, "won_prize", 2),
        (SPECIAL_EVENTS, "punishment", -1),
        (SPECIAL_EVENTS, "self_evicted", -5),
        (SPECIAL_EVENTS, "removed_production", -5),
        (SPECIAL_EVENTS, "came_back", 5),
        (SPECIAL_EVENTS, "won_special_power", 3),
        (FINAL_PLACEMENT, "winner", 20),
        (FINAL_PLACEMENT, "runner_up", 10),
        (FINAL_PLACEMENT, "americas_favorite", 5),
    ];

    table
        .iter()
        .zip(1u32..)
        .map(|(&(category, subcategory, points), id)| {
            ScoringRule::new(id, category, subcategory, points)
        })
        .collect()
}
