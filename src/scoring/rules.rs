use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::categories::{is_custom, SPECIAL_EVENT_FALLBACK};

fn default_active() -> bool {
    true
}

/// A single scoring rule: how many points one kind of event is worth.
///
/// Example YAML:
/// ```yaml
/// - { id: 1, category: weekly_events, subcategory: hoh_winner, points: 10 }
/// - { id: 7, category: weekly_events, subcategory: nominee, points: -2, is_active: false }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScoringRule {
    pub id: u32,
    pub category: String,
    pub subcategory: String,
    pub points: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl ScoringRule {
    pub fn new(id: u32, category: &str, subcategory: &str, points: i32) -> Self {
        Self {
            id,
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            points,
            is_active: true,
        }
    }
}

/// Tagged rule lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleRef<'a> {
    Id(u32),
    Key {
        category: &'a str,
        subcategory: &'a str,
    },
}

/// Read-only view over the active rules of a pool.
///
/// Rules are held in ascending id order, so when more than one active rule
/// shares a (category, subcategory) the lowest id is the one consulted.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    rules: Vec<ScoringRule>,
    by_key: HashMap<(String, String), usize>,
    by_id: HashMap<u32, usize>,
}

impl RuleStore {
    pub fn new(rules: impl IntoIterator<Item = ScoringRule>) -> Self {
        let mut rules: Vec<ScoringRule> = rules.into_iter().filter(|r| r.is_active).collect();
        rules.sort_by_key(|r| r.id);

        let mut by_key = HashMap::new();
        let mut by_id = HashMap::new();
        for (idx, rule) in rules.iter().enumerate() {
            by_id.entry(rule.id).or_insert(idx);
            let key = (rule.category.clone(), rule.subcategory.clone());
            if let Some(&kept) = by_key.get(&key) {
                let kept: &ScoringRule = &rules[kept];
                tracing::warn!(
                    category = %rule.category,
                    subcategory = %rule.subcategory,
                    kept = kept.id,
                    ignored = rule.id,
                    "duplicate active scoring rule; lowest id wins"
                );
            } else {
                by_key.insert(key, idx);
            }
        }

        tracing::debug!(active = rules.len(), "scoring rules loaded");
        Self { rules, by_key, by_id }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[ScoringRule] {
        &self.rules
    }

    pub fn resolve(&self, rule: &RuleRef<'_>) -> Option<&ScoringRule> {
        let idx = match rule {
            RuleRef::Id(id) => self.by_id.get(id),
            RuleRef::Key {
                category,
                subcategory,
            } => self
                .by_key
                .get(&(category.to_string(), subcategory.to_string())),
        };
        idx.map(|&i| &self.rules[i])
    }

    /// Points for the active rule matching both keys, or 0 when none does.
    pub fn get_points(&self, category: &str, subcategory: &str) -> i32 {
        self.resolve(&RuleRef::Key {
            category,
            subcategory,
        })
        .map(|r| r.points)
        .unwrap_or(0)
    }

    /// Resolve a special event type to a rule: first as a rule id, then as a
    /// subcategory under each fallback category in turn.
    pub fn resolve_event_type(&self, event_type: &str) -> Option<&ScoringRule> {
        let event_type = event_type.trim();
        if event_type.is_empty() || is_custom(event_type) {
            return None;
        }
        if let Ok(id) = event_type.parse::<u32>() {
            if let Some(rule) = self.resolve(&RuleRef::Id(id)) {
                return Some(rule);
            }
        }
        SPECIAL_EVENT_FALLBACK.iter().find_map(|&category| {
            self.resolve(&RuleRef::Key {
                category,
                subcategory: event_type,
            })
        })
    }

    pub fn event_points(&self, event_type: &str) -> i32 {
        self.resolve_event_type(event_type)
            .map(|r| r.points)
            .unwrap_or(0)
    }
}
