use std::collections::BTreeSet;

use super::types::{WeekRecord, WeekStatus};
use crate::scoring::categories::{is_deactivating, is_revival};
use crate::scoring::WeeklyEventFact;

/// A change to whether a contestant is still in the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    Evicted(String),
    Deactivated { name: String, event_type: String },
    Revived(String),
}

impl StatusChange {
    pub fn name(&self) -> &str {
        match self {
            StatusChange::Evicted(name) | StatusChange::Revived(name) => name,
            StatusChange::Deactivated { name, .. } => name,
        }
    }

    pub fn is_active_after(&self) -> bool {
        matches!(self, StatusChange::Revived(_))
    }
}

/// Status changes a week causes: evictions first, then special events in order.
pub fn status_changes(fact: &WeeklyEventFact) -> Vec<StatusChange> {
    let mut changes: Vec<StatusChange> = fact
        .evicted_names()
        .into_iter()
        .map(|name| StatusChange::Evicted(name.to_string()))
        .collect();

    for event in &fact.special_events {
        let name = event.contestant.trim();
        if name.is_empty() {
            continue;
        }
        if is_deactivating(&event.event_type) {
            changes.push(StatusChange::Deactivated {
                name: name.to_string(),
                event_type: event.event_type.trim().to_string(),
            });
        } else if is_revival(&event.event_type) {
            changes.push(StatusChange::Revived(name.to_string()));
        }
    }

    changes
}

/// Names out of the game after replaying the given weeks in order.
pub fn out_of_game<'a>(facts: impl IntoIterator<Item = &'a WeeklyEventFact>) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for fact in facts {
        for change in status_changes(fact) {
            if change.is_active_after() {
                out.remove(change.name());
            } else {
                out.insert(change.name().to_string());
            }
        }
    }
    out
}

/// Only finalized weeks, in week order.
pub fn final_weeks(weeks: &[WeekRecord]) -> Vec<&WeekRecord> {
    let mut finals: Vec<&WeekRecord> = weeks
        .iter()
        .filter(|w| w.status == WeekStatus::Final)
        .collect();
    finals.sort_by_key(|w| w.week());
    finals
}
