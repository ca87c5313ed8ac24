use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contestant name -> points. Ordered so output is stable.
pub type PointsMap = BTreeMap<String, i32>;

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Contestant {
    pub id: u32,
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Contestant {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            is_active: true,
        }
    }
}

/// The competition and nomination outcomes of one eviction round.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct EvictionRound {
    pub hoh_winner: Option<String>,
    pub pov_winner: Option<String>,
    pub pov_used: bool,
    pub pov_used_on: Option<String>,
    pub nominees: Vec<String>,
    pub replacement_nominee: Option<String>,
    pub evicted: Option<String>,
}

impl EvictionRound {
    pub fn hoh_winner(&self) -> Option<&str> {
        non_blank(&self.hoh_winner)
    }

    pub fn pov_winner(&self) -> Option<&str> {
        non_blank(&self.pov_winner)
    }

    /// The veto target, only when the veto was actually used.
    pub fn pov_used_on(&self) -> Option<&str> {
        if self.pov_used {
            non_blank(&self.pov_used_on)
        } else {
            None
        }
    }

    pub fn nominees(&self) -> impl Iterator<Item = &str> {
        self.nominees.iter().map(|n| n.trim()).filter(|n| !n.is_empty())
    }

    pub fn replacement_nominee(&self) -> Option<&str> {
        non_blank(&self.replacement_nominee)
    }

    pub fn evicted(&self) -> Option<&str> {
        non_blank(&self.evicted)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SpecialEvent {
    pub contestant: String,
    /// Rule id, rule subcategory, or `custom`.
    pub event_type: String,
    pub custom_points: Option<i32>,
    pub description: Option<String>,
}

/// Everything that happened in one week of the game.
///
/// The first round's fields sit at the top level; double and triple
/// eviction weeks carry their extra rounds in `second_round` / `third_round`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(from = "FactRecord", into = "FactRecord")]
pub struct WeeklyEventFact {
    pub week: u32,
    pub round: EvictionRound,
    pub arena_winner: Option<String>,
    pub special_events: Vec<SpecialEvent>,
    pub is_double_eviction: bool,
    pub is_triple_eviction: bool,
    pub second_round: Option<EvictionRound>,
    pub third_round: Option<EvictionRound>,
}

impl WeeklyEventFact {
    pub fn arena_winner(&self) -> Option<&str> {
        non_blank(&self.arena_winner)
    }

    /// Rounds that count toward scoring, numbered from 1.
    pub fn counted_rounds(&self) -> Vec<(u8, &EvictionRound)> {
        let mut rounds = vec![(1, &self.round)];
        if self.is_double_eviction || self.is_triple_eviction {
            if let Some(ref second) = self.second_round {
                rounds.push((2, second));
            }
        }
        if self.is_triple_eviction {
            if let Some(ref third) = self.third_round {
                rounds.push((3, third));
            }
        }
        rounds
    }

    /// Names evicted in any counted round this week.
    pub fn evicted_names(&self) -> Vec<&str> {
        self.counted_rounds()
            .into_iter()
            .filter_map(|(_, round)| round.evicted())
            .collect()
    }
}

/// On-disk shape of a week: first-round fields inline with the rest.
#[derive(Default, Deserialize, Serialize)]
#[serde(default)]
struct FactRecord {
    week: u32,
    hoh_winner: Option<String>,
    pov_winner: Option<String>,
    pov_used: bool,
    pov_used_on: Option<String>,
    nominees: Vec<String>,
    replacement_nominee: Option<String>,
    evicted: Option<String>,
    arena_winner: Option<String>,
    special_events: Vec<SpecialEvent>,
    is_double_eviction: bool,
    is_triple_eviction: bool,
    second_round: Option<EvictionRound>,
    third_round: Option<EvictionRound>,
}

impl From<FactRecord> for WeeklyEventFact {
    fn from(r: FactRecord) -> Self {
        Self {
            week: r.week,
            round: EvictionRound {
                hoh_winner: r.hoh_winner,
                pov_winner: r.pov_winner,
                pov_used: r.pov_used,
                pov_used_on: r.pov_used_on,
                nominees: r.nominees,
                replacement_nominee: r.replacement_nominee,
                evicted: r.evicted,
            },
            arena_winner: r.arena_winner,
            special_events: r.special_events,
            is_double_eviction: r.is_double_eviction,
            is_triple_eviction: r.is_triple_eviction,
            second_round: r.second_round,
            third_round: r.third_round,
        }
    }
}

impl From<WeeklyEventFact> for FactRecord {
    fn from(f: WeeklyEventFact) -> Self {
        Self {
            week: f.week,
            hoh_winner: f.round.hoh_winner,
            pov_winner: f.round.pov_winner,
            pov_used: f.round.pov_used,
            pov_used_on: f.round.pov_used_on,
            nominees: f.round.nominees,
            replacement_nominee: f.round.replacement_nominee,
            evicted: f.round.evicted,
            arena_winner: f.arena_winner,
            special_events: f.special_events,
            is_double_eviction: f.is_double_eviction,
            is_triple_eviction: f.is_triple_eviction,
            second_round: f.second_round,
            third_round: f.third_round,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
