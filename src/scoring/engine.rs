use std::collections::HashSet;

use super::categories::*;
use super::rules::RuleStore;
use super::types::{Contestant, EvictionRound, PointsMap, WeeklyEventFact};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointContribution {
    pub contestant: String,
    pub label: String, // e.g. "HOH", "Nominee (round 2)", "Special: won_prize"
    pub points: i32,
}

#[derive(Debug, Clone, Default)]
pub struct WeeklyPoints {
    pub points: PointsMap,
    pub contributions: Vec<PointContribution>,
}

/// Points earned by each contestant for one week.
pub fn accumulate(
    fact: &WeeklyEventFact,
    active_roster: &[Contestant],
    previously_evicted: &[String],
    rules: &RuleStore,
) -> PointsMap {
    accumulate_with_breakdown(fact, active_roster, previously_evicted, rules).points
}

/// Same as [`accumulate`], also recording every non-zero addition in the order applied.
pub fn accumulate_with_breakdown(
    fact: &WeeklyEventFact,
    active_roster: &[Contestant],
    previously_evicted: &[String],
    rules: &RuleStore,
) -> WeeklyPoints {
    let mut acc = Accumulator::new(rules);

    for contestant in active_roster {
        acc.touch(&contestant.name);
    }

    acc.apply_round(&fact.round, "");

    if let Some(winner) = fact.arena_winner() {
        acc.credit(winner, "Arena winner", rules.get_points(WEEKLY_EVENTS, ARENA_WINNER));
    }

    // Survival
    let evicted_now: HashSet<&str> = fact.evicted_names().into_iter().collect();
    let evicted_before: HashSet<&str> = previously_evicted.iter().map(|n| n.trim()).collect();
    let survival = rules.get_points(WEEKLY_EVENTS, SURVIVAL);
    for contestant in active_roster {
        let name = contestant.name.trim();
        if !evicted_now.contains(name) && !evicted_before.contains(name) {
            acc.credit(name, "Survival", survival);
        }
    }

    for event in &fact.special_events {
        let (label, points) = if is_custom(&event.event_type) {
            let label = match event.description.as_deref() {
                Some(d) if !d.trim().is_empty() => format!("Custom: {}", d.trim()),
                _ => "Custom".to_string(),
            };
            (label, event.custom_points.unwrap_or(0))
        } else {
            (
                format!("Special: {}", event.event_type.trim()),
                rules.event_points(&event.event_type),
            )
        };
        acc.credit(&event.contestant, &label, points);
    }

    for (number, round) in fact.counted_rounds().into_iter().skip(1) {
        acc.apply_round(round, &format!(" (round {})", number));
    }

    acc.finish()
}

struct Accumulator<'a> {
    rules: &'a RuleStore,
    points: PointsMap,
    contributions: Vec<PointContribution>,
}

impl<'a> Accumulator<'a> {
    fn new(rules: &'a RuleStore) -> Self {
        Self {
            rules,
            points: PointsMap::new(),
            contributions: Vec::new(),
        }
    }

    fn touch(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() {
            self.points.entry(name.to_string()).or_insert(0);
        }
    }

    fn credit(&mut self, name: &str, label: &str, points: i32) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let total = self.points.entry(name.to_string()).or_insert(0);
        *total = total.saturating_add(points);
        if points != 0 {
            self.contributions.push(PointContribution {
                contestant: name.to_string(),
                label: label.to_string(),
                points,
            });
        }
    }

    /// HOH, veto, nominations and replacement for one round.
    fn apply_round(&mut self, round: &EvictionRound, suffix: &str) {
        let weekly = |sub: &str| self.rules.get_points(WEEKLY_EVENTS, sub);
        let hoh = weekly(HOH_WINNER);
        let pov = weekly(POV_WINNER);
        let pov_used_on = weekly(POV_USED_ON);
        let nominee = weekly(NOMINEE);
        let replacement = weekly(REPLACEMENT_NOMINEE);

        if let Some(name) = round.hoh_winner() {
            self.credit(name, &format!("HOH{}", suffix), hoh);
        }
        if let Some(name) = round.pov_winner() {
            self.credit(name, &format!("POV{}", suffix), pov);
        }
        if let Some(name) = round.pov_used_on() {
            self.credit(name, &format!("Saved by POV{}", suffix), pov_used_on);
        }
        for name in round.nominees() {
            self.credit(name, &format!("Nominee{}", suffix), nominee);
        }
        if let Some(name) = round.replacement_nominee() {
            self.credit(name, &format!("Replacement nominee{}", suffix), replacement);
        }
    }

    fn finish(self) -> WeeklyPoints {
        WeeklyPoints {
            points: self.points,
            contributions: self.contributions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::rules::ScoringRule;
    use crate::scoring::types::SpecialEvent;

    fn rules() -> RuleStore {
        RuleStore::new(vec![
            ScoringRule::new(1, WEEKLY_EVENTS, HOH_WINNER, 2),
            ScoringRule::new(2, WEEKLY_EVENTS, POV_WINNER, 2),
            ScoringRule::new(3, WEEKLY_EVENTS, NOMINEE, -1),
            ScoringRule::new(4, WEEKLY_EVENTS, SURVIVAL, 1),
        ])
    }

    fn roster(names: &[&str]) -> Vec<Contestant> {
        names
            .iter()
            .zip(1u32..)
            .map(|(n, id)| Contestant::new(id, n))
            .collect()
    }

    fn some(name: &str) -> Option<String> {
        Some(name.to_string())
    }

    #[test]
    fn test_basic_week() {
        let fact = WeeklyEventFact {
            week: 1,
            round: EvictionRound {
                hoh_winner: some("A"),
                pov_winner: some("B"),
                nominees: vec!["C".to_string(), "D".to_string()],
                evicted: some("D"),
                ..Default::default()
            },
            ..Default::default()
        };
        let map = accumulate(&fact, &roster(&["A", "B", "C", "D"]), &[], &rules());
        assert_eq!(map["A"], 3);
        assert_eq!(map["B"], 3);
        assert_eq!(map["C"], 0);
        assert_eq!(map["D"], -1);
    }

    #[test]
    fn test_empty_fact_only_survival() {
        let fact = WeeklyEventFact::default();
        let map = accumulate(&fact, &roster(&["A", "B"]), &[], &rules());
        assert_eq!(map.len(), 2);
        assert!(map.values().all(|&p| p == 1));
    }

    #[test]
    fn test_previously_evicted_gets_no_survival() {
        let fact = WeeklyEventFact::default();
        let map = accumulate(&fact, &roster(&["A", "B"]), &["B".to_string()], &rules());
        assert_eq!(map["A"], 1);
        assert_eq!(map["B"], 0);
    }

    #[test]
    fn test_pov_used_on_only_when_used() {
        let rules = RuleStore::new(vec![ScoringRule::new(1, WEEKLY_EVENTS, POV_USED_ON, 4)]);
        let mut fact = WeeklyEventFact {
            round: EvictionRound {
                pov_used_on: some("A"),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(accumulate(&fact, &roster(&["A"]), &[], &rules)["A"], 0);
        fact.round.pov_used = true;
        assert_eq!(accumulate(&fact, &roster(&["A"]), &[], &rules)["A"], 4);
    }

    #[test]
    fn test_replacement_and_arena() {
        let rules = RuleStore::new(vec![
            ScoringRule::new(1, WEEKLY_EVENTS, REPLACEMENT_NOMINEE, -3),
            ScoringRule::new(2, WEEKLY_EVENTS, ARENA_WINNER, 6),
        ]);
        let fact = WeeklyEventFact {
            round: EvictionRound {
                replacement_nominee: some("A"),
                ..Default::default()
            },
            arena_winner: some("B"),
            ..Default::default()
        };
        let map = accumulate(&fact, &roster(&["A", "B"]), &[], &rules);
        assert_eq!(map["A"], -3);
        assert_eq!(map["B"], 6);
    }

    #[test]
    fn test_empty_nominee_slots_ignored() {
        let fact = WeeklyEventFact {
            round: EvictionRound {
                nominees: vec!["".to_string(), "A".to_string(), "  ".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        let map = accumulate(&fact, &roster(&["A"]), &[], &rules());
        assert_eq!(map.len(), 1);
        assert_eq!(map["A"], 0); // -1 nominee, +1 survival
    }

    #[test]
    fn test_custom_and_unknown_special_events() {
        let fact = WeeklyEventFact {
            special_events: vec![
                SpecialEvent {
                    contestant: "A".to_string(),
                    event_type: "custom".to_string(),
                    custom_points: Some(7),
                    description: some("Won a car"),
                },
                SpecialEvent {
                    contestant: "B".to_string(),
                    event_type: "foo".to_string(),
                    ..Default::default()
                },
                SpecialEvent {
                    contestant: "B".to_string(),
                    event_type: "custom".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let result = accumulate_with_breakdown(&fact, &roster(&["A", "B"]), &[], &rules());
        assert_eq!(result.points["A"], 8);
        assert_eq!(result.points["B"], 1);
        assert!(result
            .contributions
            .iter()
            .any(|c| c.label == "Custom: Won a car" && c.points == 7));
    }

    #[test]
    fn test_special_event_by_rule_id() {
        let rules = RuleStore::new(vec![ScoringRule::new(42, SPECIAL_EVENTS, "won_prize", 5)]);
        let fact = WeeklyEventFact {
            special_events: vec![SpecialEvent {
                contestant: "A".to_string(),
                event_type: "42".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(accumulate(&fact, &roster(&["A"]), &[], &rules)["A"], 5);
    }

    #[test]
    fn test_off_roster_names_still_credited() {
        let fact = WeeklyEventFact {
            round: EvictionRound {
                hoh_winner: some("Z"),
                ..Default::default()
            },
            ..Default::default()
        };
        let map = accumulate(&fact, &roster(&["A"]), &[], &rules());
        assert_eq!(map["Z"], 2);
        assert_eq!(map["A"], 1);
    }

    #[test]
    fn test_double_eviction_is_additive() {
        let round = EvictionRound {
            hoh_winner: some("A"),
            pov_winner: some("A"),
            nominees: vec!["B".to_string(), "C".to_string()],
            evicted: some("C"),
            ..Default::default()
        };
        let second = EvictionRound {
            hoh_winner: some("A"),
            pov_winner: some("B"),
            nominees: vec!["B".to_string(), "D".to_string()],
            evicted: some("D"),
            ..Default::default()
        };
        let fact = WeeklyEventFact {
            round,
            is_double_eviction: true,
            second_round: Some(second),
            ..Default::default()
        };
        let result = accumulate_with_breakdown(&fact, &roster(&["A", "B", "C", "D"]), &[], &rules());
        let map = &result.points;
        assert_eq!(map["A"], 2 + 2 + 1 + 2); // HOH, POV, survival, round 2 HOH
        assert_eq!(map["B"], -1 + 1 + 2 - 1); // nominee, survival, round 2 POV, nominee
        assert_eq!(map["C"], -1);
        assert_eq!(map["D"], -1);
        assert!(result.contributions.iter().any(|c| c.label == "HOH (round 2)"));
    }

    #[test]
    fn test_triple_eviction_is_additive() {
        let nominees = |a: &str, b: &str| vec![a.to_string(), b.to_string()];
        let mut fact = WeeklyEventFact {
            round: EvictionRound {
                hoh_winner: some("A"),
                nominees: nominees("B", "C"),
                evicted: some("B"),
                ..Default::default()
            },
            is_triple_eviction: true,
            second_round: Some(EvictionRound {
                hoh_winner: some("A"),
                pov_winner: some("C"),
                nominees: nominees("C", "D"),
                evicted: some("C"),
                ..Default::default()
            }),
            third_round: Some(EvictionRound {
                hoh_winner: some("A"),
                nominees: nominees("D", "E"),
                evicted: some("D"),
                ..Default::default()
            }),
            ..Default::default()
        };
        let roster = roster(&["A", "B", "C", "D", "E"]);

        let result = accumulate_with_breakdown(&fact, &roster, &[], &rules());
        let map = &result.points;
        assert_eq!(map["A"], 2 + 1 + 2 + 2); // three HOH wins, survival
        assert_eq!(map["B"], -1);
        assert_eq!(map["C"], -1 + 2 - 1); // no survival, evicted in round 2
        assert_eq!(map["D"], -1 - 1); // no survival, evicted in round 3
        assert_eq!(map["E"], 1 - 1);
        assert!(result.contributions.iter().any(|c| c.label == "HOH (round 3)"));

        // Without the triple flag the third round is ignored
        fact.is_triple_eviction = false;
        fact.is_double_eviction = true;
        let map = accumulate(&fact, &roster, &[], &rules());
        assert_eq!(map["A"], 2 + 1 + 2);
        assert_eq!(map["D"], -1 + 1);
        assert_eq!(map["E"], 1);
    }

    #[test]
    fn test_huge_rule_values_saturate() {
        let rules = RuleStore::new(vec![
            ScoringRule::new(1, WEEKLY_EVENTS, HOH_WINNER, i32::MAX),
            ScoringRule::new(2, WEEKLY_EVENTS, SURVIVAL, 1),
            ScoringRule::new(3, WEEKLY_EVENTS, NOMINEE, i32::MIN),
        ]);
        let fact = WeeklyEventFact {
            round: EvictionRound {
                hoh_winner: some("A"),
                nominees: vec!["B".to_string()],
                ..Default::default()
            },
            is_double_eviction: true,
            second_round: Some(EvictionRound {
                nominees: vec!["B".to_string()],
                ..Default::default()
            }),
            ..Default::default()
        };
        let map = accumulate(&fact, &roster(&["A", "B"]), &[], &rules);
        assert_eq!(map["A"], i32::MAX);
        assert_eq!(map["B"], i32::MIN);
    }

    #[test]
    fn test_breakdown_skips_zero_rules() {
        let fact = WeeklyEventFact {
            round: EvictionRound {
                replacement_nominee: some("A"),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = accumulate_with_breakdown(&fact, &roster(&["A"]), &[], &rules());
        assert_eq!(result.contributions.len(), 1);
        assert_eq!(result.contributions[0].label, "Survival");
    }
}
