use bb_pool::scoring::categories::*;
use bb_pool::scoring::{
    accumulate, total_for, Contestant, EvictionRound, PointsMap, RuleStore, ScoringRule,
    SpecialEvent, WeeklyEventFact,
};
use proptest::prelude::*;

const NAMES: [&str; 6] = ["Ava", "Bo", "Cy", "Dee", "Eli", "Fay"];

fn roster() -> Vec<Contestant> {
    NAMES
        .iter()
        .zip(1u32..)
        .map(|(n, id)| Contestant::new(id, n))
        .collect()
}

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(NAMES.to_vec()).prop_map(str::to_string)
}

fn name_or_blank() -> impl Strategy<Value = String> {
    prop_oneof![name(), Just(String::new()), Just("  ".to_string())]
}

fn round() -> impl Strategy<Value = EvictionRound> {
    (
        prop::option::of(name_or_blank()),
        prop::option::of(name_or_blank()),
        any::<bool>(),
        prop::option::of(name()),
        prop::collection::vec(name_or_blank(), 0..4),
        prop::option::of(name()),
    )
        .prop_map(
            |(hoh_winner, pov_winner, pov_used, pov_used_on, nominees, replacement_nominee)| {
                EvictionRound {
                    hoh_winner,
                    pov_winner,
                    pov_used,
                    pov_used_on,
                    nominees,
                    replacement_nominee,
                    evicted: None,
                }
            },
        )
}

fn weekly_rules() -> impl Strategy<Value = Vec<ScoringRule>> {
    prop::collection::vec(-10i32..10, 7).prop_map(|points| {
        [
            HOH_WINNER,
            POV_WINNER,
            POV_USED_ON,
            NOMINEE,
            REPLACEMENT_NOMINEE,
            ARENA_WINNER,
            SURVIVAL,
        ]
        .iter()
        .zip(points)
        .zip(1u32..)
        .map(|((sub, p), id)| ScoringRule::new(id, WEEKLY_EVENTS, sub, p))
        .collect()
    })
}

fn without_survival(rules: &[ScoringRule]) -> RuleStore {
    RuleStore::new(rules.iter().filter(|r| r.subcategory != SURVIVAL).cloned())
}

proptest! {
    #[test]
    fn unrecognized_rules_score_nothing(
        round in round(),
        points in prop::collection::vec(-10i32..10, 1..6),
        event_types in prop::collection::vec("[a-z]{3,8}", 0..4),
        evicted in prop::option::of(name()),
    ) {
        // Rules exist, but under a category the engine never consults
        let rules = RuleStore::new(points.iter().zip(1u32..).map(|(p, id)| {
            ScoringRule::new(id, "zz_unused", HOH_WINNER, *p)
        }));
        let fact = WeeklyEventFact {
            week: 1,
            round: EvictionRound { evicted, ..round },
            special_events: event_types
                .into_iter()
                .map(|event_type| SpecialEvent {
                    contestant: "Ava".to_string(),
                    event_type,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };

        let map = accumulate(&fact, &roster(), &[], &rules);
        prop_assert!(map.values().all(|&p| p == 0), "{:?}", map);
    }

    #[test]
    fn survival_sum_matches_survivors(
        survival in -5i32..6,
        evicted in prop::option::of(name()),
        previously in prop::collection::btree_set(name(), 0..3),
    ) {
        let rules = RuleStore::new(vec![ScoringRule::new(1, WEEKLY_EVENTS, SURVIVAL, survival)]);
        let fact = WeeklyEventFact {
            round: EvictionRound { evicted: evicted.clone(), ..Default::default() },
            ..Default::default()
        };
        let previously: Vec<String> = previously.into_iter().collect();

        let map = accumulate(&fact, &roster(), &previously, &rules);

        let survivors = NAMES
            .iter()
            .filter(|n| evicted.as_deref() != Some(**n) && !previously.iter().any(|p| p == *n))
            .count() as i32;
        prop_assert_eq!(map.values().sum::<i32>(), survival * survivors);
    }

    #[test]
    fn accumulate_is_idempotent(rules in weekly_rules(), first in round(), arena in prop::option::of(name())) {
        let store = RuleStore::new(rules);
        let fact = WeeklyEventFact {
            round: first,
            arena_winner: arena,
            ..Default::default()
        };
        let once = accumulate(&fact, &roster(), &[], &store);
        let twice = accumulate(&fact, &roster(), &[], &store);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn double_eviction_round_is_additive(rules in weekly_rules(), first in round(), second in round()) {
        let store = RuleStore::new(rules.clone());
        let single = WeeklyEventFact { round: first.clone(), ..Default::default() };
        let double = WeeklyEventFact {
            round: first,
            is_double_eviction: true,
            second_round: Some(second.clone()),
            ..Default::default()
        };

        let base = accumulate(&single, &roster(), &[], &store);
        let combined = accumulate(&double, &roster(), &[], &store);
        let extra = accumulate(
            &WeeklyEventFact { round: second, ..Default::default() },
            &[],
            &[],
            &without_survival(&rules),
        );

        let mut expected: PointsMap = base;
        for (contestant, points) in extra {
            *expected.entry(contestant).or_insert(0) += points;
        }
        prop_assert_eq!(combined, expected);
    }

    #[test]
    fn triple_eviction_round_is_additive(
        rules in weekly_rules(),
        first in round(),
        second in round(),
        third in round(),
    ) {
        let store = RuleStore::new(rules.clone());
        let double = WeeklyEventFact {
            round: first,
            is_double_eviction: true,
            second_round: Some(second),
            third_round: Some(third.clone()),
            ..Default::default()
        };
        let triple = WeeklyEventFact {
            is_triple_eviction: true,
            ..double.clone()
        };

        let base = accumulate(&double, &roster(), &[], &store);
        let combined = accumulate(&triple, &roster(), &[], &store);
        let extra = accumulate(
            &WeeklyEventFact { round: third, ..Default::default() },
            &[],
            &[],
            &without_survival(&rules),
        );

        // A third round without the triple flag must not have counted
        let without_third = accumulate(
            &WeeklyEventFact { third_round: None, ..double },
            &roster(),
            &[],
            &store,
        );
        prop_assert_eq!(&base, &without_third);

        let mut expected: PointsMap = base;
        for (contestant, points) in extra {
            *expected.entry(contestant).or_insert(0) += points;
        }
        prop_assert_eq!(combined, expected);
    }

    #[test]
    fn team_total_is_sum_plus_bonus(
        weeks in prop::collection::vec(prop::collection::btree_map(name(), -10i32..10, 0..6), 0..5),
        team in prop::collection::vec(name(), 0..4),
        bonus in -20i32..20,
    ) {
        let expected: i32 = team
            .iter()
            .map(|n| weeks.iter().map(|w| w.get(n).copied().unwrap_or(0)).sum::<i32>())
            .sum::<i32>() + bonus;
        prop_assert_eq!(total_for(team.as_slice(), &weeks, bonus), expected);
    }
}
