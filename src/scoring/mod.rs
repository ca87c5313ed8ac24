pub mod aggregate;
pub mod categories;
pub mod config;
pub mod engine;
pub mod rules;
pub mod types;
pub mod validation;

pub use aggregate::{cumulative_points, standings, total_for, TeamStanding};
pub use config::{default_rules, ScoringConfig};
pub use engine::{accumulate, accumulate_with_breakdown, PointContribution, WeeklyPoints};
pub use rules::{RuleRef, RuleStore, ScoringRule};
pub use types::{Contestant, EvictionRound, PointsMap, SpecialEvent, WeeklyEventFact};
pub use validation::validate_rules;
