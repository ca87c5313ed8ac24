//! Rule categories and event-type identifiers understood by the engine.

pub const WEEKLY_EVENTS: &str = "weekly_events";
pub const SPECIAL_EVENTS: &str = "special_events";
pub const COMPETITIONS: &str = "competitions";
pub const JURY: &str = "jury";
pub const FINAL_PLACEMENT: &str = "final_placement";

pub const HOH_WINNER: &str = "hoh_winner";
pub const POV_WINNER: &str = "pov_winner";
pub const POV_USED_ON: &str = "pov_used_on";
pub const NOMINEE: &str = "nominee";
pub const REPLACEMENT_NOMINEE: &str = "replacement_nominee";
pub const ARENA_WINNER: &str = "arena_winner";
pub const SURVIVAL: &str = "survival";

/// Special event type whose points come from the entry itself, not a rule.
pub const CUSTOM_EVENT: &str = "custom";

/// Categories searched, in order, when a special event type is not a rule id.
pub const SPECIAL_EVENT_FALLBACK: [&str; 5] =
    [SPECIAL_EVENTS, WEEKLY_EVENTS, COMPETITIONS, JURY, FINAL_PLACEMENT];

/// Special events that take a contestant out of the game.
pub const DEACTIVATING_EVENTS: [&str; 2] = ["self_evicted", "removed_production"];

/// Special events that bring a contestant back into the game.
pub const REVIVAL_EVENTS: [&str; 1] = ["came_back"];

pub fn is_custom(event_type: &str) -> bool {
    event_type.trim().eq_ignore_ascii_case(CUSTOM_EVENT)
}

pub fn is_deactivating(event_type: &str) -> bool {
    let event_type = event_type.trim();
    DEACTIVATING_EVENTS
        .iter()
        .any(|e| e.eq_ignore_ascii_case(event_type))
}

pub fn is_revival(event_type: &str) -> bool {
    let event_type = event_type.trim();
    REVIVAL_EVENTS.iter().any(|e| e.eq_ignore_ascii_case(event_type))
}
