use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::error::PoolError;
use super::filter::{final_weeks, out_of_game, status_changes, StatusChange};
use crate::scoring::{
    accumulate_with_breakdown, standings, Contestant, PointsMap, RuleStore, TeamStanding,
    WeeklyEventFact, WeeklyPoints,
};

pub const POOL_STATE_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStatus {
    Draft,
    Final,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekRecord {
    pub status: WeekStatus,
    #[serde(default)]
    pub finalized_at: Option<DateTime<Utc>>,
    pub fact: WeeklyEventFact,
}

impl WeekRecord {
    pub fn draft(fact: WeeklyEventFact) -> Self {
        Self {
            status: WeekStatus::Draft,
            finalized_at: None,
            fact,
        }
    }

    pub fn final_at(fact: WeeklyEventFact, at: Option<DateTime<Utc>>) -> Self {
        Self {
            status: WeekStatus::Final,
            finalized_at: at,
            fact,
        }
    }

    pub fn week(&self) -> u32 {
        self.fact.week
    }

    pub fn is_final(&self) -> bool {
        self.status == WeekStatus::Final
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
    pub picks: Vec<String>,
    /// Bonus question id -> answer
    #[serde(default)]
    pub bonus_answers: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BonusQuestion {
    pub id: String,
    pub prompt: String,
    pub points: i32,
    /// None until the answer is revealed.
    #[serde(default)]
    pub correct_answers: Option<Vec<String>>,
}

impl BonusQuestion {
    /// Points for an answer: matches any correct answer, trimmed and case-insensitive.
    pub fn points_for(&self, answer: Option<&str>) -> i32 {
        let (Some(correct), Some(answer)) = (&self.correct_answers, answer) else {
            return 0;
        };
        let answer = answer.trim();
        if answer.is_empty() {
            return 0;
        }
        if correct.iter().any(|c| c.trim().eq_ignore_ascii_case(answer)) {
            self.points
        } else {
            0
        }
    }
}

/// Everything persisted about one pool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PoolState {
    pub version: u32,
    pub name: String,
    pub picks_per_team: usize,
    #[serde(default)]
    pub contestants: Vec<Contestant>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub weeks: Vec<WeekRecord>,
    #[serde(default)]
    pub bonus_questions: Vec<BonusQuestion>,
}

impl Default for PoolState {
    fn default() -> Self {
        Self::new("My Pool", 5)
    }
}

impl PoolState {
    pub fn new(name: &str, picks_per_team: usize) -> Self {
        Self {
            version: POOL_STATE_VERSION,
            name: name.to_string(),
            picks_per_team,
            contestants: Vec::new(),
            teams: Vec::new(),
            weeks: Vec::new(),
            bonus_questions: Vec::new(),
        }
    }

    pub fn week(&self, week: u32) -> Option<&WeekRecord> {
        self.weeks.iter().find(|w| w.week() == week)
    }

    /// Store a week's facts as a draft, replacing an earlier draft of the same week.
    pub fn upsert_draft(&mut self, fact: WeeklyEventFact) -> Result<(), PoolError> {
        let week = fact.week;
        if week == 0 {
            return Err(PoolError::InvalidWeek);
        }
        match self.weeks.iter_mut().find(|w| w.week() == week) {
            Some(existing) if existing.is_final() => return Err(PoolError::AlreadyFinal { week }),
            Some(existing) => existing.fact = fact,
            None => {
                self.weeks.push(WeekRecord::draft(fact));
                self.weeks.sort_by_key(|w| w.week());
            }
        }
        tracing::debug!(week, "draft week saved");
        Ok(())
    }

    /// Move a draft week to final and apply its evictions and revivals to the roster.
    pub fn finalize_week(
        &mut self,
        week: u32,
        at: DateTime<Utc>,
    ) -> Result<Vec<StatusChange>, PoolError> {
        let record = self
            .weeks
            .iter_mut()
            .find(|w| w.week() == week)
            .ok_or(PoolError::WeekNotFound { week })?;
        if record.is_final() {
            return Err(PoolError::AlreadyFinal { week });
        }
        record.status = WeekStatus::Final;
        record.finalized_at = Some(at);
        let fact = record.fact.clone();

        let changes = self.apply_status_changes(&fact);
        self.sync_active_flags();
        tracing::info!(week, changes = changes.len(), "week finalized");
        Ok(changes)
    }

    /// Reset every `is_active` flag from a replay of the final weeks in week order.
    pub fn sync_active_flags(&mut self) {
        let out = out_of_game(final_weeks(&self.weeks).into_iter().map(|w| &w.fact));
        for contestant in &mut self.contestants {
            let active = !out.contains(contestant.name.trim());
            if contestant.is_active != active {
                tracing::debug!(contestant = %contestant.name, active, "status resynced from history");
                contestant.is_active = active;
            }
        }
    }

    /// Apply a week's evictions, deactivations and revivals to `is_active`.
    pub fn apply_status_changes(&mut self, fact: &WeeklyEventFact) -> Vec<StatusChange> {
        let week = fact.week;
        let changes = status_changes(fact);
        for change in &changes {
            if let Some(contestant) = self
                .contestants
                .iter_mut()
                .find(|c| c.name.trim() == change.name())
            {
                contestant.is_active = change.is_active_after();
                tracing::info!(
                    contestant = %contestant.name,
                    active = contestant.is_active,
                    week,
                    "contestant status changed"
                );
            } else {
                tracing::warn!(name = change.name(), week, "status change for unknown contestant");
            }
        }
        changes
    }

    /// Names already out of the game when `week` starts, from final weeks only.
    pub fn previously_evicted_before(&self, week: u32) -> Vec<String> {
        let earlier = final_weeks(&self.weeks)
            .into_iter()
            .filter(|w| w.week() < week)
            .map(|w| &w.fact);
        out_of_game(earlier).into_iter().collect()
    }

    /// Contestants still in the game when `week` starts.
    pub fn active_roster_for(&self, week: u32) -> Vec<Contestant> {
        let out: HashSet<String> = self.previously_evicted_before(week).into_iter().collect();
        self.contestants
            .iter()
            .filter(|c| !out.contains(c.name.trim()))
            .cloned()
            .collect()
    }

    /// Points for one recorded week, draft or final.
    pub fn week_points(&self, week: u32, rules: &RuleStore) -> Option<WeeklyPoints> {
        let record = self.week(week)?;
        let roster = self.active_roster_for(week);
        let evicted = self.previously_evicted_before(week);
        Some(accumulate_with_breakdown(
            &record.fact,
            &roster,
            &evicted,
            rules,
        ))
    }

    /// Points maps for every final week, in week order. Drafts never count.
    pub fn weekly_points(&self, rules: &RuleStore) -> Vec<PointsMap> {
        final_weeks(&self.weeks)
            .into_iter()
            .filter_map(|w| self.week_points(w.week(), rules))
            .map(|p| p.points)
            .collect()
    }

    pub fn bonus_points_for(&self, team: &Team) -> i32 {
        self.bonus_questions
            .iter()
            .map(|q| q.points_for(team.bonus_answers.get(&q.id).map(String::as_str)))
            .fold(0i32, i32::saturating_add)
    }

    pub fn bonus_by_team(&self) -> HashMap<String, i32> {
        self.teams
            .iter()
            .map(|t| (t.name.clone(), self.bonus_points_for(t)))
            .collect()
    }

    pub fn standings(&self, rules: &RuleStore) -> Vec<TeamStanding> {
        let weeks = self.weekly_points(rules);
        let bonus = self.bonus_by_team();
        standings(
            self.teams.iter().map(|t| (t.name.as_str(), t.picks.as_slice())),
            &weeks,
            &bonus,
        )
    }

    /// Check the pool for structural problems.
    /// Returns all validation errors at once (not just the first).
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.version != POOL_STATE_VERSION {
            errors.push(PoolError::UnsupportedVersion { version: self.version }.to_string());
        }
        if self.picks_per_team == 0 {
            errors.push("pool.picks_per_team: must be at least 1".to_string());
        }

        let mut names = HashSet::new();
        for (i, contestant) in self.contestants.iter().enumerate() {
            let name = contestant.name.trim();
            if name.is_empty() {
                errors.push(format!("pool.contestants[{}].name: must not be empty", i));
            } else if !names.insert(name) {
                errors.push(format!("pool.contestants[{}].name: duplicate '{}'", i, name));
            }
        }

        let mut team_names = HashSet::new();
        for (i, team) in self.teams.iter().enumerate() {
            if !team_names.insert(team.name.trim()) {
                errors.push(format!("pool.teams[{}].name: duplicate '{}'", i, team.name));
            }
            if team.picks.len() != self.picks_per_team {
                errors.push(format!(
                    "pool.teams[{}].picks: expected {} picks, found {}",
                    i,
                    self.picks_per_team,
                    team.picks.len()
                ));
            }
            for pick in &team.picks {
                if !names.contains(pick.trim()) {
                    errors.push(format!(
                        "pool.teams[{}].picks: unknown contestant '{}'",
                        i, pick
                    ));
                }
            }
        }

        let mut weeks = HashSet::new();
        for (i, record) in self.weeks.iter().enumerate() {
            if record.week() == 0 {
                errors.push(format!("pool.weeks[{}].week: {}", i, PoolError::InvalidWeek));
            } else if !weeks.insert(record.week()) {
                errors.push(format!("pool.weeks[{}].week: duplicate week {}", i, record.week()));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
