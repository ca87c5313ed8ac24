use std::collections::HashMap;

use super::types::PointsMap;

/// A team's place in the standings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamStanding {
    pub rank: usize,
    pub team: String,
    pub weekly_points: i32,
    pub bonus_points: i32,
    pub total: i32,
}

/// Roster points across every supplied week, plus bonus-question points.
pub fn total_for<S: AsRef<str>>(team: &[S], weeks: &[PointsMap], bonus_points: i32) -> i32 {
    roster_points(team, weeks).saturating_add(bonus_points)
}

fn roster_points<S: AsRef<str>>(team: &[S], weeks: &[PointsMap]) -> i32 {
    team.iter()
        .map(|name| {
            let name = name.as_ref().trim();
            weeks
                .iter()
                .filter_map(|week| week.get(name))
                .fold(0i32, |acc, p| acc.saturating_add(*p))
        })
        .fold(0i32, i32::saturating_add)
}

/// Per-contestant sum across weeks.
pub fn cumulative_points(weeks: &[PointsMap]) -> PointsMap {
    let mut totals = PointsMap::new();
    for week in weeks {
        for (name, points) in week {
            let total = totals.entry(name.clone()).or_insert(0);
            *total = total.saturating_add(*points);
        }
    }
    totals
}

/// Rank teams by total descending. Tied totals share a rank and are listed by name.
pub fn standings<'a, I, S>(
    teams: I,
    weeks: &[PointsMap],
    bonus_by_team: &HashMap<String, i32>,
) -> Vec<TeamStanding>
where
    I: IntoIterator<Item = (&'a str, &'a [S])>,
    S: AsRef<str> + 'a,
{
    let mut rows: Vec<TeamStanding> = teams
        .into_iter()
        .map(|(team, roster)| {
            let weekly_points = roster_points(roster, weeks);
            let bonus_points = bonus_by_team.get(team).copied().unwrap_or(0);
            TeamStanding {
                rank: 0,
                team: team.to_string(),
                weekly_points,
                bonus_points,
                total: weekly_points.saturating_add(bonus_points),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.team.cmp(&b.team)));

    let mut previous: Option<(i32, usize)> = None;
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = match previous {
            Some((total, rank)) if total == row.total => rank,
            _ => idx + 1,
        };
        previous = Some((row.total, row.rank));
    }

    rows
}
