use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::{PointContribution, PointsMap, TeamStanding};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format points with an explicit sign ("+3", "-1", "0")
pub fn format_points(points: i32) -> String {
    if points > 0 {
        format!("+{}", points)
    } else {
        points.to_string()
    }
}

fn paint_points(text: &str, points: i32, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match points.signum() {
        1 => text.green().to_string(),
        -1 => text.red().to_string(),
        _ => text.dimmed().to_string(),
    }
}

/// One line per contestant, highest points first, ties by name.
pub fn format_points_table(points: &PointsMap, use_colors: bool) -> String {
    if points.is_empty() {
        return "No contestants scored.".to_string();
    }

    let mut rows: Vec<(&String, &i32)> = points.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let name_width = rows.iter().map(|(n, _)| n.chars().count()).max().unwrap_or(0);

    rows.iter()
        .map(|&(name, &pts)| {
            let padded = format!("{:>5}", format_points(pts));
            format!(
                "{:<width$}  {}",
                name,
                paint_points(&padded, pts, use_colors),
                width = name_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every addition behind a week's points, in the order applied.
pub fn format_breakdown(contributions: &[PointContribution], use_colors: bool) -> String {
    if contributions.is_empty() {
        return "No points awarded.".to_string();
    }

    contributions
        .iter()
        .map(|c| {
            let points = format!("{:>4}", format_points(c.points));
            let name = if use_colors {
                c.contestant.bold().to_string()
            } else {
                c.contestant.clone()
            };
            format!("  {}  {}: {}", paint_points(&points, c.points, use_colors), name, c.label)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format standings: rank, total, team, then weekly/bonus split.
/// Team names are truncated to the terminal width; pipes get full names.
pub fn format_standings(rows: &[TeamStanding], use_colors: bool) -> String {
    format_standings_with_width(rows, use_colors, get_terminal_width())
}

fn format_standings_with_width(
    rows: &[TeamStanding],
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    if rows.is_empty() {
        return "No teams in this pool.".to_string();
    }

    // Rank "99." + space, total 6 wide, two separators, split "(+999 wk, +99 bonus)"
    let rank_width = 3;
    let total_width = 6;
    let separator = "  ";

    rows.iter()
        .map(|row| {
            let rank_str = format!("{:>2}.", row.rank);
            let total_str = format!("{:>width$}", row.total, width = total_width);
            let split = format!(
                "({} wk, {} bonus)",
                format_points(row.weekly_points),
                format_points(row.bonus_points)
            );

            let fixed_width = rank_width + 1 + total_width + separator.len() * 2 + split.len();
            let team = match term_width {
                Some(width) if width > fixed_width + 10 => truncate_name(&row.team, width - fixed_width),
                Some(_) => truncate_name(&row.team, 20),
                None => row.team.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    rank_str.dimmed(),
                    total_str.bold(),
                    separator,
                    team,
                    separator,
                    split.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    rank_str, total_str, separator, team, separator, split
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format standings as tab-separated values for scripting
/// Columns: rank, team, total, weekly, bonus (no headers, no colors)
pub fn format_standings_tsv(rows: &[TeamStanding]) -> String {
    rows.iter()
        .map(|r| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                r.rank,
                r.team.replace('\t', " "),
                r.total,
                r.weekly_points,
                r.bonus_points
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
