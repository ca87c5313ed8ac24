pub mod formatter;

pub use formatter::{
    format_breakdown, format_points, format_points_table, format_standings, format_standings_tsv,
    should_use_colors,
};
