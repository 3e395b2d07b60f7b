//! Plain-text heatmap rendering for terminals.
//!
//! Layout: a month header, seven weekday rows (Sunday first), then a
//! summary and legend line. Each cell takes two columns.

use crate::grid::level::ContributionLevel;
use crate::model::grid::{Grid, DAYS_PER_WEEK};
use crate::render::label::tooltip_label;
use chrono::Datelike;

const ROW_LABEL_WIDTH: usize = 4;
const CELL_WIDTH: usize = 2;
const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["", "Mon", "", "Wed", "", "Fri", ""];
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Rendering switches for [`render_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOptions {
    /// Emit ANSI 256-color escapes instead of shade glyphs.
    pub color: bool,
    /// Append the summary and legend lines.
    pub legend: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            color: false,
            legend: true,
        }
    }
}

/// Renders `grid` as a multi-line string.
pub fn render_text(grid: &Grid, options: TextOptions) -> String {
    let mut out = String::new();
    out.push_str(&month_header(grid));
    out.push('\n');

    for (day, label) in WEEKDAY_LABELS.iter().enumerate() {
        out.push_str(&format!("{label:<width$}", width = ROW_LABEL_WIDTH));
        for week in grid.weeks() {
            let level = week.days()[day].level();
            out.push_str(&cell(level, options.color));
            out.push(' ');
        }
        trim_end_in_place(&mut out);
        out.push('\n');
    }

    if options.legend {
        out.push_str(&format!(
            "{} contributions from {} to {}\n",
            grid.total(),
            grid.start(),
            grid.end()
        ));
        if let Some(busiest) = grid.busiest_day() {
            out.push_str(&format!("Busiest day {}\n", tooltip_label(busiest)));
        }
        out.push_str(&legend(options.color));
        out.push('\n');
    }
    out
}

/// Legend line, lowest bucket first.
pub fn legend(color: bool) -> String {
    let cells: Vec<String> = ContributionLevel::all()
        .iter()
        .map(|level| cell(*level, color))
        .collect();
    format!("Less {} More", cells.join(" "))
}

fn cell(level: ContributionLevel, color: bool) -> String {
    if color {
        format!("\x1b[38;5;{}m■\x1b[0m", level.ansi_index())
    } else {
        level.glyph().to_string()
    }
}

/// Month abbreviations placed above the first column of each month.
fn month_header(grid: &Grid) -> String {
    let width = ROW_LABEL_WIDTH + grid.weeks().len() * CELL_WIDTH;
    let mut header = vec![' '; width];
    let mut previous_month = None;
    let mut next_free = 0;

    for (index, week) in grid.weeks().iter().enumerate() {
        let month = week.first_date().month0();
        if previous_month == Some(month) {
            continue;
        }
        previous_month = Some(month);

        let column = ROW_LABEL_WIDTH + index * CELL_WIDTH;
        let label = MONTH_LABELS[month as usize];
        if column < next_free || column + label.len() > width {
            continue;
        }
        for (offset, ch) in label.chars().enumerate() {
            header[column + offset] = ch;
        }
        next_free = column + label.len() + 1;
    }

    header.into_iter().collect::<String>().trim_end().to_string()
}

fn trim_end_in_place(value: &mut String) {
    let trimmed = value.trim_end_matches(' ').len();
    value.truncate(trimmed);
}
