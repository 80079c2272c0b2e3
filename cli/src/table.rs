use chrono::{DateTime, Utc};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use unicode_width::UnicodeWidthChar;
use uuid::Uuid;

use chores_core::{AwayDate, ChoreOverview, ChoreState, GroupedChores, Tag};

const NAME_WIDTH: usize = 40;

#[derive(Tabled)]
struct ChoreRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Chore")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "%")]
    percentage: String,
    #[tabled(rename = "Next due")]
    next_due: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

#[derive(Tabled)]
struct AwayDateRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "When")]
    when: String,
}

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "Tag")]
    name: String,
}

pub fn print_overviews(overviews: &[ChoreOverview], tags: &[Tag]) {
    let rows: Vec<ChoreRow> = overviews
        .iter()
        .map(|overview| ChoreRow {
            id: short_id(&overview.id),
            name: truncate_width(&overview.name, NAME_WIDTH),
            status: overview.state.to_string(),
            percentage: format_percentage(overview),
            next_due: format_timestamp(overview.next_due),
            tags: tag_names(&overview.tags, tags),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    for (i, overview) in overviews.iter().enumerate() {
        table.with(Modify::new(Rows::one(i + 1)).with(state_color(overview.state)));
    }

    println!("{}", table);
}

pub fn print_grouped(grouped: &GroupedChores, tags: &[Tag]) {
    for (bucket, overviews) in grouped.buckets() {
        println!("\n\x1b[1;36m{}\x1b[0m", bucket);
        if overviews.is_empty() {
            println!("(none)");
        } else {
            print_overviews(overviews, tags);
        }
    }
}

pub fn print_away_dates(away_dates: &[AwayDate]) {
    let rows: Vec<AwayDateRow> = away_dates
        .iter()
        .map(|away| AwayDateRow {
            name: away.name.clone(),
            when: range_label(away),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}

pub fn print_tags(tags: &[Tag]) {
    let rows: Vec<TagRow> = tags
        .iter()
        .map(|tag| TagRow {
            name: tag.name.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}

pub fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Single-day absences render as "(date)", ranges as "(start - end)".
pub fn range_label(away: &AwayDate) -> String {
    if away.start_date == away.end_date {
        format!("({})", away.start_date)
    } else {
        format!("({} - {})", away.start_date, away.end_date)
    }
}

pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Progress only means something while a next state exists.
pub fn format_percentage(overview: &ChoreOverview) -> String {
    if overview.next_state.is_some() {
        format!("{:.2}", overview.percentage)
    } else {
        "-".to_string()
    }
}

fn tag_names(tag_ids: &[Uuid], tags: &[Tag]) -> String {
    let names: Vec<&str> = tags
        .iter()
        .filter(|tag| tag_ids.contains(&tag.id))
        .map(|tag| tag.name.as_str())
        .collect();
    names.join(", ")
}

fn state_color(state: ChoreState) -> Color {
    match state {
        ChoreState::Overdue => Color::FG_RED,
        ChoreState::Due => Color::FG_YELLOW,
        ChoreState::Completed => Color::FG_GREEN,
    }
}

/// Truncates to a display width, not a char count, so wide glyphs do not
/// break the column layout.
fn truncate_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            out.push('…');
            break;
        }
        width += ch_width;
        out.push(ch);
    }
    out
}
