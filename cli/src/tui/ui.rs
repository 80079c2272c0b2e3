use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Wrap},
    Frame,
};

use chores_core::{ChoreOverview, ChoreState};

use crate::table::{format_percentage, format_timestamp};
use crate::tui::app::{App, InputMode};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer
        ])
        .split(size);

    let header = Paragraph::new("CHORES")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(header, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    draw_chore_list(f, app, content_chunks[0]);
    draw_detail_view(f, app, content_chunks[1]);
    draw_footer(f, app, main_chunks[2]);
}

fn state_style(state: ChoreState) -> Style {
    match state {
        ChoreState::Overdue => Style::default().fg(Color::Red),
        ChoreState::Due => Style::default().fg(Color::Yellow),
        ChoreState::Completed => Style::default().fg(Color::Green),
    }
}

fn draw_chore_list(f: &mut Frame, app: &mut App, area: Rect) {
    let rows: Vec<Row> = app
        .overviews
        .iter()
        .map(|overview| {
            let due_str = overview
                .next_due
                .map(|d| d.format("%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());

            Row::new(vec![
                Span::styled(overview.state.to_string(), state_style(overview.state)),
                Span::raw(format_percentage(overview)),
                Span::raw(due_str),
                Span::styled(
                    overview.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(9),  // State
            Constraint::Length(7),  // Progress
            Constraint::Length(6),  // Due
            Constraint::Min(10),    // Name
        ],
    )
    .header(Row::new(vec!["Status", "%", "Due", "Chore"]).style(Style::default().fg(Color::Yellow)))
    .block(
        Block::default()
            .title(" Chores ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn detail_lines(app: &App, overview: &ChoreOverview) -> Vec<Line<'static>> {
    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Blue));

    let cadence = match overview.overdue_days {
        Some(grace) => format!("every {} day(s), {} day(s) grace", overview.due_days, grace),
        None => format!("every {} day(s)", overview.due_days),
    };

    let tag_names: Vec<&str> = app
        .tags
        .iter()
        .filter(|tag| overview.tags.contains(&tag.id))
        .map(|tag| tag.name.as_str())
        .collect();

    let mut lines = vec![
        Line::from(vec![
            label("Chore: "),
            Span::styled(
                overview.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("ID: ", Style::default().fg(Color::DarkGray)),
            Span::raw(overview.id.to_string()),
        ]),
        Line::from(vec![
            label("Status: "),
            Span::styled(overview.state.to_string(), state_style(overview.state)),
        ]),
        Line::from(vec![
            label("Progress: "),
            Span::raw(match overview.next_state {
                Some(next) => format!("{:.2}% toward {}", overview.percentage, next),
                None => "-".to_string(),
            }),
        ]),
        Line::from(vec![label("Cadence: "), Span::raw(cadence)]),
        Line::from(vec![
            label("Last done: "),
            Span::raw(format_timestamp(overview.last_completed_at)),
        ]),
        Line::from(vec![
            label("Next due: "),
            Span::raw(format_timestamp(overview.next_due)),
        ]),
        Line::from(vec![
            label("Overdue at: "),
            Span::raw(format_timestamp(overview.next_overdue)),
        ]),
        Line::from(vec![label("Tags: "), Span::raw(tag_names.join(", "))]),
        Line::from(""),
    ];

    if let Some(description) = &overview.description {
        lines.push(Line::from(label("Description:")));
        lines.push(Line::from(description.clone()));
    }

    lines
}

fn draw_detail_view(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Detail ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    match app.state.selected().and_then(|i| app.overviews.get(i)) {
        Some(overview) => {
            let detail = Paragraph::new(detail_lines(app, overview))
                .block(block)
                .wrap(Wrap { trim: true });
            f.render_widget(detail, area);
        }
        None => f.render_widget(block, area),
    }
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let footer = match app.input_mode {
        InputMode::Adding => Paragraph::new(format!(
            "Add (name due:<days> [overdue:<days>] [tag:<name>]): {}",
            app.input
        ))
        .style(Style::default().fg(Color::Cyan)),
        InputMode::Editing => Paragraph::new(format!("Edit: {}", app.input))
            .style(Style::default().fg(Color::Cyan)),
        InputMode::Normal => match &app.error {
            Some(error) => {
                Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red))
            }
            None => Paragraph::new(
                "j/k: Navigate | Space: Done | a: Add | e: Edit | d: Delete | q: Quit",
            )
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        },
    };
    f.render_widget(footer, area);
}
