use fitlog::session::{SessionPhase, SessionSummary, format_clock};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::app::{InputMode, SessionApp};

pub fn draw(frame: &mut Frame, app: &SessionApp) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(3),
    ])
    .split(frame.area());

    // Header
    let definition = app.session.definition();
    let header = Paragraph::new(format!(
        "{}  |  Duration {}",
        definition.name,
        format_clock(app.session.elapsed_seconds())
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    match app.session.phase() {
        SessionPhase::NotStarted => draw_preview(frame, app, chunks[1]),
        SessionPhase::InProgress => draw_in_progress(frame, app, chunks[1]),
        SessionPhase::Completed => {
            if let Some(summary) = &app.summary {
                draw_summary(frame, summary, chunks[1]);
            }
        }
    }

    // Footer with status
    let footer = Paragraph::new(app.status_message.as_str())
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(footer, chunks[2]);
}

fn draw_preview(frame: &mut Frame, app: &SessionApp, area: Rect) {
    let definition = app.session.definition();
    let mut lines = Vec::new();
    if let Some(description) = &definition.description {
        lines.push(Line::from(description.as_str()));
        lines.push(Line::from(""));
    }
    lines.push(Line::from("This workout includes:"));
    for exercise in &definition.exercises {
        lines.push(Line::from(format!(
            "  {} - {} sets of {} reps",
            exercise.name,
            exercise.target_sets,
            exercise.target_reps.as_deref().unwrap_or("?")
        )));
    }

    let preview = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Preview"))
        .wrap(Wrap { trim: false });
    frame.render_widget(preview, area);
}

fn draw_in_progress(frame: &mut Frame, app: &SessionApp, area: Rect) {
    let chunks = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let session = &app.session;
    let exercise = session.current_exercise();
    let (exercise_id, set_index) = app.cursor();
    let entry = session
        .progress(exercise_id)
        .and_then(|p| p.sets.get(set_index).copied())
        .unwrap_or_default();

    let mut lines = vec![
        Line::from(format!(
            "{} ({} of {})",
            exercise.name,
            session.exercise_index() + 1,
            session.definition().exercises.len()
        ))
        .style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(format!(
            "{} | {}",
            exercise.muscle_group.as_deref().unwrap_or("-"),
            exercise.equipment.as_deref().unwrap_or("-")
        ))
        .style(Style::default().fg(Color::Blue)),
        Line::from(""),
    ];
    if let Some(instructions) = &exercise.instructions {
        lines.push(Line::from(format!("Instructions: {}", instructions)));
    }
    if let Some(modifications) = &exercise.modifications {
        lines.push(Line::from(format!("Modifications: {}", modifications)));
    }
    lines.push(Line::from(""));

    if session.timer().is_resting() {
        lines.push(
            Line::from(format!("Rest Timer {}", session.timer()))
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        );
    } else {
        lines.push(Line::from(format!(
            "Set {} of {}",
            session.set_number(),
            exercise.target_sets
        )));
        lines.push(input_line(
            "Weight (lbs)",
            app,
            InputMode::Weight,
            entry.weight.map(|w| w.to_string()),
        ));
        lines.push(input_line(
            "Reps",
            app,
            InputMode::Reps,
            entry.reps.map(|r| r.to_string()),
        ));
    }
    lines.push(Line::from(""));
    lines.push(input_line(
        "Notes",
        app,
        InputMode::Notes,
        Some(app.notes.clone()).filter(|n| !n.is_empty()),
    ));

    let current = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Current Exercise"),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(current, chunks[0]);

    let items: Vec<ListItem> = session
        .definition()
        .exercises
        .iter()
        .enumerate()
        .map(|(idx, exercise)| {
            let progress = session.progress(exercise.id);
            let done = progress.is_some_and(|p| p.completed);
            let bars: String = progress
                .map(|p| {
                    p.sets
                        .iter()
                        .map(|s| if s.completed { '#' } else { '.' })
                        .collect()
                })
                .unwrap_or_default();
            let marker = if done {
                "✓".to_string()
            } else {
                (idx + 1).to_string()
            };

            let style = if done {
                Style::default().fg(Color::Green)
            } else if idx == session.exercise_index() {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(format!("{} {} [{}]", marker, exercise.name, bars)).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Progress"));
    frame.render_widget(list, chunks[1]);
}

fn input_line(
    label: &str,
    app: &SessionApp,
    mode: InputMode,
    value: Option<String>,
) -> Line<'static> {
    if app.input_mode == mode {
        Line::from(format!("{}: {}_", label, app.input_buffer))
            .style(Style::default().fg(Color::Yellow))
    } else {
        Line::from(format!("{}: {}", label, value.unwrap_or_default()))
    }
}

fn draw_summary(frame: &mut Frame, summary: &SessionSummary, area: Rect) {
    let mut lines = vec![
        Line::from("Workout Complete!").style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(format!("Total Duration: {}", summary.duration_display())),
    ];
    if let Some(started_at) = summary.started_at {
        lines.push(Line::from(format!("Date: {}", started_at.format("%Y-%m-%d"))));
    }
    lines.push(Line::from(""));

    for exercise in &summary.per_exercise {
        let sets: Vec<String> = exercise.sets.iter().map(|s| s.to_string()).collect();
        lines.push(Line::from(format!(
            "{}: {}",
            exercise.exercise_name,
            sets.join(", ")
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "Notes: {}",
        if summary.notes.is_empty() {
            "No notes recorded"
        } else {
            summary.notes.as_str()
        }
    )));

    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Workout Summary"))
        .wrap(Wrap { trim: false });
    frame.render_widget(body, area);
}
