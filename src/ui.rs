//! Screen layout and widget rendering.
//!
//! Stateless: everything is derived from the `App` on each draw. Two panes
//! (ticket left, search right), a one-line status bar, and centered modal
//! overlays for notes and order-number entry.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::{App, Mode};
use crate::catalog::Category;
use crate::notes::{self, NoteRow};
use crate::register::Row;
use crate::search;

pub fn draw(frame: &mut Frame, app: &App) {
    let [main, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());
    let [ticket, side] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(main);

    draw_ticket(frame, app, ticket);
    draw_search(frame, app, side);
    draw_status(frame, app, status);

    match &app.mode {
        Mode::Notes { .. } => draw_notes_modal(frame, app),
        Mode::OrderNumber { .. } => draw_order_number_modal(frame, app),
        _ => {}
    }
}

fn badge_style(category: Category) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    match category {
        Category::Ramyun => style.fg(Color::White).bg(Color::Red),
        Category::Gimbap => style.fg(Color::Black).bg(Color::Green),
        Category::SideDish => style.fg(Color::White).bg(Color::Blue),
        Category::Untagged => style,
    }
}

fn entry_spans(entry: &crate::register::Entry, indent: &'static str) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw(indent)];
    if let Some(prefix) = entry.dish.category.prefix() {
        spans.push(Span::styled(prefix.to_string(), badge_style(entry.dish.category)));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw(entry.dish.base_name.to_string()));
    if entry.takeaway {
        spans.push(Span::styled(" [T]", Style::default().fg(Color::Yellow)));
    }
    spans
}

fn note_tags_line(entry: &crate::register::Entry, indent: &'static str) -> Option<Line<'static>> {
    if entry.notes.is_empty() {
        return None;
    }
    let tags = entry
        .notes
        .values()
        .map(|label| format!("[{label}]"))
        .collect::<Vec<_>>()
        .join(" ");
    Some(Line::from(Span::styled(
        format!("{indent}{tags}"),
        Style::default().fg(Color::DarkGray),
    )))
}

fn draw_ticket(frame: &mut Frame, app: &App, area: Rect) {
    let register = &app.session.register;
    let mut lines: Vec<Line> = Vec::new();

    if register.is_empty() {
        lines.push(Line::from(Span::styled(
            "(no items yet)",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let view = register.view_range();
    for (idx, (row, span)) in register.row_spans().into_iter().enumerate() {
        let selected = idx == register.selected_index();
        let in_view = view.is_some_and(|(lo, hi)| idx >= lo && idx <= hi);
        let pointer = if selected { "➤ " } else { "  " };
        let row_style = if in_view {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };

        match row {
            Row::Group(gid) => {
                let members = &register.entries()[span];
                let all_takeaway = members.iter().all(|e| e.takeaway);
                let mut header = vec![
                    Span::raw(pointer),
                    Span::styled(
                        format!("Group {gid}"),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ];
                if all_takeaway {
                    header.push(Span::styled(" [T]", Style::default().fg(Color::Yellow)));
                }
                lines.push(Line::from(header).style(row_style));
                for entry in members {
                    lines.push(Line::from(entry_spans(entry, "    ")).style(row_style));
                    if let Some(tags) = note_tags_line(entry, "      ") {
                        lines.push(tags.style(row_style));
                    }
                }
            }
            Row::Single(id) => {
                if let Some(entry) = register.entry(id) {
                    let mut spans = vec![Span::raw(pointer)];
                    spans.extend(entry_spans(entry, ""));
                    lines.push(Line::from(spans).style(row_style));
                    if let Some(tags) = note_tags_line(entry, "    ") {
                        lines.push(tags.style(row_style));
                    }
                }
            }
        }
    }

    let title = if register.view_active() {
        "Ticket — VIEW"
    } else {
        "Ticket"
    };
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );
}

fn draw_search(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    match &app.mode {
        Mode::Search {
            category,
            query,
            selected,
        } => {
            lines.push(Line::from(vec![
                Span::styled(category.as_str().to_string(), badge_style(*category)),
                Span::raw(format!(": {query}")),
            ]));
            lines.push(Line::default());
            let results = search::search(*category, query);
            if results.is_empty() {
                lines.push(Line::from(Span::styled(
                    "No results",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            for (idx, dish) in results.iter().enumerate() {
                let pointer = if idx == *selected { "➤ " } else { "  " };
                lines.push(Line::from(format!("{pointer}{}", dish.base_name)));
            }
        }
        _ => {
            lines.push(Line::from("g/r/s  search a menu"));
            lines.push(Line::from("t      add tteokbokki"));
            lines.push(Line::from("j/k d  move, delete"));
            lines.push(Line::from("n      notes"));
            lines.push(Line::from("v J/K  view mode, reorder"));
            lines.push(Line::from("m/u    group, ungroup"));
            lines.push(Line::from("w/W    takeaway row / all"));
            lines.push(Line::from("p      toggle not-paid"));
            lines.push(Line::from("Ctrl+S submit and print"));
        }
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Search")),
        area,
    );
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(app.status.clone())];
    if app.not_paid {
        spans.push(Span::styled(
            "  NOT PAID",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    if app.session.has_pending_print() {
        spans.push(Span::styled(
            "  print pending — Ctrl+S retries",
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// A centered overlay rectangle, clamped to the frame.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_notes_modal(frame: &mut Frame, app: &App) {
    let Mode::Notes {
        entry,
        cursor,
        editor,
    } = &app.mode
    else {
        return;
    };
    let Some(entry) = app.session.register.entry(*entry) else {
        return;
    };

    let rows = notes::note_rows(entry);
    let mut lines: Vec<Line> = Vec::new();
    for (idx, row) in rows.iter().enumerate() {
        let pointer = if idx == *cursor { "➤ " } else { "  " };
        let line = match row {
            NoteRow::Predefined(id) => {
                let label = crate::catalog::note(id).map(|n| n.label).unwrap_or(*id);
                let checked = if notes::is_selected(entry, row) { "[x]" } else { "[ ]" };
                format!("{pointer}{checked} {label}")
            }
            NoteRow::Custom(_, text) => format!("{pointer}[x] {text}"),
            NoteRow::OtherSlot => match editor.buffer() {
                Some(buffer) => format!("{pointer}Other: {buffer}▌"),
                None => format!("{pointer}Other note…"),
            },
        };
        lines.push(Line::from(line));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        if editor.is_editing() {
            "type text · Enter confirm · Esc cancel"
        } else {
            "j/k move · Enter toggle · Esc close"
        },
        Style::default().fg(Color::DarkGray),
    )));

    let area = centered_rect(44, (rows.len() + 4) as u16, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Notes — {}", entry.dish.base_name)),
        ),
        area,
    );
}

fn draw_order_number_modal(frame: &mut Frame, app: &App) {
    let Mode::OrderNumber { value, error } = &app.mode else {
        return;
    };
    let mut lines = vec![
        Line::from("Order number (empty = none)"),
        Line::from(format!("> {value}▌")),
    ];
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(Span::styled(
        "digits · Enter submit · Esc cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let area = centered_rect(40, (lines.len() + 2) as u16, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Submit")),
        area,
    );
}
