//! TUI rendering functions

use super::app::{App, DetailState, Focus};
use reqlens_core::{
    assemble_sections, format_bytes, JsonToken, Section, SectionAction, SectionContent, TokenKind,
    TransactionSummary,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Draw the TUI
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // List + detail panes
            Constraint::Length(1), // Status line
        ])
        .split(frame.area());

    draw_search_bar(frame, app, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    draw_request_list(frame, app, panes[0]);
    draw_detail_panel(frame, app, panes[1]);
    draw_status_line(frame, app, chunks[2]);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.focus == Focus::Search {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = if app.query.is_empty() && app.focus != Focus::Search {
        Span::styled("press / to search", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.query.as_str())
    };

    let paragraph = Paragraph::new(Line::from(content)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Search"),
    );
    frame.render_widget(paragraph, area);
}

fn draw_request_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .store
        .visible()
        .iter()
        .map(|item| request_row(item, app.store.active_id()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Requests ({})", app.store.visible().len())),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if !app.store.visible().is_empty() {
        state.select(Some(app.cursor));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn request_row<'a>(item: &'a TransactionSummary, active_id: Option<&str>) -> ListItem<'a> {
    let marker = if active_id == Some(item.request_id.as_str()) {
        "● "
    } else {
        "  "
    };

    let mut target = format!("{}{}", item.host, item.path);
    if !item.query.is_empty() {
        target.push('?');
        target.push_str(&item.query);
    }

    let top = Line::from(vec![
        Span::raw(marker),
        Span::styled(
            format!("{:<7}", item.method),
            Style::default()
                .fg(method_color(&item.method))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(target),
    ]);

    let info = format!(
        "  {} • {} • {} • {}",
        item.received_at.format("%H:%M:%S"),
        item.ip,
        format_bytes(item.body_size),
        item.content_type,
    );
    let bottom = Line::from(Span::styled(info, Style::default().fg(Color::DarkGray)));

    ListItem::new(vec![top, bottom])
}

fn method_color(method: &str) -> Color {
    match method.to_uppercase().as_str() {
        "GET" => Color::Green,
        "POST" => Color::Blue,
        "PUT" => Color::Yellow,
        "PATCH" => Color::Magenta,
        "DELETE" => Color::Red,
        _ => Color::White,
    }
}

fn draw_detail_panel(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match &app.detail {
        DetailState::Empty => placeholder("Select a request"),
        DetailState::Loading => placeholder("Fetching…"),
        DetailState::NotFound => placeholder("Not found"),
        DetailState::Failed => placeholder("Failed to load details"),
        DetailState::Loaded(detail) => {
            let sections = assemble_sections(detail);
            let mut lines = Vec::new();
            for (idx, section) in sections.iter().enumerate() {
                section_lines(&mut lines, section, idx, app);
            }
            lines
        }
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Detail"))
        .scroll((app.detail_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn placeholder(text: &str) -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))]
}

fn section_lines(lines: &mut Vec<Line<'static>>, section: &Section, idx: usize, app: &App) {
    let collapsed = app.collapsed.contains(&idx);
    let marker = if collapsed { "▸" } else { "▾" };

    let mut header = vec![
        Span::styled(
            format!("{} {}", marker, section.title),
            header_style(idx == app.section_cursor),
        ),
    ];
    match section.action {
        Some(SectionAction::CopyCurl) => header.push(Span::styled(
            "  [c] copy as cURL",
            Style::default().fg(Color::DarkGray),
        )),
        Some(SectionAction::CopyJson) => header.push(Span::styled(
            "  [y] copy JSON",
            Style::default().fg(Color::DarkGray),
        )),
        None => {}
    }
    lines.push(Line::from(header));

    if collapsed {
        return;
    }

    match &section.content {
        SectionContent::KeyValues(rows) => {
            let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
            for (name, value) in rows {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:<width$}  ", name, width = width),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(value.clone()),
                ]));
            }
        }
        SectionContent::Text(text) => {
            for line in text.lines() {
                lines.push(Line::from(format!("  {}", line)));
            }
        }
        SectionContent::Json(tokens) => {
            json_lines(lines, tokens);
        }
        SectionContent::Empty => {
            lines.push(Line::from(Span::styled(
                "  —",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    lines.push(Line::from(""));
}

fn header_style(under_cursor: bool) -> Style {
    let style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    if under_cursor {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

/// Convert highlighter tokens into styled lines, splitting on the newlines
/// embedded in structural gaps
fn json_lines(lines: &mut Vec<Line<'static>>, tokens: &[JsonToken]) {
    let mut current: Vec<Span<'static>> = vec![Span::raw("  ")];
    for token in tokens {
        let style = token_style(token.kind);
        let mut pieces = token.text.split('\n');
        if let Some(first) = pieces.next() {
            if !first.is_empty() {
                current.push(Span::styled(first.to_string(), style));
            }
        }
        for piece in pieces {
            lines.push(Line::from(std::mem::take(&mut current)));
            current.push(Span::raw("  "));
            if !piece.is_empty() {
                current.push(Span::styled(piece.to_string(), style));
            }
        }
    }
    if current.len() > 1 {
        lines.push(Line::from(current));
    }
}

fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Key => Style::default().fg(Color::Cyan),
        TokenKind::Str => Style::default().fg(Color::Green),
        TokenKind::Bool => Style::default().fg(Color::Yellow),
        TokenKind::Null => Style::default().fg(Color::Magenta),
        TokenKind::Number => Style::default().fg(Color::LightBlue),
        TokenKind::Gap => Style::default(),
    }
}

fn draw_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.focus {
        Focus::Search => "esc/enter done",
        Focus::List => "j/k move • enter select • / search • r refresh • c curl • y json • q quit",
    };

    let line = Line::from(vec![
        Span::styled(
            app.status.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
