//! Screen rendering.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};

use super::App;
use super::input::Focus;
use crate::controller::ResultRow;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub(super) fn draw(frame: &mut Frame, app: &mut App) {
    let screen = app.controller.view();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)])
        .split(frame.size());

    draw_input(frame, app, layout[0]);

    let results_block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Books ({})", screen.rows.len()))
        .border_style(focus_style(app.focus == Focus::Results));
    let inner = results_block.inner(layout[1]);
    frame.render_widget(results_block, layout[1]);

    if screen.busy {
        let text = format!("{} Searching…", SPINNER[app.spinner_idx % SPINNER.len()]);
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), centered_line(inner));
    } else if screen.rows.is_empty() {
        let text = screen.notice.unwrap_or("");
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true }),
            centered_line(inner),
        );
    } else {
        draw_results(frame, app, &screen.rows, inner);
    }

    let help = Line::from(vec![
        Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" search/open  "),
        Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" focus  "),
        Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" clear  "),
        Span::styled("Ctrl-C", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(help), layout[2]);
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let input = Paragraph::new(format!("> {}", app.input))
        .style(focus_style(app.focus == Focus::Input))
        .block(Block::default().borders(Borders::ALL).title("Search Google Books"));
    frame.render_widget(input, area);

    if app.focus == Focus::Input {
        frame.set_cursor(cursor_x(area, &app.input), area.y.saturating_add(1));
    }
}

/// Column of the input cursor, clamped inside the box border.
fn cursor_x(area: Rect, input: &str) -> u16 {
    let typed = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
    area.x.saturating_add(3).saturating_add(typed).min(area.right().saturating_sub(2))
}

fn draw_results(frame: &mut Frame, app: &mut App, rows: &[ResultRow], area: Rect) {
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let title = if row.title.is_empty() { "(untitled)" } else { row.title.as_str() };
            let mut spans = vec![Span::styled(title.to_string(), Style::default().add_modifier(Modifier::BOLD))];
            if !row.authors.is_empty() {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(row.authors.clone(), Style::default().fg(Color::Green)));
            }
            if row.link.is_none() {
                spans.push(Span::styled("  (no link)", Style::default().fg(Color::DarkGray)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let need_scrollbar = rows.len() > area.height as usize && area.width > 1;
    let (list_area, sb_area) = if need_scrollbar {
        let list_w = area.width.saturating_sub(1);
        (
            Rect { width: list_w, ..area },
            Some(Rect { x: area.x.saturating_add(list_w), width: 1, ..area }),
        )
    } else {
        (area, None)
    };

    let list = List::new(items)
        .highlight_style(Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");
    frame.render_stateful_widget(list, list_area, &mut app.list_state);

    if let Some(sb_area) = sb_area {
        let pos = app.list_state.selected().unwrap_or(0).min(rows.len().saturating_sub(1));
        let mut sb_state = ScrollbarState::new(rows.len()).position(pos);
        let sb = Scrollbar::default().orientation(ScrollbarOrientation::VerticalRight);
        frame.render_stateful_widget(sb, sb_area, &mut sb_state);
    }
}

fn focus_style(focused: bool) -> Style {
    if focused { Style::default().fg(Color::Yellow) } else { Style::default() }
}

fn centered_line(area: Rect) -> Rect {
    let y = area.y + area.height / 2;
    Rect { y, height: area.height.min(1), ..area }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_follows_input() {
        let area = Rect::new(0, 0, 40, 3);
        assert_eq!(cursor_x(area, ""), 3);
        assert_eq!(cursor_x(area, "dune"), 7);
        assert_eq!(cursor_x(area, "ñandú"), 8);
    }

    #[test]
    fn test_cursor_clamped_for_huge_paste() {
        let area = Rect::new(5, 0, 40, 3);
        let pasted = "x".repeat(70_000);
        assert_eq!(cursor_x(area, &pasted), area.right() - 2);

        let edge = Rect::new(u16::MAX - 10, 0, 10, 3);
        assert_eq!(cursor_x(edge, &pasted), edge.right() - 2);
    }
}
