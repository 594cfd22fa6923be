use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use crate::state::AppState;

const QUERY_TITLE: &str = "[ Up/Down/Enter: select  q: quit ]";
const PROMPT: &str = "Search: ";

/// Render one frame. Pure function of the state: query box on top,
/// application list below, error modal over everything when pending.
pub fn draw(frame: &mut Frame, state: &AppState) {
    let [query_area, list_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(frame.area());

    draw_query_box(frame, state, query_area);
    draw_app_list(frame, state, list_area);

    if let Some(message) = &state.error {
        draw_error_modal(frame, message);
    }
}

fn draw_query_box(frame: &mut Frame, state: &AppState, area: Rect) {
    let input = Paragraph::new(format!("{PROMPT}{}", state.query))
        .block(Block::default().borders(Borders::ALL).title(QUERY_TITLE));
    frame.render_widget(input, area);

    let cursor_x = area.x + 1 + (PROMPT.len() + state.query.chars().count()) as u16;
    let cursor_x = cursor_x.min(area.right().saturating_sub(2));
    frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
}

fn draw_app_list(frame: &mut Frame, state: &AppState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Applications");

    if state.visible.is_empty() {
        frame.render_widget(Paragraph::new(" No apps found").block(block), area);
        return;
    }

    let items: Vec<ListItem> = state.visible_names().map(ListItem::new).collect();
    let list = List::new(items)
        .block(block)
        .highlight_symbol("▸ ")
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD));

    // ListState keeps the focused row scrolled into view.
    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_error_modal(frame: &mut Frame, message: &str) {
    let area = centered_rect(frame.area(), 60, 30);
    let body = Paragraph::new(message)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Error"));
    frame.render_widget(Clear, area);
    frame.render_widget(body, area);
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);
    let horizontal = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1]);
    horizontal[1]
}
