//! TUI rendering: orchestrates all panes.

pub mod event_form;
pub mod event_list;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match &app.screen {
    Screen::List(lister) => event_list::draw(f, rows[1], app, lister),
    Screen::Create(creator) => event_form::draw_create(f, rows[1], app, creator),
    Screen::Edit(editor) => event_form::draw_edit(f, rows[1], app, editor),
  }
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let title = match &app.screen {
    Screen::List(_) => " eventdesk  Events".to_string(),
    Screen::Create(_) => " eventdesk  Create".to_string(),
    Screen::Edit(editor) => format!(" eventdesk  Edit #{}", editor.id()),
  };
  let left = Span::styled(
    title,
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{} {date} ", app.client.config().base_url),
    Style::default().fg(Color::Gray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.content.chars().count() as u16;
  let right_width = right.content.chars().count() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match &app.screen {
    Screen::List(_) => (
      "LIST",
      "↑↓/jk navigate  a add  e/Enter edit  d delete  r reload  q quit",
    ),
    Screen::Create(_) => (
      "CREATE",
      "Tab/↑↓ field  Enter submit  Esc back",
    ),
    Screen::Edit(_) => (
      "EDIT",
      "Tab/↑↓ field  Enter submit  Esc back",
    ),
  };

  let (message, is_error) = app.status_line();
  let (status, status_style) = if message.is_empty() {
    (hints.to_string(), Style::default().fg(Color::DarkGray))
  } else if is_error {
    (message, Style::default().fg(Color::Red))
  } else {
    (message, Style::default().fg(Color::Green))
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let status_span = Span::styled(format!("  {status}"), status_style);

  let line = Line::from(vec![mode_span, status_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
