//! List screen: sorted events on the left, every field of the cursor event
//! on the right.

use eventdesk_core::{
  record::{Field, Record},
  view::{Lister, msg},
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

/// Render the list screen into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App, lister: &Lister) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(area);

  draw_list(f, cols[0], app, lister);
  draw_detail(f, cols[1], app.cursor_record());
}

fn draw_list(f: &mut Frame, area: Rect, app: &App, lister: &Lister) {
  let block = Block::default()
    .title(format!(" Events ({}) ", lister.records().len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  // Loading and fetch failure replace the list entirely; no stale rows.
  let load = lister.load_state();
  if load.is_in_flight() {
    f.render_widget(
      Paragraph::new(msg::FETCHING).style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }
  if let Some(error) = load.error() {
    f.render_widget(
      Paragraph::new(error).style(Style::default().fg(Color::Red)),
      inner,
    );
    return;
  }
  if lister.records().is_empty() {
    f.render_widget(
      Paragraph::new("No events. Press a to add one.")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = lister
    .records()
    .iter()
    .map(|record| {
      let pending = lister.pending_delete() == Some(&record.id);
      let name_style = if pending {
        Style::default()
          .fg(Color::DarkGray)
          .add_modifier(Modifier::CROSSED_OUT)
      } else {
        Style::default()
      };
      ListItem::new(Line::from(vec![
        Span::styled(
          format!("{:<18}", record.fields.company),
          Style::default().fg(Color::Cyan),
        ),
        Span::styled(record.fields.name.clone(), name_style),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner,
    &mut state,
  );
}

fn draw_detail(f: &mut Frame, area: Rect, record: Option<&Record>) {
  let block = Block::default()
    .title(" Detail ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let Some(record) = record else {
    return;
  };

  let label = |text: &str| {
    Span::styled(
      format!("{text:<14}"),
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    )
  };

  let mut lines = vec![Line::from(vec![label("id"), Span::raw(record.id.to_string())])];
  for field in Field::ALL {
    lines.push(Line::from(vec![
      label(field.key()),
      Span::raw(record.fields.get(field).to_string()),
    ]));
  }

  let extra = record.display_extra();
  if !extra.is_empty() {
    lines.push(Line::from(""));
    for (key, value) in extra {
      lines.push(Line::from(vec![
        label(key),
        Span::styled(value, Style::default().fg(Color::Gray)),
      ]));
    }
  }

  f.render_widget(Paragraph::new(lines), inner);
}
