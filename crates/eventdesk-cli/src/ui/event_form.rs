//! Create and edit forms. Both render the same five fields; the edit form
//! adds the load state and the passthrough fields it will send back.

use eventdesk_core::{
  record::{EventFields, Field, Record},
  state::OpState,
  validate::{FieldValidity, ValidationReport},
  view::{Creator, Editor, msg},
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

const LABEL_WIDTH: usize = 13;

pub fn draw_create(f: &mut Frame, area: Rect, app: &App, creator: &Creator) {
  let form = FormView {
    title:    " New event ",
    fields:   creator.fields(),
    report:   creator.report(),
    submit:   creator.submit_state(),
    editable: true,
  };
  form.draw(f, area, app.focus, None);
}

pub fn draw_edit(f: &mut Frame, area: Rect, app: &App, editor: &Editor) {
  let load = editor.load_state();
  if load.is_in_flight() {
    let block = form_block(" Edit event ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new(msg::FETCHING).style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let title = format!(" Edit event #{} ", editor.id());
  let form = FormView {
    title:    &title,
    fields:   editor.fields(),
    report:   editor.report(),
    submit:   editor.submit_state(),
    editable: load.is_succeeded(),
  };
  form.draw(f, area, app.focus, editor.loaded());
}

// ─── Shared form ──────────────────────────────────────────────────────────────

struct FormView<'a> {
  title:    &'a str,
  fields:   &'a EventFields,
  report:   ValidationReport,
  submit:   &'a OpState,
  editable: bool,
}

impl FormView<'_> {
  fn draw(&self, f: &mut Frame, area: Rect, focus: Field, loaded: Option<&Record>) {
    let block = form_block(self.title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(Field::ALL.len() as u16 * 2), // fields
        Constraint::Length(2),                           // submit state
        Constraint::Min(0),                              // passthrough
      ])
      .split(inner);

    self.draw_fields(f, rows[0], focus);
    self.draw_submit(f, rows[1]);
    if let Some(record) = loaded {
      draw_passthrough(f, rows[2], record);
    }
  }

  fn draw_fields(&self, f: &mut Frame, area: Rect, focus: Field) {
    let mut lines = Vec::with_capacity(Field::ALL.len() * 2);
    for field in Field::ALL {
      let focused = self.editable && field == focus;
      let value = self.fields.get(field);

      let label_style = if focused {
        Style::default()
          .fg(Color::Yellow)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Cyan)
      };
      let value_style = if self.editable {
        Style::default().fg(Color::White)
      } else {
        Style::default().fg(Color::DarkGray)
      };

      let mut spans = vec![
        Span::styled(if focused { "▶ " } else { "  " }, label_style),
        Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), label_style),
        Span::styled(value.to_string(), value_style),
      ];
      if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
      }
      lines.push(Line::from(spans));

      // Blank fields stay quiet until a submit attempt reports them.
      let hint = match self.report.get(field) {
        FieldValidity::Invalid(message) if !value.is_empty() => {
          Span::styled(message.clone(), Style::default().fg(Color::Red))
        }
        FieldValidity::Valid => Span::styled("✓", Style::default().fg(Color::Green)),
        FieldValidity::Invalid(_) => Span::raw(""),
      };
      lines.push(Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH + 2)),
        hint,
      ]));
    }
    f.render_widget(Paragraph::new(lines), area);
  }

  fn draw_submit(&self, f: &mut Frame, area: Rect) {
    let line = match self.submit {
      OpState::InFlight => {
        Line::styled("Submitting…", Style::default().fg(Color::DarkGray))
      }
      OpState::Failed(message) => {
        Line::styled(message.clone(), Style::default().fg(Color::Red))
      }
      OpState::Idle | OpState::Succeeded if !self.report.is_valid() => Line::styled(
        "Fill in every field to submit",
        Style::default().fg(Color::DarkGray),
      ),
      OpState::Idle | OpState::Succeeded => Line::styled(
        "Enter to submit",
        Style::default().fg(Color::Green),
      ),
    };
    f.render_widget(Paragraph::new(vec![Line::from(""), line]), area);
  }
}

fn form_block(title: &str) -> Block<'_> {
  Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray))
}

/// Fields the form does not edit but sends back unchanged.
fn draw_passthrough(f: &mut Frame, area: Rect, record: &Record) {
  let extra = record.display_extra();
  if extra.is_empty() {
    return;
  }
  let lines: Vec<Line> = extra
    .into_iter()
    .map(|(key, value)| {
      Line::from(vec![
        Span::styled(
          format!("  {key:<LABEL_WIDTH$}"),
          Style::default().fg(Color::DarkGray),
        ),
        Span::styled(value, Style::default().fg(Color::Gray)),
      ])
    })
    .collect();
  f.render_widget(Paragraph::new(lines), area);
}
