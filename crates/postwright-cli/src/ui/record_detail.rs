//! Record detail pane: right panel.

use postwright_core::{ContentRecord, Rating};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
  app::{App, Screen},
  commands::format_timestamp,
};

/// Render `record` into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App, record: &ContentRecord) {
  let border = if app.screen == Screen::RecordDetail {
    Color::Cyan
  } else {
    Color::DarkGray
  };
  let block = Block::default()
    .title(format!(" {} ", record.kind.label()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));

  let inner = block.inner(area);
  f.render_widget(block, area);

  let label = Style::default()
    .fg(Color::Cyan)
    .add_modifier(Modifier::BOLD);
  let dim = Style::default().fg(Color::DarkGray);

  let rating = match record.rating {
    Some(Rating::Good) => Span::styled("good", Style::default().fg(Color::Green)),
    Some(Rating::Bad) => Span::styled("bad", Style::default().fg(Color::Red)),
    None => Span::styled("unrated", dim),
  };

  let mut lines = vec![
    Line::from(vec![
      Span::styled(format!("{:<8}", "saved"), label),
      Span::raw(format_timestamp(record.created_at)),
    ]),
    Line::from(vec![Span::styled(format!("{:<8}", "rating"), label), rating]),
    Line::from(vec![
      Span::styled(format!("{:<8}", "id"), label),
      Span::styled(record.id.clone(), dim),
    ]),
    Line::from(""),
    Line::from(Span::styled("Prompt", label)),
  ];
  lines.extend(record.prompt.lines().map(|l| Line::from(l.to_owned())));
  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled("Content", label)));
  lines.extend(record.content.lines().map(|l| Line::from(l.to_owned())));

  let para = Paragraph::new(lines)
    .wrap(Wrap { trim: false })
    .scroll((app.detail_scroll, 0));
  f.render_widget(para, inner);
}
