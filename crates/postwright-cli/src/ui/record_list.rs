//! Record list pane: left panel.

use postwright_core::{ContentKind, Rating};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{app::App, commands::truncate};

/// Render the record list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let visible = app.visible_records();
  let total = app.records.len();

  // Title with count.
  let title = if visible.len() == total {
    format!(" Library ({total}) ")
  } else {
    format!(" Library ({}/{total}) ", visible.len())
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let width = usize::from(area.width.saturating_sub(8));
  let items: Vec<ListItem> = visible
    .iter()
    .map(|record| {
      let kind_icon = match record.kind {
        ContentKind::Strategy => "S ",
        ContentKind::Post => "P ",
      };
      let (rating, rating_style) = match record.rating {
        Some(Rating::Good) => ("+ ", Style::default().fg(Color::Green)),
        Some(Rating::Bad) => ("- ", Style::default().fg(Color::Red)),
        None => ("  ", Style::default()),
      };

      ListItem::new(Line::from(vec![
        Span::styled(kind_icon, Style::default().fg(Color::Cyan)),
        Span::styled(rating, rating_style),
        Span::raw(truncate(&record.prompt, width)),
      ]))
    })
    .collect();

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Filter bar at the bottom of the inner area while a query is set.
  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  // Scrollable list with cursor tracking.
  let mut state = ListState::default();
  state.select((!visible.is_empty()).then_some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner_area,
    &mut state,
  );
}
