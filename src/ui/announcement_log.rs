use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;

/// Draw the announcement log, newest line at the bottom
pub fn draw_announcement_log(f: &mut Frame, app: &App, area: Rect) {
    let entries = app.log.entries();
    let rows = area.height.saturating_sub(2) as usize;
    let skip = entries.len().saturating_sub(rows);

    let lines: Vec<Line> = entries
        .iter()
        .skip(skip)
        .map(|entry| Line::from(entry.render(app.config.timestamps)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Announcements ")
        .border_style(Style::default().fg(Color::DarkGray));

    f.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().fg(Color::White)),
        area,
    );
}
