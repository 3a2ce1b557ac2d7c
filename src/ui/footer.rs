use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, AppMode};

/// (key_label, description) pairs for the current mode
fn key_bar(app: &App) -> Vec<(String, &'static str)> {
    match app.mode {
        AppMode::Help => vec![("Esc".to_string(), "Close "), ("^C".to_string(), "Quit ")],
        AppMode::Normal => vec![
            ("F1".to_string(), "Help  "),
            (app.config.bit_rate_key.to_string(), "Bits  "),
            (app.config.byte_rate_key.to_string(), "Bytes "),
            (app.config.quit_key.to_string(), "Quit "),
        ],
    }
}

/// Draw the bottom key bar: key in black-on-cyan, description in
/// light gray on dark gray
pub fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    // Full-width dark background first
    let bg_fill = " ".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(bg_fill).style(Style::default().bg(Color::Indexed(234))),
        area,
    );

    let mut spans: Vec<Span> = Vec::new();
    for (key, desc) in key_bar(app) {
        spans.push(Span::styled(
            key,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            desc,
            Style::default()
                .fg(Color::Indexed(252))
                .bg(Color::Indexed(234)),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
