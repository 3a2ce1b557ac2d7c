use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::App;
use crate::sampler::Variant;

/// Draw the Help popup (F1)
pub fn draw_help(f: &mut Frame, app: &App) {
    let area = centered_rect(70, 60, f.area());
    f.render_widget(Clear, area);

    let section = Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow);
    let cfg = &app.config;

    let help_text = vec![
        Line::from(Span::styled(
            " netspeed - announce network download and upload speed ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(" Announcements ", section)),
        Line::from(format!("  {}           {}", cfg.bit_rate_key, Variant::Bits.description())),
        Line::from(format!("  {}           {}", cfg.byte_rate_key, Variant::Bytes.description())),
        Line::from(""),
        Line::from("  Each announcement measures for one second. Pressing the same"),
        Line::from("  key again within half a second of hearing the result copies"),
        Line::from("  that result to the clipboard instead of measuring again."),
        Line::from(""),
        Line::from(Span::styled(" General ", section)),
        Line::from("  F1/?        Show this help"),
        Line::from(format!("  F10/{}       Quit netspeed", cfg.quit_key)),
        Line::from("  Ctrl+C      Quit"),
        Line::from(""),
        Line::from(Span::styled(
            " Press Esc or F1 to close ",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

/// Create a centered rectangle with percentage width/height
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
