use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::sampler::Variant;

/// Draw the header:
///   netspeed  Counters: available  Measuring: 1
///    n  Announces current download and upload speed. ...
///    b  Announces current download and upload speed in bytes. ...
///   Last (bits):  Download: 64.0 kbps, Upload: 8.0 kbps
///   Last (bytes): -
pub fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let value = Style::default().fg(Color::White);
    let dim = Style::default().fg(Color::DarkGray);

    let (status, status_style) = if app.plugin.is_available() {
        ("available", Style::default().fg(Color::Green))
    } else {
        ("unavailable", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    };

    let in_flight = app.in_flight();
    let mut title = vec![
        Span::styled("netspeed", label),
        Span::styled("  Counters: ", dim),
        Span::styled(status, status_style),
    ];
    if in_flight > 0 {
        title.push(Span::styled("  Measuring: ", dim));
        title.push(Span::styled(in_flight.to_string(), Style::default().fg(Color::Yellow)));
    }

    let mut lines = vec![Line::from(title)];
    lines.push(binding_line(app.config.bit_rate_key, Variant::Bits));
    lines.push(binding_line(app.config.byte_rate_key, Variant::Bytes));
    lines.push(Line::from(""));
    for (name, variant) in [("Last (bits):  ", Variant::Bits), ("Last (bytes): ", Variant::Bytes)] {
        let last = app.plugin.last_announcement(variant).unwrap_or_else(|| "-".to_string());
        lines.push(Line::from(vec![Span::styled(name, label), Span::styled(last, value)]));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn binding_line(key: char, variant: Variant) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {key}  "),
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", variant.description()), Style::default().fg(Color::Indexed(252))),
    ])
}
