pub mod announcement_log;
pub mod footer;
pub mod header;
pub mod help;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::{App, AppMode};

/// Title, two bindings, capability status, two "last" lines
pub const HEADER_HEIGHT: u16 = 6;

/// Render the complete UI
pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // bindings + status
            Constraint::Min(3),                // announcement log
            Constraint::Length(1),             // footer key bar
        ])
        .split(size);

    header::draw_header(f, app, chunks[0]);
    announcement_log::draw_announcement_log(f, app, chunks[1]);
    footer::draw_footer(f, app, chunks[2]);

    if app.mode == AppMode::Help {
        help::draw_help(f, app);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::clock::ManualClock;
    use crate::config::NetspeedConfig;
    use crate::host::AnnouncementLog;
    use crate::sampler::{Collaborators, NetSpeedPlugin};
    use crate::sinks::{Announcer, RecordingSink};
    use crate::system::counters::CounterCapability;

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App {
        let log = Arc::new(AnnouncementLog::new(10));
        let plugin = NetSpeedPlugin::new(Collaborators {
            capability: CounterCapability::Missing { reason: "test".into() },
            announcer: log.clone(),
            clipboard: Arc::new(RecordingSink::default()),
            clock: Arc::new(ManualClock::new()),
        });
        App::new(NetspeedConfig::default(), Arc::new(plugin), log)
    }

    #[test]
    fn main_screen_shows_status_and_log() {
        let app = app();
        app.log.announce("Download: 64.0 kbps, Upload: 8.0 kbps");

        let text = screen_text(&app);

        assert!(text.contains("Counters: unavailable"));
        assert!(text.contains("Announcements"));
        assert!(text.contains("Download: 64.0 kbps, Upload: 8.0 kbps"));
        assert!(text.contains("Bytes"));
    }

    #[test]
    fn help_popup_overlays_the_screen() {
        let mut app = app();
        app.mode = AppMode::Help;

        let text = screen_text(&app);

        assert!(text.contains(" Help "));
        assert!(text.contains("netspeed - announce network download and upload speed"));
    }
}
