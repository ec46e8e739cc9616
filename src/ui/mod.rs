pub mod beamline;
pub mod dump;
pub mod panels;

use ratatui::prelude::*;

use crate::app::App;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status line
            Constraint::Min(10),   // Main area
            Constraint::Length(1), // Help line
        ])
        .split(frame.area());

    panels::render_status(frame, app, chunks[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(44),    // Beamline strips
            Constraint::Length(30), // Dump plane scatter
            Constraint::Length(40), // Magnets + statistics
        ])
        .split(chunks[1]);

    beamline::render_beamline(frame, app, main[0]);
    dump::render_dump(frame, app, main[1]);
    panels::render_side(frame, app, main[2]);

    panels::render_help(frame, chunks[2]);
}
