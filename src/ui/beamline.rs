use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, TrajectoryView};
use crate::sim::track::{self, BeamState};
use crate::sim::Simulation;

/// Transverse half-range of each strip, in metres. Values outside are
/// pinned to the strip edge.
const STRIP_SPAN: f32 = 4.0;

/// Two side-view strips of the whole line: x over z on top, y over z
/// below. Columns map linearly onto longitudinal position.
pub fn render_beamline(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(100, 180, 255)))
        .title(format!(" ⚛ Beamline [{}] ", app.trajectory_view.label()))
        .title_style(
            Style::default()
                .fg(Color::Rgb(120, 200, 255))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width < 10 || inner.height < 6 {
        return;
    }

    let cols = inner.width as usize;
    let path = display_path(app, cols);

    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    render_strip(frame, halves[0], "x", &path, |s| s.x, &app.sim);
    render_strip(frame, halves[1], "y", &path, |s| s.y, &app.sim);
}

/// One display point per column. Envelope mode re-draws every column
/// independently, the way the beam actually fills the pipe over many
/// shots; single-ray mode threads one draw through the whole line.
fn display_path(app: &mut App, cols: usize) -> Vec<(f32, BeamState)> {
    let App {
        sim,
        rng,
        trajectory_view,
        ..
    } = app;
    let divisions = cols.saturating_sub(1).max(1);
    match *trajectory_view {
        TrajectoryView::Envelope => {
            let end_z = sim.dump_z();
            (0..=divisions)
                .map(|i| {
                    let z = end_z * i as f32 / divisions as f32;
                    (z, track::track_to(z, sim.magnets(), sim.launch(), rng))
                })
                .collect()
        }
        TrajectoryView::SingleRay => track::trace_ray(sim.magnets(), sim.launch(), rng, divisions),
    }
}

fn render_strip(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    path: &[(f32, BeamState)],
    pick: impl Fn(&BeamState) -> f32,
    sim: &Simulation,
) {
    let cols = area.width as usize;
    let rows = area.height as usize;
    if cols < 4 || rows < 3 {
        return;
    }

    let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', Style::default()); cols]; rows];

    // Axis centerline.
    let center_row = (rows - 1) / 2;
    for col in 0..cols {
        grid[center_row][col] = ('┄', Style::default().fg(Color::Rgb(45, 55, 70)));
    }

    // Magnet planes as vertical lines, index digit on top.
    let end_z = sim.dump_z();
    if end_z > 0.0 {
        let selected = sim.selection();
        for (index, magnet) in sim.magnets().iter().enumerate() {
            let col = (magnet.z_position / end_z * (cols - 1) as f32).round() as usize;
            let style = if index == selected {
                Style::default()
                    .fg(Color::Rgb(255, 120, 255))
                    .add_modifier(Modifier::BOLD)
            } else if magnet.is_corrector {
                Style::default().fg(Color::Rgb(70, 80, 100))
            } else {
                Style::default().fg(Color::Rgb(255, 150, 60))
            };
            for row in grid.iter_mut() {
                row[col] = ('│', style);
            }
            if index < 9 {
                let digit = char::from(b'1' + index as u8);
                grid[0][col] = (digit, style);
            }
        }
    }

    // Beam markers, one per column.
    for (col, (_, state)) in path.iter().enumerate().take(cols) {
        let value = pick(state);
        let clipped = value.abs() > STRIP_SPAN;
        let pinned = value.clamp(-STRIP_SPAN, STRIP_SPAN);
        let row = ((STRIP_SPAN - pinned) / (2.0 * STRIP_SPAN) * (rows - 1) as f32).round() as usize;
        let row = row.min(rows - 1);
        let style = if clipped {
            Style::default().fg(Color::Rgb(255, 80, 80))
        } else {
            Style::default().fg(Color::Rgb(0, 230, 230))
        };
        grid[row][col] = ('•', style);
    }

    // Plane label in the bottom-left corner, clear of the magnet digits.
    grid[rows - 1][0] = (
        label.chars().next().unwrap_or('?'),
        Style::default()
            .fg(Color::Rgb(150, 150, 180))
            .add_modifier(Modifier::BOLD),
    );

    let lines: Vec<Line> = grid
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}
