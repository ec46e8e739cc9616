use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;

/// Transverse half-range of the scatter view, in metres.
const DUMP_SPAN: f32 = 2.5;
/// Deviation that saturates the heat scale, in metres.
const HEAT_LIMIT: f32 = 2.0;

/// Dump-plane scatter of every buffered hit, colored by how far it
/// landed from the ideal center. Newest hit drawn last and emphasized.
pub fn render_dump(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(255, 150, 60)))
        .title(" ⊙ Dump Plane ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(255, 180, 100))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width < 5 || inner.height < 5 {
        return;
    }

    let cols = inner.width as usize;
    let rows = inner.height as usize;
    let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', Style::default()); cols]; rows];

    // Center crosshair.
    let center_col = cols / 2;
    let center_row = rows / 2;
    let cross = Style::default().fg(Color::Rgb(45, 55, 70));
    for col in 0..cols {
        grid[center_row][col] = ('┄', cross);
    }
    for row in grid.iter_mut() {
        row[center_col] = ('┆', cross);
    }
    grid[center_row][center_col] = ('┼', cross);

    // Oldest first, so recent hits overdraw stale ones.
    for sample in app.sim.samples().iter() {
        if let Some((row, col)) = cell_for(sample.x, sample.y, cols, rows) {
            grid[row][col] = ('•', Style::default().fg(heat_color(sample.deviation)));
        }
    }
    if let Some(latest) = app.sim.samples().latest() {
        if let Some((row, col)) = cell_for(latest.x, latest.y, cols, rows) {
            grid[row][col] = (
                '◉',
                Style::default()
                    .fg(Color::Rgb(255, 255, 255))
                    .add_modifier(Modifier::BOLD),
            );
        }
    }

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
    frame.render_widget(Paragraph::new(lines), inner);
}

fn cell_for(x: f32, y: f32, cols: usize, rows: usize) -> Option<(usize, usize)> {
    if x.abs() > DUMP_SPAN || y.abs() > DUMP_SPAN {
        return None;
    }
    let col = ((x + DUMP_SPAN) / (2.0 * DUMP_SPAN) * (cols - 1) as f32).round() as usize;
    let row = ((DUMP_SPAN - y) / (2.0 * DUMP_SPAN) * (rows - 1) as f32).round() as usize;
    Some((row.min(rows - 1), col.min(cols - 1)))
}

/// Blue through green to red as the hit drifts off center.
fn heat_color(deviation: f32) -> Color {
    let t = (deviation / HEAT_LIMIT).min(1.0);
    if t < 0.5 {
        let up = t * 2.0;
        Color::Rgb(0, (255.0 * up) as u8, (255.0 * (1.0 - up)) as u8)
    } else {
        let up = (t - 0.5) * 2.0;
        Color::Rgb((255.0 * up) as u8, (255.0 * (1.0 - up)) as u8, 0)
    }
}
