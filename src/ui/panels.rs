use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;

pub fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.sim.stats();
    let mut spans = vec![
        Span::styled(
            " ⚛ Beamline Control ",
            Style::default()
                .fg(Color::Rgb(120, 200, 255))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("t: {:.1}s ", app.sim.elapsed_seconds()),
            Style::default().fg(Color::Rgb(150, 150, 180)),
        ),
        Span::styled("│ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!(
                "samples: {}/{} ",
                app.sim.samples().len(),
                app.sim.samples().capacity()
            ),
            Style::default().fg(Color::Rgb(150, 150, 180)),
        ),
        Span::styled("│ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("rms: {:.3} m ", stats.rms_radius),
            Style::default().fg(rms_color(stats.rms_radius)),
        ),
        Span::styled("│ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("max dev: {:.3} m ", stats.max_deviation),
            Style::default().fg(Color::Rgb(200, 160, 255)),
        ),
    ];
    if let Some((ref text, ticks, color)) = app.message {
        if ticks > 0 {
            spans.push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                format!(" {} ", text),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn rms_color(rms: f32) -> Color {
    if rms < 0.5 {
        Color::Rgb(80, 255, 80)
    } else if rms < 1.2 {
        Color::Yellow
    } else {
        Color::Rgb(255, 80, 80)
    }
}

pub fn render_side(frame: &mut Frame, app: &App, area: Rect) {
    let magnet_rows = app.sim.magnets().len() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),           // Distribution
            Constraint::Length(magnet_rows), // Magnet list
            Constraint::Min(7),              // Selected magnet
        ])
        .split(area);

    render_stats(frame, app, chunks[0]);
    render_magnet_list(frame, app, chunks[1]);
    render_selected(frame, app, chunks[2]);
}

fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.sim.stats();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(100, 180, 255)))
        .title(" Target Distribution ")
        .title_style(Style::default().fg(Color::Rgb(120, 200, 255)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = Style::default().fg(Color::Rgb(130, 130, 160));
    let value = Style::default().fg(Color::Rgb(220, 220, 240));
    let lines = vec![
        Line::from(vec![
            Span::styled(" Mean:    ", label),
            Span::styled(
                format!("({:+.3}, {:+.3}) m", stats.mean_x, stats.mean_y),
                value,
            ),
        ]),
        Line::from(vec![
            Span::styled(" Std:     ", label),
            Span::styled(
                format!("({:.3}, {:.3}) m", stats.std_x, stats.std_y),
                value,
            ),
        ]),
        Line::from(vec![
            Span::styled(" RMS:     ", label),
            Span::styled(format!("{:.3} m", stats.rms_radius), value),
        ]),
        Line::from(vec![
            Span::styled(" Max dev: ", label),
            Span::styled(format!("{:.3} m", stats.max_deviation), value),
        ]),
        Line::from(vec![
            Span::styled(" Count:   ", label),
            Span::styled(format!("{}", stats.sample_count), value),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_magnet_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(100, 180, 255)))
        .title(" Steering Magnets ")
        .title_style(Style::default().fg(Color::Rgb(120, 200, 255)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let selected = app.sim.selection();
    let lines: Vec<Line> = app
        .sim
        .magnets()
        .iter()
        .enumerate()
        .map(|(index, magnet)| {
            let style = if index == selected {
                Style::default()
                    .fg(Color::Rgb(255, 220, 80))
                    .add_modifier(Modifier::BOLD)
            } else if magnet.is_corrector {
                Style::default().fg(Color::Rgb(200, 200, 220))
            } else {
                Style::default().fg(Color::Rgb(110, 110, 140))
            };
            let status = if magnet.is_corrector {
                format!("({:+.1}, {:+.1})", magnet.kick_x, magnet.kick_y)
            } else {
                "passive".to_string()
            };
            Line::from(Span::styled(
                format!(" {}. {:<18} {}", index + 1, magnet.name, status),
                style,
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_selected(frame: &mut Frame, app: &App, area: Rect) {
    let magnet = &app.sim.magnets()[app.sim.selection()];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(255, 220, 80)))
        .title(format!(" {} ", magnet.name))
        .title_style(
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = Style::default().fg(Color::Rgb(130, 130, 160));
    let value = Style::default().fg(Color::Rgb(220, 220, 240));
    let lines = vec![
        Line::from(vec![
            Span::styled(" Position: ", label),
            Span::styled(format!("z = {:.1} m", magnet.z_position), value),
        ]),
        Line::from(vec![
            Span::styled(" H-Kick:   ", label),
            Span::styled(format!("{:+.2} mrad", magnet.kick_x), value),
        ]),
        Line::from(vec![
            Span::styled(" V-Kick:   ", label),
            Span::styled(format!("{:+.2} mrad", magnet.kick_y), value),
        ]),
        Line::from(vec![
            Span::styled(" Strength: ", label),
            Span::styled(format!("{:.1}", magnet.strength), value),
        ]),
        Line::from(vec![
            Span::styled(" Type:     ", label),
            Span::styled(
                if magnet.is_corrector {
                    "Corrector"
                } else {
                    "Dump"
                },
                value,
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn render_help(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Rgb(80, 200, 255));
    let text = Style::default().fg(Color::Rgb(100, 100, 130));
    let spans = vec![
        Span::styled(" 1-6", key),
        Span::styled(" select ", text),
        Span::styled("←→↑↓", key),
        Span::styled(" kick (Shift fine) ", text),
        Span::styled("R", key),
        Span::styled(" reset ", text),
        Span::styled("0", key),
        Span::styled(" reset all ", text),
        Span::styled("C", key),
        Span::styled(" clear ", text),
        Span::styled("D", key),
        Span::styled(" snapshot ", text),
        Span::styled("T", key),
        Span::styled(" view ", text),
        Span::styled("Q", key),
        Span::styled(" quit", text),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
