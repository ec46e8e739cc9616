use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::style::Color;

use crate::sim::control::ControlRequest;
use crate::sim::Simulation;

/// Kick increment per keypress, in mrad.
const KICK_STEP: f32 = 0.5;
/// Fine increment with Shift held.
const KICK_STEP_FINE: f32 = 0.1;
/// How long flash messages stay up, in ticks.
const MESSAGE_TICKS: u32 = 90;

/// How the beamline strips draw the beam.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrajectoryView {
    /// Every column is an independent stochastic draw; repeated frames
    /// fill in the envelope the beam sweeps out.
    Envelope,
    /// One launch draw per frame threaded through the whole line.
    SingleRay,
}

impl TrajectoryView {
    pub fn label(&self) -> &str {
        match self {
            TrajectoryView::Envelope => "envelope",
            TrajectoryView::SingleRay => "single ray",
        }
    }

    pub fn toggle(&self) -> TrajectoryView {
        match self {
            TrajectoryView::Envelope => TrajectoryView::SingleRay,
            TrajectoryView::SingleRay => TrajectoryView::Envelope,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub sim: Simulation,
    pub rng: StdRng,
    pub trajectory_view: TrajectoryView,
    pub message: Option<(String, u32, Color)>,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            sim: Simulation::new(),
            rng: StdRng::from_entropy(),
            trajectory_view: TrajectoryView::Envelope,
            message: None,
        }
    }

    pub fn on_tick(&mut self) {
        if let Some((_, ref mut ticks, _)) = self.message {
            if *ticks > 0 {
                *ticks -= 1;
            } else {
                self.message = None;
            }
        }
        self.sim.tick(&mut self.rng);
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            KICK_STEP_FINE
        } else {
            KICK_STEP
        };

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(c @ '1'..='9') => {
                self.sim.select((c as usize) - ('1' as usize));
            }
            KeyCode::Left => self.queue_adjust(-step, 0.0),
            KeyCode::Right => self.queue_adjust(step, 0.0),
            KeyCode::Up => self.queue_adjust(0.0, step),
            KeyCode::Down => self.queue_adjust(0.0, -step),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                let selected = self.sim.selection();
                self.sim.queue(ControlRequest::ResetMagnet(selected));
                let name = self.sim.magnets()[selected].name;
                self.flash(format!("{} zeroed", name), Color::Rgb(255, 200, 80));
            }
            KeyCode::Char('0') => {
                self.sim.queue(ControlRequest::ResetAll);
                self.flash("All correctors zeroed", Color::Rgb(255, 200, 80));
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.sim.queue(ControlRequest::ClearSamples);
                self.flash("Samples cleared", Color::Rgb(120, 200, 255));
            }
            KeyCode::Char('d') | KeyCode::Char('D') => self.write_snapshot(),
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.trajectory_view = self.trajectory_view.toggle();
                let label = self.trajectory_view.label().to_string();
                self.flash(
                    format!("Trajectory view: {}", label),
                    Color::Rgb(80, 255, 180),
                );
            }
            _ => {}
        }
    }

    /// Queue a kick edit bound to the selection at request time; the
    /// edit lands at the start of the next tick.
    fn queue_adjust(&mut self, dx: f32, dy: f32) {
        let index = self.sim.selection();
        if !self.sim.magnets()[index].is_corrector {
            self.flash("Dump plane is passive", Color::Rgb(255, 100, 100));
            return;
        }
        self.sim.queue(ControlRequest::AdjustKick { index, dx, dy });
    }

    fn write_snapshot(&mut self) {
        match self.sim.snapshot().write() {
            Ok(path) => self.flash(
                format!("Snapshot written to {}", path.display()),
                Color::Rgb(80, 255, 180),
            ),
            Err(e) => self.flash(format!("Snapshot failed: {}", e), Color::Rgb(255, 60, 60)),
        }
    }

    fn flash(&mut self, text: impl Into<String>, color: Color) {
        self.message = Some((text.into(), MESSAGE_TICKS, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trajectory_view_toggles_back_and_forth() {
        let view = TrajectoryView::Envelope;
        assert_eq!(view.toggle(), TrajectoryView::SingleRay);
        assert_eq!(view.toggle().toggle(), TrajectoryView::Envelope);
    }

    #[test]
    fn quit_keys_set_the_flag() {
        let mut app = App::new();
        app.on_key(KeyEvent::from(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn selection_keys_move_the_edit_target() {
        let mut app = App::new();
        app.on_key(KeyEvent::from(KeyCode::Char('3')));
        assert_eq!(app.sim.selection(), 2);
        // A digit past the lattice is ignored.
        app.on_key(KeyEvent::from(KeyCode::Char('9')));
        assert_eq!(app.sim.selection(), 2);
    }

    #[test]
    fn arrow_edits_land_on_the_next_tick() {
        let mut app = App::new();
        app.on_key(KeyEvent::from(KeyCode::Right));
        assert_eq!(app.sim.magnets()[0].kick_x, 0.0);
        app.on_tick();
        assert_eq!(app.sim.magnets()[0].kick_x, KICK_STEP);
    }
}
