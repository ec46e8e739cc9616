pub mod control;
pub mod magnet;
pub mod samples;
pub mod snapshot;
pub mod stats;
pub mod track;

use rand::Rng;

use self::control::{ControlRequest, SteeringController};
use self::magnet::{default_lattice, SteeringMagnet};
use self::samples::{SampleBuffer, TerminalSample, SAMPLE_CAPACITY};
use self::snapshot::SystemSnapshot;
use self::stats::DumpStats;
use self::track::LaunchParams;

/// Milliseconds per simulation tick (~60 Hz).
pub const TICK_RATE_MS: u64 = 16;

/// One beamline session: the magnet list, the accumulated dump-plane
/// samples, their statistics, and the edit queue that feeds them.
pub struct Simulation {
    magnets: Vec<SteeringMagnet>,
    controller: SteeringController,
    samples: SampleBuffer,
    stats: DumpStats,
    launch: LaunchParams,
    pending: Vec<ControlRequest>,
    ticks: u64,
}

impl Simulation {
    pub fn new() -> Self {
        Self::with_lattice(default_lattice(), LaunchParams::default())
    }

    /// `magnets` must be non-empty and sorted ascending by position;
    /// the last element is the dump plane samples are taken at.
    pub fn with_lattice(magnets: Vec<SteeringMagnet>, launch: LaunchParams) -> Self {
        Self {
            magnets,
            controller: SteeringController::new(),
            samples: SampleBuffer::new(SAMPLE_CAPACITY),
            stats: DumpStats::default(),
            launch,
            pending: Vec::new(),
            ticks: 0,
        }
    }

    /// Queue a control request for the next tick.
    pub fn queue(&mut self, request: ControlRequest) {
        self.pending.push(request);
    }

    /// Change the edit target immediately; selection does not affect
    /// the beam, so it bypasses the queue.
    pub fn select(&mut self, index: usize) {
        self.controller.select(index, &self.magnets);
    }

    /// One simulation step: drain pending edits, shoot one particle to
    /// the dump plane, record the hit, refresh the statistics.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        for request in self.pending.drain(..) {
            match request {
                ControlRequest::AdjustKick { index, dx, dy } => {
                    self.controller.adjust_kick(&mut self.magnets, index, dx, dy);
                }
                ControlRequest::ResetMagnet(index) => {
                    self.controller.reset_one(&mut self.magnets, index);
                }
                ControlRequest::ResetAll => {
                    self.controller.reset_all(&mut self.magnets);
                }
                ControlRequest::ClearSamples => self.samples.clear(),
            }
        }

        let dump_z = self.dump_z();
        let state = track::track_to(dump_z, &self.magnets, &self.launch, rng);
        self.samples.push(TerminalSample::new(state.x, state.y, dump_z));
        self.stats.recompute(&self.samples);
        self.ticks += 1;
    }

    /// Longitudinal position of the dump plane (the last element).
    pub fn dump_z(&self) -> f32 {
        self.magnets.last().map(|m| m.z_position).unwrap_or(0.0)
    }

    pub fn magnets(&self) -> &[SteeringMagnet] {
        &self.magnets
    }

    pub fn samples(&self) -> &SampleBuffer {
        &self.samples
    }

    pub fn stats(&self) -> &DumpStats {
        &self.stats
    }

    pub fn launch(&self) -> &LaunchParams {
        &self.launch
    }

    pub fn selection(&self) -> usize {
        self.controller.selection(&self.magnets)
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.ticks as f32 * TICK_RATE_MS as f32 / 1000.0
    }

    pub fn snapshot(&self) -> SystemSnapshot {
        SystemSnapshot::capture(self)
    }
}
