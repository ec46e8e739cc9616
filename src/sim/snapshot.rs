use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;

use crate::sim::stats::DumpStats;
use crate::sim::Simulation;

/// Flat export of the whole steering setup plus the current dump
/// statistics, mirroring what the operator sees on screen.
#[derive(Serialize)]
pub struct SystemSnapshot {
    pub elapsed_seconds: f32,
    pub dump_stats: DumpStats,
    pub magnets: Vec<MagnetRecord>,
}

#[derive(Serialize)]
pub struct MagnetRecord {
    pub name: String,
    pub z_position: f32,
    pub kick_x_mrad: f32,
    pub kick_y_mrad: f32,
    pub strength: f32,
    pub is_corrector: bool,
}

impl SystemSnapshot {
    pub fn capture(sim: &Simulation) -> Self {
        Self {
            elapsed_seconds: sim.elapsed_seconds(),
            dump_stats: *sim.stats(),
            magnets: sim
                .magnets()
                .iter()
                .map(|magnet| MagnetRecord {
                    name: magnet.name.to_string(),
                    z_position: magnet.z_position,
                    kick_x_mrad: magnet.kick_x,
                    kick_y_mrad: magnet.kick_y,
                    strength: magnet.strength,
                    is_corrector: magnet.is_corrector,
                })
                .collect(),
        }
    }

    /// Write the snapshot as pretty-printed JSON and return the path
    /// it landed at.
    pub fn write(&self) -> io::Result<PathBuf> {
        let path = snapshot_path();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&path, json)?;
        Ok(path)
    }
}

/// Store next to the executable, falling back to the working directory.
fn snapshot_path() -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.join("beamsteer-snapshot.json");
        }
    }
    PathBuf::from("beamsteer-snapshot.json")
}
