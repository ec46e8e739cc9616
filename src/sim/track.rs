use rand::Rng;

use crate::sim::magnet::{gauss, SteeringMagnet};

/// Transverse displacement per unit angle per metre of drift.
pub const DRIFT_SCALE: f32 = 0.001;

/// Transverse beam coordinates at one longitudinal position. Produced
/// fresh by every evaluation, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeamState {
    pub x: f32,
    pub y: f32,
    pub angle_x: f32,
    pub angle_y: f32,
}

/// Injection parameters: where each shot starts and how noisy it is.
/// Spreads are the standard deviations of the launch-angle draws,
/// jitters the standard deviations of the per-corrector kick noise.
#[derive(Clone, Copy)]
pub struct LaunchParams {
    pub start_x: f32,
    pub start_y: f32,
    pub spread_x: f32,
    pub spread_y: f32,
    pub jitter_x: f32,
    pub jitter_y: f32,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            start_x: 0.2,
            start_y: 0.6,
            spread_x: 2.0,
            spread_y: 4.0,
            jitter_x: 0.05,
            jitter_y: 0.5,
        }
    }
}

impl LaunchParams {
    /// Launch with zero spread and zero jitter: every shot follows the
    /// same path.
    pub fn frozen(start_x: f32, start_y: f32) -> Self {
        Self {
            start_x,
            start_y,
            spread_x: 0.0,
            spread_y: 0.0,
            jitter_x: 0.0,
            jitter_y: 0.0,
        }
    }
}

/// Propagate one particle from injection to `target_z`.
///
/// `magnets` must be non-empty and sorted ascending by `z_position`.
///
/// Each call is an independent stochastic trial: the launch angles and
/// every corrector jitter are drawn fresh from `rng`. Two calls at
/// different `target_z` therefore do NOT describe the same particle;
/// callers that need one coherent path use [`trace_ray`] instead. The
/// single per-tick call to the dump plane is what commits a particle
/// to the sample buffer.
///
/// A magnet past `target_z` contributes nothing: propagation stops
/// with a partial drift up to `target_z` itself, before that magnet's
/// kick.
pub fn track_to(
    target_z: f32,
    magnets: &[SteeringMagnet],
    launch: &LaunchParams,
    rng: &mut impl Rng,
) -> BeamState {
    let mut state = BeamState {
        x: launch.start_x,
        y: launch.start_y,
        angle_x: gauss(launch.spread_x, rng),
        angle_y: gauss(launch.spread_y, rng),
    };

    let mut last_z = 0.0_f32;
    for magnet in magnets {
        if magnet.z_position > target_z {
            drift(&mut state, target_z - last_z);
            return state;
        }
        drift(&mut state, magnet.z_position - last_z);
        kick(&mut state, magnet, launch, rng);
        last_z = magnet.z_position;
    }
    // Target beyond the last element: drift the rest of the way.
    drift(&mut state, target_z - last_z);
    state
}

/// Sample one coherent particle path at `points + 1` evenly spaced
/// positions from injection to the last element.
///
/// The launch angles are drawn once and each corrector's jitter once,
/// at the crossing, so the returned polyline is a single physical
/// trajectory rather than the per-call envelope [`track_to`] produces.
pub fn trace_ray(
    magnets: &[SteeringMagnet],
    launch: &LaunchParams,
    rng: &mut impl Rng,
    points: usize,
) -> Vec<(f32, BeamState)> {
    let end_z = magnets.last().map(|m| m.z_position).unwrap_or(0.0);
    let divisions = points.max(1);

    let mut state = BeamState {
        x: launch.start_x,
        y: launch.start_y,
        angle_x: gauss(launch.spread_x, rng),
        angle_y: gauss(launch.spread_y, rng),
    };
    let mut last_z = 0.0_f32;
    let mut next_magnet = 0;

    let mut path = Vec::with_capacity(divisions + 1);
    for i in 0..=divisions {
        let z = end_z * i as f32 / divisions as f32;
        // Cross every magnet between the previous sample point and here.
        while next_magnet < magnets.len() && magnets[next_magnet].z_position <= z {
            let magnet = &magnets[next_magnet];
            drift(&mut state, magnet.z_position - last_z);
            kick(&mut state, magnet, launch, rng);
            last_z = magnet.z_position;
            next_magnet += 1;
        }
        drift(&mut state, z - last_z);
        last_z = z;
        path.push((z, state));
    }
    path
}

fn drift(state: &mut BeamState, length: f32) {
    state.x += state.angle_x * DRIFT_SCALE * length;
    state.y += state.angle_y * DRIFT_SCALE * length;
}

fn kick(state: &mut BeamState, magnet: &SteeringMagnet, launch: &LaunchParams, rng: &mut impl Rng) {
    if magnet.is_corrector {
        state.angle_x += magnet.effective_kick_x(launch.jitter_x, rng) * magnet.strength;
        state.angle_y += magnet.effective_kick_y(launch.jitter_y, rng) * magnet.strength;
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::sim::magnet::{default_lattice, SteeringMagnet};

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn frozen_launch_with_zero_kicks_is_pure_translation() {
        let lattice = default_lattice();
        let launch = LaunchParams::frozen(0.2, 0.6);
        let state = track_to(60.0, &lattice, &launch, &mut rng());
        assert_eq!(
            state,
            BeamState {
                x: 0.2,
                y: 0.6,
                angle_x: 0.0,
                angle_y: 0.0
            }
        );
    }

    #[test]
    fn evaluation_at_first_element_returns_launch_offset() {
        let lattice = vec![
            SteeringMagnet::corrector(10.0, "HC1", 1.0),
            SteeringMagnet::passive(20.0, "Dump"),
        ];
        let launch = LaunchParams::frozen(0.3, -0.1);
        let state = track_to(10.0, &lattice, &launch, &mut rng());
        assert_eq!(state.x, 0.3);
        assert_eq!(state.y, -0.1);
        assert_eq!(state.angle_x, 0.0);
        assert_eq!(state.angle_y, 0.0);
    }

    #[test]
    fn kick_then_drift_matches_hand_computation() {
        // Corrector at z=10 with kick_x=5, strength 1: angle jumps to 5
        // at the magnet, so position accumulates only over the 10 m
        // that follow.
        let mut corrector = SteeringMagnet::corrector(10.0, "HC1", 1.0);
        corrector.nudge_kick(5.0, 0.0);
        let lattice = vec![corrector];
        let launch = LaunchParams::frozen(0.0, 0.0);

        let state = track_to(20.0, &lattice, &launch, &mut rng());
        assert_eq!(state.angle_x, 5.0);
        assert!((state.x - 5.0 * DRIFT_SCALE * 10.0).abs() < 1e-6);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.angle_y, 0.0);
    }

    #[test]
    fn element_past_target_contributes_nothing() {
        let mut far = SteeringMagnet::corrector(30.0, "HC1", 1.0);
        far.nudge_kick(10.0, -10.0);
        let lattice = vec![far];
        let launch = LaunchParams::frozen(0.1, 0.2);

        let state = track_to(20.0, &lattice, &launch, &mut rng());
        assert_eq!(state.x, 0.1);
        assert_eq!(state.y, 0.2);
        assert_eq!(state.angle_x, 0.0);
    }

    #[test]
    fn strength_scales_the_kick() {
        let mut corrector = SteeringMagnet::corrector(0.0, "INJ", 0.8);
        corrector.nudge_kick(5.0, 0.0);
        let lattice = vec![corrector];
        let launch = LaunchParams::frozen(0.0, 0.0);

        let state = track_to(10.0, &lattice, &launch, &mut rng());
        assert!((state.angle_x - 4.0).abs() < 1e-6);
    }

    #[test]
    fn trace_ray_matches_independent_tracking_when_frozen() {
        let mut lattice = default_lattice();
        lattice[1].nudge_kick(3.0, -2.0);
        lattice[3].nudge_kick(-1.5, 0.5);
        let launch = LaunchParams::frozen(0.2, 0.6);

        let path = trace_ray(&lattice, &launch, &mut rng(), 60);
        assert_eq!(path.len(), 61);
        assert_eq!(path[0].0, 0.0);
        assert_eq!(path.last().unwrap().0, 60.0);

        for (z, state) in &path {
            let expect = track_to(*z, &lattice, &launch, &mut rng());
            assert!((state.x - expect.x).abs() < 1e-4);
            assert!((state.y - expect.y).abs() < 1e-4);
        }
    }
}
