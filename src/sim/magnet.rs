use rand::Rng;
use rand_distr::StandardNormal;

/// Hard limit on either kick component, in mrad.
pub const KICK_LIMIT: f32 = 20.0;

/// One element of the beamline. Everything except the kick pair is
/// fixed by the lattice at startup; the kicks mutate only through the
/// clamping mutators below.
#[derive(Clone)]
pub struct SteeringMagnet {
    pub z_position: f32,
    pub name: &'static str,
    pub kick_x: f32,
    pub kick_y: f32,
    pub strength: f32,
    pub is_corrector: bool,
}

impl SteeringMagnet {
    pub fn corrector(z_position: f32, name: &'static str, strength: f32) -> Self {
        Self {
            z_position,
            name,
            kick_x: 0.0,
            kick_y: 0.0,
            strength,
            is_corrector: true,
        }
    }

    /// A passive element: contributes drift only, never a kick.
    pub fn passive(z_position: f32, name: &'static str) -> Self {
        Self {
            z_position,
            name,
            kick_x: 0.0,
            kick_y: 0.0,
            strength: 0.0,
            is_corrector: false,
        }
    }

    /// Add to the kick pair, keeping each component within ±KICK_LIMIT.
    pub fn nudge_kick(&mut self, dx: f32, dy: f32) {
        self.kick_x = (self.kick_x + dx).clamp(-KICK_LIMIT, KICK_LIMIT);
        self.kick_y = (self.kick_y + dy).clamp(-KICK_LIMIT, KICK_LIMIT);
    }

    pub fn zero_kick(&mut self) {
        self.kick_x = 0.0;
        self.kick_y = 0.0;
    }

    /// Configured horizontal kick plus a per-shot Gaussian jitter draw.
    pub fn effective_kick_x(&self, jitter: f32, rng: &mut impl Rng) -> f32 {
        self.kick_x + gauss(jitter, rng)
    }

    pub fn effective_kick_y(&self, jitter: f32, rng: &mut impl Rng) -> f32 {
        self.kick_y + gauss(jitter, rng)
    }
}

/// Zero-mean Gaussian draw with the given standard deviation.
pub(crate) fn gauss(sigma: f32, rng: &mut impl Rng) -> f32 {
    let z: f32 = rng.sample(StandardNormal);
    sigma * z
}

/// The fixed beamline: five correctors and the passive dump plane at
/// the end, sorted by longitudinal position.
pub fn default_lattice() -> Vec<SteeringMagnet> {
    vec![
        SteeringMagnet::corrector(0.0, "Injector Corrector", 0.8),
        SteeringMagnet::corrector(12.0, "H-Corrector 1", 1.0),
        SteeringMagnet::corrector(24.0, "V-Corrector 1", 1.0),
        SteeringMagnet::corrector(36.0, "H-Corrector 2", 1.2),
        SteeringMagnet::corrector(48.0, "Final Corrector", 1.0),
        SteeringMagnet::passive(60.0, "Beam Dump"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kicks_stay_within_limits() {
        let mut magnet = SteeringMagnet::corrector(12.0, "HC1", 1.0);
        for _ in 0..100 {
            magnet.nudge_kick(3.7, -2.9);
            assert!(magnet.kick_x.abs() <= KICK_LIMIT);
            assert!(magnet.kick_y.abs() <= KICK_LIMIT);
        }
        assert_eq!(magnet.kick_x, KICK_LIMIT);
        assert_eq!(magnet.kick_y, -KICK_LIMIT);
    }

    #[test]
    fn single_oversized_nudge_is_clamped() {
        let mut magnet = SteeringMagnet::corrector(0.0, "INJ", 0.8);
        magnet.nudge_kick(-100.0, 100.0);
        assert_eq!(magnet.kick_x, -KICK_LIMIT);
        assert_eq!(magnet.kick_y, KICK_LIMIT);
    }

    #[test]
    fn zero_kick_clears_both_components() {
        let mut magnet = SteeringMagnet::corrector(24.0, "VC1", 1.0);
        magnet.nudge_kick(4.0, -7.5);
        magnet.zero_kick();
        assert_eq!(magnet.kick_x, 0.0);
        assert_eq!(magnet.kick_y, 0.0);
    }

    #[test]
    fn default_lattice_is_sorted_and_ends_passive() {
        let lattice = default_lattice();
        assert!(lattice
            .windows(2)
            .all(|pair| pair[0].z_position < pair[1].z_position));
        assert!(!lattice.last().unwrap().is_corrector);
        assert!(lattice[..lattice.len() - 1].iter().all(|m| m.is_corrector));
    }

    #[test]
    fn zero_sigma_jitter_adds_nothing() {
        let mut rng = rand::thread_rng();
        let mut magnet = SteeringMagnet::corrector(36.0, "HC2", 1.2);
        magnet.nudge_kick(5.0, -5.0);
        assert_eq!(magnet.effective_kick_x(0.0, &mut rng), 5.0);
        assert_eq!(magnet.effective_kick_y(0.0, &mut rng), -5.0);
    }
}
