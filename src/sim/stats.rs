use serde::Serialize;

use crate::sim::samples::SampleBuffer;

/// Distribution of dump-plane hits over the current sample buffer.
///
/// Recomputed from scratch over the whole buffer every tick. An empty
/// buffer leaves the previous values in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct DumpStats {
    pub mean_x: f32,
    pub mean_y: f32,
    pub std_x: f32,
    pub std_y: f32,
    pub rms_radius: f32,
    pub max_deviation: f32,
    pub sample_count: usize,
}

impl DumpStats {
    /// Full pass over the buffer. Standard deviations use the
    /// population formula (divide by n, not n - 1).
    pub fn recompute(&mut self, buffer: &SampleBuffer) {
        if buffer.is_empty() {
            return;
        }
        let count = buffer.len() as f32;

        let mut sum_x = 0.0_f32;
        let mut sum_y = 0.0_f32;
        let mut sum_r2 = 0.0_f32;
        let mut max_deviation = 0.0_f32;
        for sample in buffer.iter() {
            sum_x += sample.x;
            sum_y += sample.y;
            sum_r2 += sample.x * sample.x + sample.y * sample.y;
            max_deviation = max_deviation.max(sample.deviation);
        }
        let mean_x = sum_x / count;
        let mean_y = sum_y / count;

        let mut var_x = 0.0_f32;
        let mut var_y = 0.0_f32;
        for sample in buffer.iter() {
            var_x += (sample.x - mean_x) * (sample.x - mean_x);
            var_y += (sample.y - mean_y) * (sample.y - mean_y);
        }

        self.mean_x = mean_x;
        self.mean_y = mean_y;
        self.std_x = (var_x / count).sqrt();
        self.std_y = (var_y / count).sqrt();
        self.rms_radius = (sum_r2 / count).sqrt();
        self.max_deviation = max_deviation;
        self.sample_count = buffer.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::samples::TerminalSample;

    fn buffer_of(points: &[(f32, f32)]) -> SampleBuffer {
        let mut buffer = SampleBuffer::new(64);
        for &(x, y) in points {
            buffer.push(TerminalSample::new(x, y, 60.0));
        }
        buffer
    }

    #[test]
    fn known_three_point_distribution() {
        let buffer = buffer_of(&[(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)]);
        let mut stats = DumpStats::default();
        stats.recompute(&buffer);

        assert!(stats.mean_x.abs() < 1e-6);
        assert!((stats.mean_y - 1.0 / 3.0).abs() < 1e-6);
        assert!((stats.rms_radius - 1.0).abs() < 1e-6);
        assert!((stats.max_deviation - 1.0).abs() < 1e-6);
        assert_eq!(stats.sample_count, 3);
        // Population variance: (1 + 0 + 1) / 3 horizontally.
        assert!((stats.std_x - (2.0_f32 / 3.0).sqrt()).abs() < 1e-6);
    }

    #[test]
    fn empty_buffer_retains_previous_values() {
        let mut stats = DumpStats::default();
        stats.recompute(&buffer_of(&[(2.0, -1.0), (0.5, 0.5)]));
        let before = stats;

        stats.recompute(&SampleBuffer::new(8));
        assert_eq!(stats, before);
    }

    #[test]
    fn recompute_is_idempotent() {
        let buffer = buffer_of(&[(0.5, -0.25), (1.5, 0.75), (-0.5, 0.1)]);
        let mut stats = DumpStats::default();
        stats.recompute(&buffer);
        let first = stats;

        stats.recompute(&buffer);
        assert_eq!(stats, first);
    }

    #[test]
    fn single_sample_has_zero_spread() {
        let buffer = buffer_of(&[(0.7, -0.3)]);
        let mut stats = DumpStats::default();
        stats.recompute(&buffer);

        assert_eq!(stats.std_x, 0.0);
        assert_eq!(stats.std_y, 0.0);
        assert!((stats.mean_x - 0.7).abs() < 1e-6);
        assert!((stats.rms_radius - (0.49_f32 + 0.09).sqrt()).abs() < 1e-6);
    }
}
