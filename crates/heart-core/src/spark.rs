//! Surface sparks: one sampled point per particle and its two per-frame candidates.

use glam::Vec3;
use rand::Rng;

use crate::config::{NoiseConfig, SparkConfig};
use crate::noise::NoiseField;
use crate::sampler::SurfaceSampler;

#[derive(Clone, Debug, PartialEq)]
pub struct Spark {
    pub origin: Vec3,
    pub color_index: usize,
    pub jitter: f32,
    pub near: Vec3,
    pub far: Vec3,
}

impl Spark {
    pub fn new(origin: Vec3, color_index: usize, jitter: f32) -> Self {
        Self {
            origin,
            color_index,
            jitter,
            near: origin,
            far: origin,
        }
    }

    /// Recompute both candidates for beat `b`.
    ///
    /// near = origin * (near_base + (n1 + near_noise_offset) * K * b)
    /// far  = origin * (1 + (n2 + 1) * far_noise_gain * (b + far_beat_bias) - b * far_beat_pull)
    #[inline]
    pub fn update<N: NoiseField + ?Sized>(
        &mut self,
        noise: &N,
        sparks: &SparkConfig,
        noise_cfg: &NoiseConfig,
        b: f32,
    ) {
        let n1 = noise.sample_vec(self.origin, sparks.near_noise_w);
        self.near = self.origin
            * (sparks.near_base + (n1 + sparks.near_noise_offset) * noise_cfg.gain() * b);

        let n2 = noise.sample_vec(self.origin * sparks.far_frequency, sparks.far_noise_w);
        self.far = self.origin
            * (1.0 + (n2 + 1.0) * sparks.far_noise_gain * (b + sparks.far_beat_bias)
                - b * sparks.far_beat_pull);
    }
}

/// Sample `config.count` sparks from the mesh surface.
pub fn spawn_sparks<R: Rng + ?Sized>(
    sampler: &SurfaceSampler,
    config: &SparkConfig,
    palette_len: usize,
    rng: &mut R,
) -> Vec<Spark> {
    (0..config.count)
        .map(|_| {
            let origin = sampler.sample(rng);
            let color_index = if palette_len > 0 {
                rng.gen_range(0..palette_len)
            } else {
                0
            };
            let jitter = rng.gen::<f32>() * config.jitter_max;
            Spark::new(origin, color_index, jitter)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::ConstantNoise;

    #[test]
    fn zero_beat_uses_base_scales() {
        let sparks = SparkConfig::default();
        let noise_cfg = NoiseConfig::default();
        let mut s = Spark::new(Vec3::new(0.2, -0.1, 0.05), 0, 0.01);
        s.update(&ConstantNoise(0.3), &sparks, &noise_cfg, 0.0);
        assert!((s.near - s.origin * sparks.near_base).length() < 1e-7);
        let far_scale = 1.0 + 1.3 * sparks.far_noise_gain * sparks.far_beat_bias;
        assert!((s.far - s.origin * far_scale).length() < 1e-6);
    }

    #[test]
    fn candidates_are_pure_functions_of_inputs() {
        let sparks = SparkConfig::default();
        let noise_cfg = NoiseConfig::default();
        let noise = crate::noise::SimplexNoise::new(4);
        let mut a = Spark::new(Vec3::new(0.3, 0.1, -0.2), 1, 0.02);
        let mut b = a.clone();
        a.update(&noise, &sparks, &noise_cfg, 0.4);
        a.update(&noise, &sparks, &noise_cfg, 0.1);
        b.update(&noise, &sparks, &noise_cfg, 0.1);
        assert_eq!(a, b);
    }
}
