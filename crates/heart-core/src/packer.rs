//! Per-frame depth-band filtering of spark candidates into flat GPU-ready buffers.

use glam::Mat4;

use crate::config::{DepthBandConfig, NoiseConfig, Palette, SparkConfig};
use crate::noise::NoiseField;
use crate::spark::Spark;

/// Pre-allocated position/color buffers with a filled prefix.
///
/// Capacity is two candidates per spark, three floats each. Every frame
/// refills from index 0; only `positions()`/`colors()` (the prefix) are valid.
#[derive(Clone, Debug)]
pub struct SparkBuffers {
    positions: Vec<f32>,
    colors: Vec<f32>,
    len: usize,
}

impl SparkBuffers {
    pub fn with_spark_capacity(sparks: usize) -> Self {
        let floats = sparks * 2 * 3;
        Self {
            positions: vec![0.0; floats],
            colors: vec![0.0; floats],
            len: 0,
        }
    }

    /// Grow (never shrink) so `sparks` sparks fit without reallocation.
    pub fn reserve_sparks(&mut self, sparks: usize) {
        let floats = sparks * 2 * 3;
        if self.positions.len() < floats {
            self.positions.resize(floats, 0.0);
            self.colors.resize(floats, 0.0);
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    fn push(&mut self, p: [f32; 3], c: [f32; 3]) {
        let end = self.len + 3;
        self.positions[self.len..end].copy_from_slice(&p);
        self.colors[self.len..end].copy_from_slice(&c);
        self.len = end;
    }

    /// Filled position floats.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions[..self.len]
    }

    /// Filled color floats, parallel to `positions()`.
    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors[..self.len]
    }

    /// Number of floats written this frame.
    #[inline]
    pub fn filled_len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.len / 3
    }

    /// Capacity in floats (per buffer).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }
}

/// True when `z` lies strictly inside the slab `(-band - slack, band + slack)`.
#[inline]
pub fn in_depth_band(z: f32, band: f32, slack: f32) -> bool {
    z > -band - slack && z < band + slack
}

pub struct PackParams<'a> {
    pub sparks: &'a SparkConfig,
    pub noise: &'a NoiseConfig,
    pub depth: &'a DepthBandConfig,
    pub palette: &'a Palette,
    /// Object-to-view rotation (the heart's spin). The band is tested on the
    /// view-axis z after this transform; packed positions stay in object space.
    pub model: Mat4,
}

/// Recompute every spark for beat `b` and pack the accepted candidates.
pub fn pack_sparks<N: NoiseField + ?Sized>(
    sparks: &mut [Spark],
    noise: &N,
    params: &PackParams<'_>,
    b: f32,
    out: &mut SparkBuffers,
) {
    out.reserve_sparks(sparks.len());
    out.clear();
    let band = params.depth.half_width();
    for spark in sparks.iter_mut() {
        spark.update(noise, params.sparks, params.noise, b);
        let color = params.palette.color(spark.color_index);
        let near_z = params.model.transform_point3(spark.near).z;
        let far_z = params.model.transform_point3(spark.far).z;
        if in_depth_band(near_z, band, spark.jitter) {
            out.push(spark.near.to_array(), color);
        }
        if in_depth_band(far_z, band, spark.jitter * 2.0) {
            out.push(spark.far.to_array(), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::ConstantNoise;

    #[test]
    fn band_is_open_interval() {
        assert!(in_depth_band(0.0, 0.1, 0.0));
        assert!(in_depth_band(0.109, 0.1, 0.01));
        assert!(!in_depth_band(0.1, 0.1, 0.0));
        assert!(!in_depth_band(-0.1, 0.1, 0.0));
        assert!(!in_depth_band(0.5, 0.1, 0.01));
    }

    fn params<'a>(
        sparks: &'a SparkConfig,
        noise: &'a NoiseConfig,
        depth: &'a DepthBandConfig,
        palette: &'a Palette,
    ) -> PackParams<'a> {
        PackParams {
            sparks,
            noise,
            depth,
            palette,
            model: Mat4::IDENTITY,
        }
    }

    fn in_band_sparks(n: usize, color_index: usize) -> Vec<Spark> {
        (0..n)
            .map(|i| Spark::new(glam::Vec3::new(0.1 * i as f32, 0.5, 0.0), color_index, 0.0))
            .collect()
    }

    #[test]
    fn undersized_buffers_grow_instead_of_panicking() {
        let (s, n, d, p) = (
            SparkConfig::default(),
            NoiseConfig::default(),
            DepthBandConfig::default(),
            Palette::default(),
        );
        let mut sparks = in_band_sparks(2, 0);
        let mut out = SparkBuffers::with_spark_capacity(1);
        pack_sparks(&mut sparks, &ConstantNoise(0.0), &params(&s, &n, &d, &p), 0.25, &mut out);
        assert_eq!(out.capacity(), 12);
        assert_eq!(out.point_count(), 4);
    }

    #[test]
    fn out_of_range_color_index_wraps() {
        let (s, n, d, p) = (
            SparkConfig::default(),
            NoiseConfig::default(),
            DepthBandConfig::default(),
            Palette::default(),
        );
        let mut sparks = in_band_sparks(1, 9);
        let mut out = SparkBuffers::with_spark_capacity(1);
        pack_sparks(&mut sparks, &ConstantNoise(0.0), &params(&s, &n, &d, &p), 0.25, &mut out);
        assert_eq!(out.point_count(), 2);
        assert_eq!(&out.colors()[..3], &p.color(9 % p.len()));
    }

    #[test]
    fn band_follows_the_spin() {
        let (s, n, d, p) = (
            SparkConfig::default(),
            NoiseConfig::default(),
            DepthBandConfig::default(),
            Palette::default(),
        );
        // on the view plane before the turn, on the view axis after it
        let mut sparks = vec![Spark::new(glam::Vec3::new(0.5, 0.0, 0.0), 0, 0.0)];
        let mut out = SparkBuffers::with_spark_capacity(1);
        pack_sparks(&mut sparks, &ConstantNoise(0.0), &params(&s, &n, &d, &p), 0.25, &mut out);
        assert_eq!(out.point_count(), 2);

        let turned = PackParams {
            model: Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2),
            ..params(&s, &n, &d, &p)
        };
        pack_sparks(&mut sparks, &ConstantNoise(0.0), &turned, 0.25, &mut out);
        assert_eq!(out.point_count(), 0);
    }

    #[test]
    fn buffers_start_empty_with_full_capacity() {
        let b = SparkBuffers::with_spark_capacity(7);
        assert_eq!(b.capacity(), 42);
        assert_eq!(b.filled_len(), 0);
        assert!(b.positions().is_empty());
    }
}
