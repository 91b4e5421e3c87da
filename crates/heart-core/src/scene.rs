//! The heart scene: owns every piece of per-frame state and drives one update per frame.

use glam::{Mat4, Vec3};
use rand::Rng;

use crate::beat::{BeatOscillator, BeatPhase};
use crate::clock::FrameClock;
use crate::config::HeartConfig;
use crate::error::Result;
use crate::lifecycle::{LifecycleEvent, LifecycleState};
use crate::mesh::{HeartMesh, TriMesh};
use crate::noise::{NoiseField, SimplexNoise};
use crate::obj::parse_obj;
use crate::packer::{pack_sparks, PackParams, SparkBuffers};
use crate::sampler::SurfaceSampler;
use crate::spark::{spawn_sparks, Spark};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Mesh and spark buffers were rebuilt.
    Rendered,
    /// The callback came too soon after the previous frame; nothing changed.
    Skipped,
    /// The scene is not running.
    Inactive,
}

pub struct HeartScene<N: NoiseField = SimplexNoise> {
    config: HeartConfig,
    noise: N,
    mesh: HeartMesh,
    sparks: Vec<Spark>,
    buffers: SparkBuffers,
    beat: BeatOscillator,
    clock: FrameClock,
    time_sec: f64,
    state: LifecycleState,
}

impl HeartScene<SimplexNoise> {
    /// Decode an OBJ asset and build a scene around it.
    pub fn from_obj<R: Rng + ?Sized>(config: HeartConfig, src: &str, rng: &mut R) -> Result<Self> {
        let mesh = parse_obj(src)?;
        Self::build(config, mesh, rng)
    }

    pub fn build<R: Rng + ?Sized>(config: HeartConfig, source: TriMesh, rng: &mut R) -> Result<Self> {
        let noise = SimplexNoise::new(config.noise.seed);
        Self::with_noise(config, source, noise, rng)
    }
}

impl<N: NoiseField> HeartScene<N> {
    pub fn with_noise<R: Rng + ?Sized>(
        config: HeartConfig,
        source: TriMesh,
        noise: N,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        let world = source.transformed(&config.mesh);
        let sampler = SurfaceSampler::new(&world)?;
        let sparks = spawn_sparks(&sampler, &config.sparks, config.palette.len(), rng);
        let buffers = SparkBuffers::with_spark_capacity(sparks.len());
        let beat = BeatOscillator::new(config.beat.clone(), config.reduced_motion);
        let clock = FrameClock::new(&config.frame);
        log::info!(
            "[scene] vertices={} triangles={} area={:.3} sparks={} reduced_motion={}",
            world.positions.len(),
            world.triangle_count(),
            sampler.total_area(),
            sparks.len(),
            config.reduced_motion
        );
        Ok(Self {
            mesh: HeartMesh::from_world(world),
            config,
            noise,
            sparks,
            buffers,
            beat,
            clock,
            time_sec: 0.0,
            state: LifecycleState::Uninitialized,
        })
    }

    /// Replace the beat source, e.g. with `BeatOscillator::pinned`.
    pub fn with_beat(mut self, beat: BeatOscillator) -> Self {
        self.beat = beat;
        self
    }

    fn transition(&mut self, event: LifecycleEvent) -> Result<()> {
        let next = self.state.on(event)?;
        if next != self.state {
            log::debug!("[scene] {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        Ok(())
    }

    pub fn start(&mut self) -> Result<()> {
        self.transition(LifecycleEvent::Start)
    }

    pub fn pause(&mut self) -> Result<()> {
        self.transition(LifecycleEvent::Pause)
    }

    pub fn resume(&mut self) -> Result<()> {
        let was_paused = self.state == LifecycleState::Paused;
        self.transition(LifecycleEvent::Resume)?;
        if was_paused {
            self.clock.rebase();
        }
        Ok(())
    }

    pub fn dispose(&mut self) -> Result<()> {
        self.transition(LifecycleEvent::Dispose)
    }

    /// Host animation callback. `now_sec` is a monotonic timestamp.
    pub fn frame(&mut self, now_sec: f64) -> FrameOutcome {
        if !self.state.is_running() {
            return FrameOutcome::Inactive;
        }
        match self.clock.tick(now_sec) {
            Some(dt) => {
                self.step(dt as f32);
                FrameOutcome::Rendered
            }
            None => FrameOutcome::Skipped,
        }
    }

    /// Advance animation time by `dt_sec` and rebuild the mesh and spark buffers.
    pub fn step(&mut self, dt_sec: f32) {
        self.time_sec += dt_sec.max(0.0) as f64;
        let b = self.beat.advance(dt_sec);
        self.mesh
            .displace(&self.noise, &self.config.noise, self.time_sec as f32, b);
        let params = PackParams {
            sparks: &self.config.sparks,
            noise: &self.config.noise,
            depth: &self.config.depth,
            palette: &self.config.palette,
            model: self.model_matrix(),
        };
        pack_sparks(&mut self.sparks, &self.noise, &params, b, &mut self.buffers);
    }

    #[inline]
    pub fn config(&self) -> &HeartConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    #[inline]
    pub fn time_sec(&self) -> f64 {
        self.time_sec
    }

    #[inline]
    pub fn beat(&self) -> f32 {
        self.beat.value()
    }

    #[inline]
    pub fn beat_phase(&self) -> BeatPhase {
        self.beat.phase()
    }

    #[inline]
    pub fn beat_cycles(&self) -> u64 {
        self.beat.cycles()
    }

    /// Spin about Y in radians, derived from animation time.
    pub fn spin_angle(&self) -> f32 {
        let period = self.config.spin.period_sec as f64;
        if period <= 0.0 {
            return 0.0;
        }
        ((self.time_sec % period) / period * std::f64::consts::TAU) as f32
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.spin_angle())
    }

    #[inline]
    pub fn rest_vertices(&self) -> &[Vec3] {
        self.mesh.rest()
    }

    #[inline]
    pub fn live_vertices(&self) -> &[Vec3] {
        self.mesh.live()
    }

    #[inline]
    pub fn live_vertex_bytes(&self) -> &[u8] {
        self.mesh.live_bytes()
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        self.mesh.indices()
    }

    /// True once per change of the live mesh.
    #[inline]
    pub fn take_mesh_dirty(&mut self) -> bool {
        self.mesh.take_dirty()
    }

    #[inline]
    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    #[inline]
    pub fn spark_buffers(&self) -> &SparkBuffers {
        &self.buffers
    }

    #[inline]
    pub fn spark_positions(&self) -> &[f32] {
        self.buffers.positions()
    }

    #[inline]
    pub fn spark_colors(&self) -> &[f32] {
        self.buffers.colors()
    }

    #[inline]
    pub fn spark_point_count(&self) -> usize {
        self.buffers.point_count()
    }

    /// Worst-case point count (two candidates per spark).
    #[inline]
    pub fn spark_capacity_points(&self) -> usize {
        self.buffers.capacity() / 3
    }
}
