use crate::constants::{
    MASTER_GAIN, THUMP_ATTACK_SEC, THUMP_DECAY_SEC, THUMP_END_HZ, THUMP_LOWPASS_HZ,
    THUMP_START_HZ,
};
use anyhow::anyhow;
use web_sys as web;

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(anyhow!("{} GainNode error", label))
        }
    }
}

/// Low sine thump fired once per heartbeat: master -> lowpass -> destination.
pub struct HeartAudio {
    ctx: web::AudioContext,
    master: web::GainNode,
    muted: bool,
}

impl HeartAudio {
    /// Must be called from a user gesture or the context starts suspended.
    pub fn new() -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow!("AudioContext: {:?}", e))?;
        let master = create_gain(&ctx, MASTER_GAIN, "Master")?;
        let tone = web::BiquadFilterNode::new(&ctx)
            .map_err(|e| anyhow!("BiquadFilterNode error: {:?}", e))?;
        tone.set_type(web::BiquadFilterType::Lowpass);
        tone.frequency().set_value(THUMP_LOWPASS_HZ);
        _ = master.connect_with_audio_node(&tone);
        _ = tone.connect_with_audio_node(&ctx.destination());
        Ok(Self {
            ctx,
            master,
            muted: false,
        })
    }

    pub fn resume(&self) {
        _ = self.ctx.resume();
    }

    pub fn suspend(&self) {
        _ = self.ctx.suspend();
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        let level = if self.muted { 0.0 } else { MASTER_GAIN };
        self.master.gain().set_value(level);
        self.muted
    }

    pub fn thump(&self, velocity: f32) {
        if self.muted || self.ctx.state() != web::AudioContextState::Running {
            return;
        }
        let Ok(src) = web::OscillatorNode::new(&self.ctx) else {
            return;
        };
        let Ok(env) = create_gain(&self.ctx, 0.0, "thump") else {
            return;
        };
        src.set_type(web::OscillatorType::Sine);
        let t0 = self.ctx.current_time() + 0.005;
        let end = t0 + THUMP_ATTACK_SEC + THUMP_DECAY_SEC;
        _ = src.frequency().set_value_at_time(THUMP_START_HZ, t0);
        _ = src
            .frequency()
            .exponential_ramp_to_value_at_time(THUMP_END_HZ, end);
        _ = env
            .gain()
            .linear_ramp_to_value_at_time(velocity.clamp(0.0, 1.0), t0 + THUMP_ATTACK_SEC);
        _ = env.gain().linear_ramp_to_value_at_time(0.0, end);
        _ = src.connect_with_audio_node(&env);
        _ = env.connect_with_audio_node(&self.master);
        _ = src.start_with_when(t0);
        _ = src.stop_with_when(end + 0.02);
    }
}
