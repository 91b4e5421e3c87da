//! Scene lifecycle: Uninitialized -> Running <-> Paused -> Disposed.

use crate::error::{HeartError, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Running,
    Paused,
    Disposed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    Start,
    Pause,
    Resume,
    Dispose,
}

impl LifecycleState {
    /// Apply `event`. Repeating Pause while paused or Resume while running is a no-op;
    /// anything after Dispose is rejected.
    pub fn on(self, event: LifecycleEvent) -> Result<LifecycleState> {
        use LifecycleEvent::*;
        use LifecycleState::*;
        match (self, event) {
            (Uninitialized, Start) => Ok(Running),
            (Running, Pause) | (Paused, Pause) => Ok(Paused),
            (Paused, Resume) | (Running, Resume) => Ok(Running),
            (Uninitialized | Running | Paused, Dispose) => Ok(Disposed),
            (from, event) => Err(HeartError::IllegalTransition { from, event }),
        }
    }

    #[inline]
    pub fn is_running(self) -> bool {
        self == LifecycleState::Running
    }
}
