use std::time::Duration;

use crate::params::MotionParams;

/// Animation clock a render loop advances once per frame.
///
/// `frame` counts animation milliseconds and grows by `dt_ms * speed`; the
/// shader sees `u_time = frame * 0.001`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionClock {
    speed: f32,
    frame: f32,
}

impl MotionClock {
    pub fn new(motion: MotionParams) -> Self {
        Self {
            speed: motion.speed,
            frame: motion.frame,
        }
    }

    /// A clock that never moves.
    pub fn still() -> Self {
        Self::new(MotionParams::new(0.0, 0.0))
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn frame(&self) -> f32 {
        self.frame
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn set_frame(&mut self, frame: f32) {
        self.frame = frame;
    }

    pub fn is_animating(&self) -> bool {
        self.speed != 0.0
    }

    /// Moves time forward by `elapsed` wall-clock time and returns `u_time`.
    pub fn advance(&mut self, elapsed: Duration) -> f32 {
        let dt_ms = elapsed.as_secs_f32() * 1000.0;
        self.frame += dt_ms * self.speed;
        self.time()
    }

    /// Seconds of animation time.
    pub fn time(&self) -> f32 {
        self.frame * 0.001
    }
}

impl Default for MotionClock {
    fn default() -> Self {
        Self::new(MotionParams::default())
    }
}
