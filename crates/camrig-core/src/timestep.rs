//! Fixed-step driver that turns variable frame times into rig updates.

/// Default fixed simulation step (50 Hz)
pub const DEFAULT_FIXED_STEP: f32 = 1.0 / 50.0;

/// Cap on steps per frame so a slow frame can't spiral
pub const DEFAULT_MAX_STEPS_PER_FRAME: u32 = 4;

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    max_steps_per_frame: u32,
    accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_STEP)
    }
}

impl FixedTimestep {
    pub fn new(step: f32) -> Self {
        Self {
            step: step.max(f32::EPSILON),
            max_steps_per_frame: DEFAULT_MAX_STEPS_PER_FRAME,
            accumulator: 0.0,
        }
    }

    pub fn with_max_steps(mut self, max_steps_per_frame: u32) -> Self {
        self.max_steps_per_frame = max_steps_per_frame.max(1);
        self
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame's elapsed time and return how many fixed steps to run.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps_per_frame {
            self.accumulator -= self.step;
            steps += 1;
        }

        // Drop the backlog once the cap is hit, simulation slows down instead
        if self.accumulator > self.step * 2.0 {
            log::debug!(
                "Fixed timestep dropping {:.3}s of backlog",
                self.accumulator - self.step
            );
            self.accumulator = self.step;
        }

        steps
    }

    /// Fraction of a step left in the accumulator, for interpolation.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
