//! Critically damped smoothing toward a moving target.
//!
//! Unlike a fixed-ratio lerp, the integrator is parameterised by a time
//! constant, so the rig converges at the same speed whatever the step size.

use std::ops::{Add, Mul, Sub};

use glam::Vec3;

/// Smallest smooth time accepted, keeps `2 / smooth_time` finite.
pub const MIN_SMOOTH_TIME: f32 = 0.0001;

/// Values that can be driven by [`Damping::step`].
pub trait Dampable: Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self> {
    /// The additive identity, used for a settled velocity.
    const ZERO: Self;

    /// Limit the magnitude of `self` to `max`.
    fn clamp_magnitude(self, max: f32) -> Self;

    /// True when moving by `to_target` and then by `past_target` points the
    /// same way, i.e. the step went past the target.
    fn overshot(to_target: Self, past_target: Self) -> bool;
}

impl Dampable for f32 {
    const ZERO: Self = 0.0;

    fn clamp_magnitude(self, max: f32) -> Self {
        self.clamp(-max, max)
    }

    fn overshot(to_target: Self, past_target: Self) -> bool {
        (to_target > 0.0) == (past_target > 0.0)
    }
}

impl Dampable for Vec3 {
    const ZERO: Self = Vec3::ZERO;

    fn clamp_magnitude(self, max: f32) -> Self {
        self.clamp_length_max(max)
    }

    fn overshot(to_target: Self, past_target: Self) -> bool {
        to_target.dot(past_target) > 0.0
    }
}

/// Parameters of a critically damped spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Damping {
    /// Approximate time to reach the target (seconds)
    pub smooth_time: f32,
    /// Upper bound on speed, `f32::INFINITY` for none
    pub max_speed: f32,
}

impl Damping {
    /// Unbounded damping with the given time constant.
    pub fn new(smooth_time: f32) -> Self {
        Self {
            smooth_time,
            max_speed: f32::INFINITY,
        }
    }

    /// Limit the speed the damped value may reach.
    pub fn with_max_speed(mut self, max_speed: Option<f32>) -> Self {
        self.max_speed = max_speed.unwrap_or(f32::INFINITY);
        self
    }

    /// Advance `current` toward `target` by `dt` seconds.
    ///
    /// `velocity` is the caller-owned accumulator that carries momentum
    /// between steps. A non-positive `dt` leaves everything untouched.
    pub fn step<T: Dampable>(&self, current: T, target: T, velocity: &mut T, dt: f32) -> T {
        if dt <= 0.0 || !dt.is_finite() {
            return current;
        }

        let smooth_time = self.smooth_time.max(MIN_SMOOTH_TIME);
        let omega = 2.0 / smooth_time;

        // Cubic approximation of exp(-omega * dt)
        let x = omega * dt;
        let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

        let original_target = target;
        let change = (current - target).clamp_magnitude(self.max_speed * smooth_time);
        let target = current - change;

        let temp = (*velocity + change * omega) * dt;
        *velocity = (*velocity - temp * omega) * decay;
        let mut output = target + (change + temp) * decay;

        if T::overshot(original_target - current, output - original_target) {
            output = original_target;
            *velocity = T::ZERO;
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.02;

    #[test]
    fn test_moves_toward_target() {
        let damping = Damping::new(0.2);
        let mut velocity = 0.0;
        let value = damping.step(0.0, 10.0, &mut velocity, DT);

        assert!(value > 0.0);
        assert!(value < 10.0);
        assert!(velocity > 0.0);
    }

    #[test]
    fn test_progress_after_one_time_constant() {
        let damping = Damping::new(0.2);
        let mut velocity = 0.0;
        let mut value = 0.0;
        for _ in 0..10 {
            value = damping.step(value, 10.0, &mut velocity, DT);
        }

        // Critically damped: roughly 60% of the way after one smooth time
        assert!(value > 5.0, "value was {}", value);
        assert!(value < 9.0, "value was {}", value);
    }

    #[test]
    fn test_converges_without_overshoot() {
        let damping = Damping::new(0.2);
        let mut velocity = 0.0;
        let mut value = 0.0;
        for _ in 0..200 {
            value = damping.step(value, 10.0, &mut velocity, DT);
            assert!(value <= 10.0);
        }

        assert!((value - 10.0).abs() < 1e-3);
        assert!(velocity.abs() < 1e-2);
    }

    #[test]
    fn test_step_size_independence() {
        let damping = Damping::new(0.3);

        let mut fine_velocity = 0.0;
        let mut fine = 0.0;
        for _ in 0..60 {
            fine = damping.step(fine, 5.0, &mut fine_velocity, 0.005);
        }

        let mut coarse_velocity = 0.0;
        let mut coarse = 0.0;
        for _ in 0..6 {
            coarse = damping.step(coarse, 5.0, &mut coarse_velocity, 0.05);
        }

        assert!((fine - coarse).abs() < 0.1, "fine {} coarse {}", fine, coarse);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let damping = Damping::new(0.2);
        let mut velocity = 3.0;
        let value = damping.step(1.0, 10.0, &mut velocity, 0.0);

        assert_eq!(value, 1.0);
        assert_eq!(velocity, 3.0);
    }

    #[test]
    fn test_max_speed_limits_travel() {
        let damping = Damping::new(0.2).with_max_speed(Some(1.0));
        let mut velocity = 0.0;
        let mut value = 0.0;
        for _ in 0..50 {
            value = damping.step(value, 100.0, &mut velocity, DT);
        }

        assert!(value > 0.5);
        assert!(value < 1.5, "value was {}", value);
    }

    #[test]
    fn test_zero_smooth_time_snaps() {
        let damping = Damping::new(0.0);
        let mut velocity = 0.0;
        let value = damping.step(0.0, 4.0, &mut velocity, DT);

        assert!((value - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_vec3_converges() {
        let damping = Damping::new(0.2);
        let mut velocity = Vec3::ZERO;
        let mut value = Vec3::ZERO;
        let target = Vec3::new(3.0, 0.0, -4.0);
        for _ in 0..200 {
            value = damping.step(value, target, &mut velocity, DT);
        }

        assert!(value.distance(target) < 1e-3);
    }

    #[test]
    fn test_vec3_overshoot_snaps_to_target() {
        let damping = Damping::new(0.2);
        // Large velocity already heading past the target
        let mut velocity = Vec3::new(500.0, 0.0, 0.0);
        let value = damping.step(Vec3::ZERO, Vec3::X, &mut velocity, DT);

        assert_eq!(value, Vec3::X);
        assert_eq!(velocity, Vec3::ZERO);
    }
}
