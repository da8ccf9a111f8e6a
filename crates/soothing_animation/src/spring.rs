//! Spring physics animation
//!
//! RK4-integrated spring physics. Besides the raw
//! stiffness/damping/mass form, a spring can be described by its
//! perceptual `response` (period in seconds) and `damping_fraction`.

use std::f32::consts::PI;

/// Largest integration step; bigger frame deltas are split
const MAX_STEP: f32 = 1.0 / 240.0;

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Spring described by its undamped period and damping ratio
    ///
    /// `response` is the period in seconds, `damping_fraction` is 1.0 for a
    /// critically damped spring and below 1.0 for one that overshoots.
    pub fn response(response: f32, damping_fraction: f32) -> Self {
        let response = response.max(1e-3);
        let omega = 2.0 * PI / response;
        Self {
            stiffness: omega * omega,
            damping: 4.0 * PI * damping_fraction.max(0.0) / response,
            mass: 1.0,
        }
    }

    /// Spring with explicit mass, stiffness and damping
    pub fn interpolating(mass: f32, stiffness: f32, damping: f32) -> Self {
        Self::new(stiffness, damping, mass)
    }

    /// Stiff spring used when no response is given
    pub fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Damping relative to critical damping
    pub fn damping_ratio(&self) -> f32 {
        let critical = self.critical_damping();
        if critical <= 0.0 {
            return 0.0;
        }
        self.damping / critical
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::stiff()
    }
}

/// A spring-based animator
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
    rest_delta: f32,
    rest_speed: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
            rest_delta: 0.5,
            rest_speed: 5.0,
        }
    }

    /// Set the settle thresholds
    ///
    /// The defaults (0.5 and 5.0 per second) suit pixel-sized values.
    /// Unit-sized values such as scales need much tighter thresholds.
    pub fn with_precision(mut self, rest_delta: f32, rest_speed: f32) -> Self {
        self.rest_delta = rest_delta.max(f32::EPSILON);
        self.rest_speed = rest_speed.max(f32::EPSILON);
        self
    }

    /// Start moving with an initial velocity
    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Check if the spring has settled (within epsilon of target with minimal velocity)
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < self.rest_delta && self.velocity.abs() < self.rest_speed
    }

    /// Step the spring simulation using RK4 integration
    pub fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let mut remaining = dt;
        while remaining > 0.0 {
            if self.is_settled() {
                self.value = self.target;
                self.velocity = 0.0;
                return;
            }
            let h = remaining.min(MAX_STEP);
            self.integrate(h);
            remaining -= h;
        }
    }

    fn integrate(&mut self, dt: f32) {
        let k1_v = self.acceleration(self.value, self.velocity);
        let k1_x = self.velocity;

        let k2_v = self.acceleration(
            self.value + k1_x * dt * 0.5,
            self.velocity + k1_v * dt * 0.5,
        );
        let k2_x = self.velocity + k1_v * dt * 0.5;

        let k3_v = self.acceleration(
            self.value + k2_x * dt * 0.5,
            self.velocity + k2_v * dt * 0.5,
        );
        let k3_x = self.velocity + k2_v * dt * 0.5;

        let k4_v = self.acceleration(self.value + k3_x * dt, self.velocity + k3_v * dt);
        let k4_x = self.velocity + k3_v * dt;

        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass.max(f32::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_settles_to_target() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(100.0);

        // Simulate for 2 seconds at 60fps
        for _ in 0..120 {
            spring.step(1.0 / 60.0);
        }

        assert!(spring.is_settled());
        assert!((spring.value() - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_response_form() {
        let config = SpringConfig::response(0.3, 0.6);
        assert!((config.damping_ratio() - 0.6).abs() < 1e-3);
        assert!(config.is_underdamped());

        let critical = SpringConfig::response(0.5, 1.0);
        assert!((critical.damping_ratio() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_unit_scale_spring_overshoots() {
        // Scale pop: 1.0 -> 1.1 with a bouncy spring should overshoot
        let mut spring =
            Spring::new(SpringConfig::response(0.3, 0.6), 1.0).with_precision(1e-4, 1e-3);
        spring.set_target(1.1);

        let mut peak: f32 = 1.0;
        for _ in 0..120 {
            spring.step(1.0 / 60.0);
            peak = peak.max(spring.value());
        }

        assert!(peak > 1.1);
        assert!(spring.is_settled());
        assert!((spring.value() - 1.1).abs() < 1e-3);
    }

    #[test]
    fn test_spring_inherits_velocity() {
        let mut spring = Spring::new(SpringConfig::response(0.4, 0.5), 0.0);
        spring.set_target(100.0);

        for _ in 0..10 {
            spring.step(1.0 / 60.0);
        }

        let velocity = spring.velocity();
        assert!(velocity > 0.0);

        // Change target mid-flight - velocity should continue
        spring.set_target(50.0);
        assert_eq!(spring.velocity(), velocity);
    }

    #[test]
    fn test_spring_rk4_stability() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(1000.0);

        // Large frame deltas are sub-stepped
        for _ in 0..100 {
            spring.step(0.1);
            assert!(spring.value() < 2000.0);
            assert!(spring.value() > -500.0);
        }
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let mut spring = Spring::new(SpringConfig::response(0.5, 1.0), 0.0);
        spring.set_target(10.0);
        spring.step(f32::NAN);
        spring.step(-1.0);
        assert_eq!(spring.value(), 0.0);
    }
}
