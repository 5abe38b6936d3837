use crate::error::{Error, Result};
use ultraviolet::DVec3;

/// A point mass taking part in the simulation.
///
/// Units follow [`crate::units`]: Earth masses, AU and years.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub(crate) pos: DVec3,
    pub(crate) vel: DVec3,
    /// Derived each step, never set by callers.
    pub(crate) acc: DVec3,
    pub(crate) mass: f64,
}

impl Body {
    /// Creates a new Body. Initial acceleration is zero.
    /// Fails if `mass` is not finite and strictly positive.
    pub fn new(mass: f64, pos: DVec3, vel: DVec3) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "body mass must be finite and positive, got {mass}"
            )));
        }

        Ok(Self {
            pos,
            vel,
            acc: DVec3::zero(),
            mass,
        })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn position(&self) -> DVec3 {
        self.pos
    }

    pub fn velocity(&self) -> DVec3 {
        self.vel
    }

    pub fn acceleration(&self) -> DVec3 {
        self.acc
    }

    pub fn momentum(&self) -> DVec3 {
        self.vel * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.mag_sq()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (other.pos - self.pos).mag()
    }

    /// Advances position and velocity by `dt` using explicit Euler.
    /// The position moves with the pre-step velocity.
    pub(crate) fn update(&mut self, dt: f64) {
        self.pos += self.vel * dt;
        self.vel += self.acc * dt;
    }
}
