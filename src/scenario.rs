use crate::{body::Body, error::Result, units};
use ultraviolet::DVec3;

/// Draws one body with a random mass, position and velocity.
/// - Mass between an Earth mass and roughly a solar mass.
/// - Position inside a 20 AU cube centred on the origin.
/// - Velocity up to 3 AU/year per axis.
pub fn random_body(rng: &mut fastrand::Rng) -> Result<Body> {
    let mass_kg = uniform(rng, units::EARTH_MASS_KG, 2e30);
    let pos = DVec3::new(
        uniform(rng, -10.0, 10.0),
        uniform(rng, -10.0, 10.0),
        uniform(rng, -10.0, 10.0),
    );
    let vel = DVec3::new(
        uniform(rng, -3.0, 3.0),
        uniform(rng, -3.0, 3.0),
        uniform(rng, -3.0, 3.0),
    );

    Body::new(units::kg_to_engine_mass(mass_kg), pos, vel)
}

/// Generates `n` independent random bodies.
pub fn random_bodies(n: usize, rng: &mut fastrand::Rng) -> Result<Vec<Body>> {
    (0..n).map(|_| random_body(rng)).collect()
}

/// Two bodies of equal `mass` at rest on the x axis, `separation` apart and
/// symmetric about the origin.
pub fn symmetric_pair(mass: f64, separation: f64) -> Result<[Body; 2]> {
    let half = DVec3::new(separation / 2.0, 0.0, 0.0);
    Ok([
        Body::new(mass, -half, DVec3::zero())?,
        Body::new(mass, half, DVec3::zero())?,
    ])
}

fn uniform(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    low + rng.f64() * (high - low)
}
