//! Engine unit system.
//!
//! Masses are in Earth masses, distances in astronomical units and time in
//! 365-day years. [`GRAVITY`] folds the SI gravitational constant into that
//! system so the integrator never touches SI magnitudes.

/// Newtonian constant of gravitation, m³ kg⁻¹ s⁻².
pub const G_SI: f64 = 6.674_30e-11;

/// Reference mass unit, kg.
pub const EARTH_MASS_KG: f64 = 6e24;

/// Length unit, m.
pub const AU_M: f64 = 1.496e11;

/// Time unit, s.
pub const YEAR_S: f64 = 365.0 * 24.0 * 60.0 * 60.0;

/// Gravitational scaling constant in AU³ / (Earth mass · year²).
pub const GRAVITY: f64 = G_SI * EARTH_MASS_KG * YEAR_S * YEAR_S / (AU_M * AU_M * AU_M);

/// Converts a mass in kilograms to engine mass units.
pub fn kg_to_engine_mass(kg: f64) -> f64 {
    kg / EARTH_MASS_KG
}
