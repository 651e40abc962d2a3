mod propagators;

/// Gravitational parameter of the Earth in m^3/s^2
pub const EARTH_MU: f64 = 3.986004418e14;
