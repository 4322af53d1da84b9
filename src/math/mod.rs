//! Numerical helpers shared by the projections

/// Free functions used by more than one projection.
pub mod ancillary;
pub use ancillary::msfn;
pub use ancillary::qs;
pub use ancillary::ssfn;
pub use ancillary::ts;

/// Longitude wrapping.
pub mod angular;

/// The authalic latitude, and the Newton solver for its inverse.
pub mod authalic;
pub use authalic::phi1;
pub use authalic::AuthalicCoefficients;

/// Meridian arc length and its inverse.
pub mod meridian;
pub use meridian::MeridianCoefficients;

/// Horner and Clenshaw summation
pub mod series;
pub use series::fourier;
pub use series::taylor;
