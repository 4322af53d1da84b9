use crate::Error;

// Coefficients for the meridian distance series, PROJ's pj_enfn
const C00: f64 = 1.;
const C02: f64 = 0.25;
const C04: f64 = 0.046875;
const C06: f64 = 0.01953125;
const C08: f64 = 0.01068115234375;
const C22: f64 = 0.75;
const C44: f64 = 0.46875;
const C46: f64 = 0.013_020_833_333_333_334;
const C48: f64 = 0.007_120_768_229_166_667;
const C66: f64 = 0.364_583_333_333_333_3;
const C68: f64 = 0.005_696_614_583_333_333;
const C88: f64 = 0.3076171875;

/// Meridian arc length on an ellipsoid with unit semimajor axis, and its
/// inverse: the latitude reached by walking a given distance north from
/// the equator.
///
/// None of the built in projections need it: It is provided for authors
/// of user defined projections, e.g. of the transverse or polyconic kind.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeridianCoefficients {
    en: [f64; 5],
    es: f64,
}

impl MeridianCoefficients {
    #[must_use]
    pub fn new(es: f64) -> MeridianCoefficients {
        let mut en = [0.; 5];
        en[0] = C00 - es * (C02 + es * (C04 + es * (C06 + es * C08)));
        en[1] = es * (C22 - es * (C04 + es * (C06 + es * C08)));
        let mut t = es * es;
        en[2] = t * (C44 - es * (C46 + es * C48));
        t *= es;
        en[3] = t * (C66 - es * C68);
        en[4] = t * es * C88;
        MeridianCoefficients { en, es }
    }

    /// The meridian distance from the equator to `phi`. The trigs of `phi`
    /// are typically at hand in the caller, so we take them as arguments.
    #[must_use]
    pub fn distance(&self, phi: f64, sinphi: f64, cosphi: f64) -> f64 {
        let en = &self.en;
        let cphi = cosphi * sinphi;
        let sphi = sinphi * sinphi;
        en[0] * phi - cphi * (en[1] + sphi * (en[2] + sphi * (en[3] + sphi * en[4])))
    }

    /// The latitude at the meridian distance `distance`, by Newton iteration
    pub fn latitude(&self, distance: f64) -> Result<f64, Error> {
        const MAX_ITER: usize = 10;
        const EPS: f64 = 1e-11;

        let k = 1. / (1. - self.es);
        let mut phi = distance;
        for _ in 0..MAX_ITER {
            let (s, c) = phi.sin_cos();
            let t = 1. - self.es * s * s;
            let t = (self.distance(phi, s, c) - distance) * (t * t.sqrt()) * k;
            phi -= t;
            if t.abs() < EPS {
                return Ok(phi);
            }
        }
        Err(Error::Convergence("meridian: inverse meridian distance"))
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn meridian_distance() -> Result<(), Error> {
        // GRS80
        let a = 6_378_137.;
        let f: f64 = 1. / 298.257_222_100_882_7;
        let es = f * (2. - f);
        let mer = MeridianCoefficients::new(es);

        // The quadrant, and the distance to 45°N. Reference values
        // computed using the Bessel-Helmert series to 8th order
        let quarter = mer.distance(FRAC_PI_2, 1., 0.);
        assert_float_eq!(a * quarter, 10_001_965.729_230_457, abs <= 1e-3);
        let phi = 45_f64.to_radians();
        let (s, c) = phi.sin_cos();
        assert_float_eq!(a * mer.distance(phi, s, c), 4_984_944.377_857_987, abs <= 1e-3);

        // Roundtrip
        for deg in [-89., -45., -0.5, 0., 12., 55., 89.9] {
            let phi = f64::to_radians(deg);
            let (s, c) = phi.sin_cos();
            let d = mer.distance(phi, s, c);
            assert_float_eq!(mer.latitude(d)?, phi, abs <= 1e-11);
        }

        // On the sphere, distance and latitude coincide
        let sphere = MeridianCoefficients::new(0.);
        assert_eq!(sphere.distance(0.3, 0.3_f64.sin(), 0.3_f64.cos()), 0.3);
        assert_eq!(sphere.latitude(0.3)?, 0.3);
        Ok(())
    }
}
