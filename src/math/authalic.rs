use super::qs;
use super::series::fourier;
use super::series::taylor;
use crate::Error;

// Polynomial coefficients in es, for the Fourier series taking the authalic
// latitude back to the geographic, PROJ's pj_authset. Row i holds the
// coefficients for the sin(2(i+1)β) term, which carries a factor es^(i+1).
const P00: f64 = 0.333_333_333_333_333_33;
const P01: f64 = 0.172_222_222_222_222_22;
const P02: f64 = 0.102_579_365_079_365_07;
const P10: f64 = 0.063_888_888_888_888_88;
const P11: f64 = 0.066_402_116_402_116_40;
const P20: f64 = 0.016_415_012_942_191_544;

const AUTHALIC: [[f64; 3]; 3] = [[P00, P01, P02], [P10, P11, 0.], [P20, 0., 0.]];

/// The authalic (equal area) latitude β and its inverse, for a given
/// ellipsoid, following Snyder (1987) eqs. (3-11) and (3-18).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AuthalicCoefficients {
    coefficients: [f64; 3],
    qp: f64,
    e: f64,
}

impl AuthalicCoefficients {
    /// Precompute the series coefficients, and the value of q at the pole.
    /// Returns `None` for eccentricities outside of [0, 1).
    pub fn new(es: f64) -> Option<AuthalicCoefficients> {
        if !es.is_finite() || !(0. ..1.).contains(&es) {
            return None;
        }
        let mut coefficients = [0.; 3];
        let mut power = es;
        for (i, row) in AUTHALIC.iter().enumerate() {
            coefficients[i] = power * taylor::horner(es, row);
            power *= es;
        }
        let e = es.sqrt();
        Some(AuthalicCoefficients {
            coefficients,
            qp: qs(1., e),
            e,
        })
    }

    /// The value of the authalic function, [qs], at the pole
    #[must_use]
    pub fn qp(&self) -> f64 {
        self.qp
    }

    /// The authalic latitude corresponding to the authalic function value `q`
    #[must_use]
    pub fn authalic_latitude(&self, q: f64) -> f64 {
        let ratio = q / self.qp;
        if ratio.abs() >= 1. {
            return std::f64::consts::FRAC_PI_2.copysign(ratio);
        }
        ratio.asin()
    }

    /// The geographic latitude corresponding to the authalic latitude `beta`
    #[must_use]
    pub fn latitude(&self, beta: f64) -> f64 {
        beta + fourier::sin(2. * beta, &self.coefficients)
    }

    /// The authalic latitude corresponding to the geographic latitude `phi`
    #[must_use]
    pub fn beta(&self, phi: f64) -> f64 {
        self.authalic_latitude(qs(phi.sin(), self.e))
    }
}

/// Determine the latitude corresponding to the authalic function value
/// `qs`, by Newton iteration, Snyder (1987) eq. (3-16), PROJ's `phi1_`.
///
/// For spheres (`e < 1e-7`), the closed form `asin(qs/2)` is returned.
pub fn phi1(qs: f64, e: f64, one_es: f64) -> Result<f64, Error> {
    const MAX_ITER: usize = 15;
    const TOL: f64 = 1e-10;

    let mut phi = (0.5 * qs).asin();
    if e < 1e-7 {
        return Ok(phi);
    }

    for _ in 0..MAX_ITER {
        let (sinphi, cosphi) = phi.sin_cos();
        let con = e * sinphi;
        let com = 1. - con * con;
        let dphi = 0.5 * com * com / cosphi
            * (qs / one_es - sinphi / com + 0.5 / e * ((1. - con) / (1. + con)).ln());
        phi += dphi;
        if dphi.abs() <= TOL {
            return Ok(phi);
        }
    }
    Err(Error::Convergence("phi1: inverse authalic latitude"))
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficients() {
        // Leading terms, Snyder (1987) eq. (3-18)
        let es = 0.006_694_380_022_900_787;
        let aut = AuthalicCoefficients::new(es).unwrap();
        assert!((aut.coefficients[0] - es / 3.).abs() < es * es);
        assert!((aut.coefficients[1] - es * es * 23. / 360.).abs() < es * es * es);

        assert!(AuthalicCoefficients::new(-0.1).is_none());
        assert!(AuthalicCoefficients::new(1.0).is_none());
        assert!(AuthalicCoefficients::new(f64::NAN).is_none());

        // The sphere: no corrections, and qp = 2
        let sphere = AuthalicCoefficients::new(0.).unwrap();
        assert_eq!(sphere.qp(), 2.);
        assert_eq!(sphere.latitude(0.5), 0.5);
    }

    #[test]
    fn authalic_roundtrip() {
        for e in [0., 0.01, 0.0818191910428158, 0.2, 0.3] {
            let aut = AuthalicCoefficients::new(e * e).unwrap();
            for deg in [-89.5, -60., -12.5, 0., 1., 33.3, 45., 75., 89.5] {
                let phi = f64::to_radians(deg);
                let beta = aut.authalic_latitude(qs(phi.sin(), e));
                assert_eq!(beta, aut.beta(phi));
                // The 3-term series is truncated at es³
                let tolerance = if e < 0.1 { 1e-9 } else { 1e-5 };
                assert!((aut.latitude(beta) - phi).abs() < tolerance);
            }
            // The poles map to themselves
            let pole = std::f64::consts::FRAC_PI_2;
            assert_eq!(aut.beta(pole), pole);
        }
    }

    #[test]
    fn newton_inverse() -> Result<(), Error> {
        for e in [0., 0.01, 0.05, 0.0818191910428158, 0.1] {
            let one_es = 1. - e * e;
            for deg in [-85., -45., -10., 0., 0.5, 30., 60., 85.] {
                let phi = f64::to_radians(deg);
                let q = qs(phi.sin(), e);
                assert!((phi1(q, e, one_es)? - phi).abs() < 1e-10);
            }
        }

        // The sphere is handled in closed form
        assert_eq!(phi1(1., 0., 1.)?, 0.5_f64.asin());

        // qs far outside the authalic range
        let e = 0.3;
        assert!(matches!(
            phi1(2.5, e, 1. - e * e),
            Err(Error::Convergence(_))
        ));
        Ok(())
    }
}
