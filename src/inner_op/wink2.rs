//! Winkel II: The average of the equirectangular projection with standard
//! parallel `lat_1`, and the Mollweide projection. Spherical form, forward only.
use super::*;
use std::f64::consts::FRAC_2_PI;
use std::f64::consts::FRAC_PI_2;
use std::f64::consts::FRAC_PI_4;
use std::f64::consts::PI;

const MAX_ITER: usize = 10;
const LOOP_TOL: f64 = 1e-7;

// Near the poles, the Newton iteration for the Mollweide auxiliary angle
// converges too slowly to finish within MAX_ITER steps
const POLAR_BAND: f64 = 0.1;

#[derive(Debug)]
struct Wink2 {
    cosphi1: f64,
}

impl Projection for Wink2 {
    fn name(&self) -> &'static str {
        "wink2_spheroid"
    }

    fn invertible(&self) -> bool {
        false
    }

    fn fwd(&self, _g: &GlobalParameters, lam: f64, phi: f64) -> Result<(f64, f64), Error> {
        let k = PI * phi.sin();

        // Solve θ + sin θ = π sin φ for θ, the doubled auxiliary angle
        let mut theta = 1.8 * phi;
        let mut converged = false;
        for _ in 0..MAX_ITER {
            let v = (theta + theta.sin() - k) / (1. + theta.cos());
            theta -= v;
            if v.abs() < LOOP_TOL {
                converged = true;
                break;
            }
        }

        let aux = if converged {
            0.5 * theta
        } else if theta.abs() >= PI - POLAR_BAND {
            FRAC_PI_2.copysign(theta)
        } else {
            return Err(Error::Convergence("wink2: auxiliary angle"));
        };

        let x = 0.5 * lam * (aux.cos() + self.cosphi1);
        let y = FRAC_PI_4 * (aux.sin() + phi * FRAC_2_PI);
        Ok((x, y))
    }
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 6] = [
    OpParameter::Text { key: "ellps", default: Some("GRS80") },

    OpParameter::Real { key: "lon_0", default: Some(0_f64) },
    OpParameter::Real { key: "lat_1", default: Some(0_f64) },

    OpParameter::Real { key: "x_0",   default: Some(0_f64) },
    OpParameter::Real { key: "y_0",   default: Some(0_f64) },

    // Not supported, but accepted, to give a proper error message
    OpParameter::Flag { key: "inv" },
];

pub fn new(parameters: &RawParameters, _ctx: &dyn Context) -> Result<Op, Error> {
    let params = ParsedParameters::new(parameters, &GAMUT)?;
    let globals = GlobalParameters::new(&params).spherical();
    let wink2 = Wink2 {
        cosphi1: params.lat(1).cos(),
    };
    Op::plain(parameters, params, globals, Box::new(wink2))
}

// ----- T E S T S ---------------------------------------------------------------------
