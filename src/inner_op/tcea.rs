//! Transverse Cylindrical Equal Area. Spherical form only: Ellipsoids are
//! replaced by the sphere of radius `a`
use super::*;

const EPS10: f64 = 1e-10;

#[derive(Debug)]
struct Tcea;

impl Projection for Tcea {
    fn name(&self) -> &'static str {
        "tcea_spheroid"
    }

    fn fwd(&self, g: &GlobalParameters, lam: f64, phi: f64) -> Result<(f64, f64), Error> {
        let (sinlam, coslam) = lam.sin_cos();
        let x = phi.cos() * sinlam / g.k0;
        let y = g.k0 * (phi.tan().atan2(coslam) - g.phi0);
        Ok((x, y))
    }

    fn inv(&self, g: &GlobalParameters, x: f64, y: f64) -> Result<(f64, f64), Error> {
        let y = y / g.k0 + g.phi0;
        let x = x * g.k0;
        if x.abs() > 1. + EPS10 {
            return Err(Error::Domain("tcea: easting beyond the central great circle"));
        }
        let t = (1. - x * x).max(0.).sqrt();
        let (siny, cosy) = y.sin_cos();
        Ok((x.atan2(t * cosy), (t * siny).asin()))
    }
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 7] = [
    OpParameter::Flag { key: "inv" },
    OpParameter::Text { key: "ellps", default: Some("GRS80") },

    OpParameter::Real { key: "lat_0", default: Some(0_f64) },
    OpParameter::Real { key: "lon_0", default: Some(0_f64) },

    OpParameter::Real { key: "k_0",   default: Some(1_f64) },
    OpParameter::Real { key: "x_0",   default: Some(0_f64) },
    OpParameter::Real { key: "y_0",   default: Some(0_f64) },
];

pub fn new(parameters: &RawParameters, _ctx: &dyn Context) -> Result<Op, Error> {
    let params = ParsedParameters::new(parameters, &GAMUT)?;
    let globals = GlobalParameters::new(&params).spherical();
    if globals.k0.abs() < EPS10 {
        return Err(Error::InvalidGeometry("tcea: k_0 must be non-zero".to_string()));
    }
    Op::plain(parameters, params, globals, Box::new(Tcea))
}

// ----- T E S T S ---------------------------------------------------------------------
