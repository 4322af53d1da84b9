//! Lambert Cylindrical Equal Area, normal aspect
use super::*;
use std::f64::consts::FRAC_PI_2;

const EPS10: f64 = 1e-10;

#[derive(Debug)]
struct CeaEllipsoid {
    apa: AuthalicCoefficients,
    qp: f64,
}

#[derive(Debug)]
struct CeaSpheroid;

// The scale factor along the standard parallels, k0, lives in the globals

impl Projection for CeaEllipsoid {
    fn name(&self) -> &'static str {
        "cea_ellipsoid"
    }

    fn fwd(&self, g: &GlobalParameters, lam: f64, phi: f64) -> Result<(f64, f64), Error> {
        Ok((g.k0 * lam, 0.5 * qs(phi.sin(), g.e) / g.k0))
    }

    fn inv(&self, g: &GlobalParameters, x: f64, y: f64) -> Result<(f64, f64), Error> {
        let t = 2. * y * g.k0 / self.qp;
        let beta = authalic_argument(t)?;
        Ok((x / g.k0, self.apa.latitude(beta)))
    }
}

impl Projection for CeaSpheroid {
    fn name(&self) -> &'static str {
        "cea_spheroid"
    }

    fn fwd(&self, g: &GlobalParameters, lam: f64, phi: f64) -> Result<(f64, f64), Error> {
        Ok((g.k0 * lam, phi.sin() / g.k0))
    }

    fn inv(&self, g: &GlobalParameters, x: f64, y: f64) -> Result<(f64, f64), Error> {
        let phi = authalic_argument(y * g.k0)?;
        Ok((x / g.k0, phi))
    }
}

// asin(t), tolerating rounding noise just outside of [-1, 1]
fn authalic_argument(t: f64) -> Result<f64, Error> {
    let abs = t.abs();
    if abs - EPS10 > 1. {
        return Err(Error::Domain("cea: northing beyond the poles"));
    }
    if abs >= 1. {
        return Ok(FRAC_PI_2.copysign(t));
    }
    Ok(t.asin())
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 7] = [
    OpParameter::Flag { key: "inv" },
    OpParameter::Text { key: "ellps",  default: Some("GRS80") },

    OpParameter::Real { key: "lon_0",  default: Some(0_f64) },
    OpParameter::Real { key: "lat_ts", default: Some(f64::NAN) },

    OpParameter::Real { key: "k_0",    default: Some(1_f64) },
    OpParameter::Real { key: "x_0",    default: Some(0_f64) },
    OpParameter::Real { key: "y_0",    default: Some(0_f64) },
];

pub fn new(parameters: &RawParameters, _ctx: &dyn Context) -> Result<Op, Error> {
    let params = ParsedParameters::new(parameters, &GAMUT)?;
    let mut globals = GlobalParameters::new(&params);

    // A standard parallel, if given, overrides the scale factor
    let lat_ts = params.angle("lat_ts")?;
    let given = !lat_ts.is_nan();
    if given {
        globals.k0 = lat_ts.cos();
        if globals.k0 < 0. {
            return Err(Error::InvalidGeometry(
                "cea: lat_ts must be within [-90, 90]".to_string(),
            ));
        }
    }
    if globals.k0.abs() < EPS10 {
        return Err(Error::InvalidGeometry(
            "cea: k_0, or cos(lat_ts), must be non-zero".to_string(),
        ));
    }

    if !globals.is_ellipsoidal() {
        return Op::plain(parameters, params, globals, Box::new(CeaSpheroid));
    }

    if given {
        let sinphi = lat_ts.sin();
        globals.k0 /= (1. - globals.es * sinphi * sinphi).sqrt();
    }
    let Some(apa) = AuthalicCoefficients::new(globals.es) else {
        return Err(Error::InvalidGeometry(
            "cea: cannot derive the authalic latitude series for ellps".to_string(),
        ));
    };
    let qp = qs(1., globals.e);
    Op::plain(parameters, params, globals, Box::new(CeaEllipsoid { apa, qp }))
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn spheroid() -> Result<(), Error> {
        let ctx = Minimal::default();
        let op = Op::new("cea ellps=unitsphere", &ctx)?;
        assert_eq!(op.descriptor.variant, "cea_spheroid");
        assert_eq!(op.fwd(0., 0.)?, (0., 0.));

        let (x, y) = op.fwd(1., FRAC_PI_2 / 3.)?;
        assert_float_eq!(x, 1., abs <= 1e-15);
        assert_float_eq!(y, 0.5, abs <= 1e-15);

        // The poles map to the lines y = ±1/k0
        let (_, lat) = op.inv(0.3, -1.)?;
        assert_eq!(lat, -FRAC_PI_2);

        // ...and there is nothing beyond them
        let op = Op::new("cea ellps=unitsphere k_0=2", &ctx)?;
        assert!(matches!(op.inv(0., 2.), Err(Error::Domain(_))));
        Ok(())
    }

    #[test]
    fn ellipsoid() -> Result<(), Error> {
        let ctx = Minimal::default();

        // Equal area: The strip between the equator and the pole covers a quarter
        // of the surface area of the ellipsoid, 2πa²·qp/4 per 2π of longitude
        let op = Op::new("cea", &ctx)?;
        assert_eq!(op.descriptor.variant, "cea_ellipsoid");
        let (_, y) = op.fwd(0., FRAC_PI_2)?;
        let g = op.globals;
        assert_float_eq!(y, g.a * qs(1., g.e) / 2., abs <= 1e-6);

        // The standard parallel is true to scale
        let op = Op::new("cea lat_ts=30", &ctx)?;
        let phi = 30_f64.to_radians();
        let (x, _) = op.fwd(0.01, phi)?;
        let parallel_radius = g.a * msfn(phi.sin_cos(), g.es);
        assert_float_eq!(x, 0.01 * parallel_radius, abs <= 1e-6);
        Ok(())
    }

    #[test]
    fn proj_validation() -> Result<(), Error> {
        // Cf. the PROJ test suite (gie/builtins.gie)
        let ctx = Minimal::default();
        let op = Op::new("cea ellps=GRS80", &ctx)?;
        let (x, y) = op.fwd(2_f64.to_radians(), 1_f64.to_radians())?;
        assert_float_eq!(x, 222_638.981_586_547, abs <= 1e-6);
        assert_float_eq!(y, 110_568.812_396_267, abs <= 1e-6);

        let op = Op::new("cea ellps=6400000,0", &ctx)?;
        let (x, y) = op.fwd(2_f64.to_radians(), 1_f64.to_radians())?;
        assert_float_eq!(x, 223_402.144_255_274, abs <= 1e-6);
        assert_float_eq!(y, 111_695.401_198_614, abs <= 1e-6);
        Ok(())
    }

    #[test]
    fn bad_parameters() {
        let ctx = Minimal::default();
        assert!(matches!(
            Op::new("cea lat_ts=120", &ctx),
            Err(Error::InvalidGeometry(_))
        ));
        assert!(matches!(
            Op::new("cea lat_ts=90", &ctx),
            Err(Error::InvalidGeometry(_))
        ));
        assert!(matches!(
            Op::new("cea lat_ts=foo", &ctx),
            Err(Error::BadParam(..))
        ));
    }
}
