//! Oblique Cylindrical Equal Area, cf. Snyder (1987) pp. 80 ff.
//! Spherical form only.
//!
//! The central line is the great circle either through the two points
//! (`lon_1`, `lat_1`) and (`lon_2`, `lat_2`), or through the point
//! (`lonc`, 0) on the equator, with azimuth `alpha`.
use super::*;
use std::f64::consts::FRAC_PI_2;
use std::f64::consts::PI;

const EPS10: f64 = 1e-10;

#[derive(Debug, Default)]
struct Ocea {
    // Reciprocal and plain scale factor along the central line
    rok: f64,
    rtk: f64,
    // ...and the latitude of the pole of the oblique cylinder
    sinphi: f64,
    cosphi: f64,
}

impl Projection for Ocea {
    fn name(&self) -> &'static str {
        "ocea_spheroid"
    }

    fn fwd(&self, _g: &GlobalParameters, lam: f64, phi: f64) -> Result<(f64, f64), Error> {
        let (sinlam, coslam) = lam.sin_cos();
        if coslam.abs() < EPS10 {
            return Err(Error::Domain("ocea: point on the pole of the oblique cylinder"));
        }
        let mut x = ((phi.tan() * self.cosphi + self.sinphi * sinlam) / coslam).atan();
        if coslam < 0. {
            x += PI;
        }
        let (sinp, cosp) = phi.sin_cos();
        let y = self.rok * (self.sinphi * sinp - self.cosphi * cosp * sinlam);
        Ok((x * self.rtk, y))
    }

    fn inv(&self, _g: &GlobalParameters, x: f64, y: f64) -> Result<(f64, f64), Error> {
        let y = y / self.rok;
        let x = x / self.rtk;
        if y.abs() > 1. + EPS10 {
            return Err(Error::Domain("ocea: northing beyond the oblique poles"));
        }
        let t = (1. - y * y).max(0.).sqrt();
        let (s, c) = x.sin_cos();
        let phi = (y * self.sinphi + t * self.cosphi * s).asin();
        let lam = (t * self.sinphi * s - y * self.cosphi).atan2(t * c);
        Ok((lam, phi))
    }
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 11] = [
    OpParameter::Flag { key: "inv" },
    OpParameter::Text { key: "ellps", default: Some("GRS80") },

    // One point and an azimuth...
    OpParameter::Real { key: "alpha", default: Some(f64::NAN) },
    OpParameter::Real { key: "lonc",  default: Some(0_f64) },

    // ...or two points
    OpParameter::Real { key: "lat_1", default: Some(0_f64) },
    OpParameter::Real { key: "lat_2", default: Some(0_f64) },
    OpParameter::Real { key: "lon_1", default: Some(0_f64) },
    OpParameter::Real { key: "lon_2", default: Some(0_f64) },

    OpParameter::Real { key: "k_0",   default: Some(1_f64) },
    OpParameter::Real { key: "x_0",   default: Some(0_f64) },
    OpParameter::Real { key: "y_0",   default: Some(0_f64) },
];

pub fn new(parameters: &RawParameters, _ctx: &dyn Context) -> Result<Op, Error> {
    let params = ParsedParameters::new(parameters, &GAMUT)?;
    let mut globals = GlobalParameters::new(&params).spherical();
    if globals.k0.abs() < EPS10 {
        return Err(Error::InvalidGeometry("ocea: k_0 must be non-zero".to_string()));
    }

    // Find the azimuth, gamma, and latitude, phip, of the pole of the oblique
    // transformation. Snyder (1987) eqs. (9-1), (9-2), (9-7) and (9-8)
    let alpha = params.angle("alpha")?;
    let (gamma, phip) = if alpha.is_nan() {
        let (phi1, phi2) = (params.lat(1), params.lat(2));
        let (lam1, lam2) = (params.lon(1), params.lon(2));
        let (sinphi1, cosphi1) = phi1.sin_cos();
        let (sinphi2, cosphi2) = phi2.sin_cos();
        let mut gamma = (cosphi1 * sinphi2 * lam1.cos() - sinphi1 * cosphi2 * lam2.cos())
            .atan2(sinphi1 * cosphi2 * lam2.sin() - cosphi1 * sinphi2 * lam1.sin());

        // Take care of the wrap-around of lam0 when lon_1 = -90
        if (lam1 + FRAC_PI_2).abs() < EPS10 {
            gamma = -gamma;
        }
        (gamma, (-(gamma - lam1).cos() / phi1.tan()).atan())
    } else {
        // The point defining the central line is on the equator
        let phi0 = 0_f64;
        let lonc = params.angle("lonc")?;
        let (sinalpha, cosalpha) = alpha.sin_cos();
        let gamma = (-cosalpha / (-phi0.sin() * sinalpha)).atan() + lonc;
        (gamma, (phi0.cos() * sinalpha).asin())
    };
    if !gamma.is_finite() || !phip.is_finite() {
        return Err(Error::InvalidGeometry(
            "ocea: cannot determine the central line".to_string(),
        ));
    }

    globals.lam0 = angular::adjlon(gamma + FRAC_PI_2);
    let (sinphi, cosphi) = phip.sin_cos();
    let ocea = Ocea {
        rok: 1. / globals.k0,
        rtk: globals.k0,
        sinphi,
        cosphi,
    };
    Op::plain(parameters, params, globals, Box::new(ocea))
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn central_line() -> Result<(), Error> {
        let ctx = Minimal::default();

        // Both defining points are on the central line, i.e. at y = 0
        let op = Op::new("ocea lat_1=45 lat_2=55 lon_1=-10 lon_2=20 ellps=unitsphere", &ctx)?;
        assert_eq!(op.descriptor.variant, "ocea_spheroid");
        let (_, y) = op.fwd((-10_f64).to_radians(), 45_f64.to_radians())?;
        assert_float_eq!(y, 0., abs <= 1e-12);
        let (_, y) = op.fwd(20_f64.to_radians(), 55_f64.to_radians())?;
        assert_float_eq!(y, 0., abs <= 1e-12);

        // ...and so is the defining point of the azimuthal form
        let op = Op::new("ocea alpha=35 lonc=20 ellps=unitsphere", &ctx)?;
        let (_, y) = op.fwd(20_f64.to_radians(), 0.)?;
        assert_float_eq!(y, 0., abs <= 1e-12);
        Ok(())
    }

    #[test]
    fn equal_area() -> Result<(), Error> {
        let ctx = Minimal::default();
        let op = Op::new("ocea lat_1=45 lat_2=55 lon_1=-10 lon_2=20 ellps=unitsphere", &ctx)?;

        // The Jacobian determinant, by central differences, equals the
        // area element of the sphere, cos(φ)
        let h = 1e-5;
        for (lam, phi) in [(0.1, 0.3), (-0.5, 1.0), (0.7, -0.4)] {
            let (x1, y1) = op.fwd(lam + h, phi)?;
            let (x2, y2) = op.fwd(lam - h, phi)?;
            let (x3, y3) = op.fwd(lam, phi + h)?;
            let (x4, y4) = op.fwd(lam, phi - h)?;
            let det = ((x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4)) / (4. * h * h);
            assert_float_eq!(det.abs() / phi.cos(), 1., abs <= 1e-6);
        }
        Ok(())
    }

    #[test]
    fn spherical_only() -> Result<(), Error> {
        let ctx = Minimal::default();
        let op = Op::new("ocea alpha=35 lonc=20 ellps=intl", &ctx)?;
        assert!(!op.globals.is_ellipsoidal());
        assert_float_eq!(op.globals.lam0, (-160_f64).to_radians(), abs <= 1e-12);

        // The azimuthal form is centered on the equator: lat_0 is ignored
        let with_lat_0 = Op::new("ocea alpha=35 lonc=20 lat_0=30 ellps=intl", &ctx)?;
        assert_eq!(with_lat_0.params.ignored(), ["lat_0"]);
        assert_eq!(with_lat_0.globals.lam0, op.globals.lam0);
        assert_eq!(with_lat_0.fwd(0.3, 0.4)?, op.fwd(0.3, 0.4)?);

        assert!(matches!(
            Op::new("ocea alpha=35 k_0=0", &ctx),
            Err(Error::InvalidGeometry(_))
        ));
        Ok(())
    }
}
