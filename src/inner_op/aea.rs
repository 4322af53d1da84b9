//! Albers Equal Area Conic, and its single standard parallel special case,
//! Lambert Equal Area Conic
use super::*;
use std::f64::consts::FRAC_PI_2;

const EPS10: f64 = 1e-10;
const TOL7: f64 = 1e-7;

/// The projection constants, cf. [Sny87](crate::Bibliography::Sny87) eqs. (14-3) to (14-6)
#[derive(Debug, Default)]
struct Albers {
    variant: &'static str,
    ellipsoidal: bool,
    n: f64,
    n2: f64,
    c: f64,
    dd: f64,
    rho0: f64,
    ec: f64,
}

impl Projection for Albers {
    fn name(&self) -> &'static str {
        self.variant
    }

    // ----- F O R W A R D -------------------------------------------------------------

    fn fwd(&self, g: &GlobalParameters, lam: f64, phi: f64) -> Result<(f64, f64), Error> {
        let rho = if self.ellipsoidal {
            self.c - self.n * qs(phi.sin(), g.e)
        } else {
            self.c - self.n2 * phi.sin()
        };
        if rho < 0. {
            return Err(Error::Domain("aea: point outside of the cone"));
        }
        let rho = self.dd * rho.sqrt();
        let (s, c) = (lam * self.n).sin_cos();
        Ok((rho * s, self.rho0 - rho * c))
    }

    // ----- I N V E R S E -------------------------------------------------------------

    fn inv(&self, g: &GlobalParameters, x: f64, y: f64) -> Result<(f64, f64), Error> {
        let mut x = x;
        let mut y = self.rho0 - y;
        let mut rho = x.hypot(y);

        // The apex of the cone
        if rho == 0. {
            return Ok((0., FRAC_PI_2.copysign(self.n)));
        }

        // Cone opening towards the north?
        if self.n < 0. {
            rho = -rho;
            x = -x;
            y = -y;
        }

        let r = rho / self.dd;
        let phi = if self.ellipsoidal {
            let q = (self.c - r * r) / self.n;
            if (self.ec - q.abs()).abs() > TOL7 {
                phi1(q, g.e, g.one_es)?
            } else {
                FRAC_PI_2.copysign(q)
            }
        } else {
            let s = (self.c - r * r) / self.n2;
            if s.abs() <= 1. {
                s.asin()
            } else {
                FRAC_PI_2.copysign(s)
            }
        };
        Ok((x.atan2(y) / self.n, phi))
    }
}

// ----- S E T U P ---------------------------------------------------------------------

fn setup(g: &GlobalParameters, phi1: f64, phi2: f64) -> Result<Albers, Error> {
    if (phi1 + phi2).abs() < EPS10 {
        return Err(Error::InvalidGeometry(
            "aea: lat_1 = -lat_2 gives a cylinder, not a cone".to_string(),
        ));
    }

    let (sinphi, cosphi) = phi1.sin_cos();
    let secant = (phi1 - phi2).abs() >= EPS10;
    let mut albers = Albers {
        n: sinphi,
        ellipsoidal: g.is_ellipsoidal(),
        ..Default::default()
    };

    if albers.ellipsoidal {
        let m1 = msfn((sinphi, cosphi), g.es);
        let ml1 = qs(sinphi, g.e);
        if secant {
            let sc = phi2.sin_cos();
            let m2 = msfn(sc, g.es);
            let ml2 = qs(sc.0, g.e);
            if ml2 == ml1 {
                return Err(Error::InvalidGeometry(
                    "aea: lat_1 and lat_2 have identical authalic values".to_string(),
                ));
            }
            albers.n = (m1 * m1 - m2 * m2) / (ml2 - ml1);
        }
        albers.variant = "aea_ellipsoid";
        albers.ec = 1. - 0.5 * g.one_es * ((1. - g.e) / (1. + g.e)).ln() / g.e;
        albers.c = m1 * m1 + albers.n * ml1;
        albers.dd = 1. / albers.n;
        albers.rho0 = albers.radius(albers.c - albers.n * qs(g.phi0.sin(), g.e))?;
    } else {
        if secant {
            albers.n = 0.5 * (albers.n + phi2.sin());
        }
        albers.variant = "aea_spheroid";
        albers.n2 = albers.n + albers.n;
        albers.c = cosphi * cosphi + albers.n2 * sinphi;
        albers.dd = 1. / albers.n;
        albers.rho0 = albers.radius(albers.c - albers.n2 * g.phi0.sin())?;
    }
    Ok(albers)
}

impl Albers {
    // The radius of the parallel through the projection centre. A slightly
    // negative radicand is rounding noise from a centre at the apex
    fn radius(&self, radicand: f64) -> Result<f64, Error> {
        if radicand < -EPS10 {
            return Err(Error::InvalidGeometry(
                "aea: lat_0 is outside of the cone".to_string(),
            ));
        }
        Ok(self.dd * radicand.max(0.).sqrt())
    }
}

// ----- C O N S T R U C T O R S -------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 8] = [
    OpParameter::Flag { key: "inv" },
    OpParameter::Text { key: "ellps", default: Some("GRS80") },

    OpParameter::Real { key: "lat_0", default: Some(0_f64) },
    OpParameter::Real { key: "lon_0", default: Some(0_f64) },
    OpParameter::Real { key: "lat_1", default: Some(0_f64) },
    OpParameter::Real { key: "lat_2", default: Some(0_f64) },

    OpParameter::Real { key: "x_0",   default: Some(0_f64) },
    OpParameter::Real { key: "y_0",   default: Some(0_f64) },
];

pub fn new(parameters: &RawParameters, _ctx: &dyn Context) -> Result<Op, Error> {
    let params = ParsedParameters::new(parameters, &GAMUT)?;
    let globals = GlobalParameters::new(&params);
    let albers = setup(&globals, params.lat(1), params.lat(2))?;
    Op::plain(parameters, params, globals, Box::new(albers))
}

#[rustfmt::skip]
pub const LEAC_GAMUT: [OpParameter; 8] = [
    OpParameter::Flag { key: "inv" },
    OpParameter::Flag { key: "south" },
    OpParameter::Text { key: "ellps", default: Some("GRS80") },

    OpParameter::Real { key: "lat_0", default: Some(0_f64) },
    OpParameter::Real { key: "lon_0", default: Some(0_f64) },
    OpParameter::Real { key: "lat_1", default: Some(0_f64) },

    OpParameter::Real { key: "x_0",   default: Some(0_f64) },
    OpParameter::Real { key: "y_0",   default: Some(0_f64) },
];

/// Lambert Equal Area Conic: Albers with one of the standard parallels at a pole
pub fn leac(parameters: &RawParameters, _ctx: &dyn Context) -> Result<Op, Error> {
    let params = ParsedParameters::new(parameters, &LEAC_GAMUT)?;
    let globals = GlobalParameters::new(&params);
    let phi1 = if params.boolean("south") {
        -FRAC_PI_2
    } else {
        FRAC_PI_2
    };
    let albers = setup(&globals, phi1, params.lat(1))?;
    Op::plain(parameters, params, globals, Box::new(albers))
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snyder_example() -> Result<(), Error> {
        let mut ctx = Minimal::default();
        let op = ctx.op("aea lat_1=29.5 lat_2=45.5 lat_0=23 lon_0=-96 ellps=clrk66")?;

        // Validation value from Snyder (1987), p. 292
        let geo = [Coor2D::geo(35., -75.)];
        let projected = [Coor2D::raw(1_885_472.7, 1_535_925.0)];

        let mut operands = geo;
        assert_eq!(ctx.apply(op, Fwd, &mut operands)?, 1);
        assert!(operands[0].hypot2(&projected[0]) < 0.1);

        ctx.apply(op, Inv, &mut operands)?;
        assert!(operands[0].hypot2(&geo[0]) < 1e-11);
        Ok(())
    }

    #[test]
    fn degenerate_cones() {
        let ctx = Minimal::default();
        assert!(matches!(
            Op::new("aea lat_1=30 lat_2=-30", &ctx),
            Err(Error::InvalidGeometry(_))
        ));
        assert!(matches!(
            Op::new("aea lat_1=30 lat_2=-30 ellps=sphere", &ctx),
            Err(Error::InvalidGeometry(_))
        ));
        // Both standard parallels default to the equator
        assert!(matches!(Op::new("aea", &ctx), Err(Error::InvalidGeometry(_))));
        assert!(matches!(
            Op::new("leac south lat_1=90", &ctx),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test]
    fn tangent_cone() -> Result<(), Error> {
        // With identical standard parallels, the cone touches the parallel,
        // which is then true to scale
        let ctx = Minimal::default();
        let op = Op::new("aea lat_1=45 lat_2=45 ellps=unitsphere", &ctx)?;
        let (x1, _) = op.fwd(0.0, FRAC_PI_2 / 2.)?;
        let (x2, _) = op.fwd(0.001, FRAC_PI_2 / 2.)?;
        assert!(((x2 - x1) / 0.001 - (FRAC_PI_2 / 2.).cos()).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn poles() -> Result<(), Error> {
        let ctx = Minimal::default();

        // In general, the pole maps to a circular arc...
        let op = Op::new("aea lat_1=50 lat_2=70", &ctx)?;
        let (x, y) = op.fwd(1., FRAC_PI_2)?;
        let (lon, lat) = op.inv(x, y)?;
        assert!((lat - FRAC_PI_2).abs() < 1e-7);
        assert!((lon - 1.).abs() < 1e-9);

        let op = Op::new("aea lat_1=-50 lat_2=-70 ellps=sphere", &ctx)?;
        let (x, y) = op.fwd(0., -FRAC_PI_2)?;
        let (_, lat) = op.inv(x, y)?;
        assert!((lat + FRAC_PI_2).abs() < 1e-7);

        // ...but with a standard parallel at the pole, it maps to the apex of the cone
        let op = Op::new("leac lat_1=40 ellps=unitsphere", &ctx)?;
        let (x, y) = op.fwd(0.3, FRAC_PI_2)?;
        assert_eq!(x, 0.);
        assert_eq!(op.inv(x, y)?, (0., FRAC_PI_2));
        Ok(())
    }

    #[test]
    fn leac() -> Result<(), Error> {
        let ctx = Minimal::default();

        // leac is aea with one standard parallel at the pole...
        let leac = Op::new("leac lat_1=40 lon_0=10", &ctx)?;
        let aea = Op::new("aea lat_1=90 lat_2=40 lon_0=10", &ctx)?;
        let (x1, y1) = leac.fwd(0.5, 0.6)?;
        let (x2, y2) = aea.fwd(0.5, 0.6)?;
        assert!((x1 - x2).abs() < 1e-6 && (y1 - y2).abs() < 1e-6);

        // ...south pole, if so requested
        let leac = Op::new("leac south lat_1=-40 ellps=sphere", &ctx)?;
        let aea = Op::new("aea lat_1=-90 lat_2=-40 ellps=sphere", &ctx)?;
        let (x1, y1) = leac.fwd(0.5, -0.6)?;
        let (x2, y2) = aea.fwd(0.5, -0.6)?;
        assert!((x1 - x2).abs() < 1e-6 && (y1 - y2).abs() < 1e-6);
        Ok(())
    }
}
