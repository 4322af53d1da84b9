//! Stereographic, in polar, oblique and equatorial aspects, and its
//! Universal Polar Stereographic special case. Snyder (1987), pp. 154-163,
//! see [Sny87](crate::Bibliography::Sny87)
use super::*;
use std::f64::consts::FRAC_PI_2;
use std::f64::consts::FRAC_PI_4;

const EPS10: f64 = 1e-10;
const TOL: f64 = 1e-8;
const NITER: usize = 8;
const CONV: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    SouthPole,
    NorthPole,
    Oblique,
    Equatorial,
}

#[derive(Debug)]
struct Stereographic {
    mode: Mode,
    ellipsoidal: bool,
    akm1: f64,
    // Trigs of the (conformal, for the ellipsoid) latitude of the centre
    sin_x1: f64,
    cos_x1: f64,
}

impl Stereographic {
    // +1 for the north polar aspect, -1 for the south polar
    fn hemisphere(&self) -> f64 {
        if self.mode == Mode::SouthPole {
            -1.
        } else {
            1.
        }
    }

    fn is_polar(&self) -> bool {
        matches!(self.mode, Mode::NorthPole | Mode::SouthPole)
    }
}

impl Projection for Stereographic {
    fn name(&self) -> &'static str {
        if self.ellipsoidal {
            "stere_ellipsoid"
        } else {
            "stere_spheroid"
        }
    }

    // ----- F O R W A R D -------------------------------------------------------------

    fn fwd(&self, g: &GlobalParameters, lam: f64, phi: f64) -> Result<(f64, f64), Error> {
        let (sinlam, coslam) = lam.sin_cos();
        let (sinphi, cosphi) = phi.sin_cos();

        // The polar aspects share their formula between ellipsoid and sphere,
        // since ts(𝜙) reduces to tan(π/4 - 𝜙/2) for e = 0
        if self.is_polar() {
            let s = self.hemisphere();
            if s * phi + FRAC_PI_2 < TOL {
                return Err(Error::Domain("stere: the pole opposite the centre"));
            }
            let r = self.akm1 * ts((s * sinphi, cosphi), g.e);
            return Ok((r * sinlam, -s * r * coslam));
        }

        // The sphere
        if !self.ellipsoidal {
            let d = if self.mode == Mode::Equatorial {
                1. + cosphi * coslam
            } else {
                1. + self.sin_x1 * sinphi + self.cos_x1 * cosphi * coslam
            };
            if d <= EPS10 {
                return Err(Error::Domain("stere: the antipode of the centre"));
            }
            let a = self.akm1 / d;
            let y = if self.mode == Mode::Equatorial {
                a * sinphi
            } else {
                a * (self.cos_x1 * sinphi - self.sin_x1 * cosphi * coslam)
            };
            return Ok((a * cosphi * sinlam, y));
        }

        // The ellipsoid: Work on the conformal sphere
        let chi = 2. * ssfn(phi, sinphi, g.e).atan() - FRAC_PI_2;
        let (sinx, cosx) = chi.sin_cos();
        let (a, y) = if self.mode == Mode::Oblique {
            let d = 1. + self.sin_x1 * sinx + self.cos_x1 * cosx * coslam;
            if d <= EPS10 {
                return Err(Error::Domain("stere: the antipode of the centre"));
            }
            let a = self.akm1 / (self.cos_x1 * d);
            (a, a * (self.cos_x1 * sinx - self.sin_x1 * cosx * coslam))
        } else {
            let d = 1. + cosx * coslam;
            if d <= EPS10 {
                return Err(Error::Domain("stere: the antipode of the centre"));
            }
            let a = self.akm1 / d;
            (a, a * sinx)
        };
        Ok((a * cosx * sinlam, y))
    }

    // ----- I N V E R S E -------------------------------------------------------------

    fn inv(&self, g: &GlobalParameters, x: f64, y: f64) -> Result<(f64, f64), Error> {
        if self.ellipsoidal {
            self.inv_ellipsoid(g, x, y)
        } else {
            self.inv_spheroid(g, x, y)
        }
    }
}

impl Stereographic {
    fn inv_ellipsoid(&self, g: &GlobalParameters, x: f64, y: f64) -> Result<(f64, f64), Error> {
        let rho = x.hypot(y);
        let (mut x, mut y) = (x, y);

        // Initial values of the latitude, the iteration constants, and
        // the (scaled) planar coordinates determining the longitude
        let (tp, mut phi_l, halfpi, halfe) = if self.is_polar() {
            y *= -self.hemisphere();
            let tp = -rho / self.akm1;
            (tp, FRAC_PI_2 - 2. * tp.atan(), -FRAC_PI_2, -0.5 * g.e)
        } else {
            let t = 2. * (rho * self.cos_x1).atan2(self.akm1);
            let (sint, cost) = t.sin_cos();
            let phi_l = if rho == 0. {
                (cost * self.sin_x1).asin()
            } else {
                (cost * self.sin_x1 + y * sint * self.cos_x1 / rho).asin()
            };
            x *= sint;
            y = rho * self.cos_x1 * cost - y * self.sin_x1 * sint;
            let tp = (0.5 * (FRAC_PI_2 + phi_l)).tan();
            (tp, phi_l, FRAC_PI_2, 0.5 * g.e)
        };

        for _ in 0..NITER {
            let esinphi = g.e * phi_l.sin();
            let phi = 2. * (tp * ((1. + esinphi) / (1. - esinphi)).powf(halfe)).atan() - halfpi;
            if (phi_l - phi).abs() < CONV {
                let phi = if self.mode == Mode::SouthPole { -phi } else { phi };
                let lam = if x == 0. && y == 0. { 0. } else { x.atan2(y) };
                return Ok((lam, phi));
            }
            phi_l = phi;
        }
        Err(Error::Convergence("stere: inverse latitude"))
    }

    fn inv_spheroid(&self, g: &GlobalParameters, x: f64, y: f64) -> Result<(f64, f64), Error> {
        let rh = x.hypot(y);
        let c = 2. * (rh / self.akm1).atan();
        let (sinc, cosc) = c.sin_cos();

        match self.mode {
            Mode::Equatorial => {
                let phi = if rh <= EPS10 { 0. } else { (y * sinc / rh).asin() };
                let lam = if cosc != 0. || x != 0. {
                    (x * sinc).atan2(cosc * rh)
                } else {
                    0.
                };
                Ok((lam, phi))
            }
            Mode::Oblique => {
                let phi = if rh <= EPS10 {
                    g.phi0
                } else {
                    (cosc * self.sin_x1 + y * sinc * self.cos_x1 / rh).asin()
                };
                let c = cosc - self.sin_x1 * phi.sin();
                let lam = if c != 0. || x != 0. {
                    (x * sinc * self.cos_x1).atan2(c * rh)
                } else {
                    0.
                };
                Ok((lam, phi))
            }
            Mode::NorthPole | Mode::SouthPole => {
                let s = self.hemisphere();
                let y = -s * y;
                let phi = if rh <= EPS10 { g.phi0 } else { (s * cosc).asin() };
                let lam = if x == 0. && y == 0. { 0. } else { x.atan2(y) };
                Ok((lam, phi))
            }
        }
    }
}

// ----- S E T U P ---------------------------------------------------------------------

fn setup(g: &GlobalParameters, phits: f64) -> Stereographic {
    let t = g.phi0.abs();
    let mode = if (t - FRAC_PI_2).abs() < EPS10 {
        if g.phi0 < 0. {
            Mode::SouthPole
        } else {
            Mode::NorthPole
        }
    } else if t > EPS10 {
        Mode::Oblique
    } else {
        Mode::Equatorial
    };

    let phits = phits.abs();
    let true_scale_at_pole = (phits - FRAC_PI_2).abs() < EPS10;
    let mut stere = Stereographic {
        mode,
        ellipsoidal: g.is_ellipsoidal(),
        akm1: 2. * g.k0,
        sin_x1: 0.,
        cos_x1: 1.,
    };

    match (mode, stere.ellipsoidal) {
        (Mode::NorthPole | Mode::SouthPole, true) => {
            if true_scale_at_pole {
                let e = g.e;
                stere.akm1 = 2. * g.k0 / ((1. + e).powf(1. + e) * (1. - e).powf(1. - e)).sqrt();
            } else {
                let sc = phits.sin_cos();
                let esinphi = g.e * sc.0;
                stere.akm1 = sc.1 / ts(sc, g.e) / (1. - esinphi * esinphi).sqrt();
            }
        }
        (Mode::Oblique | Mode::Equatorial, true) => {
            let sinphi = g.phi0.sin();
            let chi = 2. * ssfn(g.phi0, sinphi, g.e).atan() - FRAC_PI_2;
            let esinphi = g.e * sinphi;
            stere.akm1 = 2. * g.k0 * g.phi0.cos() / (1. - esinphi * esinphi).sqrt();
            (stere.sin_x1, stere.cos_x1) = chi.sin_cos();
        }
        (Mode::NorthPole | Mode::SouthPole, false) => {
            if !true_scale_at_pole {
                stere.akm1 = phits.cos() / (FRAC_PI_4 - 0.5 * phits).tan();
            }
        }
        (Mode::Oblique, false) => {
            (stere.sin_x1, stere.cos_x1) = g.phi0.sin_cos();
        }
        (Mode::Equatorial, false) => (),
    }
    stere
}

// ----- C O N S T R U C T O R S -------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 8] = [
    OpParameter::Flag { key: "inv" },
    OpParameter::Text { key: "ellps",  default: Some("GRS80") },

    OpParameter::Real { key: "lat_0",  default: Some(0_f64) },
    OpParameter::Real { key: "lon_0",  default: Some(0_f64) },
    OpParameter::Real { key: "lat_ts", default: Some(90_f64) },

    OpParameter::Real { key: "k_0",    default: Some(1_f64) },
    OpParameter::Real { key: "x_0",    default: Some(0_f64) },
    OpParameter::Real { key: "y_0",    default: Some(0_f64) },
];

pub fn new(parameters: &RawParameters, _ctx: &dyn Context) -> Result<Op, Error> {
    let params = ParsedParameters::new(parameters, &GAMUT)?;
    let globals = GlobalParameters::new(&params);
    let stere = setup(&globals, params.angle("lat_ts")?);
    Op::plain(parameters, params, globals, Box::new(stere))
}

#[rustfmt::skip]
pub const UPS_GAMUT: [OpParameter; 3] = [
    OpParameter::Flag { key: "inv" },
    OpParameter::Flag { key: "south" },
    OpParameter::Text { key: "ellps", default: Some("GRS80") },
];

/// Universal Polar Stereographic: The polar stereographic with the
/// scale, false origin and central meridian of the UPS grid system
pub fn ups(parameters: &RawParameters, _ctx: &dyn Context) -> Result<Op, Error> {
    let params = ParsedParameters::new(parameters, &UPS_GAMUT)?;
    let mut globals = GlobalParameters::new(&params);
    if !globals.is_ellipsoidal() {
        return Err(Error::InvalidGeometry(
            "ups: ellps must be an ellipsoid, not a sphere".to_string(),
        ));
    }

    globals.phi0 = if params.boolean("south") {
        -FRAC_PI_2
    } else {
        FRAC_PI_2
    };
    globals.k0 = 0.994;
    globals.x0 = 2_000_000.;
    globals.y0 = 2_000_000.;
    globals.lam0 = 0.;

    let stere = setup(&globals, FRAC_PI_2);
    Op::plain(parameters, params, globals, Box::new(stere))
}

// ----- T E S T S ---------------------------------------------------------------------
