use super::*;

/// The parameters shared by all projections: the ellipsoid, the projection
/// centre, the scale factor, and the false origin. Angles in radians,
/// linear quantities in the units of the semimajor axis.
///
/// A projection's setup may hand back an adjusted copy, e.g. with `es = 0`
/// for the projections defined for the sphere only, or with a central
/// meridian derived from its other parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobalParameters {
    pub a: f64,
    pub k0: f64,
    pub phi0: f64,
    pub lam0: f64,
    pub x0: f64,
    pub y0: f64,
    pub es: f64,
    pub e: f64,
    pub one_es: f64,
}

impl Default for GlobalParameters {
    fn default() -> Self {
        GlobalParameters::from_ellipsoid(&Ellipsoid::default())
    }
}

impl GlobalParameters {
    /// The ellipsoid, with the projection centre at (0, 0), unit scale,
    /// and no false origin
    pub fn from_ellipsoid(ellps: &Ellipsoid) -> Self {
        let es = ellps.eccentricity_squared();
        GlobalParameters {
            a: ellps.semimajor_axis(),
            k0: 1.,
            phi0: 0.,
            lam0: 0.,
            x0: 0.,
            y0: 0.,
            es,
            e: es.sqrt(),
            one_es: 1. - es,
        }
    }

    /// Read the common parameters (`ellps`, `lat_0`, `lon_0`, `k_0`, `x_0`, `y_0`),
    /// falling back to the defaults for those outside of the gamut of the projection
    pub fn new(params: &ParsedParameters) -> Self {
        GlobalParameters {
            phi0: params.lat(0),
            lam0: params.lon(0),
            k0: params.real("k_0").unwrap_or(1.),
            x0: params.real("x_0").unwrap_or(0.),
            y0: params.real("y_0").unwrap_or(0.),
            ..GlobalParameters::from_ellipsoid(&params.ellps)
        }
    }

    /// The same parameters, but for the sphere of radius `a`
    #[must_use]
    pub fn spherical(self) -> Self {
        GlobalParameters {
            es: 0.,
            e: 0.,
            one_es: 1.,
            ..self
        }
    }

    pub fn is_ellipsoidal(&self) -> bool {
        self.es > 0.
    }
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn globals() -> Result<(), Error> {
        #[rustfmt::skip]
        let gamut = [
            OpParameter::Text { key: "ellps", default: Some("GRS80") },
            OpParameter::Real { key: "lat_0", default: Some(0.) },
            OpParameter::Real { key: "lon_0", default: Some(0.) },
            OpParameter::Real { key: "x_0",   default: Some(0.) },
        ];
        let globals = BTreeMap::new();
        let raw = RawParameters::new("foo ellps=intl lat_0=55 lon_0=12 x_0=500000", &globals);
        let params = ParsedParameters::new(&raw, &gamut)?;
        let g = GlobalParameters::new(&params);

        assert_eq!(g.a, 6_378_388.);
        assert_eq!(g.phi0, 55_f64.to_radians());
        assert_eq!(g.lam0, 12_f64.to_radians());
        assert_eq!(g.x0, 500_000.);
        assert_eq!(g.y0, 0.);
        assert_eq!(g.k0, 1.);
        assert!(g.is_ellipsoidal());
        assert_eq!(g.one_es, 1. - g.es);

        let s = g.spherical();
        assert!(!s.is_ellipsoidal());
        assert_eq!((s.e, s.one_es, s.a, s.phi0), (0., 1., g.a, g.phi0));
        Ok(())
    }
}
