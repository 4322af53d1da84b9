use crate::Error;

mod constants;

/// An ellipsoid of revolution, or, for zero flattening, a sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    f: f64,
}

/// GRS80 is the default ellipsoid.
impl Default for Ellipsoid {
    fn default() -> Ellipsoid {
        Ellipsoid::new(6_378_137.0, 1. / 298.257_222_100_882_7)
    }
}

/// Constructors for `Ellipsoid`
impl Ellipsoid {
    /// User defined ellipsoid
    #[must_use]
    pub fn new(semimajor_axis: f64, flattening: f64) -> Ellipsoid {
        Ellipsoid {
            a: semimajor_axis,
            f: flattening,
        }
    }

    /// Sphere of radius `radius`
    #[must_use]
    pub fn sphere(radius: f64) -> Ellipsoid {
        Ellipsoid::new(radius, 0.)
    }

    /// Predefined ellipsoid; built-in, or given as a string formatted
    /// (a, rf) tuple, e.g. "6378137, 298.25". Following the EPSG convention,
    /// a reciprocal flattening of 0 indicates a sphere
    pub fn named(name: &str) -> Result<Ellipsoid, Error> {
        if let Some(e) = constants::ELLIPSOID_LIST
            .iter()
            .find(|ellps| ellps.0 == name)
        {
            return Ok(Ellipsoid::from_a_and_rf(e.1, e.2));
        }

        // Remove optional parenthesis
        let trimmed = name
            .strip_prefix('(')
            .and_then(|n| n.strip_suffix(')'))
            .unwrap_or(name);

        // The "semimajor, reciprocal-flattening" form, e.g. "6378137, 298.3"
        if let Some((a, rf)) = trimmed.split_once(',') {
            if let (Ok(a), Ok(rf)) = (a.trim().parse::<f64>(), rf.trim().parse::<f64>()) {
                if a > 0. && rf >= 0. {
                    return Ok(Ellipsoid::from_a_and_rf(a, rf));
                }
            }
        }

        Err(Error::NotFound(
            String::from(name),
            String::from(": Ellipsoid::named()"),
        ))
    }

    fn from_a_and_rf(a: f64, rf: f64) -> Ellipsoid {
        let f = if rf != 0.0 { 1.0 / rf } else { rf };
        Ellipsoid::new(a, f)
    }

    /// The "a,rf" form understood by [Ellipsoid::named], with full precision
    #[must_use]
    pub fn definition(&self) -> String {
        let rf = if self.f == 0. { 0. } else { 1. / self.f };
        format!("{},{}", self.a, rf)
    }

    /// The names of the built-in ellipsoids, with their descriptions
    pub fn builtin_names() -> impl Iterator<Item = (&'static str, &'static str)> {
        constants::ELLIPSOID_LIST.iter().map(|e| (e.0, e.3))
    }

    // ----- Axes and flattening ---------------------------------------------------

    /// The semimajor axis, *a*
    #[must_use]
    pub fn semimajor_axis(&self) -> f64 {
        self.a
    }

    /// The semiminor axis, *b*
    #[must_use]
    pub fn semiminor_axis(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// The flattening, *f = (a - b)/a*
    #[must_use]
    pub fn flattening(&self) -> f64 {
        self.f
    }

    #[must_use]
    pub fn is_sphere(&self) -> bool {
        self.f == 0.
    }

    // ----- Eccentricities --------------------------------------------------------

    /// The squared eccentricity *e² = (a² - b²) / a²*.
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        self.f * (2_f64 - self.f)
    }

    /// The eccentricity *e*
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }
}

// ----- Tests ---------------------------------------------------------------------
