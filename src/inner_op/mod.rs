use crate::authoring::*;
use once_cell::sync::Lazy;

// ----- B U I L T I N   P R O J E C T I O N S -----------------------------------------

// Install new builtin projections by adding them in the `mod` and
// `BUILTIN_PROJECTIONS` blocks below

mod aea;
mod cea;
mod ocea;
mod stere;
mod tcea;
mod wink2;

#[rustfmt::skip]
static BUILTIN_PROJECTIONS: Lazy<BTreeMap<&'static str, OpConstructor>> = Lazy::new(|| {
    BTreeMap::from([
        ("aea",    OpConstructor(aea::new)),
        ("leac",   OpConstructor(aea::leac)),
        ("cea",    OpConstructor(cea::new)),
        ("tcea",   OpConstructor(tcea::new)),
        ("ocea",   OpConstructor(ocea::new)),
        ("stere",  OpConstructor(stere::new)),
        ("ups",    OpConstructor(stere::ups)),
        ("wink2",  OpConstructor(wink2::new)),
    ])
});

/// Handle instantiation of built-in projections, as defined in
/// `BUILTIN_PROJECTIONS` above. Identifiers are case insensitive.
pub(crate) fn builtin(name: &str) -> Result<OpConstructor, Error> {
    BUILTIN_PROJECTIONS
        .get(name.to_lowercase().as_str())
        .copied()
        .ok_or_else(|| Error::UnknownProjection(name.to_string()))
}

/// The identifiers of the built-in projections
pub fn builtin_names() -> Vec<&'static str> {
    BUILTIN_PROJECTIONS.keys().copied().collect()
}

// ----- S T R U C T   O P C O N S T R U C T O R ---------------------------------------

/// Blueprint for the overall instantiation of an operator.
///
/// OpConstructor needs to be a newtype, rather than a type alias,
/// since we must implement the Debug-trait for OpConstructor (to
/// make auto derive of the Debug-trait work for any derived type).
#[derive(Clone, Copy)]
pub struct OpConstructor(pub fn(args: &RawParameters, ctx: &dyn Context) -> Result<Op, Error>);

// Cannot autoderive the Debug trait
impl core::fmt::Debug for OpConstructor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "OpConstructor")
    }
}

// ----- T R A I T   P R O J E C T I O N -----------------------------------------------

/// Blueprint for the types doing the actual projection work: An implementor
/// holds the constants precomputed at instantiation, and evaluates the
/// projection formulas for one point at a time.
///
/// Input and output are normalized: Angles in radians, with the central
/// meridian already subtracted from the longitude (`fwd`), and planar
/// coordinates for a unit semimajor axis, without any false origin (`inv`).
/// Scaling and shifting is handled by the surrounding [Op].
pub trait Projection: core::fmt::Debug + Send + Sync {
    /// The variant name, e.g. "aea_ellipsoid"
    fn name(&self) -> &'static str;

    fn fwd(&self, globals: &GlobalParameters, lam: f64, phi: f64) -> Result<(f64, f64), Error>;

    fn inv(&self, _globals: &GlobalParameters, _x: f64, _y: f64) -> Result<(f64, f64), Error> {
        Err(Error::Unsupported(format!("{}: no inverse", self.name())))
    }

    fn invertible(&self) -> bool {
        true
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry() -> Result<(), Error> {
        assert_eq!(
            builtin_names(),
            ["aea", "cea", "leac", "ocea", "stere", "tcea", "ups", "wink2"]
        );
        assert!(builtin("stere").is_ok());
        assert!(builtin("STERE").is_ok());
        assert!(matches!(builtin("merc"), Err(Error::UnknownProjection(_))));

        // Unknown projections are distinguishable from other look-up failures
        let ctx = Minimal::new();
        assert!(matches!(Op::new("nosuchproj", &ctx), Err(Error::UnknownProjection(_))));
        assert!(matches!(
            Op::new("aea lat_1=10 lat_2=20 ellps=nosuchellps", &ctx),
            Err(Error::NotFound(..))
        ));
        assert!(matches!(Op::new("no:such", &ctx), Err(Error::NotFound(..))));
        Ok(())
    }

    // Every invertible projection, in all its variants, roundtrips
    #[test]
    fn roundtrip_all() -> Result<(), Error> {
        let ctx = Minimal::new();
        // Definition, expected variant, and hemisphere of the test points
        #[rustfmt::skip]
        let definitions = [
            ("aea lat_1=29.5 lat_2=45.5 lat_0=23 lon_0=-96 ellps=clrk66", "aea_ellipsoid",  1.),
            ("aea lat_1=29.5 lat_2=45.5 lat_0=23 lon_0=-96 ellps=sphere", "aea_spheroid",   1.),
            ("aea lat_1=-20 lat_2=-50",                                   "aea_ellipsoid", -1.),
            ("leac lat_1=45",                                             "aea_ellipsoid",  1.),
            ("leac lat_1=-45 south ellps=unitsphere",                     "aea_spheroid",  -1.),
            ("cea lat_ts=30",                                             "cea_ellipsoid",  1.),
            ("cea k_0=0.8 ellps=sphere",                                  "cea_spheroid",  -1.),
            ("tcea k_0=0.9996 lat_0=10",                                  "tcea_spheroid",  1.),
            ("ocea lat_1=45 lat_2=55 lon_1=-10 lon_2=20",                 "ocea_spheroid",  1.),
            ("ocea alpha=35 lonc=20 k_0=2",                               "ocea_spheroid", -1.),
            ("stere lat_0=90 lat_ts=70",                                  "stere_ellipsoid", 1.),
            ("stere lat_0=-90",                                           "stere_ellipsoid", -1.),
            ("stere lat_0=40 lon_0=-100 k_0=0.9999 ellps=clrk66",         "stere_ellipsoid", 1.),
            ("stere lat_0=0",                                             "stere_ellipsoid", -1.),
            ("stere lat_0=90 lat_ts=70 ellps=sphere",                     "stere_spheroid", 1.),
            ("stere lat_0=-90 ellps=sphere",                              "stere_spheroid", -1.),
            ("stere lat_0=40 ellps=unitsphere",                           "stere_spheroid", 1.),
            ("stere ellps=sphere",                                        "stere_spheroid", 1.),
            ("ups",                                                       "stere_ellipsoid", 1.),
            ("ups south",                                                 "stere_ellipsoid", -1.),
        ];

        for (definition, variant, hemisphere) in definitions {
            let op = Op::new(definition, &ctx)?;
            assert_eq!(op.descriptor.variant, variant, "{definition}");
            for lat in [10., 35., 50., 62., 75.] {
                for lon in [-60., -20., -5., 0., 5., 30., 55.] {
                    let lon = f64::to_radians(lon) + op.globals.lam0;
                    let lat = f64::to_radians(hemisphere * lat);
                    let (x, y) = op.fwd(lon, lat)?;
                    let (lon2, lat2) = op.inv(x, y)?;
                    // Compare longitudes modulo 2π: ±π are the same meridian
                    let dlon = angular::normalize_symmetric(lon2 - lon);
                    assert!(
                        dlon.abs() < 1e-9 && (lat2 - lat).abs() < 1e-9,
                        "{definition}: ({lon}, {lat}) -> ({x}, {y}) -> ({lon2}, {lat2})"
                    );
                }
            }
        }
        Ok(())
    }
}
