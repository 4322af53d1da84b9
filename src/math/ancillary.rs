/// The *authalic* function q(𝜙), Snyder (1987) eq. (3-12), PROJ's `pj_qsfn`.
///
/// `q` is proportional to the area of the ellipsoidal zone between the
/// equator and the parallel 𝜙. For the sphere it degenerates to 2 sin 𝜙.
pub fn qs(sinphi: f64, e: f64) -> f64 {
    if e < 1e-7 {
        return 2.0 * sinphi;
    }

    let es = e * e;
    let one_es = 1.0 - es;
    let con = e * sinphi;
    let div1 = 1.0 - con * con;
    let div2 = 1.0 + con;

    one_es * (sinphi / div1 - (0.5 / e) * ((1. - con) / div2).ln())
}

/// Snyder (1987) eq. (14-15), PROJ's `pj_msfn`: The radius of the parallel
/// through 𝜙, for a unit semimajor axis.
pub fn msfn(sincos: (f64, f64), es: f64) -> f64 {
    sincos.1 / (1. - sincos.0 * sincos.0 * es).sqrt()
}

/// ts is the equivalent of Charles Karney's PROJ function `pj_tsfn`.
/// It determines the function ts(phi) as defined in Snyder (1987),
/// Eq. (7-10)
///
/// ts is the exponential of the negated isometric latitude, i.e.
/// exp(-𝜓), evaluated in a numerically stable way.
///
/// Inputs:
///   (sin 𝜙, cos 𝜙): trigs of geographic latitude
///   e: eccentricity of the ellipsoid
/// Output:
///   ts: exp(-𝜓)  =  1 / (tan 𝜒 + sec 𝜒)
///   where 𝜓 is the isometric latitude (dimensionless)
///   and 𝜒 is the conformal latitude (radians)
///
/// For e = 0 this reduces to tan(𝜋/4 - 𝜙/2).
pub fn ts(sincos: (f64, f64), e: f64) -> f64 {
    // exp(-asinh(tan 𝜙))
    //    = 1 / (tan 𝜙 + sec 𝜙)
    //    = cos 𝜙 / (1 + sin 𝜙)  good for 𝜙 > 0
    //    = (1 - sin 𝜙) / cos 𝜙  good for 𝜙 < 0
    let factor = if sincos.0 > 0. {
        sincos.1 / (1. + sincos.0)
    } else {
        (1. - sincos.0) / sincos.1
    };
    (e * (e * sincos.0).atanh()).exp() * factor
}

/// The stereographic function, Snyder (1987) eq. (15-9):
/// tan(𝜋/4 + 𝜙/2) · ((1 - e sin 𝜙) / (1 + e sin 𝜙))^(e/2),
/// i.e. tan(𝜋/4 + 𝜒/2), where 𝜒 is the conformal latitude.
pub fn ssfn(phi: f64, sinphi: f64, e: f64) -> f64 {
    let esinphi = e * sinphi;
    (0.5 * (std::f64::consts::FRAC_PI_2 + phi)).tan()
        * ((1. - esinphi) / (1. + esinphi)).powf(0.5 * e)
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    // GRS80
    const E: f64 = 0.0818191910428158;

    #[test]
    fn authalic_function() {
        // Sphere
        assert_eq!(qs(0.5, 0.), 1.);
        assert_eq!(qs(-1., 1e-8), -2.);

        // Odd function, vanishing at the equator
        assert_eq!(qs(0., E), 0.);
        assert!((qs(0.3, E) + qs(-0.3, E)).abs() < 1e-15);

        // q at the pole, Snyder (1987) eq. (3-12) with sin 𝜙 = 1
        let es = E * E;
        let qp = 1. - (1. - es) / (2. * E) * ((1. - E) / (1. + E)).ln();
        assert!((qs(1., E) - qp).abs() < 1e-14);
        assert!(qp < 2.);
    }

    #[test]
    fn conformal_functions() {
        let phi = 55_f64.to_radians();
        let sc = phi.sin_cos();

        // Spherical cases
        assert!((ts(sc, 0.) - (FRAC_PI_4 - phi / 2.).tan()).abs() < 1e-15);
        assert!((ts((-sc.0, sc.1), 0.) - (FRAC_PI_4 + phi / 2.).tan()).abs() < 1e-14);
        assert!((ssfn(phi, sc.0, 0.) - (FRAC_PI_4 + phi / 2.).tan()).abs() < 1e-14);

        // Both are expressions of the same isometric latitude
        assert!((ssfn(phi, sc.0, E) * ts(sc, E) - 1.).abs() < 1e-14);
        assert!((ssfn(-phi, -sc.0, E) * ts((-sc.0, sc.1), E) - 1.).abs() < 1e-14);

        // The radius of the parallel
        assert_eq!(msfn((0., 1.), 0.006), 1.);
        assert!((msfn(sc, 0.) - sc.1).abs() < 1e-16);
        assert!(msfn(sc, E * E) > sc.1);
    }
}
