use std::f64::consts::PI;

/// normalize arbitrary angles to [-π, π):
pub fn normalize_symmetric(angle: f64) -> f64 {
    let angle = (angle + PI).rem_euclid(2.0 * PI) - PI;
    // rem_euclid may round up to the modulus itself
    if angle >= PI {
        return -PI;
    }
    angle
}

/// Bring a longitude into [-π, π]. Values already inside that range are
/// returned untouched, so round trips do not pick up wrapping noise.
pub fn adjlon(lon: f64) -> f64 {
    if lon.abs() <= PI {
        return lon;
    }
    normalize_symmetric(lon)
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping() {
        assert_eq!(normalize_symmetric(0.), 0.);
        assert_eq!(normalize_symmetric(PI), -PI);
        assert!((normalize_symmetric(3. * PI / 2.) + PI / 2.).abs() < 1e-15);
        assert!((normalize_symmetric(-3. * PI / 2.) - PI / 2.).abs() < 1e-15);
        assert!((normalize_symmetric(4.5 * PI) - 0.5 * PI).abs() < 1e-14);

        // Odd multiples of π, from both sides, land on -π, never on +π
        for k in [-7., -5., -3., -1., 1., 3., 5., 7.] {
            let angle = normalize_symmetric(k * PI);
            assert!(angle < PI, "{k}π gave {angle}");
            assert!((angle + PI).abs() < 1e-14, "{k}π gave {angle}");
        }
        for quarter in -40..40 {
            let angle = quarter as f64 * PI / 4. + 0.1;
            let normalized = normalize_symmetric(angle);
            assert!((-PI..PI).contains(&normalized));
            let turns = (angle - normalized) / (2. * PI);
            assert!((turns - turns.round()).abs() < 1e-12);
        }

        // adjlon leaves in-range values bit-for-bit alone
        assert_eq!(adjlon(PI), PI);
        assert_eq!(adjlon(-0.1234567), -0.1234567);
        assert!((adjlon(190_f64.to_radians()) + 170_f64.to_radians()).abs() < 1e-14);
        assert!((adjlon(-190_f64.to_radians()) - 170_f64.to_radians()).abs() < 1e-14);
    }
}
