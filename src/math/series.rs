// --- Taylor series polynomium evaluation ----

pub mod taylor {
    /// Evaluate Σ cᵢ · xⁱ using Horner's scheme
    pub fn horner(arg: f64, coefficients: &[f64]) -> f64 {
        let mut coefficients = coefficients.iter().rev();
        let Some(highest) = coefficients.next() else {
            return 0.;
        };
        let mut value = *highest;
        for c in coefficients {
            value = value.mul_add(arg, *c);
        }
        value
    }
}

// --- Fourier series summation using Clenshaw's recurrence ---

pub mod fourier {
    /// Evaluate Σ cᵢ sin( i · arg ), for i ∈ {order, ... , 1}, using Clenshaw summation
    pub fn sin(arg: f64, coefficients: &[f64]) -> f64 {
        let (sin_arg, cos_arg) = arg.sin_cos();
        let x = 2.0 * cos_arg;
        let mut c0 = 0.0;
        let mut c1 = 0.0;

        for c in coefficients.iter().rev() {
            (c1, c0) = (c0, x.mul_add(c0, c - c1));
        }
        sin_arg * c0
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horner() {
        // 1 + 2x + 3x²
        assert_eq!(taylor::horner(2., &[1., 2., 3.]), 17.);
        assert_eq!(taylor::horner(-1., &[1., 2., 3.]), 2.);
        assert_eq!(taylor::horner(7., &[]), 0.);
    }

    #[test]
    fn clenshaw() {
        let coefficients = [0.5, -0.25, 0.125];
        for arg in [-2.5_f64, -0.3, 0., 0.7, 1.9] {
            let naive: f64 = coefficients
                .iter()
                .enumerate()
                .map(|(i, c)| c * ((i + 1) as f64 * arg).sin())
                .sum();
            assert!((fourier::sin(arg, &coefficients) - naive).abs() < 1e-15);
        }
        assert_eq!(fourier::sin(1., &[]), 0.);
    }
}
