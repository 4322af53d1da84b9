use super::internal::*;

mod global_parameters;
mod op_descriptor;
mod parameter;
mod parsed_parameters;
mod raw_parameters;

pub use global_parameters::GlobalParameters;
pub use op_descriptor::OpDescriptor;
pub use parameter::OpParameter;
pub use parsed_parameters::ParsedParameters;
pub use raw_parameters::RawParameters;

// Latitudes this far beyond the poles are taken as rounding noise
const LATITUDE_TOLERANCE: f64 = 1e-12;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct OpHandle(uuid::Uuid);
impl OpHandle {
    pub fn new() -> Self {
        OpHandle(uuid::Uuid::new_v4())
    }
}
impl Default for OpHandle {
    fn default() -> Self {
        OpHandle(uuid::Uuid::new_v4())
    }
}

/// An instantiated projection: The defining parameters, the derived
/// projection constants, and the functions for evaluating it.
#[derive(Debug)]
pub struct Op {
    pub descriptor: OpDescriptor,
    pub params: ParsedParameters,
    pub globals: GlobalParameters,
    pub inner: Box<dyn Projection>,
    pub id: OpHandle,
}

impl Op {
    pub fn new(definition: &str, ctx: &dyn Context) -> Result<Op, Error> {
        let globals = ctx.globals();
        let parameters = RawParameters::new(definition, &globals);
        Self::op(parameters, ctx)
    }

    /// Instantiate the projection `name` on the ellipsoid `ellps`, with the named
    /// parameters given as a key-value map. Flags are given the value `"true"`
    pub fn with_parameters(
        name: &str,
        ellps: &Ellipsoid,
        named: &BTreeMap<String, String>,
    ) -> Result<Op, Error> {
        let ctx = Minimal::new();
        let mut globals = ctx.globals();
        globals.extend(named.iter().map(|(k, v)| (k.clone(), v.clone())));
        globals.insert("ellps".to_string(), ellps.definition());
        Self::op(RawParameters::new(name, &globals), &ctx)
    }

    // Helper for the projection constructors: Wrap up the parsed parameters,
    // the (possibly adjusted) global parameters, and the projection constants
    pub fn plain(
        parameters: &RawParameters,
        params: ParsedParameters,
        globals: GlobalParameters,
        inner: Box<dyn Projection>,
    ) -> Result<Op, Error> {
        let descriptor = OpDescriptor::new(&parameters.definition, inner.name(), inner.invertible());
        debug!("{}: instantiated as {}", params.name, descriptor.variant);
        Ok(Op {
            descriptor,
            params,
            globals,
            inner,
            id: OpHandle::new(),
        })
    }

    /// Project the geographical coordinate (`lon`, `lat`), given in radians,
    /// onto the plane
    pub fn fwd(&self, lon: f64, lat: f64) -> Result<(f64, f64), Error> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(Error::Domain("non-finite geographical coordinate"));
        }
        if lat.abs() > FRAC_PI_2 + LATITUDE_TOLERANCE {
            return Err(Error::Domain("latitude beyond the poles"));
        }
        let lat = lat.clamp(-FRAC_PI_2, FRAC_PI_2);

        let g = &self.globals;
        let lam = angular::adjlon(lon - g.lam0);
        let (x, y) = self.inner.fwd(g, lam, lat)?;
        Ok((g.a * x + g.x0, g.a * y + g.y0))
    }

    /// Find the geographical coordinate (longitude, latitude), in radians,
    /// corresponding to the projected coordinate (`x`, `y`)
    pub fn inv(&self, x: f64, y: f64) -> Result<(f64, f64), Error> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::Domain("non-finite projected coordinate"));
        }
        let g = &self.globals;
        let (lam, phi) = self.inner.inv(g, (x - g.x0) / g.a, (y - g.y0) / g.a)?;
        Ok((angular::adjlon(lam + g.lam0), phi))
    }

    /// Operate fwd/inv on a slice of coordinates, taking operator inversion into
    /// account. Points failing to transform are set to NaN. Returns the number of
    /// successful transformations
    pub fn apply(&self, operands: &mut [Coor2D], direction: Direction) -> usize {
        let forward = direction == Direction::Fwd;
        // Short form of (inverted && !forward) || (forward && !inverted)
        let geographical_input = self.descriptor.inverted != forward;

        let mut successes = 0_usize;
        for coord in operands {
            let result = if geographical_input {
                self.fwd(coord[0], coord[1])
            } else {
                self.inv(coord[0], coord[1])
            };
            match result {
                Ok((first, second)) => {
                    *coord = Coor2D::raw(first, second);
                    successes += 1;
                }
                Err(e) => {
                    trace!("{}: {e}", self.descriptor.variant);
                    *coord = Coor2D::nan();
                }
            }
        }
        successes
    }

    // Instantiate the actual operator, taking into account the relative order
    // of precendence between user defined operators, macros, and built-in
    // projections
    #[allow(clippy::self_named_constructors)]
    pub fn op(parameters: RawParameters, ctx: &dyn Context) -> Result<Op, Error> {
        if parameters.nesting_too_deep() {
            return Err(Error::Recursion(
                parameters.invocation,
                parameters.definition,
            ));
        }

        if parameters.definition.is_pipeline() {
            return Err(Error::Unsupported(
                "pipelines: ".to_string() + &parameters.definition,
            ));
        }

        let name = parameters.definition.operator_name("");

        // A user defined macro? Resource names are never built in, so a
        // missing macro is reported as such
        if name.is_resource_name() {
            let macro_definition = ctx.get_resource(&name)?;
            let inverted = parameters.definition.split_into_parameters().contains_key("inv");
            let next_param = parameters.next(&macro_definition);
            let mut op = Op::op(next_param, ctx)?.handle_inversion(inverted)?;
            op.descriptor.invoked_as = parameters.invocation;
            return Ok(op);
        }

        // A user defined operator?
        if let Ok(constructor) = ctx.get_op(&name) {
            return constructor.0(&parameters, ctx)?.handle_op_inversion(&parameters);
        }

        // Then it must be a built in projection
        let constructor = builtin(&name)?;
        constructor.0(&parameters, ctx)?.handle_op_inversion(&parameters)
    }

    fn handle_op_inversion(mut self, parameters: &RawParameters) -> Result<Op, Error> {
        self.descriptor.invoked_as = parameters.invocation.clone();
        let inverted = self.params.boolean("inv");
        self.handle_inversion(inverted)
    }

    fn handle_inversion(mut self, inverted: bool) -> Result<Op, Error> {
        if self.descriptor.invertible {
            if inverted {
                self.descriptor.inverted = !self.descriptor.inverted;
            }
            return Ok(self);
        }
        if inverted {
            return Err(Error::NonInvertible(self.descriptor.instantiated_as));
        }

        Ok(self)
    }
}

// ----- T E S T S ------------------------------------------------------------------
