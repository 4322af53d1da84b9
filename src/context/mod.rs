use crate::authoring::*;
mod minimal;
#[cfg(feature = "with_plain")]
mod plain;
pub use minimal::Minimal;
#[cfg(feature = "with_plain")]
pub use plain::Plain;

// ----- T H E   C O N T E X T   T R A I T ---------------------------------------------

/// The `Context` trait defines the mode of communication between *Kort* internals
/// and the external context: The global default parameters, user defined
/// projections, and macros ("resources") expanding into projection definitions.
///
/// The context also owns the instantiated projections, handing out
/// [OpHandle]s for later reference.
pub trait Context {
    /// In general, implementations should make sure that `new` differs from `default`
    /// only by adding access to any resources bundled with the context provider
    fn new() -> Self
    where
        Self: Sized;

    /// Instantiate the projection given by `definition`
    fn op(&mut self, definition: &str) -> Result<OpHandle, Error>;

    /// Apply the projection `op` to `operands`, in place. Returns the number
    /// of successful transformations. Failed points are set to NaN
    fn apply(
        &self,
        op: OpHandle,
        direction: Direction,
        operands: &mut [Coor2D],
    ) -> Result<usize, Error>;

    /// The parameters of an instantiated projection, for introspection
    fn params(&self, op: OpHandle) -> Result<ParsedParameters, Error>;

    /// Globally defined default values (typically just `ellps=GRS80`)
    fn globals(&self) -> BTreeMap<String, String>;

    /// Register a new user-defined projection
    fn register_op(&mut self, name: &str, constructor: OpConstructor);
    /// Register a new user-defined resource (i.e. a macro)
    fn register_resource(&mut self, name: &str, definition: &str);

    /// Helper for the `Op` instantiation logic in `Op::op(...)`
    fn get_op(&self, name: &str) -> Result<OpConstructor, Error>;
    /// Helper for the `Op` instantiation logic in `Op::op(...)`
    fn get_resource(&self, name: &str) -> Result<String, Error>;
}
