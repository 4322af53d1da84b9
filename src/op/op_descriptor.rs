/// The fundamental elements of an operator, i.e. everything but
/// the parameters and the projection constants
#[derive(Debug, Default, Clone)]
pub struct OpDescriptor {
    pub invoked_as: String, // e.g. polar:south lat_ts=-71
    pub instantiated_as: String, // e.g. stere lat_0=-90 lat_ts=-71
    pub variant: &'static str, // e.g. stere_ellipsoid
    pub invertible: bool,
    pub inverted: bool,
}

impl OpDescriptor {
    pub fn new(definition: &str, variant: &'static str, invertible: bool) -> OpDescriptor {
        OpDescriptor {
            invoked_as: String::new(), // Handled higher up in the call hierarchy
            instantiated_as: definition.to_string(),
            variant,
            invertible,
            inverted: false, // Ditto
        }
    }
}
