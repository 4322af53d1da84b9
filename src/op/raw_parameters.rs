use super::*;

/// Interface between the high level [Op::op()](crate::op::Op) and the low level
/// functionality in the individual projections
///
/// `RawParameters` is the vehicle used by the `Op`erator factory in `Op::op(...)`,
/// to ferry args around from the invocator into the constructor of the individual
/// projections.
///
/// The constructor typically interprets the contents of `RawParameters`,
/// and converts it into a more runtime friendly instance of `ParsedParameters`.
#[derive(Debug, Default, Clone)]
pub struct RawParameters {
    pub invocation: String,
    pub definition: String,
    pub globals: BTreeMap<String, String>,
    pub recursion_level: usize,
}

impl RawParameters {
    pub fn new(invocation: &str, globals: &BTreeMap<String, String>) -> RawParameters {
        // This, and RawParameters::next() should be the only places, where the syntax
        // cleanup functions from the Tokenize trait, are needed
        let invocation = invocation.remove_comments().normalize();

        // Pipelines are refused by Op::op(), so there's nothing to reorder
        let invocation = if invocation.is_pipeline() {
            invocation
        } else {
            invocation.handle_prefix_modifiers()
        };

        let definition = invocation.clone();
        RawParameters {
            invocation,
            definition,
            globals: globals.clone(),
            recursion_level: 0,
        }
    }

    /// Prepare the expansion of a macro: The parameters given at the invocation
    /// of the macro become globals for its definition, so `*default` values and
    /// `^key` look-ups in the definition can find them
    pub fn next(&self, definition: &str) -> RawParameters {
        let mut globals = self.globals.clone();
        let mut locals = self.definition.split_into_parameters();
        locals.remove("name");
        locals.remove("inv");
        globals.extend(locals);

        RawParameters {
            invocation: self.invocation.clone(),
            definition: definition.remove_comments().normalize().handle_prefix_modifiers(),
            globals,
            recursion_level: self.recursion_level + 1,
        }
    }

    pub fn nesting_too_deep(&self) -> bool {
        self.recursion_level > 100
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion() {
        let globals = BTreeMap::from([("ellps".to_string(), "GRS80".to_string())]);
        let raw = RawParameters::new("inv polar:north   lat_ts = 70", &globals);
        assert_eq!(raw.definition, "polar:north lat_ts=70 inv");

        let next = raw.next("stere lat_0=90 lat_ts=*71");
        assert_eq!(next.recursion_level, 1);
        assert_eq!(next.globals["lat_ts"], "70");
        assert_eq!(next.globals["ellps"], "GRS80");
        assert!(!next.globals.contains_key("inv"));
        assert!(!next.nesting_too_deep());
    }
}
