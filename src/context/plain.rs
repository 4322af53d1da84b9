use crate::authoring::*;
use std::path::PathBuf;

// ----- T H E   P L A I N   C O N T E X T ---------------------------------------------

/// A context provider, supporting built in and run-time defined projections,
/// and macros stored in files. Macros reside either in a file of their own,
/// `prefix_suffix.resource`, or in a `prefix.register` file of `<suffix>`-tagged
/// definitions, in the `resources` directory under `./kort` or under the
/// `kort` directory of the user's local data directory.
#[derive(Debug)]
pub struct Plain {
    constructors: BTreeMap<String, OpConstructor>,
    resources: BTreeMap<String, String>,
    operators: BTreeMap<OpHandle, Op>,
    paths: Vec<std::path::PathBuf>,
}

const BAD_ID_MESSAGE: Error = Error::General("Plain: Unknown operator id");

impl Default for Plain {
    fn default() -> Plain {
        let mut paths = Vec::new();

        let localpath: PathBuf = [".", "kort"].iter().collect();
        paths.push(localpath);

        if let Some(mut userpath) = dirs::data_local_dir() {
            userpath.push("kort");
            paths.push(userpath);
        }

        Plain {
            constructors: BTreeMap::new(),
            resources: BTreeMap::new(),
            operators: BTreeMap::new(),
            paths,
        }
    }
}

impl Context for Plain {
    fn new() -> Plain {
        Plain::default()
    }

    fn op(&mut self, definition: &str) -> Result<OpHandle, Error> {
        let op = Op::new(definition, self)?;
        let id = op.id;
        self.operators.insert(id, op);
        Ok(id)
    }

    fn apply(
        &self,
        op: OpHandle,
        direction: Direction,
        operands: &mut [Coor2D],
    ) -> Result<usize, Error> {
        let op = self.operators.get(&op).ok_or(BAD_ID_MESSAGE)?;
        Ok(op.apply(operands, direction))
    }

    fn params(&self, op: OpHandle) -> Result<ParsedParameters, Error> {
        let op = self.operators.get(&op).ok_or(BAD_ID_MESSAGE)?;
        Ok(op.params.clone())
    }

    fn globals(&self) -> BTreeMap<String, String> {
        BTreeMap::from([("ellps".to_string(), "GRS80".to_string())])
    }

    fn register_op(&mut self, name: &str, constructor: OpConstructor) {
        self.constructors.insert(String::from(name), constructor);
    }

    fn get_op(&self, name: &str) -> Result<OpConstructor, Error> {
        if let Some(result) = self.constructors.get(name) {
            return Ok(*result);
        }

        Err(Error::NotFound(
            name.to_string(),
            ": User defined constructor".to_string(),
        ))
    }

    fn register_resource(&mut self, name: &str, definition: &str) {
        self.resources
            .insert(String::from(name), String::from(definition));
    }

    fn get_resource(&self, name: &str) -> Result<String, Error> {
        // Run-time registered resources take precedence, and need not
        // follow the prefix:suffix convention
        if let Some(result) = self.resources.get(name) {
            return Ok(result.to_string());
        }

        let Some((prefix, suffix)) = name.split_once(':') else {
            return Err(Error::BadParam(
                "needing prefix:suffix format".to_string(),
                name.to_string(),
            ));
        };
        if prefix.is_empty() || suffix.is_empty() || suffix.contains(':') {
            return Err(Error::BadParam(
                "needing prefix:suffix format".to_string(),
                name.to_string(),
            ));
        }

        // The resource may be in a file of its own, or in a register
        let resource = format!("{prefix}_{suffix}.resource");
        let register = format!("{prefix}.register");
        let tag = format!("<{suffix}>");

        for path in &self.paths {
            let mut full_path = path.clone();
            full_path.push("resources");
            full_path.push(&resource);
            if let Ok(result) = std::fs::read_to_string(&full_path) {
                debug!("{name}: found in {}", full_path.display());
                return Ok(result.trim().to_string());
            }

            let mut full_path = path.clone();
            full_path.push("resources");
            full_path.push(&register);
            let Ok(result) = std::fs::read_to_string(&full_path) else {
                continue;
            };
            let Some(mut start) = result.find(&tag) else {
                continue;
            };
            debug!("{name}: found in {}", full_path.display());
            start += tag.len();

            // The item extends to the next tag, or to the end of the file
            let length = result[start..].find('<').unwrap_or(result.len() - start);
            return Ok(result[start..start + length].trim().to_string());
        }

        Err(Error::NotFound(
            name.to_string(),
            ": User defined resource".to_string(),
        ))
    }
}

// ----- T E S T S ------------------------------------------------------------------
