use super::*;

/// The parameters of a projection, parsed and type checked according to its gamut.
#[derive(Debug, Default, Clone)]
pub struct ParsedParameters {
    pub name: String,

    // Commonly used options have hard-coded slots. Angles in radians
    pub ellps: Ellipsoid,
    pub lat: [f64; 3],
    pub lon: [f64; 3],

    // Projection specific options are stored in B-Trees. Angles in degrees
    pub boolean: BTreeSet<&'static str>,
    pub real: BTreeMap<&'static str, f64>,
    pub text: BTreeMap<&'static str, String>,
    pub ignored: Vec<String>,
    pub given: BTreeMap<String, String>,
}

// Accessors
impl ParsedParameters {
    pub fn boolean(&self, key: &str) -> bool {
        self.boolean.contains(key)
    }
    pub fn real(&self, key: &str) -> Result<f64, Error> {
        if let Some(value) = self.real.get(key) {
            return Ok(*value);
        }
        Err(Error::MissingParam(key.to_string()))
    }
    /// An angular parameter, converted from degrees to radians
    pub fn angle(&self, key: &str) -> Result<f64, Error> {
        Ok(self.real(key)?.to_radians())
    }
    pub fn text(&self, key: &str) -> Result<String, Error> {
        if let Some(value) = self.text.get(key) {
            return Ok(value.to_string());
        }
        Err(Error::MissingParam(key.to_string()))
    }
    pub fn ignored(&self) -> Vec<String> {
        self.ignored.clone()
    }
    pub fn lat(&self, index: usize) -> f64 {
        self.lat[index]
    }
    pub fn lon(&self, index: usize) -> f64 {
        self.lon[index]
    }
}

impl ParsedParameters {
    pub fn new(
        parameters: &RawParameters,
        gamut: &[OpParameter],
    ) -> Result<ParsedParameters, Error> {
        let locals = parameters.definition.split_into_parameters();
        let globals = &parameters.globals;
        let mut boolean = BTreeSet::<&'static str>::new();
        let mut real = BTreeMap::<&'static str, f64>::new();
        let mut text = BTreeMap::<&'static str, String>::new();

        // Type check the parameters of the gamut, and sort them into their bins
        for p in gamut {
            let key = p.key();
            match (p, chase(globals, &locals, key)?) {
                (OpParameter::Flag { .. }, Some(value)) => {
                    if !value.is_empty() && !value.eq_ignore_ascii_case("true") {
                        warn!("{key}: '{value}' is not a flag value");
                        return Err(Error::BadParam(key.to_string(), value));
                    }
                    boolean.insert(key);
                }
                // Flags not given are false
                (OpParameter::Flag { .. }, None) => {}

                (OpParameter::Real { .. }, Some(value)) => match value.parse::<f64>() {
                    Ok(v) if v.is_finite() => {
                        real.insert(key, v);
                    }
                    _ => {
                        warn!("{key}: '{value}' is not a real number");
                        return Err(Error::BadParam(key.to_string(), value));
                    }
                },
                (OpParameter::Real { default: Some(v), .. }, None) => {
                    real.insert(key, *v);
                }

                (OpParameter::Text { .. }, Some(value)) => {
                    text.insert(key, value);
                }
                (OpParameter::Text { default: Some(v), .. }, None) => {
                    text.insert(key, v.to_string());
                }

                (_, None) => {
                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }
            }
        }

        // The hard-coded slots: The ellipsoid, and the lat_i/lon_i angles in radians
        let ellps = match text.get("ellps") {
            Some(e) => Ellipsoid::named(e)?,
            None => Ellipsoid::default(),
        };
        let angle = |key: String| real.get(key.as_str()).map_or(0., |v| v.to_radians());
        let lat = [0, 1, 2].map(|i| angle(format!("lat_{i}")));
        let lon = [0, 1, 2].map(|i| angle(format!("lon_{i}")));

        let name = locals
            .get("name")
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        // Params specified, but not used
        let ignored: Vec<String> = locals
            .keys()
            .filter(|key| *key != "name" && !gamut.iter().any(|p| p.key() == key.as_str()))
            .cloned()
            .collect();
        for key in &ignored {
            warn!("{name}: ignoring unknown parameter '{key}'");
        }

        Ok(ParsedParameters {
            name,
            ellps,
            lat,
            lon,
            boolean,
            real,
            text,
            ignored,
            given: locals,
        })
    }
}

// ----- A N C I L L A R Y   F U N C T I O N S -----------------------------------------

/// Find the value of `key`, searching first the locals, then the globals,
/// recursively chasing look-ups (`^key`) and handling defaults (`*value`)
pub fn chase(
    globals: &BTreeMap<String, String>,
    locals: &BTreeMap<String, String>,
    key: &str,
) -> Result<Option<String>, Error> {
    // The haystack is a reverse iterator over both lists in series
    let mut haystack = globals.iter().chain(locals.iter()).rev();

    let key = key.trim();
    if key.is_empty() {
        return Err(Error::Syntax(String::from("Empty key")));
    }

    let mut default = "";
    let mut needle = key;
    let mut chasing = false;

    loop {
        let Some(found) = haystack.find(|&x| x.0 == needle) else {
            if !default.is_empty() {
                return Ok(Some(String::from(default)));
            }
            if chasing {
                return Err(Error::Syntax(format!(
                    "Incomplete definition for '{key}'"
                )));
            }
            return Ok(None);
        };
        let value = found.1.trim();

        // If the value is a(nother) lookup, we continue the search in the same iterator,
        // now using a *new search key*, as specified by the current value
        if let Some(stripped) = value.strip_prefix('^') {
            chasing = true;
            needle = stripped;
            continue;
        }

        // If the value is a provided default, we continue the search using the *same key*,
        // in case a proper value is provided.
        if let Some(stripped) = value.strip_prefix('*') {
            chasing = true;
            needle = key;
            default = stripped;
            continue;
        }

        // Otherwise we have the proper result
        return Ok(Some(String::from(value)));
    }
}

// ----- T E S T S ------------------------------------------------------------------
