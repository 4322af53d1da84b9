use crate::Error;
use std::collections::BTreeMap;

/// Convenience methods for lexical analysis of projection definitions.
/// - For splitting a definition into parameters (i.e. key=value-pairs)
/// - For syntactical normalization by eliminating non-significant whitespace
/// - For checking whether a given definition is a macro name ("resource name"), and
/// - For accessing the name of a given projection.
pub trait Tokenize {
    /// Split a definition into parameters. Give special treatment
    /// to names and flags:
    /// ```txt
    /// 'foo bar=baz bonk=blue flag' -> ('name=foo', 'bar=baz', 'bonk=blue', 'flag=true')
    /// ```
    fn split_into_parameters(&self) -> BTreeMap<String, String>;

    /// Glue syntactical elements together, and separate from each other
    /// by a single space:
    ///
    /// 1. Glue key-value pairs together by omitting whitespace around '=':
    ///    ```txt
    ///    key1= value1            key2    =value2  ->  key1=value1 key2=value2
    ///    ```
    /// 2. Trim whitespace on both sides of the macro sigil ':' and the
    ///    sequence separator ',':
    ///    ```txt
    ///    foo: bar ellps = 6378137 , 298.25 -> foo:bar ellps=6378137,298.25
    ///    ```
    fn normalize(&self) -> String;

    /// Remove `#`-comments, inline as well as full line
    fn remove_comments(&self) -> String;

    /// Move a leading `inv` modifier to the end of the definition,
    /// so the projection name comes first: `inv stere` -> `stere inv`
    fn handle_prefix_modifiers(&self) -> String;

    fn is_pipeline(&self) -> bool;
    fn is_resource_name(&self) -> bool;
    fn operator_name(&self, default: &str) -> String;
}

/// Tokenize implementation for string-like objects
impl<T> Tokenize for T
where
    T: AsRef<str>,
{
    fn split_into_parameters(&self) -> BTreeMap<String, String> {
        // Remove non-significant whitespace
        let step = self.normalize();
        let mut params = BTreeMap::new();
        for element in step.split_whitespace() {
            // Split a key=value-pair into key and value parts. Flags (booleans
            // that are true when specified, false when not) get the value "true"
            let (key, value) = match element.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (element, None),
            };

            // If the first arg is a key-without-value, it is the name of the projection
            if params.is_empty() && value.is_none() {
                params.insert(String::from("name"), String::from(key));
                continue;
            }

            params.insert(String::from(key), String::from(value.unwrap_or("true")));
        }

        params
    }

    fn normalize(&self) -> String {
        let elements: Vec<_> = self.as_ref().split_whitespace().collect();
        elements
            .join(" ")
            .replace("= ", "=")
            .replace(": ", ":")
            .replace(", ", ",")
            .replace(" =", "=")
            .replace(" :", ":")
            .replace(" ,", ",")
    }

    fn remove_comments(&self) -> String {
        let all = self.as_ref().replace("\r\n", "\n").replace('\r', "\n");
        let mut trimmed = String::new();
        for line in all.lines() {
            // Everything before `#`, which is everything for comment free lines
            let content = line.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                continue;
            }
            trimmed += " ";
            trimmed += content;
        }
        trimmed.trim().to_string()
    }

    fn handle_prefix_modifiers(&self) -> String {
        let normalized = self.normalize();
        match normalized.strip_prefix("inv ") {
            Some(rest) => rest.to_string() + " inv",
            None => normalized,
        }
    }

    fn is_pipeline(&self) -> bool {
        self.as_ref().contains('|')
    }

    fn is_resource_name(&self) -> bool {
        self.operator_name("").contains(':')
    }

    fn operator_name(&self, default: &str) -> String {
        if self.is_pipeline() {
            return default.to_string();
        }
        self.split_into_parameters()
            .get("name")
            .unwrap_or(&default.to_string())
            .to_string()
    }
}

/// Translate a PROJ string into the native definition format, e.g.
/// `+proj=stere +lat_0=90 +lat_ts=70 +R=6371000` into
/// `stere lat_0=90 lat_ts=70 ellps=6371000,0`.
///
/// PROJ's ellipsoid size and shape parameters (`+R=`, `+a=`, and one of `+rf=`,
/// `+f=`, `+b=` or `+es=`) are folded into a single `ellps=a,rf` element,
/// `+k=` is taken as `k_0`, and a few parameters without
/// any bearing on the projection math (`+no_defs`, `+type=crs`, `+units=m`,
/// `+wktext`) are dropped. PROJ pipelines and init-files are refused: we
/// handle single projections only.
pub fn parse_proj(definition: &str) -> Result<String, Error> {
    // Impose some line ending sanity and remove the PROJ '+' prefix
    let all = definition
        .remove_comments()
        .replace(" +", " ")
        .trim()
        .trim_start_matches('+')
        .to_string();
    let all = all.normalize();

    let mut name = None;
    let mut radius = None;
    let mut shape = None;
    let mut elements = Vec::new();

    for element in all.split_whitespace() {
        if element == "step" || element.starts_with("init=") {
            return Err(Error::Unsupported(
                "parse_proj handles single projections only: ".to_string() + definition,
            ));
        }
        match element.split_once('=') {
            Some(("proj", "pipeline")) => {
                return Err(Error::Unsupported(
                    "parse_proj does not support PROJ pipelines: ".to_string() + definition,
                ))
            }
            Some(("proj", value)) => name = Some(value.to_string()),
            Some(("R", value)) | Some(("a", value)) => radius = Some(value.to_string()),
            Some((key @ ("rf" | "f" | "b" | "es"), value)) => {
                if let Some((other, _)) = shape {
                    return Err(Error::Unsupported(format!(
                        "parse_proj: both '{other}' and '{key}' given in: {definition}"
                    )));
                }
                shape = Some((key, value.to_string()));
            }
            Some(("k", value)) => elements.push(format!("k_0={value}")),
            Some(("type", "crs")) | Some(("units", "m")) => continue,
            None if element == "no_defs" || element == "wktext" => continue,
            _ => elements.push(element.to_string()),
        }
    }

    let Some(name) = name else {
        return Err(Error::Syntax(
            "Missing 'proj=' in PROJ string: ".to_string() + definition,
        ));
    };

    match (radius, shape) {
        (Some(a), Some(shape)) => {
            let rf = reciprocal_flattening(&a, shape)?;
            elements.push(format!("ellps={a},{rf}"));
        }
        (Some(a), None) => elements.push(format!("ellps={a},0")),
        // A shape without a size would silently be applied to the default ellipsoid
        (None, Some((key, _))) => {
            return Err(Error::Unsupported(format!(
                "parse_proj: '{key}' given without 'a' in: {definition}"
            )))
        }
        (None, None) => {}
    }

    elements.insert(0, name);
    Ok(elements.join(" "))
}

// The reciprocal flattening, from any of PROJ's ellipsoid shape parameters
fn reciprocal_flattening(a: &str, shape: (&str, String)) -> Result<String, Error> {
    let (key, value) = shape;
    if key == "rf" {
        return Ok(value);
    }
    let number = |key: &str, value: &str| {
        value
            .parse::<f64>()
            .map_err(|_| Error::BadParam(key.to_string(), value.to_string()))
    };
    let a = number("a", a)?;
    let v = number(key, &value)?;
    let f = match key {
        "f" => v,
        "b" => (a - v) / a,
        _ => 1. - (1. - v).sqrt(),
    };
    if !(0. ..1.).contains(&f) {
        return Err(Error::BadParam(key.to_string(), value));
    }
    if f == 0. {
        return Ok("0".to_string());
    }
    Ok((1. / f).to_string())
}

// ----- T E S T S ------------------------------------------------------------------
