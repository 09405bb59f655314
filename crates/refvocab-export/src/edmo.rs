//! EDMO organization directory: SPARQL JSON results → `EDMO.csv`.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use refvocab_core::{Error, Result};

/// Predicate carrying an organization's name.
pub const ORG_NAME_PREDICATE: &str = "http://www.w3.org/ns/org#name";

/// One row of `EDMO.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdmoCode {
    pub uri: String,
    pub code: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<HashMap<String, SparqlTerm>>,
}

#[derive(Debug, Deserialize)]
struct SparqlTerm {
    value: String,
}

/// Extract `(uri, code, name)` for every `org:name` triple.
pub fn parse_edmo_codes(raw: &str) -> Result<Vec<EdmoCode>> {
    let response: SparqlResponse = serde_json::from_str(raw)?;
    let mut codes = Vec::new();

    for (index, binding) in response.results.bindings.iter().enumerate() {
        let term = |var: &str| {
            binding
                .get(var)
                .map(|t| t.value.as_str())
                .ok_or_else(|| Error::Parse(format!("EDMO binding #{} has no ?{}", index, var)))
        };

        if term("p")? != ORG_NAME_PREDICATE {
            continue;
        }

        let uri = term("s")?;
        let code = uri
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse::<i64>().ok())
            .ok_or_else(|| Error::Parse(format!("EDMO subject {} does not end in a code", uri)))?;

        codes.push(EdmoCode {
            uri: uri.to_string(),
            code,
            name: term("o")?.to_string(),
        });
    }

    debug!(
        "Parsed {} EDMO codes from {} bindings",
        codes.len(),
        response.results.bindings.len()
    );
    Ok(codes)
}

pub fn load_edmo_codes(path: &Path) -> Result<Vec<EdmoCode>> {
    let raw = std::fs::read_to_string(path)?;
    parse_edmo_codes(&raw)
}

/// Write `uri,code,name` rows with a header.
pub fn write_edmo_csv(codes: &[EdmoCode], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    if codes.is_empty() {
        writer.write_record(["uri", "code", "name"])?;
    }
    for code in codes {
        writer.serialize(code)?;
    }
    writer.flush()?;
    Ok(())
}
