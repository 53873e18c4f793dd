// Source mapping reader
// The `config` crate folds every key to lowercase, so `param_source_mapping`
// is read again from the YAML file with its keys exactly as written

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use yaml_rust2::{Yaml, YamlLoader};

use crate::error::ConfigError;

const MAPPING_KEY: &str = "param_source_mapping";
const YAML_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Read `param_source_mapping` from the YAML file behind `config_path`
///
/// `config_path` is resolved like `config::File::with_name`: used as-is when
/// it exists, otherwise with a `.yaml`/`.yml` extension appended. Returns
/// `None` for non-YAML files and for files without the key.
pub fn read_source_mapping(
    config_path: &str,
) -> Result<Option<HashMap<String, String>>, ConfigError> {
    let Some(path) = resolve_yaml_path(config_path) else {
        return Ok(None);
    };
    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    parse_source_mapping(&text)
}

fn resolve_yaml_path(config_path: &str) -> Option<PathBuf> {
    let path = Path::new(config_path);
    if path.is_file() {
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| YAML_EXTENSIONS.contains(&e));
        return is_yaml.then(|| path.to_path_buf());
    }
    YAML_EXTENSIONS
        .iter()
        .map(|ext| PathBuf::from(format!("{config_path}.{ext}")))
        .find(|p| p.is_file())
}

fn parse_source_mapping(text: &str) -> Result<Option<HashMap<String, String>>, ConfigError> {
    let docs = YamlLoader::load_from_str(text)?;
    let Some(table) = docs.first().and_then(|doc| doc[MAPPING_KEY].as_hash()) else {
        return Ok(None);
    };

    let mut mapping = HashMap::with_capacity(table.len());
    for (key, value) in table {
        match (scalar_text(key), scalar_text(value)) {
            (Some(k), Some(v)) => {
                mapping.insert(k, v);
            }
            _ => return Err(ConfigError::InvalidSourceMapping(format!("{key:?}: {value:?}"))),
        }
    }
    Ok(Some(mapping))
}

/// Plain scalars as the text they were written with
fn scalar_text(node: &Yaml) -> Option<String> {
    match node {
        Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}
