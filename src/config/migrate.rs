use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Dotted keys (e.g. `smtp.port`) present in the defaults but absent from `content`.
pub fn missing_keys(content: &str) -> AppResult<Vec<String>> {
    let current = parse_mapping(content)?;
    let defaults = default_mapping()?;

    let mut out = Vec::new();
    collect_missing(&defaults, &current, "", &mut out);
    Ok(out)
}

/// Add every missing key with its default value; existing values are kept.
/// Returns the keys that were added.
pub fn fill_missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;

    let mut current = parse_mapping(&content)?;
    let defaults = default_mapping()?;

    let mut added = Vec::new();
    collect_missing(&defaults, &current, "", &mut added);
    if added.is_empty() {
        return Ok(added);
    }

    merge_defaults(&mut current, &defaults);
    let serialized =
        serde_yaml::to_string(&current).map_err(|e| AppError::Config(e.to_string()))?;
    fs::write(path, serialized)?;

    success(format!(
        "Configuration updated, added: {}",
        added.join(", ")
    ));
    Ok(added)
}

fn parse_mapping(content: &str) -> AppResult<Mapping> {
    if content.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str::<Value>(content) {
        Ok(Value::Mapping(m)) => Ok(m),
        Ok(_) => Err(AppError::Config("top level is not a mapping".into())),
        Err(e) => Err(AppError::Config(e.to_string())),
    }
}

fn default_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default()) {
        Ok(Value::Mapping(m)) => Ok(m),
        Ok(_) => Err(AppError::Config("defaults are not a mapping".into())),
        Err(e) => Err(AppError::Config(e.to_string())),
    }
}

fn collect_missing(defaults: &Mapping, current: &Mapping, prefix: &str, out: &mut Vec<String>) {
    for (key, default_val) in defaults {
        let Some(name) = key.as_str() else { continue };
        let dotted = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };

        match (current.get(key), default_val) {
            (None, _) => out.push(dotted),
            (Some(Value::Mapping(cur)), Value::Mapping(def)) => {
                collect_missing(def, cur, &dotted, out)
            }
            _ => {}
        }
    }
}

fn merge_defaults(current: &mut Mapping, defaults: &Mapping) {
    for (key, default_val) in defaults {
        match current.get_mut(key) {
            None => {
                current.insert(key.clone(), default_val.clone());
            }
            Some(Value::Mapping(cur)) => {
                if let Value::Mapping(def) = default_val {
                    merge_defaults(cur, def);
                }
            }
            Some(_) => {}
        }
    }
}
