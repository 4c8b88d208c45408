//! Loading the config file and applying `path.to.key=value` overrides on top of it.

use std::{fs, path::Path};

use toml::value::Table;

use crate::{Config, ConfigError};

/// Reads the TOML config at `path`, applies `overrides` in order and deserializes the
/// result.
pub fn load_config(path: &Path, overrides: &[String]) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config_toml: toml::Value = toml::from_str(&config_str)?;

    let parsed = overrides
        .iter()
        .map(|o| parse_override(o))
        .collect::<Result<Vec<_>, ConfigError>>()?;

    let table = config_toml
        .as_table_mut()
        .ok_or(ConfigError::TraverseNonTableAt {
            key: "<root>".to_string(),
            path: "".to_string(),
        })?;

    for (path, val) in parsed {
        apply_override(&path, val, table)?;
    }

    let config = config_toml.try_into::<Config>()?;
    validate_config(config)
}

fn validate_config(config: Config) -> Result<Config, ConfigError> {
    if config.da_includer.initial_height == 0 {
        return Err(ConfigError::InvalidValue(
            "da_includer.initial_height must be at least 1".to_string(),
        ));
    }
    Ok(config)
}

/// Parses `a.b.c=value`. The value is read as a TOML literal when possible and falls
/// back to a plain string otherwise, so `datadir=/tmp/x` works without quoting.
pub fn parse_override(input: &str) -> Result<(String, toml::Value), ConfigError> {
    let (path, raw) = input
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidOverride(input.to_string()))?;
    let path = path.trim();
    if path.is_empty() || path.split('.').any(|seg| seg.is_empty()) {
        return Err(ConfigError::InvalidOverride(input.to_string()));
    }

    let raw = raw.trim();
    let value = toml::from_str::<Table>(&format!("v = {raw}"))
        .ok()
        .and_then(|mut t| t.remove("v"))
        .unwrap_or_else(|| toml::Value::String(raw.to_string()));

    Ok((path.to_string(), value))
}

/// Sets `path` to `value` inside `table`, creating intermediate tables as needed.
pub fn apply_override(
    path: &str,
    value: toml::Value,
    table: &mut Table,
) -> Result<(), ConfigError> {
    match path.split_once('.') {
        None => {
            table.insert(path.to_string(), value);
            Ok(())
        }
        Some((key, rest)) => {
            let entry = table
                .entry(key.to_string())
                .or_insert_with(|| toml::Value::Table(Table::new()));
            match entry.as_table_mut() {
                Some(inner) => apply_override(rest, value, inner),
                None => Err(ConfigError::TraverseNonTableAt {
                    key: key.to_string(),
                    path: path.to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Write, path::PathBuf};

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_override_typed_values() {
        let (path, val) = parse_override("da_includer.initial_height=42").unwrap();
        assert_eq!(path, "da_includer.initial_height");
        assert_eq!(val, toml::Value::Integer(42));

        let (_, val) = parse_override("logging.json_format=true").unwrap();
        assert_eq!(val, toml::Value::Boolean(true));

        let (_, val) = parse_override("client.datadir=/tmp/data").unwrap();
        assert_eq!(val, toml::Value::String("/tmp/data".to_string()));
    }

    #[test]
    fn test_parse_override_rejects_malformed() {
        assert!(matches!(
            parse_override("no_equals_sign"),
            Err(ConfigError::InvalidOverride(_))
        ));
        assert!(matches!(
            parse_override("client..datadir=x"),
            Err(ConfigError::InvalidOverride(_))
        ));
        assert!(matches!(
            parse_override("=x"),
            Err(ConfigError::InvalidOverride(_))
        ));
    }

    #[test]
    fn test_apply_override_creates_missing_tables() {
        let mut table = Table::new();
        apply_override("a.b.c", toml::Value::Integer(1), &mut table).unwrap();

        let c = table["a"]["b"]["c"].as_integer();
        assert_eq!(c, Some(1));
    }

    #[test]
    fn test_apply_override_into_primitive_fails() {
        let mut table = Table::new();
        table.insert("a".to_string(), toml::Value::Integer(1));

        let res = apply_override("a.b", toml::Value::Integer(2), &mut table);
        assert!(matches!(res, Err(ConfigError::TraverseNonTableAt { .. })));
    }

    #[test]
    fn test_load_config_with_overrides() {
        let file = write_config(
            r#"
            [client]
            datadir = "/data"

            [da_includer]
            initial_height = 5
            "#,
        );

        let config = load_config(
            file.path(),
            &[
                "da_includer.initial_height=7".to_string(),
                "client.db_retry_count=9".to_string(),
                "logging.log_dir=/var/log/strata".to_string(),
            ],
        )
        .unwrap();

        assert_eq!(config.client.datadir, PathBuf::from("/data"));
        assert_eq!(config.client.db_retry_count, 9);
        assert_eq!(config.da_includer.initial_height, 7);
        assert_eq!(
            config.logging.log_dir,
            Some(PathBuf::from("/var/log/strata"))
        );
    }

    #[test]
    fn test_load_config_rejects_zero_initial_height() {
        let file = write_config("[da_includer]\ninitial_height = 0\n");

        let res = load_config(file.path(), &[]);
        assert!(matches!(res, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_load_config_missing_file() {
        let res = load_config(Path::new("/definitely/not/here.toml"), &[]);
        assert!(matches!(res, Err(ConfigError::Io { .. })));
    }
}
