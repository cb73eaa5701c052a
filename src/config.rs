use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono_tz::Tz;

use crate::clock;
use crate::models::Config;

pub fn load_config(path: &Path) -> Result<Config> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config = parse_config(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Reject catalogs the session could not present sensibly.
pub fn validate(config: &Config) -> Result<()> {
    if config.classes.is_empty() {
        bail!("No classes configured");
    }
    let mut seen = HashSet::new();
    for class in &config.classes {
        let name = class.name.trim();
        if name.is_empty() {
            bail!("Class names must not be empty");
        }
        if !seen.insert(name.to_lowercase()) {
            bail!("Class '{}' is configured more than once", name);
        }
        if class.num_slots == 0 {
            bail!("Class '{}' has no slots", name);
        }
        if class.max_capacity < class.num_slots {
            bail!(
                "Class '{}' has {} slots but room for only {} bookings",
                name,
                class.num_slots,
                class.max_capacity
            );
        }
    }
    timezone(config)?;
    Ok(())
}

/// The configured zone, if any.
pub fn timezone(config: &Config) -> Result<Option<Tz>> {
    match config.timezone.as_deref() {
        None => Ok(None),
        Some(name) => clock::parse_timezone(name)
            .map(Some)
            .with_context(|| format!("Unknown timezone '{}'", name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClassConfig;
    use std::path::PathBuf;

    #[test]
    fn test_parse_full_config() {
        let cfg = parse_config(
            r#"
            transcript = "session.log"
            timezone = "Europe/Paris"

            [[classes]]
            name = "Pilates"
            max_capacity = 12
            num_slots = 8

            [[classes]]
            name = "Spin"
            max_capacity = 25
            num_slots = 20
            "#,
        )
        .unwrap();
        assert_eq!(cfg.transcript, PathBuf::from("session.log"));
        assert_eq!(timezone(&cfg).unwrap(), Some(chrono_tz::Europe::Paris));
        assert_eq!(
            cfg.classes,
            vec![ClassConfig::new("Pilates", 12, 8), ClassConfig::new("Spin", 25, 20)]
        );
    }

    #[test]
    fn test_defaults_apply() {
        let cfg = parse_config(
            r#"
            [[classes]]
            name = "Yoga"
            max_capacity = 20
            num_slots = 10
            "#,
        )
        .unwrap();
        assert_eq!(cfg.transcript, PathBuf::from("output.txt"));
        assert_eq!(timezone(&cfg).unwrap(), None);
    }

    #[test]
    fn test_default_catalog() {
        let cfg = Config::default();
        assert!(validate(&cfg).is_ok());
        assert_eq!(cfg.classes[0], ClassConfig::new("Yoga", 20, 10));
        assert_eq!(cfg.classes[1], ClassConfig::new("Zumba", 30, 15));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let mut cfg = Config::default();
        cfg.classes.push(ClassConfig::new("yoga", 5, 5));
        let err = validate(&cfg).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_rejects_bad_classes() {
        let mut cfg = Config::default();
        cfg.classes = vec![];
        assert!(validate(&cfg).is_err());

        cfg.classes = vec![ClassConfig::new("  ", 5, 5)];
        assert!(validate(&cfg).is_err());

        cfg.classes = vec![ClassConfig::new("Boxing", 5, 0)];
        assert!(validate(&cfg).is_err());

        cfg.classes = vec![ClassConfig::new("Spin", 0, 5)];
        assert!(validate(&cfg).is_err());

        cfg.classes = vec![ClassConfig::new("Spin", 4, 5)];
        let err = validate(&cfg).unwrap_err();
        assert!(err.to_string().contains("room for only 4 bookings"));

        // Capacity equal to the slot count is fine
        cfg.classes = vec![ClassConfig::new("Spin", 5, 5)];
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn test_rejects_unknown_timezone() {
        let mut cfg = Config::default();
        cfg.timezone = Some("Nowhere/Special".to_string());
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
