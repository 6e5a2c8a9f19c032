//! Shape config files (TOML)

use std::path::Path;

use anyhow::{Context, Result};
use lattica::ShapeConfig;

/// Read and parse a shape config; missing fields take the shape's defaults
pub fn load(path: &Path) -> Result<ShapeConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn parse(text: &str) -> Result<ShapeConfig> {
    Ok(toml::from_str(text)?)
}

pub fn to_toml(config: &ShapeConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize shape config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattica::{ShapeKind, WindingOrder};

    #[test]
    fn test_parse_partial_config() {
        let config = parse(
            r#"
            shape = "cylinder"
            div_radial = 24

            [common]
            winding_order = "clockwise"
            "#,
        )
        .unwrap();

        assert_eq!(config.kind(), ShapeKind::Cylinder);
        assert_eq!(config.common().winding_order, WindingOrder::Clockwise);
        assert_eq!(config.counts().unwrap().vertices, 2 * 25 + 2 * (25 + 24));
    }

    #[test]
    fn test_defaults_round_trip() {
        for kind in ShapeKind::ALL {
            let config = ShapeConfig::from_kind(kind).unwrap();
            let text = to_toml(&config).unwrap();
            assert_eq!(parse(&text).unwrap(), config, "{kind}");
        }
    }

    #[test]
    fn test_load_reports_path() {
        let err = load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }

    #[test]
    fn test_parse_rejects_missing_shape() {
        assert!(parse("radius = 1.0").is_err());
    }
}
