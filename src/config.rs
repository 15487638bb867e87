//! # Configuration Management
//!
//! Loads runtime settings from `moon-config.toml`: the live widget's
//! geometry and tick rate, and the share-image (OGP) generator's canvas,
//! moon placement, optional surface texture, and output path. Missing or
//! invalid files fall back to defaults that match the site's layout.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration loaded from moon-config.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Live clock-widget configuration
    pub widget: WidgetConfig,
    /// Batch share-image (OGP) configuration
    pub ogp: OgpConfig,
}

/// Live clock-widget configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct WidgetConfig {
    /// Square frame size in pixels (disc plus glow margin)
    pub size: u32,
    /// Moon disc radius in pixels; must leave room for the glow halo
    pub radius: u32,
    /// Seconds between redraws
    pub tick_seconds: u64,
}

/// Batch share-image configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct OgpConfig {
    /// Output image width in pixels
    pub width: u32,
    /// Output image height in pixels
    pub height: u32,
    /// Moon center X on the canvas
    pub moon_x: f64,
    /// Moon center Y on the canvas
    pub moon_y: f64,
    /// Moon disc radius in pixels
    pub moon_radius: u32,
    /// Where the baked PNG is written
    pub output_path: String,
    /// Optional moon surface texture; absent or unreadable falls back to
    /// the procedural crater surface
    pub texture_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            widget: WidgetConfig {
                size: 120,
                radius: 45,
                tick_seconds: 1,
            },
            ogp: OgpConfig {
                width: 1200,  // standard OGP card
                height: 630,  // standard OGP card
                moon_x: 600.0,
                moon_y: 250.0,
                moon_radius: 85,
                output_path: "static/og-image.png".to_string(),
                texture_path: None,
            },
        }
    }
}

impl Config {
    /// Load configuration from moon-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path("moon-config.toml")
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Invalid config file format: {}", e);
                    eprintln!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => {
                eprintln!("Info: No config file found, using default configuration");
                Self::default()
            }
        }
    }

    /// Save current configuration to moon-config.toml
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write("moon-config.toml", contents)?;
        println!("Configuration saved to moon-config.toml");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.widget.size, 120);
        assert_eq!(config.widget.radius, 45);
        assert_eq!(config.widget.tick_seconds, 1);
        assert_eq!(config.ogp.width, 1200);
        assert_eq!(config.ogp.height, 630);
        assert_eq!(config.ogp.moon_radius, 85);
        assert!(config.ogp.texture_path.is_none());
    }

    #[test]
    fn test_glow_fits_in_widget_frame() {
        let config = Config::default();
        // The halo extends 8px past the disc rim.
        assert!(config.widget.radius + 8 <= config.widget.size / 2);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.widget.size, parsed.widget.size);
        assert_eq!(config.ogp.output_path, parsed.ogp.output_path);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config.widget.size, 120);
    }

    #[test]
    fn test_texture_path_parses() {
        let toml_str = r#"
[widget]
size = 120
radius = 45
tick_seconds = 1

[ogp]
width = 1200
height = 630
moon_x = 600.0
moon_y = 250.0
moon_radius = 85
output_path = "out/og.png"
texture_path = "assets/moon.jpg"
"#;
        let parsed: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(parsed.ogp.texture_path.as_deref(), Some("assets/moon.jpg"));
        assert_eq!(parsed.ogp.output_path, "out/og.png");
    }
}
