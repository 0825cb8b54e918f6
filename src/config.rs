//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the site-config.toml file.
//! It provides a centralized way to configure both sliders (timing, start slide, indicators,
//! keyboard scope, slide labels) and where the theme preference is stored.
//!
//! Every section is optional: a missing section takes its default, a missing or malformed
//! file falls back to the full default configuration.

use crate::bindings::{KeyBindings, KeyboardScope};
use crate::carousel::{CarouselError, RotationSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "site-config.toml";

/// Application configuration loaded from site-config.toml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Full-width image slider at the top of the page
    #[serde(default = "SliderConfig::hero")]
    pub hero: SliderConfig,
    /// Client quote cards
    #[serde(default = "SliderConfig::testimonials")]
    pub testimonials: SliderConfig,
    /// Theme preference storage
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// One slider instance
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SliderConfig {
    /// Label used in logs and ASCII output
    pub name: String,
    /// Milliseconds between automatic advances
    pub autoplay_delay_ms: u64,
    /// Slide shown on load
    pub initial_index: usize,
    /// Whether autoplay starts enabled
    pub autoplay: bool,
    /// Whether indicator dots are rendered
    pub indicators: bool,
    /// When the slider reacts to arrow keys
    pub keyboard: KeyboardScope,
    /// Whether Space toggles autoplay
    pub space_toggles: bool,
    /// One label per slide, in display order
    pub slides: Vec<String>,
}

/// Theme preference configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ThemeConfig {
    /// JSON file holding the single persisted theme flag
    pub preference_file: PathBuf,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            preference_file: PathBuf::from("theme-preference.json"),
        }
    }
}

impl SliderConfig {
    /// Hero slider: one slide per service, 5 second rotation, indicators, global keys.
    pub fn hero() -> Self {
        SliderConfig {
            name: "hero".to_string(),
            autoplay_delay_ms: 5000,
            initial_index: 0,
            autoplay: true,
            indicators: true,
            keyboard: KeyboardScope::Global,
            space_toggles: true,
            slides: [
                "Personal Security",
                "Escort Services",
                "Home Security",
                "Convoy Protection",
                "Corporate Security",
                "Security Equipment",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    /// Testimonials slider: one card per client, 6 second rotation, keys only when visible.
    pub fn testimonials() -> Self {
        SliderConfig {
            name: "testimonials".to_string(),
            autoplay_delay_ms: 6000,
            initial_index: 0,
            autoplay: true,
            indicators: false,
            keyboard: KeyboardScope::WhenVisible,
            space_toggles: false,
            slides: [
                "Sarah Johnson, CEO, TechCorp Industries",
                "Michael Chen, Government Official",
                "Emily Rodriguez, Private Client",
                "David Thompson, Event Coordinator",
                "Lisa Wang, Facility Manager",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    /// Controller settings for this slider.
    ///
    /// # Errors
    /// Fails when the slide list is empty or the delay is zero.
    pub fn settings(&self) -> Result<RotationSettings, CarouselError> {
        let settings = RotationSettings::new(
            self.slides.len(),
            Duration::from_millis(self.autoplay_delay_ms),
        )
        .with_initial_index(self.initial_index)
        .with_autoplay(self.autoplay);
        settings.validate()?;
        Ok(settings)
    }

    pub fn key_bindings(&self) -> KeyBindings {
        KeyBindings::new(self.keyboard, self.space_toggles)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            hero: SliderConfig::hero(),
            testimonials: SliderConfig::testimonials(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        hero_slides = config.hero.slides.len(),
                        testimonial_slides = config.testimonials.slides.len(),
                        "loaded site configuration"
                    );
                    config
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "invalid config file format, using defaults"
                    );
                    Self::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "no config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Save current configuration to the given path
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }
}
