use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Everything the landing page renders, plus the two media asset paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingConfig {
    pub window_title: String,
    pub window_size: (f32, f32),
    pub heading: String,
    pub version_tag: String,
    pub tagline: String,
    pub caption: String,
    pub audio_path: String,
    pub video_path: String,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            window_title: "Nari".to_string(),
            window_size: (1280.0, 800.0),
            heading: "Nari".to_string(),
            version_tag: "v0.1".to_string(),
            tagline: "Generate lifelike dialogue with custom voices".to_string(),
            caption: "like a cream that also has some structure Yes. Okay. \
                      It's like it's a particle and a wave. Yep, yep. But like..."
                .to_string(),
            audio_path: "assets/landing.mp3".to_string(),
            video_path: "assets/bg.mp4".to_string(),
        }
    }
}

impl LandingConfig {
    /// Save the config to a JSON file at the given path.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path.as_ref())?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Load a config from a JSON file at the given path.
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let mut file = File::open(path.as_ref())
            .with_context(|| format!("opening {}", path.as_ref().display()))?;
        let mut json = String::new();
        file.read_to_string(&mut json)?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("parsing {}", path.as_ref().display()))?;
        Ok(config)
    }

    /// Loads the file when it exists, defaults otherwise. A malformed file
    /// is logged and skipped rather than aborting the page.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring config {}: {err:#}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("landing.json");

        let mut config = LandingConfig::default();
        config.heading = "Test Page".to_string();
        config.audio_path = "/tmp/test.mp3".to_string();
        config.save_to_file(&path).unwrap();

        let loaded = LandingConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.heading, "Test Page");
        assert_eq!(loaded.audio_path, "/tmp/test.mp3");
        assert_eq!(loaded.window_size, config.window_size);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = LandingConfig::load_or_default("/nonexistent/landing.json");
        assert_eq!(config.heading, "Nari");
        assert_eq!(config.version_tag, "v0.1");
    }

    #[test]
    fn test_load_or_default_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("landing.json");
        std::fs::write(&path, "{ not json").unwrap();
        let config = LandingConfig::load_or_default(&path);
        assert_eq!(config.heading, "Nari");
    }
}
