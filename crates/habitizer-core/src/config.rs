use crate::error::{HabitError, Result};
use crate::outfit;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// PlayerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Coin balance a fresh player starts with.
    #[serde(default = "default_starting_coins")]
    pub starting_coins: u64,
}

fn default_starting_coins() -> u64 {
    50
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            starting_coins: default_starting_coins(),
        }
    }
}

// ---------------------------------------------------------------------------
// SignupConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_signup_path")]
    pub path: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_signup_path() -> String {
    "/post-all/signup2".to_string()
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            path: default_signup_path(),
        }
    }
}

impl SignupConfig {
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.path)
    }
}

// ---------------------------------------------------------------------------
// ProfileConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub profile: ProfileConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub signup: SignupConfig,
}

fn default_version() -> u32 {
    1
}

impl Config {
    pub fn new(profile_name: impl Into<String>) -> Self {
        Self {
            version: 1,
            profile: ProfileConfig {
                name: profile_name.into(),
            },
            player: PlayerConfig::default(),
            signup: SignupConfig::default(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(HabitError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.profile.name.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "profile.name is empty".to_string(),
            });
        }

        let base = self.signup.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "signup.base_url '{}' must start with http:// or https://",
                    self.signup.base_url
                ),
            });
        }

        if !self.signup.path.starts_with('/') {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("signup.path '{}' should start with '/'", self.signup.path),
            });
        }

        let most_expensive = outfit::catalog().iter().map(|o| o.cost).max().unwrap_or(0);
        if self.player.starting_coins >= most_expensive {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "player.starting_coins={} already buys every outfit",
                    self.player.starting_coins
                ),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::new("sam");
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.profile.name, "sam");
        assert_eq!(parsed.version, 1);
        assert_eq!(parsed.player.starting_coins, 50);
    }

    #[test]
    fn minimal_yaml_fills_defaults() {
        let yaml = "profile:\n  name: sam\n";
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.version, 1);
        assert_eq!(
            cfg.signup.endpoint(),
            "http://localhost:3000/post-all/signup2"
        );
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let signup = SignupConfig {
            base_url: "https://api.example.com/".to_string(),
            path: "/post-all/signup2".to_string(),
        };
        assert_eq!(signup.endpoint(), "https://api.example.com/post-all/signup2");
    }

    #[test]
    fn default_config_is_clean() {
        assert!(Config::new("sam").validate().is_empty());
    }

    #[test]
    fn bad_base_url_is_an_error() {
        let mut cfg = Config::new("sam");
        cfg.signup.base_url = "localhost:3000".to_string();
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.level == WarnLevel::Error));
    }

    #[test]
    fn generous_starting_coins_warn() {
        let mut cfg = Config::new("sam");
        cfg.player.starting_coins = 10_000;
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Warning);
    }

    #[test]
    fn load_without_init_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(HabitError::NotInitialized)
        ));
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::new("sam");
        cfg.signup.base_url = "https://habits.example.com".to_string();
        cfg.save(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.signup.base_url, "https://habits.example.com");
    }
}
