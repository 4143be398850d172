//! # Configuration
//!
//! Wallet configuration is managed by [`clapfig`], which handles layered loading
//! from a TOML file and environment variables.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `QRWALLET__RENDER_SIZE`, `QRWALLET__PRETTY_JSON`.
//! 2. **Data-dir Config**: `<data dir>/qrwallet.toml`.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `render_size` | `500` | Pixel size handed to the renderer for `show` |
//! | `pretty_json` | `true` | Pretty-print the records file |

use crate::error::{Result, WalletError};
use clapfig::{Clapfig, SearchPath};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

pub const CONFIG_FILE: &str = "qrwallet.toml";

const MIN_RENDER_SIZE: u32 = 21;
const MAX_RENDER_SIZE: u32 = 4096;

/// Configuration for the wallet, stored in `qrwallet.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    /// Edge length in pixels for rendered codes.
    #[config(default = 500)]
    pub render_size: u32,

    /// Pretty-print the records file.
    #[config(default = true)]
    pub pretty_json: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            render_size: 500,
            pretty_json: true,
        }
    }
}

impl WalletConfig {
    /// Load configuration for `data_dir`, falling back to defaults on any error.
    pub fn load(data_dir: &Path) -> Self {
        Clapfig::builder::<WalletConfig>()
            .app_name("qrwallet")
            .file_name(CONFIG_FILE)
            .search_paths(vec![SearchPath::Path(data_dir.to_path_buf())])
            .load()
            .unwrap_or_else(|e| {
                warn!(error = %e, "could not load configuration, using defaults");
                WalletConfig::default()
            })
    }

    /// Validate a requested render size. A QR code is at least 21 modules wide.
    pub fn checked_render_size(size: u32) -> Result<u32> {
        if (MIN_RENDER_SIZE..=MAX_RENDER_SIZE).contains(&size) {
            Ok(size)
        } else {
            Err(WalletError::Config(format!(
                "render size {} is outside {}..={}",
                size, MIN_RENDER_SIZE, MAX_RENDER_SIZE
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WalletConfig::default();
        assert_eq!(config.render_size, 500);
        assert!(config.pretty_json);
    }

    #[test]
    fn test_config_serializes_to_toml() {
        let text = toml::to_string(&WalletConfig::default()).unwrap();
        assert!(text.contains("render_size = 500"));
        assert!(text.contains("pretty_json = true"));
    }

    #[test]
    fn test_config_parses_partial_toml() {
        let config: WalletConfig =
            toml::from_str("render_size = 256\npretty_json = false\n").unwrap();
        assert_eq!(config.render_size, 256);
        assert!(!config.pretty_json);
    }

    #[test]
    fn test_render_size_bounds() {
        assert_eq!(WalletConfig::checked_render_size(500).unwrap(), 500);
        assert_eq!(WalletConfig::checked_render_size(21).unwrap(), 21);
        assert!(WalletConfig::checked_render_size(20).is_err());
        assert!(WalletConfig::checked_render_size(10_000).is_err());
    }
}
