//! Panel configuration
//!
//! One JSON file covers the whole pipeline. Every field is optional:
//!
//! ```json
//! {
//!   "render": { "margin": 16, "preferred_font": "builtin" },
//!   "thresholds": { "black_threshold": 180 },
//!   "asset_dir": "/var/lib/habit-paper/assets",
//!   "display_enabled": true
//! }
//! ```

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use eink_planes::SplitThresholds;
use eink_specs::{displays::WAVESHARE_7_5_B_V2, DisplaySpec};
use habit_render::{IllustrationAssets, RenderConfig};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::PanelError;

/// Any non-empty value turns the panel sink off.
pub const DISABLE_DISPLAY_ENV: &str = "HABIT_PAPER_DISABLE_DISPLAY";

/// Settings for one refresh pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Page geometry, palette and font
    pub render: RenderConfig,
    /// Black/red split thresholds
    pub thresholds: SplitThresholds,
    /// Illustration cache; `None` draws only the default face
    pub asset_dir: Option<PathBuf>,
    /// Hand frames to the panel sink
    pub display_enabled: bool,
}

impl PanelConfig {
    /// Waveshare 7.5" B defaults, no asset cache, display on
    pub const DEFAULT: Self = Self {
        render: RenderConfig::DEFAULT,
        thresholds: SplitThresholds::DEFAULT,
        asset_dir: None,
        display_enabled: true,
    };

    /// Read a JSON config file.
    ///
    /// The top level must be an object, and the canvas must fit the panel.
    pub fn load(path: &Path) -> Result<Self, PanelError> {
        let text = fs::read_to_string(path).map_err(|source| PanelError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str::<Map<String, Value>>(&text)
            .and_then(|fields| serde_json::from_value::<Self>(Value::Object(fields)))
            .map_err(|source| PanelError::ConfigJson {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "panel config loaded");
        Ok(config)
    }

    /// Panel the frames are meant for
    pub fn panel(&self) -> DisplaySpec {
        WAVESHARE_7_5_B_V2
    }

    /// Check that the configured canvas maps 1:1 onto [`panel`](Self::panel).
    pub fn validate(&self) -> Result<(), PanelError> {
        let panel = self.panel();
        if panel.matches(self.render.width, self.render.height) {
            return Ok(());
        }
        Err(PanelError::CanvasMismatch {
            panel: panel.name,
            expected: (panel.width, panel.height),
            found: (self.render.width, self.render.height),
        })
    }

    /// Illustration cache, materialized on first use
    pub fn illustration_assets(&self) -> Result<Option<IllustrationAssets>, PanelError> {
        let Some(dir) = &self.asset_dir else {
            return Ok(None);
        };
        let assets = IllustrationAssets::new(dir);
        assets.ensure_materialized()?;
        Ok(Some(assets))
    }

    /// Whether frames go to the panel, given the process environment.
    pub fn display_active(&self) -> bool {
        let env = std::env::var_os(DISABLE_DISPLAY_ENV);
        self.display_active_with(env.as_deref())
    }

    /// [`display_active`](Self::display_active) with an explicit
    /// `HABIT_PAPER_DISABLE_DISPLAY` value.
    pub fn display_active_with(&self, disable: Option<&OsStr>) -> bool {
        let disabled = disable.is_some_and(|v| !v.is_empty());
        self.display_enabled && !disabled
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: PanelConfig =
            serde_json::from_str(r#"{ "thresholds": { "black_threshold": 180 } }"#).unwrap();
        assert_eq!(config.thresholds.black_threshold, 180);
        assert_eq!(config.thresholds.red_threshold, 150);
        assert_eq!(config.render, RenderConfig::DEFAULT);
        assert!(config.display_enabled);
        assert!(config.asset_dir.is_none());
    }

    #[test]
    fn test_disable_env_value() {
        let config = PanelConfig::DEFAULT;
        assert!(config.display_active_with(None));
        assert!(config.display_active_with(Some(OsStr::new(""))));
        assert!(!config.display_active_with(Some(OsStr::new("1"))));

        let off = PanelConfig { display_enabled: false, ..PanelConfig::DEFAULT };
        assert!(!off.display_active_with(None));
    }

    #[test]
    fn test_render_config_matches_panel() {
        let config = PanelConfig::DEFAULT;
        assert!(config.panel().matches(config.render.width, config.render.height));
    }

    #[test]
    fn test_load_errors_name_the_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        let err = PanelConfig::load(&missing).unwrap_err();
        assert!(matches!(err, PanelError::ConfigIo { .. }));
        assert!(err.to_string().contains("missing.json"));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(PanelConfig::load(&broken), Err(PanelError::ConfigJson { .. })));
    }

    #[test]
    fn test_load_requires_an_object() {
        let dir = tempfile::TempDir::new().unwrap();
        for (name, text) in [("seq.json", "[]"), ("num.json", "3"), ("null.json", "null")] {
            let path = dir.path().join(name);
            fs::write(&path, text).unwrap();
            let err = PanelConfig::load(&path).unwrap_err();
            assert!(matches!(err, PanelError::ConfigJson { .. }), "{name}: {err}");
            assert!(err.to_string().contains(name));
        }

        let empty = dir.path().join("empty.json");
        fs::write(&empty, "{}").unwrap();
        assert_eq!(PanelConfig::load(&empty).unwrap(), PanelConfig::DEFAULT);
    }

    #[test]
    fn test_canvas_must_fit_panel() {
        assert!(PanelConfig::DEFAULT.validate().is_ok());

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("small.json");
        fs::write(&path, r#"{ "render": { "width": 640, "height": 384 } }"#).unwrap();
        let err = PanelConfig::load(&path).unwrap_err();
        assert!(matches!(
            err,
            PanelError::CanvasMismatch { expected: (800, 480), found: (640, 384), .. }
        ));
        assert!(err.to_string().contains("640x384"));
    }
}
