//! Plane consumers
//!
//! [`PlaneSink`] is the boundary to whatever pushes planes to glass. The
//! workspace ships a PNG sink for previews and a null sink for disabled
//! displays; a hardware driver implements the same trait.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use eink_specs::DisplaySpec;
use image::RgbImage;
use thiserror::Error;

use crate::PlanePair;

/// Sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    /// Output directory could not be created
    #[error("plane output: {0}")]
    Io(#[from] io::Error),
    /// PNG encoding failed
    #[error("plane encoding: {0}")]
    Image(#[from] image::ImageError),
    /// Planes do not match the panel
    #[error("planes are {}x{}, panel {panel} needs {}x{}", .found.0, .found.1, .expected.0, .expected.1)]
    SizeMismatch {
        /// Panel name
        panel: &'static str,
        /// Panel resolution
        expected: (u32, u32),
        /// Plane resolution
        found: (u32, u32),
    },
}

/// Something that displays (or stores) a pair of planes
pub trait PlaneSink {
    /// Error type
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Hand over one frame
    fn present(&mut self, planes: &PlanePair) -> Result<(), Self::Error>;
}

/// Discards every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PlaneSink for NullSink {
    type Error = core::convert::Infallible;

    fn present(&mut self, planes: &PlanePair) -> Result<(), Self::Error> {
        let (width, height) = planes.dimensions();
        tracing::debug!(width, height, "display disabled, frame dropped");
        Ok(())
    }
}

/// Writes `black.png` and `red.png` (and optionally `color.png`) to a directory
#[derive(Debug, Clone)]
pub struct PngPlaneSink {
    dir: PathBuf,
    panel: Option<DisplaySpec>,
    frames: usize,
}

impl PngPlaneSink {
    /// Black plane file name
    pub const BLACK_FILE: &'static str = "black.png";
    /// Red plane file name
    pub const RED_FILE: &'static str = "red.png";
    /// Full-colour frame file name
    pub const COLOR_FILE: &'static str = "color.png";

    /// Sink writing into `dir` (created on first frame)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            panel: None,
            frames: 0,
        }
    }

    /// Reject frames that do not match `panel`
    pub fn for_panel(mut self, panel: DisplaySpec) -> Self {
        self.panel = Some(panel);
        self
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Frames written so far
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Store the full-colour frame next to the planes.
    pub fn save_color(&self, image: &RgbImage) -> Result<PathBuf, SinkError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(Self::COLOR_FILE);
        image.save(&path)?;
        Ok(path)
    }

    fn check_panel(&self, planes: &PlanePair) -> Result<(), SinkError> {
        if let Some(panel) = &self.panel {
            let (width, height) = planes.dimensions();
            if !panel.matches(width, height) {
                return Err(SinkError::SizeMismatch {
                    panel: panel.name,
                    expected: (panel.width, panel.height),
                    found: (width, height),
                });
            }
        }
        Ok(())
    }
}

impl PlaneSink for PngPlaneSink {
    type Error = SinkError;

    fn present(&mut self, planes: &PlanePair) -> Result<(), SinkError> {
        self.check_panel(planes)?;
        fs::create_dir_all(&self.dir)?;
        planes.black.to_gray_image().save(self.dir.join(Self::BLACK_FILE))?;
        planes.red.to_gray_image().save(self.dir.join(Self::RED_FILE))?;

        self.frames = self.frames.saturating_add(1);
        match &self.panel {
            Some(panel) => tracing::info!(
                dir = %self.dir.display(),
                frame = self.frames,
                panel = panel.name,
                refresh_ms = panel.full_refresh_duration().as_millis(),
                "planes written"
            ),
            None => tracing::info!(dir = %self.dir.display(), frame = self.frames, "planes written"),
        }
        Ok(())
    }
}
