//! Illustration asset cache
//!
//! Non-default characters are vector drawings rasterised once into PNG files
//! inside an asset directory and loaded from there at render time. Files are
//! drawn in [`Palette::DEFAULT`]; the renderer maps them onto the page
//! palette when it blits them.
//!
//! Materialisation is idempotent: files that already exist are never
//! rewritten, and each new file is written to a temporary name and
//! hard-linked into place so a reader never sees a partial PNG. Linking
//! fails on an existing target, so a second process racing the first keeps
//! the file it finds. A process-wide lock serialises concurrent first calls.

use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
use image::{ImageFormat, RgbImage};
use thiserror::Error;

use crate::canvas::{infallible, RgbCanvas};
use crate::character::{Character, Illustration};
use crate::layout::{Bounds, CHARACTER_SIZE};
use crate::Palette;

/// Guards "check exists → draw → write" across threads.
static MATERIALIZE_LOCK: Mutex<()> = Mutex::new(());

/// Asset cache errors
#[derive(Debug, Error)]
pub enum AssetError {
    /// Filesystem operation failed
    #[error("asset {}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// PNG encoding failed
    #[error("asset {}: {source}", path.display())]
    Encode {
        /// Target file
        path: PathBuf,
        /// Underlying error
        source: image::ImageError,
    },
}

/// What a materialisation pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Files written by this call
    pub written: Vec<PathBuf>,
    /// Files that were already present
    pub existing: Vec<PathBuf>,
}

/// Directory holding the pre-drawn character PNGs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IllustrationAssets {
    dir: PathBuf,
}

impl IllustrationAssets {
    /// Cache rooted at `dir` (created on demand)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Asset directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of `file` inside the cache
    pub fn path_of(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Write every missing asset; existing files are left untouched.
    pub fn ensure_materialized(&self) -> Result<MaterializeReport, AssetError> {
        let _guard = MATERIALIZE_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        fs::create_dir_all(&self.dir).map_err(|source| AssetError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut report = MaterializeReport::default();
        for (character, file) in Character::assets() {
            let path = self.path_of(file);
            if path.exists() {
                report.existing.push(path);
                continue;
            }
            if !write_new(&path, &encode_png(&path, &rasterize(character))?)? {
                tracing::debug!(character = %character, path = %path.display(), "illustration written elsewhere first");
                report.existing.push(path);
                continue;
            }
            tracing::info!(character = %character, path = %path.display(), "illustration materialised");
            report.written.push(path);
        }
        Ok(report)
    }

    /// Load the picture for `character`.
    ///
    /// `None` when the character is procedural or its file is missing,
    /// unreadable or the wrong size; callers draw the default face instead.
    pub fn load(&self, character: Character) -> Option<RgbImage> {
        let Illustration::Asset { file } = character.illustration() else {
            return None;
        };
        let path = self.path_of(file);
        let image = match image::open(&path) {
            Ok(image) => image.to_rgb8(),
            Err(err) => {
                tracing::warn!(character = %character, path = %path.display(), error = %err, "illustration unavailable, using default face");
                return None;
            }
        };
        if image.dimensions() != (CHARACTER_SIZE, CHARACTER_SIZE) {
            let (width, height) = image.dimensions();
            tracing::warn!(character = %character, width, height, "illustration has the wrong size, using default face");
            return None;
        }
        Some(image)
    }
}

// SAFETY: CHARACTER_SIZE is a small constant.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_wrap)]
fn rasterize(character: Character) -> RgbImage {
    let palette = Palette::DEFAULT;
    let mut canvas = RgbCanvas::new(CHARACTER_SIZE, CHARACTER_SIZE, palette.white);
    let bounds = Bounds {
        x0: 0,
        y0: 0,
        x1: CHARACTER_SIZE as i32 - 1,
        y1: CHARACTER_SIZE as i32 - 1,
    };
    infallible(character.draw(&mut canvas, bounds, palette));
    canvas.into_image()
}

fn encode_png(path: &Path, image: &RgbImage) -> Result<Vec<u8>, AssetError> {
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(|source| AssetError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(bytes.into_inner())
}

/// Publish `bytes` at `path` unless something is already there.
///
/// Returns `false` when `path` existed; its contents are left alone.
fn write_new(path: &Path, bytes: &[u8]) -> Result<bool, AssetError> {
    let io_err = |source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    };
    let tmp = path.with_extension(format!("png.tmp-{}", std::process::id()));
    fs::write(&tmp, bytes).map_err(io_err)?;
    let linked = fs::hard_link(&tmp, path);
    let _ = fs::remove_file(&tmp);
    match linked {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(source) => Err(io_err(source)),
    }
}

/// Blit a loaded illustration with its top-left corner at `origin`, in `palette`
pub(crate) fn illustration_pixels(
    image: &RgbImage,
    origin: Point,
    palette: Palette,
) -> impl Iterator<Item = Pixel<Rgb888>> + '_ {
    image.enumerate_pixels().filter_map(move |(x, y, p)| {
        let x = i32::try_from(x).ok()?.checked_add(origin.x)?;
        let y = i32::try_from(y).ok()?.checked_add(origin.y)?;
        let [r, g, b] = p.0;
        let color = palette.translate(&Palette::DEFAULT, Rgb888::new(r, g, b));
        Some(Pixel(Point::new(x, y), color))
    })
}
