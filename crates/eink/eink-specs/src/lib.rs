//! E-Paper Panel Specifications
//!
//! Physical characteristics of the e-paper panels the habit summary is drawn
//! for: resolution, refresh timing and the layout of the controller's frame
//! buffer.
//!
//! # Features
//!
//! - **no_std compatible** - Works on embedded systems
//! - **Panel templates** - Pre-configured specs for Waveshare panels
//! - **Serde support** - Optional serialization for JSON configs
//!
//! # Example
//!
//! ```
//! use eink_specs::displays::WAVESHARE_7_5_B_V2;
//!
//! let spec = WAVESHARE_7_5_B_V2;
//! assert_eq!((spec.width, spec.height), (800, 480));
//! assert_eq!(spec.bytes_per_row(), 100);
//! ```
//!
//! # Custom Panel Specs
//!
//! ```
//! use eink_specs::DisplaySpec;
//!
//! const MY_PANEL: DisplaySpec = DisplaySpec {
//!     name: "Bench Panel",
//!     width: 300,
//!     height: 200,
//!     full_refresh_ms: 12_000,
//! };
//! assert_eq!(MY_PANEL.plane_len(), 38 * 200);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod display_spec;
pub mod displays;

pub use display_spec::DisplaySpec;
