//! Deterministic visual attributes for galaxy planets.
//!
//! Every planet gets a colour and an importance (render size) derived purely
//! from its id and a few features of the record. Nothing is persisted: the
//! same inputs produce the same attributes on every call, in every process,
//! on every platform.
//!
//! # Derivation
//!
//! ```text
//! id ──► id_hash (i32, UTF-16 rolling) ──┬──► |h| mod 16 ──► PlanetColor
//!                                        │
//! EntityFeatures ──► bonus ──────────────┴──► |h| mod 5 + 2 + bonus/2 ──► importance [2, 6]
//! ```
//!
//! # Example
//!
//! ```
//! use galaxy_attrs::{derive, EntityFeatures, PlanetColor};
//!
//! let features = EntityFeatures::new(16, 4, false);
//! let attrs = derive("1", &features);
//!
//! assert_eq!(attrs.color, PlanetColor::Pink);
//! assert_eq!(attrs.color.hex(), "#ec4899");
//! assert_eq!(attrs.importance, 6);
//! ```

mod attributes;
mod hash;
mod importance;
mod palette;

pub use attributes::{color_for, derive, VisualAttributes};
pub use hash::id_hash;
pub use importance::{importance_for, EntityFeatures, PlanetSize};
pub use palette::{adjust_brightness, gradient_for, ColorParseError, PlanetColor, Rgb};

/// Number of colours in the planet palette.
pub const PALETTE_SIZE: usize = 16;

/// Smallest importance a planet can have.
pub const MIN_IMPORTANCE: u8 = 2;

/// Largest importance a planet can have.
pub const MAX_IMPORTANCE: u8 = 6;

/// Brightness increase applied to the lighter end of a planet gradient.
pub const GRADIENT_LIGHTEN_PERCENT: i32 = 30;
