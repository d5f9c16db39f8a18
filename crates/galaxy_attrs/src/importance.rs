//! Planet importance and size classes.

use crate::{id_hash, MAX_IMPORTANCE, MIN_IMPORTANCE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Title length above which a project earns an importance bonus point.
const LONG_TITLE: usize = 25;

/// Tag count above which a project earns an importance bonus point.
const MANY_TAGS: usize = 4;

/// The record features that feed into importance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityFeatures {
    /// Title length in UTF-16 code units.
    pub title_length: usize,
    pub tag_count: usize,
    pub has_external_link: bool,
}

impl EntityFeatures {
    pub fn new(title_length: usize, tag_count: usize, has_external_link: bool) -> Self {
        Self {
            title_length,
            tag_count,
            has_external_link,
        }
    }

    /// Bonus points, 0 to 3.
    fn bonus(&self) -> u8 {
        u8::from(self.title_length > LONG_TITLE)
            + u8::from(self.tag_count > MANY_TAGS)
            + u8::from(self.has_external_link)
    }
}

/// Importance in `[2, 6]`.
///
/// The id hash picks a base in `[0, 4]`; half the feature bonus (rounded
/// down) is added on top of `base + 2`, and the sum is capped at 6.
pub fn importance_for(id: &str, features: &EntityFeatures) -> u8 {
    // |i32::MIN| is 2^31, which fits in u32
    let base = (id_hash(id).unsigned_abs() % 5) as u8;
    (base + MIN_IMPORTANCE + features.bonus() / 2).min(MAX_IMPORTANCE)
}

/// Named size class for each importance value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanetSize {
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
}

impl PlanetSize {
    /// Size class for an importance. Values outside `[2, 6]` clamp to the
    /// nearest class.
    pub fn from_importance(importance: u8) -> Self {
        match importance {
            0..=2 => PlanetSize::Tiny,
            3 => PlanetSize::Small,
            4 => PlanetSize::Medium,
            5 => PlanetSize::Large,
            _ => PlanetSize::Huge,
        }
    }

    pub fn importance(self) -> u8 {
        match self {
            PlanetSize::Tiny => 2,
            PlanetSize::Small => 3,
            PlanetSize::Medium => 4,
            PlanetSize::Large => 5,
            PlanetSize::Huge => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlanetSize::Tiny => "tiny",
            PlanetSize::Small => "small",
            PlanetSize::Medium => "medium",
            PlanetSize::Large => "large",
            PlanetSize::Huge => "huge",
        }
    }
}

impl fmt::Display for PlanetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
