use crate::{gradient_for, id_hash, importance_for, EntityFeatures, PlanetColor, PlanetSize};
use serde::{Deserialize, Serialize};

/// Colour and importance of a planet. Always recomputed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualAttributes {
    pub color: PlanetColor,
    pub importance: u8,
}

impl VisualAttributes {
    pub fn size(&self) -> PlanetSize {
        PlanetSize::from_importance(self.importance)
    }

    pub fn gradient(&self) -> String {
        gradient_for(self.color)
    }
}

/// Palette colour for an id: `|id_hash(id)| mod 16`.
pub fn color_for(id: &str) -> PlanetColor {
    let index = id_hash(id).unsigned_abs() as usize % PlanetColor::ALL.len();
    PlanetColor::from_index(index)
}

/// Both attributes for an entity.
pub fn derive(id: &str, features: &EntityFeatures) -> VisualAttributes {
    VisualAttributes {
        color: color_for(id),
        importance: importance_for(id, features),
    }
}
