//! Project rows and the writes that produce them.

use chrono::{DateTime, Utc};
use galaxy_attrs::EntityFeatures;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Coordinate used when a position is missing or zero.
pub const DEFAULT_COORDINATE: f64 = 50.0;

/// Planet position on the galaxy canvas, in percent of each axis.
///
/// Stored remotely as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            x: DEFAULT_COORDINATE,
            y: DEFAULT_COORDINATE,
        }
    }
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Position from loosely-typed input. A missing, zero or non-finite
    /// coordinate becomes [`DEFAULT_COORDINATE`].
    pub fn from_raw(x: Option<f64>, y: Option<f64>) -> Self {
        let coord = |v: Option<f64>| match v {
            Some(v) if v.is_finite() && v != 0.0 => v,
            _ => DEFAULT_COORDINATE,
        };
        Self {
            x: coord(x),
            y: coord(y),
        }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Position {
    /// Accepts short arrays and `null` elements; gaps are defaulted.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<Option<f64>>::deserialize(deserializer)?;
        let at = |i: usize| raw.get(i).copied().flatten();
        Ok(Self::from_raw(at(0), at(1)))
    }
}

/// A project row from the remote store.
///
/// Remote rows list their technologies in `skills_used`; the static demo
/// data uses `tags`. When both are present `skills_used` wins.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_used: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(rename = "Position", default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ProjectRecord {
    /// The authoritative technology list.
    pub fn skills(&self) -> &[String] {
        self.skills_used
            .as_deref()
            .or(self.tags.as_deref())
            .unwrap_or_default()
    }

    /// Position with defaults applied.
    pub fn position(&self) -> Position {
        self.position.unwrap_or_default()
    }

    pub fn has_external_link(&self) -> bool {
        self.github_link.as_deref().is_some_and(|l| !l.is_empty())
    }

    pub fn features(&self) -> EntityFeatures {
        EntityFeatures::from(self)
    }
}

impl From<&ProjectRecord> for EntityFeatures {
    fn from(record: &ProjectRecord) -> Self {
        EntityFeatures::new(
            record.title.encode_utf16().count(),
            record.skills().len(),
            record.has_external_link(),
        )
    }
}

/// Admin form input for a new project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub live_link: Option<String>,
    #[serde(default)]
    pub github_link: Option<String>,
    #[serde(default)]
    pub skills_used: Vec<String>,
    #[serde(default)]
    pub x_position: Option<f64>,
    #[serde(default)]
    pub y_position: Option<f64>,
}

impl NewProject {
    pub fn position(&self) -> Position {
        Position::from_raw(self.x_position, self.y_position)
    }

    /// The row to insert, before the store assigns `id` and `created_at`.
    pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> ProjectRecord {
        let position = self.position();
        ProjectRecord {
            id,
            title: self.title,
            description: self.description,
            live_link: Some(self.live_link.unwrap_or_default()),
            github_link: Some(self.github_link.unwrap_or_default()),
            skills_used: Some(self.skills_used),
            tags: None,
            position: Some(position),
            created_at: Some(created_at),
        }
    }
}

/// Partial update of a project. `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub live_link: Option<String>,
    #[serde(default)]
    pub github_link: Option<String>,
    #[serde(default)]
    pub skills_used: Option<Vec<String>>,
    #[serde(default)]
    pub x_position: Option<f64>,
    #[serde(default)]
    pub y_position: Option<f64>,
}

impl ProjectPatch {
    /// New position, if either coordinate was supplied. The other one is
    /// defaulted rather than kept.
    pub fn position(&self) -> Option<Position> {
        if self.x_position.is_none() && self.y_position.is_none() {
            return None;
        }
        Some(Position::from_raw(self.x_position, self.y_position))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, record: &mut ProjectRecord) {
        if let Some(title) = &self.title {
            record.title = title.clone();
        }
        if let Some(description) = &self.description {
            record.description = description.clone();
        }
        if let Some(link) = &self.live_link {
            record.live_link = Some(link.clone());
        }
        if let Some(link) = &self.github_link {
            record.github_link = Some(link.clone());
        }
        if let Some(skills) = &self.skills_used {
            record.skills_used = Some(skills.clone());
        }
        if let Some(position) = self.position() {
            record.position = Some(position);
        }
    }
}
