use crate::{Position, ProjectRecord};
use chrono::{DateTime, Utc};
use galaxy_attrs::{derive, PlanetColor, PlanetSize, VisualAttributes};
use serde::{Deserialize, Serialize};

/// A project ready to draw: the record's content plus its derived look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: String,
    pub title: String,
    pub description: String,
    pub live_link: String,
    pub github_link: String,
    pub skills: Vec<String>,
    pub position: Position,
    pub color: PlanetColor,
    pub importance: u8,
    pub size: PlanetSize,
    pub gradient: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Planet {
    pub fn from_record(record: &ProjectRecord) -> Self {
        let attrs = derive(&record.id, &record.features());
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            live_link: record.live_link.clone().unwrap_or_default(),
            github_link: record.github_link.clone().unwrap_or_default(),
            skills: record.skills().to_vec(),
            position: record.position(),
            color: attrs.color,
            importance: attrs.importance,
            size: attrs.size(),
            gradient: attrs.gradient(),
            created_at: record.created_at,
        }
    }

    pub fn attributes(&self) -> VisualAttributes {
        VisualAttributes {
            color: self.color,
            importance: self.importance,
        }
    }
}

impl From<&ProjectRecord> for Planet {
    fn from(record: &ProjectRecord) -> Self {
        Self::from_record(record)
    }
}
