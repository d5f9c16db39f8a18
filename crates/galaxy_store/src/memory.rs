//! In-process backend for both store ports.

use crate::{ProfileStore, ProjectStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use galaxy_types::{NewProject, ProfileRecord, ProjectPatch, ProjectRecord};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    /// Insertion sequence breaks ties between equal timestamps.
    projects: Vec<(u64, ProjectRecord)>,
    next_seq: u64,
    profile: Option<ProfileRecord>,
}

/// Projects and profile held in memory. Cloning shares the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `records`, kept as given.
    pub fn with_projects(records: impl IntoIterator<Item = ProjectRecord>) -> Self {
        let mut tables = Tables::default();
        for record in records {
            tables.next_seq += 1;
            tables.projects.push((tables.next_seq, record));
        }
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    pub async fn project_count(&self) -> usize {
        self.tables.read().await.projects.len()
    }
}

fn require_title(title: &str) -> Result<(), StoreError> {
    if title.trim().is_empty() {
        return Err(StoreError::invalid("project title is empty"));
    }
    Ok(())
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, StoreError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<_> = tables.projects.iter().collect();
        rows.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| seq_b.cmp(seq_a))
        });
        Ok(rows.into_iter().map(|(_, record)| record.clone()).collect())
    }

    async fn create_project(&self, project: NewProject) -> Result<ProjectRecord, StoreError> {
        require_title(&project.title)?;

        let record = project.into_record(Uuid::new_v4().to_string(), Utc::now());
        let mut tables = self.tables.write().await;
        tables.next_seq += 1;
        let seq = tables.next_seq;
        tables.projects.push((seq, record.clone()));
        Ok(record)
    }

    async fn update_project(&self, id: &str, patch: &ProjectPatch) -> Result<(), StoreError> {
        if let Some(title) = &patch.title {
            require_title(title)?;
        }

        let mut tables = self.tables.write().await;
        let (_, record) = tables
            .projects
            .iter_mut()
            .find(|(_, r)| r.id == id)
            .ok_or_else(|| StoreError::not_found(format!("project {id}")))?;
        patch.apply_to(record);
        Ok(())
    }

    async fn delete_project(&self, id: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.projects.len();
        tables.projects.retain(|(_, r)| r.id != id);
        if tables.projects.len() == before {
            return Err(StoreError::not_found(format!("project {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn load_profile(&self) -> Result<Option<ProfileRecord>, StoreError> {
        Ok(self.tables.read().await.profile.clone())
    }

    async fn upsert_profile(&self, record: &ProfileRecord) -> Result<ProfileRecord, StoreError> {
        let stored = ProfileRecord {
            updated_at: Some(Utc::now()),
            ..record.clone()
        };
        self.tables.write().await.profile = Some(stored.clone());
        Ok(stored)
    }
}
