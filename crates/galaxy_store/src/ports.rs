use crate::StoreError;
use async_trait::async_trait;
use galaxy_types::{NewProject, ProfileRecord, ProjectPatch, ProjectRecord};

/// The `projects` table.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// All projects, newest first.
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, StoreError>;

    /// Insert a project; the backend assigns `id` and `created_at`.
    async fn create_project(&self, project: NewProject) -> Result<ProjectRecord, StoreError>;

    async fn update_project(&self, id: &str, patch: &ProjectPatch) -> Result<(), StoreError>;

    async fn delete_project(&self, id: &str) -> Result<(), StoreError>;
}

/// The single-row `profile` table.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// The profile row, or `None` if the table is empty.
    async fn load_profile(&self) -> Result<Option<ProfileRecord>, StoreError>;

    /// Insert or replace the row with the record's id. Returns the stored row.
    async fn upsert_profile(&self, record: &ProfileRecord) -> Result<ProfileRecord, StoreError>;
}
