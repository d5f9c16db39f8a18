//! Planet catalog.
//!
//! Wraps the store ports with the behaviour the site expects: every load
//! derives planet attributes afresh and publishes them; read failures are
//! logged and leave the previous planets in place; write failures are
//! returned to the caller, and successful writes trigger a reload.

use crate::{ProfileStore, ProjectStore, StoreError};
use galaxy_types::{NewProject, Planet, Profile, ProfileRecord, ProjectPatch, ProjectRecord};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info};

pub struct Catalog {
    projects: Arc<dyn ProjectStore>,
    profiles: Arc<dyn ProfileStore>,
    planets_tx: watch::Sender<Vec<Planet>>,
    planets_rx: watch::Receiver<Vec<Planet>>,
    profile_tx: watch::Sender<Profile>,
    profile_rx: watch::Receiver<Profile>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("planets", &self.planets_rx.borrow().len())
            .finish_non_exhaustive()
    }
}

impl Catalog {
    pub fn new(projects: Arc<dyn ProjectStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        let (planets_tx, planets_rx) = watch::channel(Vec::new());
        let (profile_tx, profile_rx) = watch::channel(Profile::default());
        Self {
            projects,
            profiles,
            planets_tx,
            planets_rx,
            profile_tx,
            profile_rx,
        }
    }

    /// Catalog over a single backend that serves both tables.
    pub fn with_store<S>(store: Arc<S>) -> Self
    where
        S: ProjectStore + ProfileStore + 'static,
    {
        Self::new(store.clone(), store)
    }

    // =========================================================================
    // PROJECTS
    // =========================================================================

    /// Reload all projects and publish their planets, newest first.
    ///
    /// A backend failure is logged and the previously published planets are
    /// returned unchanged.
    pub async fn load(&self) -> Vec<Planet> {
        match self.projects.list_projects().await {
            Ok(records) => {
                let planets: Vec<Planet> = records.iter().map(Planet::from_record).collect();
                info!(count = planets.len(), "catalog loaded");
                self.planets_tx.send_replace(planets.clone());
                planets
            }
            Err(e) => {
                error!(error = %e, "error loading projects");
                self.planets()
            }
        }
    }

    pub async fn add(&self, project: NewProject) -> Result<ProjectRecord, StoreError> {
        let record = self
            .projects
            .create_project(project)
            .await
            .inspect_err(|e| error!(error = %e, "error adding project"))?;
        debug!(id = %record.id, "project added");
        self.load().await;
        Ok(record)
    }

    pub async fn update(&self, id: &str, patch: &ProjectPatch) -> Result<(), StoreError> {
        self.projects
            .update_project(id, patch)
            .await
            .inspect_err(|e| error!(error = %e, id, "error updating project"))?;
        debug!(id, "project updated");
        self.load().await;
        Ok(())
    }

    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        self.projects
            .delete_project(id)
            .await
            .inspect_err(|e| error!(error = %e, id, "error deleting project"))?;
        debug!(id, "project deleted");
        self.load().await;
        Ok(())
    }

    /// Planets from the last successful load.
    pub fn planets(&self) -> Vec<Planet> {
        self.planets_rx.borrow().clone()
    }

    pub fn watch_planets(&self) -> watch::Receiver<Vec<Planet>> {
        self.planets_rx.clone()
    }

    // =========================================================================
    // PROFILE
    // =========================================================================

    /// Load the profile row.
    ///
    /// When the table is empty the default profile is written and
    /// published. A read failure is logged and the current profile kept.
    pub async fn load_profile(&self) -> Profile {
        match self.profiles.load_profile().await {
            Ok(Some(record)) => {
                let profile = Profile::from(record);
                self.profile_tx.send_replace(profile.clone());
                profile
            }
            Ok(None) => {
                info!("no profile row, creating default");
                match self.save_profile(&Profile::default()).await {
                    Ok(profile) => profile,
                    Err(_) => self.profile(),
                }
            }
            Err(e) => {
                error!(error = %e, "error loading profile");
                self.profile()
            }
        }
    }

    /// Upsert the profile and publish what the backend stored.
    pub async fn save_profile(&self, profile: &Profile) -> Result<Profile, StoreError> {
        let stored = self
            .profiles
            .upsert_profile(&ProfileRecord::from(profile))
            .await
            .inspect_err(|e| error!(error = %e, "error saving profile"))?;
        let profile = Profile::from(stored);
        self.profile_tx.send_replace(profile.clone());
        Ok(profile)
    }

    pub fn profile(&self) -> Profile {
        self.profile_rx.borrow().clone()
    }

    pub fn watch_profile(&self) -> watch::Receiver<Profile> {
        self.profile_rx.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use async_trait::async_trait;
    use galaxy_attrs::PlanetColor;
    use galaxy_types::demo_projects;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Memory store whose calls can be made to fail.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        failing: AtomicBool,
    }

    impl FlakyStore {
        fn check(&self) -> Result<(), StoreError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::Backend("connection reset".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ProjectStore for FlakyStore {
        async fn list_projects(&self) -> Result<Vec<ProjectRecord>, StoreError> {
            self.check()?;
            self.inner.list_projects().await
        }

        async fn create_project(&self, project: NewProject) -> Result<ProjectRecord, StoreError> {
            self.check()?;
            self.inner.create_project(project).await
        }

        async fn update_project(&self, id: &str, patch: &ProjectPatch) -> Result<(), StoreError> {
            self.check()?;
            self.inner.update_project(id, patch).await
        }

        async fn delete_project(&self, id: &str) -> Result<(), StoreError> {
            self.check()?;
            self.inner.delete_project(id).await
        }
    }

    #[async_trait]
    impl ProfileStore for FlakyStore {
        async fn load_profile(&self) -> Result<Option<ProfileRecord>, StoreError> {
            self.check()?;
            self.inner.load_profile().await
        }

        async fn upsert_profile(&self, record: &ProfileRecord) -> Result<ProfileRecord, StoreError> {
            self.check()?;
            self.inner.upsert_profile(record).await
        }
    }

    fn demo_catalog() -> (Catalog, MemoryStore) {
        let store = MemoryStore::with_projects(demo_projects());
        (Catalog::with_store(Arc::new(store.clone())), store)
    }

    #[tokio::test]
    async fn load_derives_attributes() {
        let (catalog, _) = demo_catalog();
        let planets = catalog.load().await;

        assert_eq!(planets.len(), 5);
        let first = planets.iter().find(|p| p.id == "1").unwrap();
        assert_eq!(first.color, PlanetColor::Pink);
        assert_eq!(first.importance, 6);
        assert_eq!(catalog.planets(), planets);
    }

    #[tokio::test]
    async fn load_publishes_on_watch_channel() {
        let (catalog, _) = demo_catalog();
        let mut rx = catalog.watch_planets();
        assert!(rx.borrow().is_empty());

        catalog.load().await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 5);
    }

    #[tokio::test]
    async fn load_failure_keeps_previous_planets() {
        let store = Arc::new(FlakyStore {
            inner: MemoryStore::with_projects(demo_projects()),
            ..Default::default()
        });
        let catalog = Catalog::with_store(store.clone());
        catalog.load().await;

        store.failing.store(true, Ordering::SeqCst);
        let planets = catalog.load().await;
        assert_eq!(planets.len(), 5);
    }

    #[tokio::test]
    async fn writes_propagate_errors() {
        let store = Arc::new(FlakyStore::default());
        store.failing.store(true, Ordering::SeqCst);
        let catalog = Catalog::with_store(store);

        let err = catalog
            .add(NewProject {
                title: "x".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::Backend("connection reset".into()));
        assert!(catalog.remove("1").await.is_err());
        assert!(catalog
            .update("1", &ProjectPatch::default())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn add_update_remove_reload() {
        let (catalog, _) = demo_catalog();
        catalog.load().await;

        let record = catalog
            .add(NewProject {
                title: "Comet Mail".into(),
                skills_used: vec!["Rust".into()],
                ..Default::default()
            })
            .await
            .unwrap();
        let planets = catalog.planets();
        assert_eq!(planets.len(), 6);
        assert_eq!(planets[0].id, record.id);

        catalog
            .update(
                &record.id,
                &ProjectPatch {
                    title: Some("Comet Mail 2".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(catalog.planets()[0].title, "Comet Mail 2");

        catalog.remove(&record.id).await.unwrap();
        assert_eq!(catalog.planets().len(), 5);
    }

    #[tokio::test]
    async fn empty_profile_table_gets_default_row() {
        let (catalog, store) = demo_catalog();
        let profile = catalog.load_profile().await;

        assert_eq!(profile, Profile::default());
        let row = store.load_profile().await.unwrap().unwrap();
        assert_eq!(row.about_text.as_deref(), Some(profile.about_text.as_str()));
    }

    #[tokio::test]
    async fn save_profile_publishes() {
        let (catalog, _) = demo_catalog();
        let mut rx = catalog.watch_profile();

        let edited = Profile {
            about_text: "Building with Rust".into(),
            ..Profile::default()
        };
        let saved = catalog.save_profile(&edited).await.unwrap();

        assert_eq!(saved, edited);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().about_text, "Building with Rust");
        assert_eq!(catalog.load_profile().await, edited);
    }

    #[tokio::test]
    async fn profile_read_failure_keeps_current() {
        let store = Arc::new(FlakyStore::default());
        let catalog = Catalog::with_store(store.clone());
        store.failing.store(true, Ordering::SeqCst);

        assert_eq!(catalog.load_profile().await, Profile::default());
    }
}
