//! Data contracts shared by the galaxy crates.
//!
//! - [`ProjectRecord`]: a project row as the remote store returns it
//! - [`NewProject`] / [`ProjectPatch`]: admin-side writes
//! - [`Profile`] / [`ProfileRecord`]: the single profile row
//! - [`Planet`]: a record projected for rendering, with derived attributes
//! - [`demo_projects`]: static data used when no store is configured

mod demo;
mod planet;
mod profile;
mod project;

pub use demo::{demo_profile, demo_projects};
pub use planet::Planet;
pub use profile::{
    Profile, ProfileRecord, DEFAULT_ABOUT_TEXT, DEFAULT_COLLAB_TEXT, DEFAULT_HIRE_FORM_LINK,
    DEFAULT_HIRE_TEXT,
};
pub use project::{NewProject, Position, ProjectPatch, ProjectRecord, DEFAULT_COORDINATE};

pub use galaxy_attrs::EntityFeatures;
