//! Storage and session collaborators for the galaxy site.
//!
//! The remote table store is reached only through the [`ProjectStore`] and
//! [`ProfileStore`] ports. [`MemoryStore`] backs both in-process. The
//! [`Catalog`] sits on top: it loads records, derives planet attributes and
//! publishes the result on watch channels.
//!
//! [`SessionGuard`] is the shared-secret admin gate.

mod catalog;
mod error;
mod memory;
mod ports;
mod session;

pub use catalog::Catalog;
pub use error::{SessionError, StoreError};
pub use memory::MemoryStore;
pub use ports::{ProfileStore, ProjectStore};
pub use session::{
    Authorization, MemorySessionStorage, SessionConfig, SessionGuard, SessionStorage,
    DEFAULT_SESSION_TTL_HOURS, LOGIN_REDIRECT, SESSION_EXPIRES_KEY, SESSION_KEY, SESSION_TOKEN,
};
