//! # Catalog
//!
//! The fixed set of competencies and jobs that a profile is matched against.
//!
//! Records are loaded once from `competencies.json` and `jobs.json`, validated,
//! and are read-only afterwards.
//!
//! ```rust,ignore
//! use careerlens_catalog::Catalog;
//!
//! let catalog = Catalog::load_dir("data").await?;
//! for job in catalog.jobs() {
//!     println!("{} requires {:?}", job.title, job.required_competencies);
//! }
//! ```

pub mod error;
pub mod model;
pub mod store;

pub use error::{CatalogError, RecordKind, Result};
pub use model::{Competency, Job};
pub use store::{COMPETENCIES_FILE, Catalog, DanglingReference, JOBS_FILE};
