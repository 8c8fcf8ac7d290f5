//! # PTUI API
//!
//! The external-collaborator seam of the patient-treatment UI core.
//!
//! Contains:
//! - [`PatientTreatmentApi`], the asynchronous trait every controller talks
//!   to instead of a concrete HTTP client
//! - [`UserNotifier`] and [`PageTitle`], the user-feedback collaborators
//! - The query value types ([`NamePattern`], [`SortOrder`]) and the
//!   [`ApiError`] taxonomy
//! - [`InMemoryApi`], a reference implementation backed by in-process maps,
//!   used by the demo binary and the controller tests
//!
//! Transport concerns (HTTP, base URLs, serialisation of query strings)
//! belong to whichever crate implements [`PatientTreatmentApi`].

pub mod error;
pub mod inmem;
pub mod query;
pub mod service;

pub use error::ApiError;
pub use inmem::InMemoryApi;
pub use query::{NamePattern, SortDirection, SortOrder};
pub use service::{LogNotifier, LogPageTitle, PageTitle, PatientTreatmentApi, UserNotifier};
