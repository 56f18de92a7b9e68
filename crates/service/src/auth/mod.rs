//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Credential checks, registration and operator account administration.
//! Session handling stays in the HTTP layer; the identity it resolves is
//! passed explicitly into every call that needs it.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::{AuthConfig, AuthService};
