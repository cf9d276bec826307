//! OpenAPI-to-Terraform schema mapping
//!
//! This crate turns a parsed OpenAPI v3 document plus a generator config
//! into the provider specification IR:
//!
//! - [`openapi`] holds the serde document model the rest of the crate walks.
//! - [`explorer`] resolves configured CRUD operations against the document.
//! - [`oas`] classifies schema nodes and builds typed attributes.
//! - [`attrmapper`] merges attribute sets across operations and applies
//!   name-keyed overrides.
//! - [`resource`], [`datasource`], and [`request`] drive the above per
//!   configured name and assemble IR records.
//!
//! Mapping is batch-tolerant: a malformed resource is skipped with a
//! warning, never aborting the run.

pub mod attrmapper;
pub mod datasource;
pub mod explorer;
pub mod oas;
pub mod openapi;
pub mod request;
pub mod resource;
pub mod util;

pub use datasource::DataSourceMapper;
pub use request::RequestMapper;
pub use resource::ResourceMapper;
