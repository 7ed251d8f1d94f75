//! # nimbus-catalog
//!
//! The request/response catalog API: the secondary, poll-style source the
//! view is reconciled from, and the surface folder/file CRUD goes
//! through. This crate defines the contract ([`CatalogApi`]) and its
//! DTOs, plus an HTTP client implementation authenticated with bearer
//! credentials from the session's [`nimbus_core::traits::TokenProvider`].

pub mod contract;
pub mod http;

pub use contract::{
    CatalogApi, ChildListing, CreateFolderRequest, MutationOutcome, UpdateFileRequest,
    UploadFileRequest,
};
pub use http::HttpCatalogClient;
