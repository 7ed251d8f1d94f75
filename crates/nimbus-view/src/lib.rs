//! # nimbus-view
//!
//! The reconciliation core: a reducer-driven view-model store holding the
//! selected folder and its children, the navigation controller that feeds
//! it from the live stores and the catalog, and the breadcrumb resolver.
//!
//! The UI reads [`store::ViewStore`] snapshots (or follows its watch
//! channel), drives navigation through
//! [`controller::NavigationController::select`] and
//! [`controller::NavigationController::refresh`], and derives the header
//! chain with [`breadcrumb::resolve_path`].

pub mod breadcrumb;
pub mod controller;
pub mod state;
pub mod store;

pub use breadcrumb::{Breadcrumb, resolve_path};
pub use controller::NavigationController;
pub use state::{Action, Epoch, ViewState};
pub use store::ViewStore;
