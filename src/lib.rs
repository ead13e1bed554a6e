//! UCAccess: Access-Request Management for Unity Catalog
//!
//! Core library behind the data-access admin tool: M2M token acquisition
//! and caching, catalog synchronization from the Unity Catalog REST API,
//! and the submit/approve/reject lifecycle of access requests with JSON
//! file persistence.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod requests;
