//! HTTP adapter for the placement-tracker backend.
//!
//! [`api::PlacementApi`] wraps every REST route group; [`workflow`] drives
//! the experience wizard against it; [`file_store::JsonFileStore`] backs the
//! session store with a JSON file.

pub mod admin;
pub mod api;
pub mod auth;
pub mod companies;
pub mod config;
pub mod departments;
pub mod experiences;
pub mod file_store;
pub mod workflow;
