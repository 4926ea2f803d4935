//! Text front-end for the placement tracker.
//!
//! [`args`] holds the clap definitions, [`commands`] drives the client for
//! each subcommand and [`render`] turns the results into plain text.

pub mod args;
pub mod commands;
pub mod render;
