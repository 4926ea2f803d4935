//! Domain core for the placement-experience tracker: the experience form and
//! its wizard, the wire codec for the backend's flat records, session state
//! and account forms. Nothing here performs I/O.

pub mod catalog;
pub mod department;
pub mod error;
pub mod experience;
pub mod registration;
pub mod round_editor;
pub mod session;
pub mod submission_validation;
pub mod transport;
pub mod types;
pub mod user;
pub mod wizard;

#[cfg(test)]
mod test_support;
