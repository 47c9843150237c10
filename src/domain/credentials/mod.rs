//! Credential domain

mod credential;

pub use credential::Credential;
