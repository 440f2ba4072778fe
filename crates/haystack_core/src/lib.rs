//! Core engines for the `haystack` site-administration CLI: a structured
//! wp-cli request runner, the multisite spam purge, and the bbPress role
//! purge.

pub mod config;
pub mod error;
pub mod roles;
pub mod runner;
pub mod sites;
pub mod spam;

#[cfg(test)]
pub(crate) mod testing;
