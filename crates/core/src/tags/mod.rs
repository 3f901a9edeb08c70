//! Tags module - canonical identities for free-text tags.

pub mod inflector;
mod tag_model;

#[cfg(test)]
mod tags_tests;

pub use tag_model::{canonicalize, Tag};
