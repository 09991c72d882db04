//! Config source composition.

pub mod service;
