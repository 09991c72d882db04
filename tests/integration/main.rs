//! Integration tests for the resource accessor generator

mod cli_contracts;
mod generation_properties;
mod parse_matrix;
mod support;
