// src/dev/mod.rs
// Helpers for the integration tests.
pub mod generator;
