// src/dev/mod.rs
// Helpers for fuzzing and tests; not used by the table builder itself.
pub mod generator;
