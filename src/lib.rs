// src/lib.rs
pub mod config;
pub mod dev;
pub mod error;
pub mod nameslist;

pub use error::{NamesListError, Result};
