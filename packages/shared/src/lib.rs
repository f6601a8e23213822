//! Utilities shared by the Sanmoku server binary and its tests.

pub mod logger;
pub mod time;
