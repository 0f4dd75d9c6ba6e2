//! Input adapters for roster data.

pub mod csv;
