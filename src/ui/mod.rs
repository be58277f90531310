//! Terminal presentation helpers

pub mod symbols;
pub mod theme;
