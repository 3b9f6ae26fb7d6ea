//! Database queries

pub mod camp;
