//! gcn-trim library
//!
//! Core instruction classification logic for trimming GCN Southern Islands
//! GPUs to the datapaths an application actually exercises.

pub mod config;
pub mod isa;
pub mod summary;
pub mod trace;
