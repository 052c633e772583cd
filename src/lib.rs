#![allow(clippy::doc_markdown)]

//! Cheapest non-overlapping placement of fixed-duration maintenance events onto a slotted horizon
//! with per-slot electricity and labor prices.

pub mod core;
pub mod cost;
pub mod error;
pub mod prelude;
pub mod report;
pub mod request;
pub mod tables;
