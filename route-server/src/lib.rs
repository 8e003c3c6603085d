//! Multi-objective shipping route planner.
//!
//! Answers: "What are the best few ways to ship cargo from here to there,
//! trading off time, price and emissions, without passing through these
//! countries?"

pub mod cache;
pub mod domain;
pub mod graph;
pub mod planner;
pub mod web;
