//! Bus transit planner server.
//!
//! Answers two questions over a bus network: "which buses do I take to get
//! from this stop to that one?" and "when will my bus reach each stop?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
