// src/lib.rs

//! hackdash Library
//!
//! Scrapes Devpost hackathon project galleries and serves them from a
//! staleness-aware in-process cache with a background refresh sweep.

pub mod cache;
pub mod config;
pub mod devpost;
pub mod dom;
pub mod error;
pub mod models;
