//! Feedback Forms - Multi-section feedback forms with branching navigation
//!
//! Authors build forms out of ordered sections whose choice options can
//! jump forward to later sections. Visitors fill them in one section at a
//! time, following those jumps, and submit a flat list of answers to the
//! upstream forms API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
