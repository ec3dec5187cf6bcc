//! Delphi Estimator - Distributed effort estimation sessions
//!
//! This crate stores estimation sessions (users, work packages and per-user
//! three-point estimates) and computes PERT efforts, standard deviations,
//! averages and max-distance rankings over them.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
