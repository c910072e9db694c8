//! SkillSwap - Skill Exchange Platform API
//!
//! This crate implements the swap-request lifecycle (propose, accept,
//! reject, complete, cancel) and post-swap ratings with a per-user
//! running aggregate.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
