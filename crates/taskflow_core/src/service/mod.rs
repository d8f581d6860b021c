//! Core use-case services.
//!
//! # Responsibility
//! - Express every state mutation as a pure reducer over `AppState`.
//! - Orchestrate reducer, persistence and derived views in `AppService`.
//! - Provide projections (visible tasks, calendar grid) and task timers.

pub mod app_service;
pub mod calendar;
pub mod state;
pub mod task_filter;
pub mod timer;
