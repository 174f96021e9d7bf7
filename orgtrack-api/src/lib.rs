//! # orgtrack API server library
//!
//! HTTP layer for the orgtrack service: JSON CRUD endpoints for
//! departments, tasks, and users backed by PostgreSQL.
//!
//! ## Modules
//!
//! - `app`: application state and router builder
//! - `config`: configuration management
//! - `dto`: transfer objects used at the HTTP boundary
//! - `error`: error handling and HTTP response mapping
//! - `mapper`: entity ↔ DTO conversions
//! - `routes`: route handlers per resource
//! - `services`: per-entity orchestration between mapper and models

pub mod app;
pub mod config;
pub mod dto;
pub mod error;
pub mod mapper;
pub mod routes;
pub mod services;
