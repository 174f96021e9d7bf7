//! Entity models for orgtrack.
//!
//! Each model owns its CRUD operations against the relational store:
//!
//! - `department`: departments with their member users and tasks
//! - `task`: tasks with their owning department and assigned users
//! - `user`: users with their owning department and assigned tasks
//!
//! Entities are hydrated per request from query results and are not cached
//! across requests. Child objects embed a shallow clone of their department
//! (empty collections), so repeated references to the same department row
//! are distinct instances.

pub mod department;
pub mod task;
pub mod user;
