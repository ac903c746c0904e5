//! # gate-core
//!
//! Core types and rules for the gatepass visitor desk.
//!
//! This crate owns everything that does not touch the network:
//! - Record shapes for members, security staff, visitors, and users
//! - The visit lifecycle (`open → closed`) with check-in/check-out rules
//! - Presence validation for directory create/update payloads
//! - Read-only projections over visitor collections (today, date range, search)
//! - Role routing tables and the society house catalog
//! - The `{success, data, message}` wire envelope and the `{ok, ...}` outcome shape
//! - The explicit [`session::SessionContext`] threaded through every store call

pub mod entities;
pub mod enums;
pub mod errors;
pub mod housing;
pub mod lifecycle;
pub mod projections;
pub mod responses;
pub mod routing;
pub mod session;
pub mod validation;
