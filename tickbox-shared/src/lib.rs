//! # Tickbox shared library
//!
//! Common functionality shared by the Tickbox API server and its tests.
//!
//! ## Modules
//!
//! - `auth`: JWT tokens, password hashing, OTP codes, request auth context
//! - `db`: PostgreSQL pool management and migrations
//! - `filters`: due-date window predicates for todo listing
//! - `mail`: outbound email abstraction (SMTP, log-only, in-memory)
//! - `models`: database models with typed CRUD operations

pub mod auth;
pub mod db;
pub mod filters;
pub mod mail;
pub mod models;
