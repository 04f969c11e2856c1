//! # lex-core
//!
//! Core types, ID generation prefixes, and error types for Lex.
//!
//! This crate provides the foundational types shared across all Lex crates:
//! - Entity structs for all domain objects (users, customers, petitions, jobs)
//! - Status enums with state machine transitions
//! - ID prefix constants
//! - Form payloads with validation rules
//! - Cross-cutting error types
//! - HTTP API response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod input;
pub mod responses;
