//! Repository modules implementing CRUD operations for all Lex entities.
//!
//! Each module adds methods to `LexService` via `impl LexService` blocks.

pub mod audit;
pub mod customer;
pub mod job;
pub mod petition;
pub mod user;
