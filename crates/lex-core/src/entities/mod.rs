//! Entity structs for all Lex domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `lex-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema validation.

mod audit;
mod customer;
mod job;
mod petition;
mod user;

pub use audit::AuditEntry;
pub use customer::Customer;
pub use job::GenerationJob;
pub use petition::Petition;
pub use user::User;
