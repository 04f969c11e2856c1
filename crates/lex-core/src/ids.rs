//! ID prefixes for every persisted entity.
//!
//! IDs have the form `<prefix>-<8 lowercase hex>`, e.g. `pet-a3f8b2c1`. The
//! random part is produced by the database (see `LexDb::generate_id`).

pub const PREFIX_USER: &str = "usr";
pub const PREFIX_CUSTOMER: &str = "cus";
pub const PREFIX_PETITION: &str = "pet";
pub const PREFIX_JOB: &str = "job";
pub const PREFIX_AUDIT: &str = "aud";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_USER,
    PREFIX_CUSTOMER,
    PREFIX_PETITION,
    PREFIX_JOB,
    PREFIX_AUDIT,
];

/// Check whether `id` looks like an ID with the given prefix.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
