//! ID prefixes, entity type tags, and conventional audit action tags.
//!
//! IDs are `<prefix>-<8 hex>`, generated in SQL by `AdvDb::generate_id`.

pub const PREFIX_CASE: &str = "cas";
pub const PREFIX_AUDIT: &str = "aud";
pub const PREFIX_PARTY: &str = "usr";
pub const PREFIX_DOCUMENT: &str = "doc";
pub const PREFIX_CONSULTATION: &str = "vid";
pub const PREFIX_NOTIFICATION: &str = "ntf";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_CASE,
    PREFIX_AUDIT,
    PREFIX_PARTY,
    PREFIX_DOCUMENT,
    PREFIX_CONSULTATION,
    PREFIX_NOTIFICATION,
];

/// Entity type tag written to the audit log for case records.
pub const ENTITY_DOPING_CASE: &str = "doping_case";
pub const ENTITY_USER: &str = "user";

pub const ACTION_CASE_CREATE: &str = "case_create";
pub const ACTION_CASE_STATUS_UPDATE: &str = "case_status_update";
pub const ACTION_CASE_LAWYER_ASSIGN: &str = "case_lawyer_assign";
