//! # adv-core
//!
//! Core types, case identities, and the error taxonomy for Advocate.
//!
//! This crate provides the foundational types shared across all Advocate crates:
//! - Entity structs for case records, parties, audit entries, and timeline events
//! - Case status and party role enums
//! - ID prefix constants and case-number formatting
//! - The `CaseError` taxonomy returned by every case operation
//! - Audit detail payloads and conventional action tags
//! - Caller identity passed into role-scoped operations

pub mod audit_detail;
pub mod case_number;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
