//! Domain types and pure rules for the academy backend.
//!
//! Nothing in this crate performs I/O. The database and HTTP layers depend on
//! it for shared identifiers, the domain error type, and the role guards
//! applied before writes.

pub mod error;
pub mod naming;
pub mod pagination;
pub mod roles;
pub mod salary;
pub mod types;
