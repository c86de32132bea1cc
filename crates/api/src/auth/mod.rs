//! Password hashing for stored credentials.

pub mod password;
