//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-statement writes run
//! inside a single transaction; returning early drops the transaction and
//! rolls it back.

pub mod credential_repo;
pub mod group_repo;
pub mod person_repo;
pub mod salary_repo;
pub mod subject_repo;

pub use credential_repo::CredentialRepo;
pub use group_repo::GroupRepo;
pub use person_repo::PersonRepo;
pub use salary_repo::SalaryRepo;
pub use subject_repo::SubjectRepo;
