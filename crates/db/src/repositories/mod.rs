//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument. Owner-scoped entities
//! take the owner's id on every read and write so a query can never reach
//! another owner's rows.

pub mod animal_repo;
pub mod doctor_repo;
pub mod session_repo;
pub mod user_repo;
pub mod visit_repo;

pub use animal_repo::AnimalRepo;
pub use doctor_repo::DoctorRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
pub use visit_repo::VisitRepo;

/// SQL expression producing the current UTC time in RFC 3339 form, matching
/// the column defaults in the migrations.
pub(crate) const NOW: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";
