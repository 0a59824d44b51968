pub mod animal;
pub mod auth;
pub mod dashboard;
pub mod doctor;
pub mod export;
pub mod home;
pub mod visit;
