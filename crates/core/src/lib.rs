//! Domain types, validation rules and asset resolution shared by the
//! database and HTTP layers. Nothing in this crate touches the database.

pub mod account;
pub mod assets;
pub mod error;
pub mod pagination;
pub mod records;
pub mod types;
