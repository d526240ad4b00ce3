pub mod reset_db;
pub mod sync;
