pub mod bank_file;
pub mod record;
pub mod repository;
pub mod sqlite;
