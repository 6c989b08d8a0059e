//! Database module

pub mod init;

pub use init::init_database;
