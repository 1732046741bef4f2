pub mod broadcast;
pub mod database;
pub mod docs;
pub mod server;
