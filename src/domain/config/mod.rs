pub mod drive;
pub mod server;
