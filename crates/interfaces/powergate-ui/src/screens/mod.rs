pub mod backend;
pub mod cover;
pub mod fatal;
