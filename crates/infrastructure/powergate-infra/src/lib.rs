pub mod fs;
pub mod kv;
pub mod net;

// Re-exports for convenience
pub use kv::{FileKvStore, StoreError};
pub use net::{default_http_client, HttpSystemClient};
