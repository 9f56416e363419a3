pub mod client;
pub mod error;
pub mod protocol;

pub use client::{Backend, HttpBackend};
pub use error::{ClientError, ClientResult};
