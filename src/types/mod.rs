//! Request and response types for the generate endpoint.

pub mod params;
pub mod request;
pub mod response;

// Re-export commonly used types
pub use params::*;
pub use request::*;
pub use response::*;
