pub mod boundary;
pub mod bridge;

pub use boundary::BoundaryError;
pub use bridge::BridgeError;
