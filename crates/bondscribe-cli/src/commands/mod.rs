//! Command implementations.

pub mod classify;
pub mod connect;
pub mod extract;

pub use self::classify::execute_classify;
pub use self::connect::execute_connect;
pub use self::extract::execute_extract;
