//! Request, response and error types.
pub mod handler;
pub mod request;
pub mod response;
