//! Base types and error handling.
//!
//! - [`NetError`](neterror::NetError): network error codes in Chromium's numbering
//! - [`context`]: helpers attaching host and phase context to lower-level errors

pub mod context;
pub mod neterror;
