//! Stages one file passes through on its way to the endpoint.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ (controller validates) ──▶ transport ──▶ response
//! (path)                                (multipart)   (envelope)
//! ```
//!
//! 1. [`input`]: read a local path into a `SelectedFile` with a declared MIME type
//! 2. [`transport`]: POST the file as a one-field multipart form; the only
//!    stage with network I/O
//! 3. [`response`]: decode the `{ data, error }` JSON envelope into URLs or
//!    a per-file error

pub mod input;
pub mod response;
pub mod transport;
