//! Types shared between the PreSchool Chat backend and its clients.

pub mod constants;
pub mod error;
pub mod protocol;
pub mod types;
