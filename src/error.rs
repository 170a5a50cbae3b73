//! Error types for the cluster host registry
//!
//! Registry operations are total over their input domain and report
//! outcomes through booleans and `Option`, so the only fallible surface
//! in this crate is parsing a `host:port` transfer address into a
//! [`DatanodeId`](crate::descriptor::DatanodeId).

use thiserror::Error;

/// Unified error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid transfer address {addr:?}: missing ':port' suffix")]
    MissingPort { addr: String },

    #[error("invalid transfer address {addr:?}: bad port")]
    InvalidPort {
        addr: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingPort {
            addr: "1.1.1.1".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid transfer address \"1.1.1.1\": missing ':port' suffix"
        );
    }
}
