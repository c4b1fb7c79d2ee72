// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;
use tonic::{Code, Status};

/// ExportError is the result of a failed export call.
///
/// Partial rejection by the collector is not an error; it is returned inside
/// a successful response. The client never retries internally, so every
/// variant here describes exactly one failed call.
#[derive(Clone, Debug)]
pub enum ExportError {
    /// The channel could not be established or the call failed at the
    /// network/protocol layer
    Transport(String),

    /// The call did not complete within the configured deadline
    DeadlineExceeded,

    /// The caller cancelled the in-flight call
    Cancelled,

    /// The client has been shut down; no further sends are permitted
    Closed,
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Transport(detail) => write!(f, "transport error: {}", detail),
            ExportError::DeadlineExceeded => write!(f, "deadline exceeded"),
            ExportError::Cancelled => write!(f, "call cancelled"),
            ExportError::Closed => write!(f, "client closed"),
        }
    }
}

impl Error for ExportError {}

impl ExportError {
    /// Classify a gRPC status from the collector. Deadline and cancellation
    /// codes keep their identity so callers can distinguish "slow" from
    /// "broken"; everything else is a transport-level failure.
    pub(crate) fn from_status(status: Status) -> Self {
        match status.code() {
            Code::DeadlineExceeded => ExportError::DeadlineExceeded,
            Code::Cancelled => ExportError::Cancelled,
            _ => ExportError::Transport(format!(
                "grpc status {:?}: {}",
                status.code(),
                status.message()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        let err = ExportError::from_status(Status::new(Code::Unavailable, "refused"));
        assert!(matches!(err, ExportError::Transport(_)));

        let err = ExportError::from_status(Status::new(Code::DeadlineExceeded, "slow"));
        assert!(matches!(err, ExportError::DeadlineExceeded));

        let err = ExportError::from_status(Status::new(Code::Cancelled, "stop"));
        assert!(matches!(err, ExportError::Cancelled));
    }
}
