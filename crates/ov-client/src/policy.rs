//! Error-kind policy table
//!
//! Every failure is first reduced to an [`ErrorKind`], then looked up
//! against the [`Phase`] it happened in to decide what the client does.
//!
//! | Phase   | Refused   | Transport | Protocol |
//! |---------|-----------|-----------|----------|
//! | Connect | Swallow   | Raise     | Raise    |
//! | Send    | RetryOnce | RetryOnce | Raise    |

use std::io;

use ov_protocol::ProtocolError;

/// Coarse classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing is listening at the address (yet)
    Refused,
    /// Any other socket-level failure
    Transport,
    /// Payload could not be encoded
    Protocol,
}

/// Where in a send the failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Connect,
    Send,
}

/// What the client does about a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Log it and carry on as if nothing happened
    Swallow,
    /// Drop the connection and try the whole send once more
    RetryOnce,
    /// Return the error to the caller
    Raise,
}

impl ErrorKind {
    /// Classify a socket error
    pub fn of_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => ErrorKind::Refused,
            _ => ErrorKind::Transport,
        }
    }

    /// Classify a framing error
    pub fn of_protocol(err: &ProtocolError) -> Self {
        match err {
            ProtocolError::Io(e) => Self::of_io(e),
            ProtocolError::Serialization(_) | ProtocolError::LineTooLong { .. } => {
                ErrorKind::Protocol
            }
        }
    }
}

/// Look up the policy for a failure
pub const fn policy(phase: Phase, kind: ErrorKind) -> Policy {
    match (phase, kind) {
        (Phase::Connect, ErrorKind::Refused) => Policy::Swallow,
        (Phase::Connect, ErrorKind::Transport | ErrorKind::Protocol) => Policy::Raise,
        (Phase::Send, ErrorKind::Refused | ErrorKind::Transport) => Policy::RetryOnce,
        (Phase::Send, ErrorKind::Protocol) => Policy::Raise,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_table() {
        assert_eq!(policy(Phase::Connect, ErrorKind::Refused), Policy::Swallow);
        assert_eq!(policy(Phase::Connect, ErrorKind::Transport), Policy::Raise);
        assert_eq!(policy(Phase::Send, ErrorKind::Transport), Policy::RetryOnce);
        assert_eq!(policy(Phase::Send, ErrorKind::Refused), Policy::RetryOnce);
        assert_eq!(policy(Phase::Send, ErrorKind::Protocol), Policy::Raise);
    }

    #[test]
    fn test_classify_io() {
        let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
        let reset = io::Error::from(io::ErrorKind::ConnectionReset);
        assert_eq!(ErrorKind::of_io(&refused), ErrorKind::Refused);
        assert_eq!(ErrorKind::of_io(&reset), ErrorKind::Transport);
    }

    #[test]
    fn test_classify_protocol() {
        let pipe = ProtocolError::Io(io::Error::from(io::ErrorKind::BrokenPipe));
        let too_long = ProtocolError::LineTooLong { size: 10, max: 5 };
        assert_eq!(ErrorKind::of_protocol(&pipe), ErrorKind::Transport);
        assert_eq!(ErrorKind::of_protocol(&too_long), ErrorKind::Protocol);
    }
}
