//! Startup readiness handshake
//!
//! The renderer prints [`READY_SENTINEL`] on stdout once its socket is
//! listening. The supervisor reads a bounded number of lines looking for it:
//! any other line is logged and skipped, and running out of lines is a hard
//! startup failure.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::error::SupervisorError;

/// Exact (trimmed) line the renderer prints when it accepts connections
pub const READY_SENTINEL: &str = "server: ready to accept connections";

/// Longest chunk of renderer output buffered as one line
///
/// Output without a newline within this many bytes is split, and each piece
/// counts as a line of its own.
pub const MAX_OUTPUT_LINE: u64 = 4 * 1024;

/// Classification of one line of renderer output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The readiness line
    Ready,
    /// Something else, with budget left to keep reading
    UnexpectedOutput,
    /// Something else, and that was the last line allowed
    Exhausted,
}

/// Bounded search for the readiness line
#[derive(Debug, Clone)]
pub struct Handshake {
    budget: usize,
    lines_read: usize,
}

impl Handshake {
    /// Create a handshake that gives up after `budget` lines
    pub fn new(budget: usize) -> Self {
        Self {
            budget,
            lines_read: 0,
        }
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Classify the next line of output
    pub fn observe(&mut self, line: &str) -> Verdict {
        self.lines_read += 1;
        if line.trim() == READY_SENTINEL {
            Verdict::Ready
        } else if self.lines_read >= self.budget {
            Verdict::Exhausted
        } else {
            Verdict::UnexpectedOutput
        }
    }

    /// Read lines from `reader` until the renderer is ready
    ///
    /// Never reads past the budget: on exhaustion, anything after the last
    /// counted line is left in `reader`. Returns the number of lines read.
    pub async fn run<R>(&mut self, reader: &mut R) -> Result<usize, SupervisorError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut buf = Vec::new();

        while self.lines_read < self.budget {
            buf.clear();
            let mut line_reader = (&mut *reader).take(MAX_OUTPUT_LINE);
            if line_reader.read_until(b'\n', &mut buf).await? == 0 {
                return Err(SupervisorError::RendererExited {
                    lines_read: self.lines_read,
                });
            }

            let line = String::from_utf8_lossy(&buf);
            match self.observe(&line) {
                Verdict::Ready => {
                    tracing::debug!(lines_read = self.lines_read, "Renderer signalled readiness");
                    return Ok(self.lines_read);
                }
                Verdict::UnexpectedOutput => {
                    tracing::warn!("Unexpected output from renderer: {}", line.trim_end());
                }
                Verdict::Exhausted => {
                    tracing::warn!("Unexpected output from renderer: {}", line.trim_end());
                    break;
                }
            }
        }

        Err(SupervisorError::HandshakeExhausted {
            lines_read: self.lines_read,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    #[test]
    fn test_observe_sequence() {
        let mut handshake = Handshake::new(3);
        assert_eq!(handshake.observe("booting\n"), Verdict::UnexpectedOutput);
        assert_eq!(handshake.observe("still booting"), Verdict::UnexpectedOutput);
        assert_eq!(handshake.observe("nope"), Verdict::Exhausted);
        assert_eq!(handshake.lines_read(), 3);
    }

    #[test]
    fn test_sentinel_is_trimmed_but_exact() {
        let mut handshake = Handshake::new(5);
        assert_eq!(
            handshake.observe("  server: ready to accept connections \r\n"),
            Verdict::Ready
        );

        let mut handshake = Handshake::new(5);
        assert_eq!(
            handshake.observe("server: ready to accept connections!"),
            Verdict::UnexpectedOutput
        );
    }

    #[tokio::test]
    async fn test_ready_on_first_line() {
        let mut reader = BufReader::new(&b"server: ready to accept connections\n"[..]);
        let lines = Handshake::new(5).run(&mut reader).await.unwrap();
        assert_eq!(lines, 1);
    }

    #[tokio::test]
    async fn test_ready_after_noise() {
        let output = b"loading fonts\nopening display\nserver: ready to accept connections\n";
        let mut reader = BufReader::new(&output[..]);
        let lines = Handshake::new(5).run(&mut reader).await.unwrap();
        assert_eq!(lines, 3);
    }

    #[tokio::test]
    async fn test_exhausted_after_exactly_budget_lines() {
        // The sentinel arrives as line 6: one line too late
        let output = b"1\n2\n3\n4\n5\nserver: ready to accept connections\n";
        let mut reader = BufReader::new(&output[..]);

        let err = Handshake::new(5).run(&mut reader).await.unwrap_err();
        assert!(matches!(
            err,
            SupervisorError::HandshakeExhausted { lines_read: 5 }
        ));

        // Line 6 was never consumed
        let mut rest = String::new();
        reader.read_line(&mut rest).await.unwrap();
        assert_eq!(rest.trim(), READY_SENTINEL);
    }

    #[tokio::test]
    async fn test_eof_before_ready() {
        let mut reader = BufReader::new(&b"panicked at main.rs\n"[..]);
        let err = Handshake::new(5).run(&mut reader).await.unwrap_err();
        assert!(matches!(err, SupervisorError::RendererExited { lines_read: 1 }));
    }

    #[tokio::test]
    async fn test_zero_budget_always_fails() {
        let mut reader = BufReader::new(&b"server: ready to accept connections\n"[..]);
        let err = Handshake::new(0).run(&mut reader).await.unwrap_err();
        assert!(matches!(
            err,
            SupervisorError::HandshakeExhausted { lines_read: 0 }
        ));
    }

    #[tokio::test]
    async fn test_output_without_newlines_is_bounded() {
        // One endless "line": split into capped pieces that use up the budget
        let output = vec![b'x'; 1024 * 1024];
        let mut reader = BufReader::new(&output[..]);

        let err = Handshake::new(5).run(&mut reader).await.unwrap_err();
        assert!(matches!(
            err,
            SupervisorError::HandshakeExhausted { lines_read: 5 }
        ));

        // Only the five capped pieces were consumed
        let mut rest = Vec::new();
        reader.read_to_end(&mut rest).await.unwrap();
        assert_eq!(rest.len(), output.len() - 5 * MAX_OUTPUT_LINE as usize);
    }

    #[tokio::test]
    async fn test_non_utf8_output_is_tolerated() {
        let output = b"\xff\xfe garbage\nserver: ready to accept connections\n";
        let mut reader = BufReader::new(&output[..]);
        assert_eq!(Handshake::new(5).run(&mut reader).await.unwrap(), 2);
    }
}
