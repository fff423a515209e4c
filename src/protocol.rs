//! Line/token protocol spoken over stdin and stdout.
//!
//! ## Input
//!
//! ```text
//! N L E          node count, link count, exit count
//! u v            L lines, one link each
//! e              E lines, one exit each
//! s              one line per turn: the adversary's node
//! ```
//!
//! Tokens are whitespace-separated; line breaks carry no meaning beyond
//! separating tokens.
//!
//! ## Output
//!
//! One `u v` line per turn naming the severed link, flushed immediately.

use std::io::{BufRead, Write};

use crate::store::{Network, StoreError};
use crate::types::{NodeId, Severance};

/// Error type for protocol I/O and parsing.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Input ended while a value was still expected.
    #[error("Unexpected end of input while reading {expected}")]
    UnexpectedEof {
        /// What was being read.
        expected: &'static str,
    },
    /// Token was not a non-negative integer.
    #[error("Invalid {expected}: {token:?}")]
    InvalidInteger {
        /// What was being read.
        expected: &'static str,
        /// Raw token.
        token: String,
    },
    /// Adversary position outside the network.
    #[error("Adversary position {node} out of range (network has {node_count} nodes)")]
    PositionOutOfRange {
        /// Offending node.
        node: NodeId,
        /// Network size.
        node_count: usize,
    },
    /// Setup described an invalid network.
    #[error("Invalid network: {0}")]
    Network(#[from] StoreError),
}

/// Whitespace token reader over any buffered input.
pub struct TokenReader<R> {
    input: R,
    pending: Vec<String>,
}

impl<R: BufRead> TokenReader<R> {
    /// Wrap a buffered reader.
    pub fn new(input: R) -> Self {
        Self {
            input,
            pending: Vec::new(),
        }
    }

    /// Next token, or `None` at end of input.
    ///
    /// Blocks on the underlying reader until a non-blank line arrives.
    pub fn next_token(&mut self) -> Result<Option<String>, ProtocolError> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            // Stored reversed so `pop` yields tokens in order
            self.pending = line.split_whitespace().rev().map(str::to_owned).collect();
        }
        Ok(self.pending.pop())
    }

    /// Next token as an integer, or `None` at end of input.
    pub fn next_usize(&mut self, expected: &'static str) -> Result<Option<usize>, ProtocolError> {
        match self.next_token()? {
            None => Ok(None),
            Some(token) => token
                .parse::<usize>()
                .map(Some)
                .map_err(|_| ProtocolError::InvalidInteger { expected, token }),
        }
    }

    /// Next token as an integer; end of input is an error.
    pub fn require_usize(&mut self, expected: &'static str) -> Result<usize, ProtocolError> {
        self.next_usize(expected)?
            .ok_or(ProtocolError::UnexpectedEof { expected })
    }
}

/// Setup block parsed from the head of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    /// Total number of nodes.
    pub node_count: usize,
    /// Links as given.
    pub links: Vec<(NodeId, NodeId)>,
    /// Exit gateways as given.
    pub exits: Vec<NodeId>,
}

impl Setup {
    /// Read the `N L E` header, links and exits.
    pub fn read<R: BufRead>(reader: &mut TokenReader<R>) -> Result<Self, ProtocolError> {
        let node_count = reader.require_usize("node count")?;
        let link_count = reader.require_usize("link count")?;
        let exit_count = reader.require_usize("exit count")?;

        // Counts are untrusted; storage grows only with tokens actually read
        let mut links = Vec::new();
        for _ in 0..link_count {
            let u = reader.require_usize("link endpoint")?;
            let v = reader.require_usize("link endpoint")?;
            links.push((NodeId::new(u), NodeId::new(v)));
        }

        let mut exits = Vec::new();
        for _ in 0..exit_count {
            exits.push(NodeId::new(reader.require_usize("exit node")?));
        }

        Ok(Self {
            node_count,
            links,
            exits,
        })
    }

    /// Build the network. Links first, then exits.
    pub fn build(&self) -> Result<Network, StoreError> {
        let mut network = Network::try_new(self.node_count)?;
        for &(u, v) in &self.links {
            network.add_edge(u, v)?;
        }
        for &exit in &self.exits {
            network.register_exit(exit)?;
        }
        Ok(network)
    }
}

/// Read the adversary's next position, or `None` at end of input.
pub fn read_position<R: BufRead>(
    reader: &mut TokenReader<R>,
    node_count: usize,
) -> Result<Option<NodeId>, ProtocolError> {
    match reader.next_usize("adversary position")? {
        None => Ok(None),
        Some(index) if index < node_count => Ok(Some(NodeId::new(index))),
        Some(index) => Err(ProtocolError::PositionOutOfRange {
            node: NodeId::new(index),
            node_count,
        }),
    }
}

/// Write one severance line and flush.
pub fn write_severance<W: Write>(output: &mut W, cut: Severance) -> Result<(), ProtocolError> {
    writeln!(output, "{}", cut)?;
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GraphStore;
    use std::io::Cursor;

    fn reader(text: &str) -> TokenReader<Cursor<Vec<u8>>> {
        TokenReader::new(Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn test_tokens_span_lines() {
        let mut r = reader("1 2\n\n  3\n");
        assert_eq!(r.next_usize("x").unwrap(), Some(1));
        assert_eq!(r.next_usize("x").unwrap(), Some(2));
        assert_eq!(r.next_usize("x").unwrap(), Some(3));
        assert_eq!(r.next_usize("x").unwrap(), None);
    }

    #[test]
    fn test_setup_round() {
        let mut r = reader("4 3 1\n0 1\n1 2\n2 3\n3\n0\n");
        let setup = Setup::read(&mut r).unwrap();
        assert_eq!(setup.node_count, 4);
        assert_eq!(setup.links.len(), 3);
        assert_eq!(setup.exits, vec![NodeId::new(3)]);

        let net = setup.build().unwrap();
        assert_eq!(net.weight(NodeId::new(2)), 1);

        // Turn input follows the setup block
        assert_eq!(read_position(&mut r, 4).unwrap(), Some(NodeId::new(0)));
        assert_eq!(read_position(&mut r, 4).unwrap(), None);
    }

    #[test]
    fn test_truncated_setup() {
        let mut r = reader("4 3 1\n0 1\n");
        let err = Setup::read(&mut r).unwrap_err();
        assert!(matches!(err, ProtocolError::UnexpectedEof { expected: "link endpoint" }));
    }

    #[test]
    fn test_huge_link_count_is_truncated_input() {
        let mut r = reader("4 18446744073709551615 1\n");
        let err = Setup::read(&mut r).unwrap_err();
        assert!(matches!(err, ProtocolError::UnexpectedEof { expected: "link endpoint" }));
    }

    #[test]
    fn test_huge_node_count_fails_build() {
        let mut r = reader("18446744073709551615 0 0\n");
        let setup = Setup::read(&mut r).unwrap();
        assert!(matches!(setup.build(), Err(StoreError::TooManyNodes { .. })));
    }

    #[test]
    fn test_non_numeric_token() {
        let mut r = reader("4 x 1\n");
        let err = Setup::read(&mut r).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidInteger { expected: "link count", .. }));
    }

    #[test]
    fn test_out_of_range_link_fails_build() {
        let mut r = reader("2 1 1\n0 5\n1\n");
        let setup = Setup::read(&mut r).unwrap();
        assert!(matches!(setup.build(), Err(StoreError::NodeOutOfRange { .. })));
    }

    #[test]
    fn test_position_out_of_range() {
        let mut r = reader("9\n");
        let err = read_position(&mut r, 4).unwrap_err();
        assert!(matches!(err, ProtocolError::PositionOutOfRange { node_count: 4, .. }));
    }

    #[test]
    fn test_write_severance() {
        let mut out = Vec::new();
        write_severance(&mut out, Severance::new(NodeId::new(2), NodeId::new(3))).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2 3\n");
    }
}
