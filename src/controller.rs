//! Turn controller.
//!
//! Two phases: setup reads the network once, then the running loop handles
//! one adversary position per turn until input ends or no exit is left to
//! defend.
//!
//! ```text
//! read position → PathRanker::best_path → cut final hop → report → read …
//! ```

use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crate::exit::SeverExit;
use crate::policy::Strategy;
use crate::protocol::{read_position, write_severance, ProtocolError, Setup, TokenReader};
use crate::ranker::PathRanker;
use crate::store::{GraphStore, Network, StoreError};
use crate::types::{NodeId, Severance};

/// Error type for a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Setup block could not be read or described an invalid network.
    #[error("Malformed setup: {0}")]
    Setup(ProtocolError),
    /// Turn input or output failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    /// Network rejected a mutation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SessionError {
    /// Exit status for this error.
    pub fn exit_status(&self) -> SeverExit {
        SeverExit::InvalidInput
    }
}

/// Result of a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnOutcome {
    /// A link was removed.
    Severed(Severance),
    /// No exit is reachable from the adversary's position.
    NoViableDefense,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionOutcome {
    /// Input ran out after `turns` turns.
    InputExhausted {
        /// Turns played.
        turns: u64,
    },
    /// Turn `turn` found nothing to defend.
    NoViableDefense {
        /// Turn number (1-based).
        turn: u64,
        /// Adversary position on that turn.
        adversary: NodeId,
    },
}

impl SessionOutcome {
    /// Exit status for this outcome.
    pub fn exit_status(&self) -> SeverExit {
        match self {
            Self::InputExhausted { .. } => SeverExit::Success,
            Self::NoViableDefense { .. } => SeverExit::NoViableDefense,
        }
    }
}

/// Owns the network for the running phase and plays one turn at a time.
pub struct TurnController {
    network: Network,
    strategy: Strategy,
    turns: u64,
}

impl TurnController {
    /// Create a controller over a fully set-up network.
    pub fn new(network: Network, strategy: Strategy) -> Self {
        Self {
            network,
            strategy,
            turns: 0,
        }
    }

    /// Get a reference to the network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Turns played so far.
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Rank paths from `adversary`, cut the final hop of the best one.
    ///
    /// An `adversary` outside the network is rejected with
    /// `StoreError::NodeOutOfRange` and does not count as a turn.
    pub fn take_turn(&mut self, adversary: NodeId) -> Result<TurnOutcome, StoreError> {
        if !self.network.contains(adversary) {
            return Err(StoreError::NodeOutOfRange {
                node: adversary,
                node_count: self.network.node_count(),
            });
        }
        self.turns += 1;
        let span = info_span!("turn", turn = self.turns, %adversary);
        let _guard = span.enter();

        let best = PathRanker::new(&self.network, self.strategy).best_path(adversary);
        let Some((best, cut)) = best.and_then(|b| b.severance().map(|cut| (b, cut))) else {
            warn!("no viable defense");
            return Ok(TurnOutcome::NoViableDefense);
        };
        debug!(path = %best.path, priority = best.priority(), "winning path");

        self.network.remove_edge(cut.near, cut.exit)?;
        info!(
            %cut,
            weight_near = self.network.weight(cut.near),
            links_left = self.network.num_links(),
            fingerprint = %self.network.snapshot().fingerprint(),
            "link severed"
        );
        Ok(TurnOutcome::Severed(cut))
    }

    /// Play turns until input ends or a turn has nothing to defend.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        reader: &mut TokenReader<R>,
        output: &mut W,
    ) -> Result<SessionOutcome, SessionError> {
        let node_count = self.network.node_count();
        while let Some(adversary) = read_position(reader, node_count)? {
            match self.take_turn(adversary)? {
                TurnOutcome::Severed(cut) => write_severance(output, cut)?,
                TurnOutcome::NoViableDefense => {
                    return Ok(SessionOutcome::NoViableDefense {
                        turn: self.turns,
                        adversary,
                    });
                }
            }
        }
        Ok(SessionOutcome::InputExhausted { turns: self.turns })
    }
}

/// Run a whole session: setup, then turns until the input ends.
pub fn run_session<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    strategy: Strategy,
) -> Result<SessionOutcome, SessionError> {
    let mut reader = TokenReader::new(input);
    let setup = Setup::read(&mut reader).map_err(SessionError::Setup)?;
    let network = setup
        .build()
        .map_err(|e| SessionError::Setup(ProtocolError::Network(e)))?;

    let snapshot = network.snapshot();
    info!(
        nodes = snapshot.node_count,
        links = snapshot.link_count(),
        exits = snapshot.exits.len(),
        %strategy,
        fingerprint = %snapshot.fingerprint(),
        "network ready"
    );

    let mut controller = TurnController::new(network, strategy);
    let outcome = controller.run(&mut reader, output)?;
    info!(?outcome, "session finished");
    Ok(outcome)
}
