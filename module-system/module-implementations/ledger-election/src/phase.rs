use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::{Deadlines, ElectionError};

/// The phase of an election, derived from comparing an instant to its deadlines.
///
/// `Registering --(registration)--> Voting --(voting)--> Closed --(ending)--> Ended`
#[derive(
    BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Phase {
    /// Candidates can register; nobody can vote yet.
    Registering,
    /// Votes are accepted.
    Voting,
    /// Voting is over but the election has not ended yet.
    Closed,
    /// The election is over.
    Ended,
}

impl Phase {
    /// The phase at `now`.
    ///
    /// The ending time is checked first, then the voting deadline, then the
    /// registration deadline, so boundary instants resolve to the later phase.
    pub fn at(deadlines: &Deadlines, now: u64) -> Self {
        if now >= deadlines.ending {
            Phase::Ended
        } else if now >= deadlines.voting {
            Phase::Closed
        } else if now < deadlines.registration {
            Phase::Registering
        } else {
            Phase::Voting
        }
    }

    /// Candidates can only register while the election is registering.
    pub fn ensure_registration_open(self) -> Result<(), ElectionError> {
        match self {
            Phase::Registering => Ok(()),
            Phase::Voting | Phase::Closed | Phase::Ended => Err(ElectionError::RegistrationClosed),
        }
    }

    /// Votes are only accepted while the election is in its voting phase.
    pub fn ensure_voting_open(self) -> Result<(), ElectionError> {
        match self {
            Phase::Ended => Err(ElectionError::ElectionEnded),
            Phase::Closed => Err(ElectionError::VotingClosed),
            Phase::Registering => Err(ElectionError::RegistrationInProgress),
            Phase::Voting => Ok(()),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            Phase::Registering => "registering",
            Phase::Voting => "voting",
            Phase::Closed => "closed",
            Phase::Ended => "ended",
        };
        f.write_str(phase)
    }
}
