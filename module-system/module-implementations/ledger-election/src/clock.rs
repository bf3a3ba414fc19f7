//! Turns the creator's relative offsets into absolute deadlines.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::ElectionError;

/// Deadlines relative to the creation of an election, in seconds.
#[derive(
    BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct Offsets {
    /// Offset of the registration deadline.
    pub registration: u64,
    /// Offset of the voting deadline.
    pub voting: u64,
    /// Offset of the ending time.
    pub ending: u64,
}

/// The absolute deadlines of an election.
#[derive(
    BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct Deadlines {
    /// Registration is open strictly before this instant.
    pub registration: u64,
    /// Voting is open from `registration` and strictly before this instant.
    pub voting: u64,
    /// The election is over from this instant on.
    pub ending: u64,
}

impl Offsets {
    /// Anchors the offsets at `now`, the timestamp of the creating call.
    ///
    /// Fails with [`ElectionError::InvalidDeadlines`] unless the resulting
    /// deadlines are strictly increasing and representable.
    pub fn anchor(&self, now: u64) -> Result<Deadlines, ElectionError> {
        let at = |offset: u64| {
            now.checked_add(offset)
                .ok_or(ElectionError::InvalidDeadlines)
        };

        let deadlines = Deadlines {
            registration: at(self.registration)?,
            voting: at(self.voting)?,
            ending: at(self.ending)?,
        };

        if deadlines.registration < deadlines.voting && deadlines.voting < deadlines.ending {
            Ok(deadlines)
        } else {
            Err(ElectionError::InvalidDeadlines)
        }
    }
}
