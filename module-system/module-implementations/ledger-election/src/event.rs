use borsh::{BorshDeserialize, BorshSerialize};
use ledger_modules_api::{Context, WorkingSet};
use serde::{Deserialize, Serialize};

use crate::ElectionName;

/// Announces every accepted call to observers.
///
/// Events are stored in the working set under their variant name and are
/// never read back by the module.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, PartialEq, Clone)]
pub enum ElectionEvent<C: Context> {
    /// A new election was created.
    ElectionCreated {
        /// Creator of the election.
        creator: C::Address,
        /// Name of the election.
        election_name: ElectionName,
    },
    /// An account registered itself as a candidate.
    CandidateRegistered {
        /// The registering account.
        candidate: C::Address,
        /// Display name of the candidate.
        candidate_name: String,
        /// The election the candidate runs in.
        election_name: ElectionName,
    },
    /// A candidate withdrew.
    CandidateRemoved {
        /// The withdrawing account.
        candidate: C::Address,
        /// Display name of the candidate.
        candidate_name: String,
        /// The election the candidate ran in.
        election_name: ElectionName,
    },
    /// A vote was counted.
    VoteRegistered {
        /// The account that voted.
        voter: C::Address,
        /// The election voted in.
        election_name: ElectionName,
        /// The candidate voted for.
        candidate: C::Address,
    },
}

impl<C: Context> ElectionEvent<C> {
    /// The key the event is stored under.
    pub fn key(&self) -> &'static str {
        match self {
            ElectionEvent::ElectionCreated { .. } => "ElectionCreated",
            ElectionEvent::CandidateRegistered { .. } => "CandidateRegistered",
            ElectionEvent::CandidateRemoved { .. } => "CandidateRemoved",
            ElectionEvent::VoteRegistered { .. } => "VoteRegistered",
        }
    }

    pub(crate) fn emit(self, working_set: &mut WorkingSet<C::Storage>) {
        working_set.add_event(self.key(), &self);
    }
}
