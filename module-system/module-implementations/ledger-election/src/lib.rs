#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod call;
pub use call::CallMessage;
mod clock;
pub use clock::{Deadlines, Offsets};
mod error;
pub use error::ElectionError;
mod event;
pub use event::ElectionEvent;
mod genesis;
pub use genesis::*;
mod phase;
pub use phase::Phase;
mod query;
#[cfg(test)]
mod tests;
mod types;
pub use types::*;

use ledger_modules_api::{
    CallResponse, Context, Error, Module, Prefix, StateMap, StateVec, WorkingSet,
};

/// The election ledger.
///
/// Elections, candidates and ballots live in separate registries keyed by
/// election name and account address, so removing a candidate never moves
/// any other record.
#[derive(Clone)]
pub struct Elections<C: Context> {
    /// Every election ever created, by name.
    pub(crate) elections: StateMap<ElectionName, Election<C>>,

    /// Election names in creation order.
    pub(crate) election_names: StateVec<ElectionName>,

    /// Live candidate records, keyed by the candidate's own address.
    pub(crate) candidates: StateMap<C::Address, Candidate<C>>,

    /// Addresses of live candidates across all elections, in registration order.
    pub(crate) candidate_addresses: StateVec<C::Address>,

    /// Addresses of the live candidates of each election, in registration order.
    pub(crate) election_candidates: StateMap<ElectionName, Vec<C::Address>>,

    /// Ballots: (election, voter) => candidate voted for.
    pub(crate) ballots: StateMap<(ElectionName, C::Address), C::Address>,
}

impl<C: Context> Default for Elections<C> {
    fn default() -> Self {
        Self {
            elections: StateMap::new(prefix("elections")),
            election_names: StateVec::new(prefix("election_names")),
            candidates: StateMap::new(prefix("candidates")),
            candidate_addresses: StateVec::new(prefix("candidate_addresses")),
            election_candidates: StateMap::new(prefix("election_candidates")),
            ballots: StateMap::new(prefix("ballots")),
        }
    }
}

fn prefix(storage_name: &'static str) -> ledger_state::Prefix {
    Prefix::new_storage(module_path!(), "Elections", storage_name).into()
}

impl<C: Context> Module for Elections<C> {
    type Context = C;

    type Config = ElectionConfig<C>;

    type CallMessage = CallMessage<C>;

    type Event = ElectionEvent<C>;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), Error> {
        Ok(self.init_module(config, working_set)?)
    }

    fn call(
        &self,
        msg: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, Error> {
        let call_result = match msg {
            CallMessage::CreateElection {
                name,
                proposal,
                registration_offset,
                voting_offset,
                ending_offset,
            } => {
                let offsets = Offsets {
                    registration: registration_offset,
                    voting: voting_offset,
                    ending: ending_offset,
                };
                self.create_election(name, proposal, offsets, context, working_set)
            }
            CallMessage::RegisterCandidate {
                election_name,
                candidate_name,
            } => self.register_candidate(election_name, candidate_name, context, working_set),
            CallMessage::RemoveCandidate { candidate_address } => {
                self.remove_candidate(&candidate_address, context, working_set)
            }
            CallMessage::Vote {
                election_name,
                candidate_address,
            } => self.vote(election_name, &candidate_address, context, working_set),
        };
        Ok(call_result?)
    }
}
