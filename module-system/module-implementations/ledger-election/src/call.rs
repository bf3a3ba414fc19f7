use anyhow::{ensure, Result};
use ledger_modules_api::{CallResponse, Context, WorkingSet};
use tracing::debug;

use crate::{
    Candidate, Election, ElectionError, ElectionEvent, ElectionName, Elections, Offsets,
};

/// This enumeration represents the available call messages for interacting with
/// the [`Elections`] module.
#[cfg_attr(
    feature = "native",
    derive(serde::Serialize),
    derive(serde::Deserialize),
    derive(schemars::JsonSchema),
    schemars(bound = "C::Address: ::schemars::JsonSchema", rename = "CallMessage")
)]
#[derive(borsh::BorshDeserialize, borsh::BorshSerialize, Debug, PartialEq, Clone)]
pub enum CallMessage<C: Context> {
    /// Creates a new election. Deadlines are offsets from the time of the call.
    CreateElection {
        /// Unique name of the election.
        name: ElectionName,
        /// What is being voted on.
        proposal: String,
        /// Offset of the registration deadline.
        registration_offset: u64,
        /// Offset of the voting deadline.
        voting_offset: u64,
        /// Offset of the ending time.
        ending_offset: u64,
    },
    /// Registers the sender as a candidate of an election.
    RegisterCandidate {
        /// The election to run in.
        election_name: ElectionName,
        /// Display name of the candidate.
        candidate_name: String,
    },
    /// Withdraws a candidate. Only the candidate itself can do so.
    RemoveCandidate {
        /// Address of the candidate.
        candidate_address: C::Address,
    },
    /// Votes for a candidate of an election.
    Vote {
        /// The election to vote in.
        election_name: ElectionName,
        /// The candidate to vote for.
        candidate_address: C::Address,
    },
}

impl<C: Context> Elections<C> {
    pub(crate) fn create_election(
        &self,
        name: ElectionName,
        proposal: String,
        offsets: Offsets,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.insert_election(
            name,
            proposal,
            offsets,
            context.sender(),
            context.timestamp(),
            working_set,
        )?;
        Ok(CallResponse::default())
    }

    /// Creates an election anchored at `now`. Shared by calls and genesis.
    pub(crate) fn insert_election(
        &self,
        name: ElectionName,
        proposal: String,
        offsets: Offsets,
        creator: &C::Address,
        now: u64,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        ensure!(!name.is_empty(), ElectionError::EmptyElectionName);
        ensure!(
            !self.elections.contains(&name, working_set),
            ElectionError::DuplicateElection
        );
        let deadlines = offsets.anchor(now)?;

        let election = Election::<C> {
            name,
            proposal,
            creator: creator.clone(),
            created_at: now,
            registration_deadline: deadlines.registration,
            voting_deadline: deadlines.voting,
            ending_time: deadlines.ending,
        };
        self.elections.set(&name, &election, working_set);
        self.election_names.push(&name, working_set);

        debug!(
            election = %name,
            creator = %creator,
            registration_deadline = deadlines.registration,
            voting_deadline = deadlines.voting,
            ending_time = deadlines.ending,
            "Election created"
        );
        ElectionEvent::<C>::ElectionCreated {
            creator: creator.clone(),
            election_name: name,
        }
        .emit(working_set);

        Ok(())
    }

    pub(crate) fn register_candidate(
        &self,
        election_name: ElectionName,
        candidate_name: String,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        let election = self
            .elections
            .get(&election_name, working_set)
            .ok_or(ElectionError::ElectionNotFound)?;
        election
            .phase_at(context.timestamp())
            .ensure_registration_open()?;

        let caller = context.sender();
        ensure!(
            !self.candidates.contains(caller, working_set),
            ElectionError::AlreadyRegistered
        );

        let candidate = Candidate::<C> {
            address: caller.clone(),
            name: candidate_name.clone(),
            election_name,
            vote_count: 0,
        };
        self.candidates.set(caller, &candidate, working_set);
        self.candidate_addresses.push(caller, working_set);

        let mut roster = self
            .election_candidates
            .get(&election_name, working_set)
            .unwrap_or_default();
        roster.push(caller.clone());
        self.election_candidates
            .set(&election_name, &roster, working_set);

        debug!(election = %election_name, candidate = %caller, "Candidate registered");
        ElectionEvent::<C>::CandidateRegistered {
            candidate: caller.clone(),
            candidate_name,
            election_name,
        }
        .emit(working_set);

        Ok(CallResponse::default())
    }

    pub(crate) fn remove_candidate(
        &self,
        candidate_address: &C::Address,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        let candidate = self
            .candidates
            .get(candidate_address, working_set)
            .ok_or(ElectionError::NotRegistered)?;
        ensure!(
            context.sender() == candidate_address,
            ElectionError::NotAuthorized
        );

        // The tally goes away with the record; ballots already cast stay.
        self.candidates.delete(candidate_address, working_set);

        let position = self
            .candidate_addresses
            .iter(working_set)
            .position(|address| &address == candidate_address);
        if let Some(index) = position {
            self.candidate_addresses.remove(index, working_set)?;
        }

        let mut roster = self
            .election_candidates
            .get(&candidate.election_name, working_set)
            .unwrap_or_default();
        roster.retain(|address| address != candidate_address);
        self.election_candidates
            .set(&candidate.election_name, &roster, working_set);

        debug!(
            election = %candidate.election_name,
            candidate = %candidate_address,
            votes = candidate.vote_count,
            "Candidate removed"
        );
        ElectionEvent::<C>::CandidateRemoved {
            candidate: candidate.address,
            candidate_name: candidate.name,
            election_name: candidate.election_name,
        }
        .emit(working_set);

        Ok(CallResponse::default())
    }

    pub(crate) fn vote(
        &self,
        election_name: ElectionName,
        candidate_address: &C::Address,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        let election = self
            .elections
            .get(&election_name, working_set)
            .ok_or(ElectionError::ElectionNotFound)?;
        election.phase_at(context.timestamp()).ensure_voting_open()?;

        let mut candidate = self
            .candidates
            .get(candidate_address, working_set)
            .filter(|candidate| candidate.election_name == election_name)
            .ok_or(ElectionError::CandidateNotFound)?;

        let voter = context.sender();
        let ballot = (election_name, voter.clone());
        ensure!(
            !self.ballots.contains(&ballot, working_set),
            ElectionError::DuplicateVote
        );

        self.ballots.set(&ballot, candidate_address, working_set);
        candidate.vote_count += 1;
        self.candidates
            .set(candidate_address, &candidate, working_set);

        debug!(
            election = %election_name,
            voter = %voter,
            candidate = %candidate_address,
            votes = candidate.vote_count,
            "Vote registered"
        );
        ElectionEvent::<C>::VoteRegistered {
            voter: voter.clone(),
            election_name,
            candidate: candidate_address.clone(),
        }
        .emit(working_set);

        Ok(CallResponse::default())
    }
}
