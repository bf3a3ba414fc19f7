use ledger_modules_api::{Context, WorkingSet};

use crate::{Candidate, Election, ElectionName, Elections, Phase, TallyEntry};

impl<C: Context> Elections<C> {
    /// Returns the election called `name`.
    pub fn get_election(
        &self,
        name: &ElectionName,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Option<Election<C>> {
        self.elections.get(name, working_set)
    }

    /// Number of elections ever created.
    pub fn count_elections(&self, working_set: &mut WorkingSet<C::Storage>) -> usize {
        self.election_names.len(working_set)
    }

    /// Name of the `index`-th election, in creation order.
    pub fn election_at(
        &self,
        index: usize,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Option<ElectionName> {
        self.election_names.get(index, working_set)
    }

    /// Returns the candidate record held by `address`.
    pub fn get_candidate(
        &self,
        address: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Option<Candidate<C>> {
        self.candidates.get(address, working_set)
    }

    /// Addresses of the candidates still running in an election, in registration order.
    pub fn get_election_candidates(
        &self,
        election_name: &ElectionName,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Vec<C::Address> {
        self.election_candidates
            .get(election_name, working_set)
            .unwrap_or_default()
    }

    /// Number of candidates across all elections.
    pub fn count_candidates(&self, working_set: &mut WorkingSet<C::Storage>) -> usize {
        self.candidate_addresses.len(working_set)
    }

    /// Address of the `index`-th candidate across all elections, in registration order.
    pub fn candidate_at(
        &self,
        index: usize,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Option<C::Address> {
        self.candidate_addresses.get(index, working_set)
    }

    /// The phase of an election at `now`.
    pub fn phase(
        &self,
        election_name: &ElectionName,
        now: u64,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Option<Phase> {
        self.get_election(election_name, working_set)
            .map(|election| election.phase_at(now))
    }

    /// The candidate `voter` voted for in an election, if any.
    ///
    /// Ballots outlive the candidate they were cast for.
    pub fn vote_of(
        &self,
        election_name: &ElectionName,
        voter: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Option<C::Address> {
        self.ballots
            .get(&(*election_name, voter.clone()), working_set)
    }

    /// Votes received by each candidate still running in an election.
    pub fn tally(
        &self,
        election_name: &ElectionName,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Vec<TallyEntry<C::Address>> {
        self.get_election_candidates(election_name, working_set)
            .into_iter()
            .filter_map(|address| self.candidates.get(&address, working_set))
            .map(|candidate| TallyEntry {
                candidate: candidate.address,
                name: candidate.name,
                vote_count: candidate.vote_count,
            })
            .collect()
    }
}
