use anyhow::Result;
use ledger_modules_api::{Context, WorkingSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ElectionName, Elections, Offsets};

/// An election created at genesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenesisElection<C: Context> {
    /// Creator of the election.
    pub creator: C::Address,
    /// Unique name of the election.
    pub name: ElectionName,
    /// What is being voted on.
    pub proposal: String,
    /// Offset of the registration deadline from the genesis timestamp.
    pub registration_offset: u64,
    /// Offset of the voting deadline from the genesis timestamp.
    pub voting_offset: u64,
    /// Offset of the ending time from the genesis timestamp.
    pub ending_offset: u64,
}

/// Config for the [`Elections`] module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionConfig<C: Context> {
    /// The instant every genesis election is anchored at.
    #[serde(default)]
    pub timestamp: u64,
    /// Elections to create, in order.
    #[serde(default = "Vec::new")]
    pub elections: Vec<GenesisElection<C>>,
}

impl<C: Context> Default for ElectionConfig<C> {
    fn default() -> Self {
        Self {
            timestamp: 0,
            elections: Vec::new(),
        }
    }
}

impl<C: Context> Elections<C> {
    pub(crate) fn init_module(
        &self,
        config: &ElectionConfig<C>,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        for election in &config.elections {
            let offsets = Offsets {
                registration: election.registration_offset,
                voting: election.voting_offset,
                ending: election.ending_offset,
            };
            self.insert_election(
                election.name,
                election.proposal.clone(),
                offsets,
                &election.creator,
                config.timestamp,
                working_set,
            )?;
        }

        debug!(
            elections = config.elections.len(),
            timestamp = config.timestamp,
            "Election module initialized"
        );
        Ok(())
    }
}
