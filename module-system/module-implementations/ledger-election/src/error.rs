/// Why a call to the election module was rejected.
///
/// The `Display` text of every variant is a stable reason string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ElectionError {
    /// An election with the same name was created before.
    #[error("Election with that name already exists.")]
    DuplicateElection,
    /// The all-zero name cannot be used.
    #[error("Election name cannot be empty.")]
    EmptyElectionName,
    /// The offsets do not produce strictly increasing deadlines.
    #[error("Deadlines must satisfy registration < voting < ending.")]
    InvalidDeadlines,
    /// There is no election with the requested name.
    #[error("No election with that name found.")]
    ElectionNotFound,
    /// The registration deadline has passed.
    #[error("Registration period has ended.")]
    RegistrationClosed,
    /// The caller already holds a candidate record.
    #[error("You have already registered for an election.")]
    AlreadyRegistered,
    /// There is no candidate record for the address.
    #[error("Candidate is not registered.")]
    NotRegistered,
    /// Someone other than the candidate tried to remove the candidate.
    #[error("Only candidate himself/herself can withdraw from election.")]
    NotAuthorized,
    /// The ending time has been reached.
    #[error("Election has already ended.")]
    ElectionEnded,
    /// The voting deadline has passed.
    #[error("Voting period is over.")]
    VotingClosed,
    /// The registration deadline has not passed yet.
    #[error("Candidates are still registering.")]
    RegistrationInProgress,
    /// The address is not a candidate of the election.
    #[error("No candidate with that address in that election.")]
    CandidateNotFound,
    /// The caller has voted in the election before.
    #[error("Your vote was already registered in that election.")]
    DuplicateVote,
}

impl ElectionError {
    /// The machine readable kind of the error.
    pub fn kind(&self) -> &'static str {
        match self {
            ElectionError::DuplicateElection => "DuplicateElection",
            ElectionError::EmptyElectionName => "EmptyElectionName",
            ElectionError::InvalidDeadlines => "InvalidDeadlines",
            ElectionError::ElectionNotFound => "ElectionNotFound",
            ElectionError::RegistrationClosed => "RegistrationClosed",
            ElectionError::AlreadyRegistered => "AlreadyRegistered",
            ElectionError::NotRegistered => "NotRegistered",
            ElectionError::NotAuthorized => "NotAuthorized",
            ElectionError::ElectionEnded => "ElectionEnded",
            ElectionError::VotingClosed => "VotingClosed",
            ElectionError::RegistrationInProgress => "RegistrationInProgress",
            ElectionError::CandidateNotFound => "CandidateNotFound",
            ElectionError::DuplicateVote => "DuplicateVote",
        }
    }
}
