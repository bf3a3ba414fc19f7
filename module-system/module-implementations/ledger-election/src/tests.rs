use std::str::FromStr;

use ledger_modules_api::default_context::DefaultContext;
use ledger_modules_api::utils::generate_address;
use ledger_modules_api::{Context, Module, WorkingSet};
use ledger_state::MemoryStorage;
use proptest::prelude::*;

use crate::{
    CallMessage, Deadlines, ElectionError, ElectionName, ElectionNameError, Elections, Offsets,
    Phase,
};

type C = DefaultContext;

const DEADLINES: Deadlines = Deadlines {
    registration: 1140,
    voting: 1280,
    ending: 1560,
};

fn name(text: &str) -> ElectionName {
    ElectionName::from_str(text).unwrap()
}

fn election_error(err: ledger_modules_api::Error) -> ElectionError {
    *err.downcast_ref::<ElectionError>()
        .expect("the module only rejects with election errors")
}

#[test]
fn offsets_are_anchored_at_creation_time() {
    let offsets = Offsets {
        registration: 140,
        voting: 280,
        ending: 560,
    };
    assert_eq!(offsets.anchor(1000), Ok(DEADLINES));
}

#[test]
fn unordered_offsets_are_rejected() {
    for (registration, voting, ending) in [(280, 140, 560), (140, 140, 560), (140, 560, 560), (0, 0, 0)] {
        let offsets = Offsets {
            registration,
            voting,
            ending,
        };
        assert_eq!(offsets.anchor(0), Err(ElectionError::InvalidDeadlines));
    }
}

#[test]
fn overflowing_offsets_are_rejected() {
    let offsets = Offsets {
        registration: 1,
        voting: 2,
        ending: u64::MAX,
    };
    assert_eq!(offsets.anchor(10), Err(ElectionError::InvalidDeadlines));
    assert!(offsets.anchor(0).is_ok());
}

#[test]
fn phase_boundaries() {
    assert_eq!(Phase::at(&DEADLINES, 0), Phase::Registering);
    assert_eq!(Phase::at(&DEADLINES, 1139), Phase::Registering);
    assert_eq!(Phase::at(&DEADLINES, 1140), Phase::Voting);
    assert_eq!(Phase::at(&DEADLINES, 1279), Phase::Voting);
    assert_eq!(Phase::at(&DEADLINES, 1280), Phase::Closed);
    assert_eq!(Phase::at(&DEADLINES, 1559), Phase::Closed);
    assert_eq!(Phase::at(&DEADLINES, 1560), Phase::Ended);
    assert_eq!(Phase::at(&DEADLINES, u64::MAX), Phase::Ended);
}

#[test]
fn voting_guard_reports_the_latest_phase_first() {
    assert_eq!(
        Phase::Ended.ensure_voting_open(),
        Err(ElectionError::ElectionEnded)
    );
    assert_eq!(
        Phase::Closed.ensure_voting_open(),
        Err(ElectionError::VotingClosed)
    );
    assert_eq!(
        Phase::Registering.ensure_voting_open(),
        Err(ElectionError::RegistrationInProgress)
    );
    assert_eq!(Phase::Voting.ensure_voting_open(), Ok(()));

    assert_eq!(Phase::Registering.ensure_registration_open(), Ok(()));
    for phase in [Phase::Voting, Phase::Closed, Phase::Ended] {
        assert_eq!(
            phase.ensure_registration_open(),
            Err(ElectionError::RegistrationClosed)
        );
    }
}

proptest! {
    #[test]
    fn registration_is_open_strictly_before_its_deadline(now in 0u64..3000) {
        let open = Phase::at(&DEADLINES, now).ensure_registration_open().is_ok();
        prop_assert_eq!(open, now < DEADLINES.registration);
    }

    #[test]
    fn voting_is_open_only_inside_its_window(now in 0u64..3000) {
        let open = Phase::at(&DEADLINES, now).ensure_voting_open().is_ok();
        prop_assert_eq!(open, DEADLINES.registration <= now && now < DEADLINES.voting);
    }

    #[test]
    fn short_text_names_round_trip(text in "[a-zA-Z0-9 _-]{1,32}") {
        let parsed = ElectionName::from_str(&text).unwrap();
        prop_assert_eq!(parsed.to_string(), text);
    }
}

#[test]
fn election_names() {
    let test = name("test");
    assert_eq!(&test.as_bytes()[..4], b"test");
    assert!(test.as_bytes()[4..].iter().all(|b| *b == 0));
    assert_eq!(test, name("test\0"));
    assert!(name("").is_empty());
    assert!(!test.is_empty());

    assert_eq!(
        ElectionName::from_str(&"x".repeat(33)),
        Err(ElectionNameError::TooLong(33))
    );
    assert!(ElectionName::from_str(&"x".repeat(32)).is_ok());
    assert_eq!(
        ElectionName::from_str(&format!("0x{}", "zz".repeat(32))),
        Err(ElectionNameError::Hex(hex::FromHexError::InvalidHexCharacter {
            c: 'z',
            index: 0
        }))
    );
}

#[test]
fn election_names_deserialize_from_json_strings() {
    assert_eq!(
        serde_json::from_str::<ElectionName>("\"test\"").unwrap(),
        name("test")
    );
    assert!(serde_json::from_str::<ElectionName>(&format!("\"{}\"", "x".repeat(33))).is_err());
    assert!(serde_json::from_str::<ElectionName>("7").is_err());
}

#[test]
fn non_utf8_names_are_rendered_as_hex() {
    let raw = ElectionName::new([0xff; 32]);
    let rendered = raw.to_string();
    assert_eq!(rendered, format!("0x{}", "ff".repeat(32)));
    assert_eq!(ElectionName::from_str(&rendered), Ok(raw));

    let json = serde_json::to_string(&raw).unwrap();
    assert_eq!(serde_json::from_str::<ElectionName>(&json).unwrap(), raw);
}

#[test]
fn error_kinds_and_reasons() {
    assert_eq!(ElectionError::DuplicateVote.kind(), "DuplicateVote");
    assert_eq!(
        ElectionError::DuplicateVote.to_string(),
        "Your vote was already registered in that election."
    );
    assert_eq!(ElectionError::NotAuthorized.kind(), "NotAuthorized");
    assert_eq!(
        ElectionError::NotAuthorized.to_string(),
        "Only candidate himself/herself can withdraw from election."
    );
}

#[test]
fn calls_mutate_the_working_set() {
    let elections = Elections::<C>::default();
    let mut working_set = WorkingSet::new(MemoryStorage::new());
    let creator = generate_address::<C>("creator");
    let candidate = generate_address::<C>("candidate");

    elections
        .call(
            CallMessage::CreateElection {
                name: name("test"),
                proposal: "Should we?".to_string(),
                registration_offset: 140,
                voting_offset: 280,
                ending_offset: 560,
            },
            &C::new(creator, 1000),
            &mut working_set,
        )
        .unwrap();

    let election = elections
        .get_election(&name("test"), &mut working_set)
        .unwrap();
    assert_eq!(election.deadlines(), DEADLINES);
    assert_eq!(election.created_at, 1000);
    assert_eq!(election.creator, creator);

    let err = elections
        .call(
            CallMessage::Vote {
                election_name: name("test"),
                candidate_address: candidate,
            },
            &C::new(creator, 1010),
            &mut working_set,
        )
        .unwrap_err();
    assert_eq!(election_error(err), ElectionError::RegistrationInProgress);

    elections
        .call(
            CallMessage::RegisterCandidate {
                election_name: name("test"),
                candidate_name: "Alice".to_string(),
            },
            &C::new(candidate, 1010),
            &mut working_set,
        )
        .unwrap();
    assert_eq!(elections.count_candidates(&mut working_set), 1);
    assert_eq!(
        elections.phase(&name("test"), 1150, &mut working_set),
        Some(Phase::Voting)
    );
    assert_eq!(elections.phase(&name("other"), 1150, &mut working_set), None);

    let event_keys: Vec<String> = working_set
        .events()
        .iter()
        .map(|event| event.key().to_string())
        .collect();
    assert_eq!(event_keys, vec!["ElectionCreated", "CandidateRegistered"]);
}
