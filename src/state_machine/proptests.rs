//! Property-based tests for the controller state machine
//!
//! Random event sequences are pushed through `transition`, applying effects to
//! a plain transcript, and the invariants are checked after every step.

use super::transition::*;
use super::*;
use crate::relay::RelayFailure;
use crate::store::Sender;
use crate::system_prompt::FALLBACK_MESSAGE;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_submit() -> impl Strategy<Value = Event> {
    prop_oneof![
        "[a-zA-Z ]{0,30}",
        Just(String::new()),
        Just("   ".to_string()),
        Just("  pad me  ".to_string()),
    ]
    .prop_map(|text| Event::Submit { text })
}

fn arb_failure() -> impl Strategy<Value = RelayFailure> {
    prop_oneof![
        Just(RelayFailure::upstream(429, "rate limited")),
        Just(RelayFailure::upstream(401, "bad key")),
        Just(RelayFailure::transport("Connection failed")),
        Just(RelayFailure::malformed("No choices in response")),
    ]
}

fn arb_resolution() -> impl Strategy<Value = Event> {
    prop_oneof![
        "[a-zA-Z .]{0,40}".prop_map(Ok::<String, RelayFailure>),
        arb_failure().prop_map(Err::<String, RelayFailure>),
    ]
    .prop_map(|outcome| Event::RelayResolved { outcome })
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![arb_submit(), arb_resolution()]
}

// ============================================================================
// Model
// ============================================================================

#[derive(Default)]
struct Model {
    state: ControllerState,
    transcript: Vec<(String, Sender)>,
    relays_started: usize,
    settles: usize,
}

impl Model {
    fn step(&mut self, event: Event) -> Result<Vec<Effect>, TransitionError> {
        let result = transition(&self.state, event)?;
        self.state = result.new_state;
        for effect in &result.effects {
            match effect {
                Effect::AppendMessage { text, sender } => {
                    self.transcript.push((text.clone(), *sender));
                }
                Effect::RequestRelay { .. } => self.relays_started += 1,
                Effect::ScrollToLatest => self.settles += 1,
                _ => {}
            }
        }
        Ok(result.effects)
    }
}

proptest! {
    #[test]
    fn rejected_events_change_nothing(events in prop::collection::vec(arb_event(), 1..40)) {
        let mut model = Model::default();
        for event in events {
            let before_state = model.state;
            let before_len = model.transcript.len();
            if model.step(event).is_err() {
                prop_assert_eq!(model.state, before_state);
                prop_assert_eq!(model.transcript.len(), before_len);
            }
        }
    }

    #[test]
    fn at_most_one_relay_in_flight(events in prop::collection::vec(arb_event(), 1..40)) {
        let mut model = Model::default();
        for event in events {
            let _ = model.step(event);
            let outstanding = model.relays_started - model.settles;
            prop_assert!(outstanding <= 1);
            prop_assert_eq!(outstanding == 1, model.state.is_busy());
        }
    }

    #[test]
    fn transcript_grows_by_two_per_round_trip(events in prop::collection::vec(arb_event(), 1..40)) {
        let mut model = Model::default();
        for event in events {
            let _ = model.step(event);
            let expected = model.settles * 2 + usize::from(model.state.is_busy());
            prop_assert_eq!(model.transcript.len(), expected);
        }
    }

    #[test]
    fn user_messages_are_trimmed_and_non_empty(events in prop::collection::vec(arb_event(), 1..40)) {
        let mut model = Model::default();
        for event in events {
            let _ = model.step(event);
        }
        for (text, sender) in &model.transcript {
            if *sender == Sender::User {
                prop_assert!(!text.is_empty());
                prop_assert_eq!(text.trim(), text.as_str());
            }
        }
    }

    #[test]
    fn failures_never_leak_into_transcript(failure in arb_failure(), text in "[a-z]{1,10}") {
        let mut model = Model::default();
        model.step(Event::Submit { text }).unwrap();
        let effects = model.step(Event::RelayResolved { outcome: Err(failure.clone()) }).unwrap();

        let (last_text, last_sender) = model.transcript.last().unwrap();
        prop_assert_eq!(last_text.as_str(), FALLBACK_MESSAGE);
        prop_assert_eq!(*last_sender, Sender::Bot);
        let expected = Effect::NotifyError { message: failure.message };
        prop_assert!(effects.contains(&expected));
    }
}
