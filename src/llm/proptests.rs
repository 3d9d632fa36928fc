//! Property-based tests for request construction and payload extraction
//!
//! - The request always carries exactly the persona and the verbatim user text
//! - Extraction returns the provider's content byte-for-byte
//! - Payloads without a string content never extract to an empty message

use super::types::{extract_content, CompletionRequest, MessageRole};
use super::LlmErrorKind;
use proptest::prelude::*;
use serde_json::{json, Value};

fn arb_user_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 _.!?,]{0,100}",
        "\\PC{0,60}",
        Just("  leading and trailing  ".to_string()),
    ]
}

fn arb_non_string() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<i64>().prop_map(|n| json!(n)),
        any::<bool>().prop_map(|b| json!(b)),
        Just(json!(["a", "b"])),
        Just(json!({"text": "nested"})),
    ]
}

proptest! {
    #[test]
    fn persona_request_has_two_entries(text in arb_user_text()) {
        let request = CompletionRequest::persona("persona", &text, "grok-beta");
        prop_assert_eq!(request.messages.len(), 2);
        prop_assert_eq!(request.messages[0].role, MessageRole::System);
        prop_assert_eq!(request.messages[1].role, MessageRole::User);
        prop_assert_eq!(&request.messages[1].content, &text);
        prop_assert!(!request.stream);
    }

    #[test]
    fn extraction_preserves_content(text in arb_user_text(), extra in 0usize..3) {
        let mut choices = vec![json!({"message": {"role": "assistant", "content": text.clone()}})];
        for i in 0..extra {
            choices.push(json!({"message": {"content": format!("alt {i}")}}));
        }
        let payload = json!({"choices": choices});
        prop_assert_eq!(extract_content(&payload).unwrap(), text);
    }

    #[test]
    fn non_string_content_is_malformed(content in arb_non_string()) {
        let payload = json!({"choices": [{"message": {"content": content}}]});
        let err = extract_content(&payload).unwrap_err();
        prop_assert_eq!(err.kind, LlmErrorKind::MalformedResponse);
    }
}
