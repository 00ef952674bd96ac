use serde_json::json;
use tekimax_canonical::{
    hash_content, CanonicalApproval, Canonicalizer, ContentHash, EntityId, EntityType,
    PayloadError, TimestampMillis,
};

const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

fn approval(content: &str) -> CanonicalApproval {
    CanonicalApproval::new(
        EntityType::parse("goal").unwrap(),
        EntityId::parse("goal_123").unwrap(),
        content,
        TimestampMillis(1_700_000_000_000),
    )
}

#[test]
fn hash_of_empty_string_is_well_known() {
    assert_eq!(hash_content("").as_str(), EMPTY_SHA256);
}

#[test]
fn hash_of_hello_is_stable() {
    let first = hash_content("hello");
    let second = hash_content("hello");
    assert_eq!(first.as_str(), HELLO_SHA256);
    assert_eq!(first, second);
    assert!(first.matches("hello"));
    assert!(!first.matches("hello "));
}

#[test]
fn content_hash_parse_rejects_uppercase_and_short() {
    assert!(ContentHash::parse(HELLO_SHA256).is_ok());
    assert!(ContentHash::parse(HELLO_SHA256.to_uppercase()).is_err());
    assert!(ContentHash::parse(&HELLO_SHA256[..63]).is_err());
}

#[test]
fn canonicalizer_produces_ordered_bytes() {
    let canonicalizer = Canonicalizer::new();
    let value = json!({"b": 1, "a": {"nested": 2}});
    let bytes = canonicalizer.canonicalize(&value).unwrap();
    assert_eq!(bytes, br#"{"a":{"nested":2},"b":1}"#.to_vec());
}

#[test]
fn is_canonical_detects_whitespace_and_order() {
    let canonicalizer = Canonicalizer::default();
    assert!(canonicalizer.is_canonical(r#"{"a":1,"b":2}"#));
    assert!(!canonicalizer.is_canonical(r#"{"b":2,"a":1}"#));
    assert!(!canonicalizer.is_canonical(r#"{"a": 1,"b":2}"#));
    assert!(!canonicalizer.is_canonical("not json"));
}

#[test]
fn approval_serializes_to_golden_text() {
    let canonicalizer = Canonicalizer::default();
    let text = approval("hello").to_canonical_string(&canonicalizer).unwrap();
    assert_eq!(
        text,
        format!(
            r#"{{"contentHash":"{}","entityId":"goal_123","entityType":"goal","timestamp":1700000000000,"type":"AI_APPROVAL"}}"#,
            HELLO_SHA256
        )
    );
}

#[test]
fn approval_parse_round_trips_canonical_text() {
    let canonicalizer = Canonicalizer::default();
    let original = approval("Increase MRR to $50k");
    let text = original.to_canonical_string(&canonicalizer).unwrap();
    let parsed = CanonicalApproval::parse(&text, &canonicalizer).unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn approval_parse_rejects_reordered_members() {
    let canonicalizer = Canonicalizer::default();
    // Same members in the order a naive object literal would emit them.
    let reordered = format!(
        r#"{{"type":"AI_APPROVAL","entityType":"goal","entityId":"goal_123","contentHash":"{}","timestamp":1700000000000}}"#,
        HELLO_SHA256
    );
    assert!(matches!(
        CanonicalApproval::parse(&reordered, &canonicalizer),
        Err(PayloadError::NotCanonical)
    ));
}

#[test]
fn approval_parse_rejects_other_types() {
    let canonicalizer = Canonicalizer::default();
    assert!(matches!(
        CanonicalApproval::parse(r#"{"type":"OTHER"}"#, &canonicalizer),
        Err(PayloadError::WrongType(t)) if t == "OTHER"
    ));
    assert!(matches!(
        CanonicalApproval::parse(r#"{"entityId":"x"}"#, &canonicalizer),
        Err(PayloadError::WrongType(_))
    ));
    assert!(matches!(
        CanonicalApproval::parse("[", &canonicalizer),
        Err(PayloadError::Json(_))
    ));
}

#[test]
fn approval_parse_rejects_bad_hash() {
    let canonicalizer = Canonicalizer::default();
    let text = r#"{"contentHash":"abc","entityId":"goal_123","entityType":"goal","timestamp":1,"type":"AI_APPROVAL"}"#;
    assert!(matches!(
        CanonicalApproval::parse(text, &canonicalizer),
        Err(PayloadError::Json(_))
    ));
}

#[test]
fn empty_content_is_a_valid_approval() {
    let approval = approval("");
    assert_eq!(approval.content_hash.as_str(), EMPTY_SHA256);
}

#[test]
fn free_form_entity_strings_round_trip() {
    let canonicalizer = Canonicalizer::default();
    let original = CanonicalApproval::new(
        EntityType::parse("businessModelCanvas").unwrap(),
        EntityId::parse("").unwrap(),
        "canvas",
        TimestampMillis(1),
    );
    let text = original.to_canonical_string(&canonicalizer).unwrap();
    assert!(text.contains(r#""entityId":"","entityType":"businessModelCanvas""#));
    let parsed = CanonicalApproval::parse(&text, &canonicalizer).unwrap();
    assert_eq!(parsed, original);
}
