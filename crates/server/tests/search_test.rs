#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Suggestion service integration tests.

use teamup_server::search::{
    MIN_FRAGMENT_CHARS, STACK_TOKEN_LIMIT, Suggestions, matching_tokens, normalized_fragment,
};

// -------------------------------------------------------------------------
// Short-circuit behavior
// -------------------------------------------------------------------------

#[test]
fn short_inputs_never_query() {
    // Anything under two trimmed characters must produce no fragment,
    // including whitespace-only strings.
    for input in ["", "a", " ", "\t\n", "  x  "] {
        assert_eq!(normalized_fragment(input), None, "input: {input:?}");
    }
}

#[test]
fn min_fragment_is_two_chars() {
    assert_eq!(MIN_FRAGMENT_CHARS, 2);
    assert_eq!(normalized_fragment("ab"), Some("ab"));
}

// -------------------------------------------------------------------------
// Tech-stack facet
// -------------------------------------------------------------------------

#[test]
fn pyt_fragment_yields_python() {
    let stacks = vec![vec!["Python".to_string(), "TensorFlow".to_string()]];

    let tokens = matching_tokens(stacks, "Pyt");
    assert_eq!(tokens, ["Python"]);
}

#[test]
fn non_matching_tokens_are_dropped() {
    let stacks = vec![vec![
        "Python".to_string(),
        "TensorFlow".to_string(),
        "Docker".to_string(),
    ]];

    let tokens = matching_tokens(stacks, "flow");
    assert_eq!(tokens, ["TensorFlow"]);
}

#[test]
fn tokens_from_many_projects_flatten_and_dedupe() {
    let stacks = vec![
        vec!["Rust".to_string(), "Axum".to_string()],
        vec!["Rust".to_string(), "RustRover".to_string()],
        vec!["Trust".to_string()],
    ];

    let tokens = matching_tokens(stacks, "rust");
    assert_eq!(tokens, ["Rust", "RustRover", "Trust"]);
}

#[test]
fn token_facet_is_bounded() {
    let stacks: Vec<Vec<String>> = (0..4)
        .map(|p| (0..4).map(|t| format!("node-{p}-{t}")).collect())
        .collect();

    let tokens = matching_tokens(stacks, "node");
    assert_eq!(tokens.len(), STACK_TOKEN_LIMIT);
}

// -------------------------------------------------------------------------
// Payload shape
// -------------------------------------------------------------------------

#[test]
fn suggestions_wire_format() {
    let suggestions = Suggestions {
        titles: vec!["Chess AI".to_string()],
        tech_stacks: vec!["Python".to_string()],
        categories: vec!["ai".to_string()],
    };

    let json = serde_json::to_value(&suggestions).unwrap();
    assert_eq!(json["titles"][0], "Chess AI");
    assert_eq!(json["techStacks"][0], "Python");
    assert_eq!(json["categories"][0], "ai");
}

#[test]
fn empty_suggestions_have_all_facets() {
    let json = serde_json::to_value(Suggestions::empty()).unwrap();

    for facet in ["titles", "techStacks", "categories"] {
        assert_eq!(json[facet], serde_json::json!([]), "facet: {facet}");
    }
}
