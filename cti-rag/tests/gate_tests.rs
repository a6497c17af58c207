//! Tests for the pattern-based relevance gate.

use cti_rag::RelevanceGate;

#[test]
fn accepts_domain_questions() {
    let gate = RelevanceGate::new();

    for question in [
        "What cracking tools are shared?",
        "What are dark method cloud logs?",
        "What stolen credentials are sold?",
        "What pirated software is shared?",
        "combo list mail pass",
        "carding credit card stolen",
        "android malware telegram",
    ] {
        assert!(gate.is_relevant(question), "should accept: '{question}'");
    }
}

#[test]
fn rejects_small_talk() {
    let gate = RelevanceGate::new();

    for question in [
        "hello how are you?",
        "what is the weather today?",
        "merci beaucoup",
        "hi",
        "who are you?",
        "tell me a joke",
        "thanks a lot friend",
        "good morning to everyone",
        "goodbye and see you",
    ] {
        assert!(!gate.is_relevant(question), "should reject: '{question}'");
    }
}

#[test]
fn rejects_below_minimum_token_count() {
    let gate = RelevanceGate::new();

    assert!(!gate.is_relevant("cracking tools"));
    assert!(!gate.is_relevant("malware"));
    assert!(!gate.is_relevant(""));
    assert!(!gate.is_relevant("   "));
    // Three tokens is enough.
    assert!(gate.is_relevant("cracking tools shared"));
}

#[test]
fn normalizes_case_and_whitespace() {
    let gate = RelevanceGate::new();

    assert!(!gate.is_relevant("  HELLO there friend  "));
    assert!(!gate.is_relevant("\tTELL ME A JOKE\n"));
}

#[test]
fn bare_acknowledgments_are_rejected() {
    let gate = RelevanceGate::new();

    for question in ["yes", "no", "ok", "okay", "cool"] {
        assert!(!gate.is_relevant(question), "should reject: '{question}'");
    }
    // Anchored with `$`: an acknowledgment prefix on a real question is fine.
    assert!(gate.is_relevant("ok but what stealer logs are sold?"));
}

#[test]
fn verdicts_are_stable_across_calls() {
    let gate = RelevanceGate::new();

    for question in ["hi", "What cracking tools are shared?", "combo list mail pass"] {
        let first = gate.is_relevant(question);
        for _ in 0..10 {
            assert_eq!(gate.is_relevant(question), first);
        }
    }
}

#[test]
fn pattern_table_is_extendable() {
    let gate = RelevanceGate::new().with_pattern(r"^ping\b").unwrap();

    assert!(!gate.is_relevant("ping the index now"));
    // The built-in table still applies.
    assert!(!gate.is_relevant("hi"));
    assert!(gate.is_relevant("What cracking tools are shared?"));
}

#[test]
fn invalid_extension_pattern_is_a_config_error() {
    let result = RelevanceGate::new().with_pattern(r"([unclosed");
    assert!(matches!(result, Err(cti_rag::CtiError::Config(_))));
}
