//! Validation tests for [`QueryConfig`].

use cti_rag::{CtiError, QueryConfig};

#[test]
fn defaults_match_the_documented_values() {
    let config = QueryConfig::default();
    assert_eq!(config.relevance_threshold, 1.0);
    assert_eq!(config.top_k, 10);
    assert_eq!(config.max_replies, 5);
    assert_eq!(config.max_context_results, 5);
}

#[test]
fn builder_applies_overrides() {
    let config = QueryConfig::builder()
        .relevance_threshold(0.8)
        .top_k(20)
        .max_replies(3)
        .max_context_results(10)
        .build()
        .unwrap();

    assert_eq!(config.relevance_threshold, 0.8);
    assert_eq!(config.top_k, 20);
    assert_eq!(config.max_replies, 3);
    assert_eq!(config.max_context_results, 10);
}

#[test]
fn zero_top_k_is_rejected() {
    assert!(matches!(QueryConfig::builder().top_k(0).build(), Err(CtiError::Config(_))));
}

#[test]
fn zero_max_context_results_is_rejected() {
    assert!(matches!(
        QueryConfig::builder().max_context_results(0).build(),
        Err(CtiError::Config(_))
    ));
}

#[test]
fn non_positive_or_non_finite_thresholds_are_rejected() {
    for threshold in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        assert!(
            matches!(
                QueryConfig::builder().relevance_threshold(threshold).build(),
                Err(CtiError::Config(_))
            ),
            "threshold {threshold} should be rejected"
        );
    }
}
