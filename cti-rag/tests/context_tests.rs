//! Tests for the evidence context formatter.

use cti_rag::{
    DocKind, Document, NO_RELEVANT_CONTEXT, PostMetrics, RetrievalResult, format_context,
};

fn post(id: &str, content: &str) -> Document {
    Document {
        content: content.to_string(),
        kind: DocKind::Post,
        post_id: id.to_string(),
        parent_post_id: None,
        channel: "hackingandcrackingtools".to_string(),
        metrics: None,
    }
}

fn reply(id: &str, parent: &str, content: &str) -> Document {
    Document {
        content: content.to_string(),
        kind: DocKind::Reply,
        post_id: id.to_string(),
        parent_post_id: Some(parent.to_string()),
        channel: "hackingandcrackingtools".to_string(),
        metrics: None,
    }
}

fn result(document: Document, score: f32, replies: Vec<Document>) -> RetrievalResult {
    RetrievalResult { document, score, replies }
}

#[test]
fn empty_results_return_the_exact_sentinel() {
    for max_results in [0, 1, 5, 100] {
        assert_eq!(format_context(&[], max_results), NO_RELEVANT_CONTEXT);
    }
}

#[test]
fn block_carries_label_score_identity_and_content() {
    let results = [result(post("573", "SQLi dumper v10 free download"), 0.3, Vec::new())];
    let context = format_context(&results, 5);

    assert!(context.contains("== SOURCE 1 (relevance: 0.300) =="));
    assert!(context.contains("[POST_ID: 573]"));
    assert!(context.contains("CHANNEL: hackingandcrackingtools"));
    assert!(context.contains("CONTENT: SQLi dumper v10 free download"));
}

#[test]
fn metrics_line_is_rendered_only_when_present() {
    let mut with_metrics = post("573", "tool drop");
    with_metrics.metrics = Some(PostMetrics { views: 1200, forwards: 40 });

    let context = format_context(&[result(with_metrics, 0.5, Vec::new())], 5);
    assert!(context.contains("[views: 1200 | forwards: 40]"));

    let context = format_context(&[result(post("574", "tool drop"), 0.5, Vec::new())], 5);
    assert!(!context.contains("views:"));
}

#[test]
fn replies_render_as_community_reactions() {
    let replies = vec![
        reply("901", "381", "How can I use it"),
        reply("902", "381", "link is dead"),
    ];
    let context = format_context(&[result(post("381", "DARK METHOD CLOUD LOGS"), 0.4, replies)], 5);

    assert!(context.contains("-- community reactions --"));
    assert!(context.contains("-> [REPLY_ID: 901] How can I use it"));
    assert!(context.contains("-> [REPLY_ID: 902] link is dead"));
    assert!(!context.contains("(no replies)"));
}

#[test]
fn missing_replies_get_an_explicit_marker() {
    let context = format_context(&[result(post("573", "tool drop"), 0.4, Vec::new())], 5);
    assert!(context.contains("(no replies)"));
    assert!(!context.contains("community reactions"));
}

#[test]
fn max_results_truncates_without_reranking() {
    let results = [
        result(post("1", "first"), 0.1, Vec::new()),
        result(post("2", "second"), 0.2, Vec::new()),
        result(post("3", "third"), 0.3, Vec::new()),
    ];
    let context = format_context(&results, 2);

    assert!(context.contains("== SOURCE 1"));
    assert!(context.contains("[POST_ID: 1]"));
    assert!(context.contains("== SOURCE 2"));
    assert!(context.contains("[POST_ID: 2]"));
    assert!(!context.contains("== SOURCE 3"));
    assert!(!context.contains("[POST_ID: 3]"));

    // Input order is preserved: SOURCE 1 is the first result given.
    let first = context.find("[POST_ID: 1]").unwrap();
    let second = context.find("[POST_ID: 2]").unwrap();
    assert!(first < second);
}

#[test]
fn blocks_are_separated_by_a_blank_line() {
    let results = [
        result(post("1", "first"), 0.1, Vec::new()),
        result(post("2", "second"), 0.2, Vec::new()),
    ];
    let context = format_context(&results, 5);
    assert!(context.contains("\n\n== SOURCE 2"));
}
