//! Integration tests for the annotation layer: lazy memoization, entity
//! ordering, and the HTML visualization.

use letters::testing::MockNer;
use letters::{NamedEntityDocument, NerError};
use scraper::{Html, Selector};

const LETTER_OPENING: &str = "Charles Robert Darwin was born in Shrewsbury on \
    12 February 1809. He went on to study at the University of Edinburgh Medical School.";

/// A tagger configured for the letter opening, registered out of document
/// order on purpose.
fn darwin_tagger() -> MockNer {
    MockNer::new()
        .with_entity("University of Edinburgh Medical School", "ORG")
        .with_entity("12 February 1809", "DATE")
        .with_entity("Charles Robert Darwin", "PERSON")
        .with_entity("Shrewsbury", "GPE")
}

#[tokio::test]
async fn test_entities_come_out_in_document_order() {
    let mut doc = NamedEntityDocument::new(LETTER_OPENING, darwin_tagger());

    let entities: Vec<(String, String)> = doc
        .entities()
        .await
        .unwrap()
        .iter()
        .map(|e| (e.text.clone(), e.label.clone()))
        .collect();

    assert_eq!(
        entities,
        vec![
            ("Charles Robert Darwin".to_string(), "PERSON".to_string()),
            ("Shrewsbury".to_string(), "GPE".to_string()),
            ("12 February 1809".to_string(), "DATE".to_string()),
            (
                "University of Edinburgh Medical School".to_string(),
                "ORG".to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn test_doc_is_computed_once_and_memoized() {
    let tagger = darwin_tagger();
    let mut doc = NamedEntityDocument::new(LETTER_OPENING, tagger.clone());

    let first: Vec<_> = doc.doc().await.unwrap().entities().to_vec();
    let second: Vec<_> = doc.doc().await.unwrap().entities().to_vec();

    assert_eq!(first, second);
    assert_eq!(tagger.call_count(), 1);
}

#[tokio::test]
async fn test_doc_has_entity_annotations() {
    let mut doc = NamedEntityDocument::new(LETTER_OPENING, darwin_tagger());
    assert!(doc.doc().await.unwrap().has_entity_annotations());
}

#[tokio::test]
async fn test_failed_annotation_leaves_document_uncomputed() {
    let tagger = MockNer::new().with_failure();
    let mut doc = NamedEntityDocument::new(LETTER_OPENING, tagger.clone());

    let err = doc.doc().await.unwrap_err();
    assert!(matches!(err, NerError::Backend(_)));

    // a later call retries rather than serving a half-computed memo
    tagger.recover();
    assert!(doc.doc().await.is_ok());
    assert_eq!(tagger.call_count(), 2);
}

#[tokio::test]
async fn test_cleaned_text_flows_into_annotation() {
    let tagger = MockNer::new().with_entity("Darwin", "PERSON");
    let mut doc = NamedEntityDocument::with_cleaned_text("Darwin & Hooker &c   ", tagger.clone());

    assert_eq!(doc.text(), "Darwin and Hooker etc ");
    doc.doc().await.unwrap();
    assert_eq!(tagger.calls(), vec!["Darwin and Hooker etc ".to_string()]);
}

#[tokio::test]
async fn test_viz_html_contains_exactly_one_entities_div() {
    let mut doc = NamedEntityDocument::new(LETTER_OPENING, darwin_tagger());
    let html = doc.viz_html().await.unwrap();

    let fragment = Html::parse_fragment(&html);
    let container = Selector::parse("div.entities").unwrap();
    assert_eq!(fragment.select(&container).count(), 1);

    let marks = Selector::parse("mark.entity").unwrap();
    assert_eq!(fragment.select(&marks).count(), 4);
}
