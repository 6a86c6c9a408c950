//! Integration tests for TEI letter parsing against a full fixture.

use letters::{Letter, LetterError};

const LETTER_XML: &str = include_str!("fixtures/letter.xml");

#[test]
fn test_title_from_fixture() {
    let letter = Letter::new(LETTER_XML);
    assert_eq!(letter.title().unwrap(), "Letter from  Hooker to Darwin");
}

#[test]
fn test_transcription_from_fixture() {
    let letter = Letter::new(LETTER_XML);
    assert_eq!(
        letter.transcription().unwrap(),
        "Many thanks indeed for your letter. It was most kind and I am immensely gratified."
    );
}

#[test]
fn test_accessors_are_idempotent() {
    let letter = Letter::new(LETTER_XML);
    assert_eq!(letter.title().unwrap(), letter.title().unwrap());
    assert_eq!(
        letter.transcription().unwrap(),
        letter.transcription().unwrap()
    );
}

#[test]
fn test_payload_without_title_errors() {
    let stripped = "<TEI><text><body><p>orphaned transcription</p></body></text></TEI>";
    let letter = Letter::new(stripped);
    assert!(matches!(letter.title(), Err(LetterError::TitleNotFound)));
    // the transcription is still reachable
    assert_eq!(letter.transcription().unwrap(), "orphaned transcription");
}

#[test]
fn test_payload_without_text_errors() {
    let stripped = r#"<TEI><teiHeader><fileDesc><titleStmt>
        <title>Letter from Darwin to Hooker</title>
    </titleStmt></fileDesc></teiHeader></TEI>"#;
    let letter = Letter::new(stripped);
    assert_eq!(letter.title().unwrap(), "Letter from Darwin to Hooker");
    assert!(matches!(
        letter.transcription(),
        Err(LetterError::TranscriptionNotFound)
    ));
}
