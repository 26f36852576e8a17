use std::collections::BTreeMap;

use examgen::generation::parser::{format_block, parse_generated_text, QuestionDraft};

fn options(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn well_formed_blocks_yield_one_draft_each() {
    let reply = "\
1. \"What is the capital of France?\"
options
A: Berlin
B: Paris
C: Madrid
D: Rome
correctOption: B

2. \"Which planet is closest to the sun?\"
options
A: Venus
B: Earth
C: Mercury
D: Mars
correctOption: C

3. \"What is H2O?\"
options
A: Water
B: Oxygen
correctOption: A
";

    let drafts = parse_generated_text(reply);
    assert_eq!(drafts.len(), 3);

    for draft in &drafts {
        assert!(draft.is_consistent(), "draft {:?} should be consistent", draft.name);
        assert!(draft.options.contains_key(&draft.correct_option));
    }

    // Source order is preserved
    assert_eq!(drafts[0].name, "What is the capital of France?");
    assert_eq!(drafts[1].name, "Which planet is closest to the sun?");
    assert_eq!(drafts[2].name, "What is H2O?");

    assert_eq!(drafts[0].options, options(&[("A", "Berlin"), ("B", "Paris"), ("C", "Madrid"), ("D", "Rome")]));
    assert_eq!(drafts[0].correct_option, "B");
}

#[test]
fn parses_the_math_quiz_fixture() {
    let reply = "1. \"What is 2+2?\"\noptions\nA: 3\nB: 4\ncorrectOption: B";

    let drafts = parse_generated_text(reply);
    assert_eq!(drafts.len(), 1);

    let draft = &drafts[0];
    assert_eq!(draft.name, "What is 2+2?");
    assert_eq!(draft.options, options(&[("A", "3"), ("B", "4")]));
    assert_eq!(draft.correct_option, "B");
    assert!(draft.is_consistent());
}

#[test]
fn parses_json_flavored_replies() {
    // Providers tend to echo the JSON-ish shape from the prompt, with
    // quoted keys and trailing commas.
    let reply = "\
1. \"Which language is this crate written in?\"
  \"options\": {
    \"A\": \"Go\",
    \"B\": \"Rust\",
  },
  \"correctOption\": \"B\"
";

    let drafts = parse_generated_text(reply);
    assert_eq!(drafts.len(), 1);

    let draft = &drafts[0];
    assert_eq!(draft.name, "Which language is this crate written in?");
    assert_eq!(draft.options, options(&[("A", "Go"), ("B", "Rust")]));
    assert_eq!(draft.correct_option, "B");
}

#[test]
fn draft_without_options_is_inconsistent() {
    let reply = "1. \"An orphaned question\"\ncorrectOption: A";

    let drafts = parse_generated_text(reply);
    assert_eq!(drafts.len(), 1);
    assert!(drafts[0].options.is_empty());
    assert!(!drafts[0].is_consistent());
}

#[test]
fn draft_with_unknown_correct_label_is_inconsistent() {
    let reply = "1. \"Pick one\"\noptions\nA: yes\nB: no\ncorrectOption: E";

    let drafts = parse_generated_text(reply);
    assert_eq!(drafts.len(), 1);
    assert!(!drafts[0].is_consistent());
}

#[test]
fn empty_blocks_are_discarded() {
    let reply = "1. \n\n2. \"Q\"\noptions\nA: 1\nB: 2\ncorrectOption: A";

    let drafts = parse_generated_text(reply);
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].name, "Q");
}

#[test]
fn option_lines_missing_label_or_value_are_ignored()  {
    let reply = "1. \"Q\"\noptions\nA: 1\n: empty label\nB:\nC: 3\ncorrectOption: C";

    let drafts = parse_generated_text(reply);
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].options, options(&[("A", "1"), ("C", "3")]));
}

#[test]
fn parsing_is_idempotent_on_canonical_output() {
    let draft = QuestionDraft {
        name: "What is 2+2?".to_string(),
        options: options(&[("A", "3"), ("B", "4"), ("C", "5"), ("D", "22")]),
        correct_option: "B".to_string(),
    };

    let block = format_block(1, &draft);
    let reparsed = parse_generated_text(&block);
    assert_eq!(reparsed, vec![draft.clone()]);

    // And again, through a second round
    let block2 = format_block(1, &reparsed[0]);
    assert_eq!(parse_generated_text(&block2), vec![draft]);
}

#[test]
fn multiple_formatted_drafts_round_trip() {
    let drafts: Vec<QuestionDraft> = (1..=3)
        .map(|i| QuestionDraft {
            name: format!("Question number {i}?"),
            options: options(&[("A", "first"), ("B", "second")]),
            correct_option: "A".to_string(),
        })
        .collect();

    let text: String = drafts
        .iter()
        .enumerate()
        .map(|(i, d)| format_block(i + 1, d))
        .collect::<Vec<_>>()
        .join("\n");

    assert_eq!(parse_generated_text(&text), drafts);
}
