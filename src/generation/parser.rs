use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// A numbered block starts with `<number>.` at the beginning of a line.
static BLOCK_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\d+\.\s*").expect("block delimiter regex is valid"));

/// An unpersisted candidate question produced by parsing provider output.
/// Drafts are not guaranteed well-formed; check [`QuestionDraft::is_consistent`]
/// before promoting one to a persisted question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub name: String,
    pub options: BTreeMap<String, String>,
    pub correct_option: String,
}

impl QuestionDraft {
    /// A draft is consistent when it has at least one option and its
    /// correct-option label is one of the option keys.
    pub fn is_consistent(&self) -> bool {
        !self.options.is_empty() && self.options.contains_key(&self.correct_option)
    }
}

/// Parse the provider's free-text reply into question drafts, one per
/// numbered block, in source order.
///
/// Grammar (the counterpart of the shape [`crate::generation::prompt`]
/// requests):
/// - blocks are delimited by a leading `<number>.` line prefix; blocks left
///   empty after trimming (the zero-line case) are discarded
/// - the first non-empty line, quote-stripped, is the question text
/// - a line containing `options` arms options mode and yields nothing itself
/// - a line containing `correctOption` yields everything after its first
///   colon (trimmed, quote-stripped) as the correct-option label
/// - any other line while in options mode splits on its first colon into an
///   option label and text, kept only when both are non-empty
///
/// Inconsistent drafts are still returned so the caller decides their fate.
pub fn parse_generated_text(text: &str) -> Vec<QuestionDraft> {
    BLOCK_DELIMITER
        .split(text)
        .filter(|block| !block.trim().is_empty())
        .map(parse_block)
        .collect()
}

fn parse_block(block: &str) -> QuestionDraft {
    let mut lines = block.lines().map(str::trim).filter(|l| !l.is_empty());

    // The caller filters out blank blocks, so a first line is always there
    let name = lines.next().map(clean).unwrap_or_default();
    let mut options = BTreeMap::new();
    let mut correct_option = String::new();
    let mut in_options = false;

    for line in lines {
        if line.contains("options") {
            in_options = true;
        } else if line.contains("correctOption") {
            if let Some(value) = line.split_once(':').map(|(_, v)| v) {
                correct_option = clean(value);
            }
        } else if in_options {
            let Some((label, value)) = line.split_once(':') else {
                continue;
            };
            let (label, value) = (clean(label), clean(value));
            if !label.is_empty() && !value.is_empty() {
                options.insert(label, value);
            }
        }
    }

    QuestionDraft {
        name,
        options,
        correct_option,
    }
}

/// Strip quote characters and JSON-ish trailing commas, then trim.
/// The provider tends to echo the JSON-flavored shape from the prompt.
fn clean(s: &str) -> String {
    s.replace('"', "").trim().trim_end_matches(',').trim().to_owned()
}

/// Render a draft back into the canonical block shape the parser accepts.
/// Parsing a formatted draft yields an equivalent draft.
pub fn format_block(index: usize, draft: &QuestionDraft) -> String {
    let mut out = format!("{index}. \"{}\"\noptions\n", draft.name);
    for (label, value) in &draft.options {
        out.push_str(&format!("{label}: {value}\n"));
    }
    out.push_str(&format!("correctOption: {}\n", draft.correct_option));
    out
}
