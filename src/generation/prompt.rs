use crate::names;

/// Build the instruction sent to the generation provider.
///
/// The per-question record shape spelled out here (a quoted question line,
/// an `options` section with A-D labels, a `correctOption` line) is a
/// contract with [`crate::generation::parser`]: the parser recognizes
/// exactly these markers and has no fallback if the provider departs from
/// them. Change one side only together with the other.
pub fn build_prompt(text: &str, difficulty: Option<&str>, number_of_questions: i64) -> String {
    let difficulty = difficulty.unwrap_or(names::DEFAULT_DIFFICULTY);

    format!(
        r#"Generate {number_of_questions} {difficulty}-level multiple-choice quiz questions based on the following text:
"{text}"
Format each question as follows:
{{
  "name": "<question>",
  "options": {{
    "A": "<option1>",
    "B": "<option2>",
    "C": "<option3>",
    "D": "<option4>"
  }},
  "correctOption": "<correct option letter (A, B, C, or D)>"
}}
Ensure that only one option is correct for each question."#
    )
}
