use std::collections::BTreeMap;

use color_eyre::Result;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// Authenticated request identity, resolved from a session token.
pub struct AuthUser {
    pub name: String,
}

/// A named collection of questions. `question_ids` is the exam's own record
/// of its questions; a question row also carries an `exam_id` back-reference,
/// and the id list is what marks a generation batch as fully linked.
#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: String,
    pub name: String,
    pub duration: i64,
    pub category: Option<String>,
    pub total_marks: i64,
    pub passing_marks: i64,
    pub question_ids: Vec<String>,
}

impl Exam {
    pub fn from_row(row: &SqliteRow) -> Result<Self> {
        let ids_json: String = row.try_get("question_ids")?;
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            duration: row.try_get("duration")?,
            category: row.try_get("category")?,
            total_marks: row.try_get("total_marks")?,
            passing_marks: row.try_get("passing_marks")?,
            question_ids: serde_json::from_str(&ids_json)?,
        })
    }
}

/// A persisted multiple-choice question. `options` maps an option label
/// (A-D) to its text; `correct_option` must be one of the mapping's keys.
#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub name: String,
    pub options: BTreeMap<String, String>,
    pub correct_option: String,
    pub exam_id: String,
}

impl Question {
    pub fn from_row(row: &SqliteRow) -> Result<Self> {
        let options_json: String = row.try_get("options")?;
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            options: serde_json::from_str(&options_json)?,
            correct_option: row.try_get("correct_option")?,
            exam_id: row.try_get("exam_id")?,
        })
    }
}
