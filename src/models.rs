use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::db::models::{Exam, Question};

/// Response envelope shared by every endpoint: a human-readable message, a
/// success flag, and an optional payload. Callers must distinguish
/// `success: false` with HTTP 200 (e.g. a duplicate exam name) from 4xx/5xx
/// failures.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            success: true,
            data: Some(data),
        }
    }

    /// Success without a payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
            data: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddExamBody {
    pub name: String,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub total_marks: Option<i64>,
    #[serde(default)]
    pub passing_marks: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditExamBody {
    pub exam_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub total_marks: Option<i64>,
    #[serde(default)]
    pub passing_marks: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionBody {
    pub exam: String,
    pub name: String,
    pub options: BTreeMap<String, String>,
    pub correct_option: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditQuestionBody {
    pub question_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub options: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub correct_option: Option<String>,
}

/// Inbound payload for the generate-quiz endpoint. `text` and
/// `numberOfQuestions` are required but kept optional here so validation can
/// answer with the envelope instead of a deserialization rejection. Exactly
/// one of `examId` / `examName` identifies the target exam.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizBody {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub exam_id: Option<String>,
    #[serde(default)]
    pub number_of_questions: Option<i64>,
    #[serde(default)]
    pub exam_name: Option<String>,
}

#[derive(Serialize)]
pub struct ExamWithQuestions {
    #[serde(flatten)]
    pub exam: Exam,
    pub questions: Vec<Question>,
}

#[derive(Serialize)]
pub struct GeneratedQuizData {
    pub exam: Exam,
    pub questions: Vec<Question>,
}
