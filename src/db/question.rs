use std::collections::BTreeMap;

use color_eyre::{eyre::OptionExt, Result};
use ulid::Ulid;

use super::models::{Exam, Question};
use super::Db;
use crate::generation::parser::QuestionDraft;

impl Db {
    /// Insert a question and link it into the owning exam's question list.
    /// Returns `None` when the exam does not exist.
    pub async fn add_question(
        &self,
        exam_id: &str,
        name: &str,
        options: &BTreeMap<String, String>,
        correct_option: &str,
    ) -> Result<Option<Question>> {
        let Some(exam) = self.get_exam(exam_id).await? else {
            return Ok(None);
        };

        let question = self.insert_question(exam_id, name, options, correct_option).await?;

        let mut ids = exam.question_ids;
        ids.push(question.id.clone());
        self.set_question_ids(exam_id, &ids).await?;

        tracing::info!("question {} added to exam {exam_id}", question.id);
        Ok(Some(question))
    }

    /// Persist a batch of generated drafts against a resolved exam, then
    /// append the new ids to the exam's question list in one final update.
    /// There is no rollback: a failure mid-batch leaves earlier rows in
    /// place, and the caller reports the generation as partial. The id-list
    /// update is what marks the batch complete.
    pub async fn save_generated_questions(
        &self,
        exam: &Exam,
        drafts: &[QuestionDraft],
    ) -> Result<(Exam, Vec<Question>)> {
        let mut saved = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let question = self
                .insert_question(&exam.id, &draft.name, &draft.options, &draft.correct_option)
                .await?;
            saved.push(question);
        }

        let mut ids = exam.question_ids.clone();
        ids.extend(saved.iter().map(|q| q.id.clone()));
        self.set_question_ids(&exam.id, &ids).await?;

        let updated = self
            .get_exam(&exam.id)
            .await?
            .ok_or_eyre("exam disappeared while saving generated questions")?;

        tracing::info!(
            "saved {} generated questions to exam {}",
            saved.len(),
            exam.id
        );
        Ok((updated, saved))
    }

    async fn insert_question(
        &self,
        exam_id: &str,
        name: &str,
        options: &BTreeMap<String, String>,
        correct_option: &str,
    ) -> Result<Question> {
        let id = Ulid::new().to_string();

        sqlx::query(
            r#"
            INSERT INTO questions (id, name, options, correct_option, exam_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&id)
        .bind(name)
        .bind(serde_json::to_string(options)?)
        .bind(correct_option)
        .bind(exam_id)
        .execute(&self.pool)
        .await?;

        Ok(Question {
            id,
            name: name.to_owned(),
            options: options.clone(),
            correct_option: correct_option.to_owned(),
            exam_id: exam_id.to_owned(),
        })
    }

    pub async fn questions_for_exam(&self, exam_id: &str) -> Result<Vec<Question>> {
        let rows = sqlx::query("SELECT * FROM questions WHERE exam_id = $1 ORDER BY id")
            .bind(exam_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Question::from_row).collect()
    }

    /// Update question fields; absent fields keep their current value.
    pub async fn edit_question(
        &self,
        question_id: &str,
        name: Option<String>,
        options: Option<BTreeMap<String, String>>,
        correct_option: Option<String>,
    ) -> Result<bool> {
        let options_json = options.map(|o| serde_json::to_string(&o)).transpose()?;

        let result = sqlx::query(
            r#"
            UPDATE questions SET
                name = COALESCE($2, name),
                options = COALESCE($3, options),
                correct_option = COALESCE($4, correct_option)
            WHERE id = $1
            "#,
        )
        .bind(question_id)
        .bind(&name)
        .bind(&options_json)
        .bind(&correct_option)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a question and unlink it from its exam's question list.
    pub async fn delete_question(&self, question_id: &str) -> Result<bool> {
        let exam_id: Option<String> =
            sqlx::query_scalar("SELECT exam_id FROM questions WHERE id = $1")
                .bind(question_id)
                .fetch_optional(&self.pool)
                .await?;

        let Some(exam_id) = exam_id else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(question_id)
            .execute(&self.pool)
            .await?;

        if let Some(exam) = self.get_exam(&exam_id).await? {
            let ids: Vec<String> = exam
                .question_ids
                .into_iter()
                .filter(|id| id != question_id)
                .collect();
            self.set_question_ids(&exam_id, &ids).await?;
        }

        tracing::info!("question deleted with id: {question_id}");
        Ok(true)
    }
}
