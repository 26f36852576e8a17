use color_eyre::Result;
use ulid::Ulid;

use super::models::Exam;
use super::Db;

impl Db {
    /// Create an exam with an empty question set, if no exam with that name
    /// exists yet. Uniqueness is enforced by the unique index in a single
    /// INSERT, so two concurrent creates for the same name cannot both
    /// succeed. Returns `None` when the name is already taken.
    pub async fn create_exam(
        &self,
        name: &str,
        duration: Option<i64>,
        category: Option<String>,
        total_marks: Option<i64>,
        passing_marks: Option<i64>,
    ) -> Result<Option<Exam>> {
        let id = Ulid::new().to_string();

        let result = sqlx::query(
            r#"
            INSERT INTO exams (id, name, duration, category, total_marks, passing_marks)
            VALUES ($1, $2, COALESCE($3, 60), $4, COALESCE($5, 0), COALESCE($6, 0))
            ON CONFLICT(name) DO NOTHING
            "#,
        )
        .bind(&id)
        .bind(name)
        .bind(duration)
        .bind(&category)
        .bind(total_marks)
        .bind(passing_marks)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        tracing::info!("new exam {name:?} created with id: {id}");
        self.get_exam(&id).await
    }

    pub async fn get_exam(&self, exam_id: &str) -> Result<Option<Exam>> {
        let row = sqlx::query("SELECT * FROM exams WHERE id = $1")
            .bind(exam_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Exam::from_row).transpose()
    }

    pub async fn get_all_exams(&self) -> Result<Vec<Exam>> {
        let rows = sqlx::query("SELECT * FROM exams ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Exam::from_row).collect()
    }

    /// Update exam fields; absent fields keep their current value.
    /// Returns false when no exam with that id exists.
    pub async fn edit_exam(
        &self,
        exam_id: &str,
        name: Option<String>,
        duration: Option<i64>,
        category: Option<String>,
        total_marks: Option<i64>,
        passing_marks: Option<i64>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE exams SET
                name = COALESCE($2, name),
                duration = COALESCE($3, duration),
                category = COALESCE($4, category),
                total_marks = COALESCE($5, total_marks),
                passing_marks = COALESCE($6, passing_marks)
            WHERE id = $1
            "#,
        )
        .bind(exam_id)
        .bind(&name)
        .bind(duration)
        .bind(&category)
        .bind(total_marks)
        .bind(passing_marks)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an exam; its questions are removed by the FK cascade.
    pub async fn delete_exam(&self, exam_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM exams WHERE id = $1")
            .bind(exam_id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!("exam deleted with id: {exam_id}");
        }
        Ok(deleted)
    }

    pub(super) async fn set_question_ids(&self, exam_id: &str, ids: &[String]) -> Result<()> {
        sqlx::query("UPDATE exams SET question_ids = $2 WHERE id = $1")
            .bind(exam_id)
            .bind(serde_json::to_string(ids)?)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
