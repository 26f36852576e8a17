use color_eyre::Result;
use ulid::Ulid;

use super::Db;

impl Db {
    pub async fn create_session(&self, user_name: &str) -> Result<String> {
        let token = Ulid::new().to_string();

        sqlx::query("INSERT INTO sessions (id, user_name) VALUES ($1, $2)")
            .bind(&token)
            .bind(user_name)
            .execute(&self.pool)
            .await?;

        tracing::info!("new session created for {user_name}");
        Ok(token)
    }

    pub async fn session_user(&self, token: &str) -> Result<Option<String>> {
        let user_name: Option<String> =
            sqlx::query_scalar("SELECT user_name FROM sessions WHERE id = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user_name)
    }
}
