use color_eyre::Result;

use super::models::UserRow;
use super::Db;
use crate::models::{NewUser, User};

impl Db {
    /// Insert the user, or replace the record that already carries this full name.
    pub async fn upsert_user(&self, user: &NewUser) -> Result<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (full_name, birthdate, role) VALUES (?, ?, ?)
            ON CONFLICT(full_name) DO UPDATE SET
                birthdate = excluded.birthdate,
                role = excluded.role
            RETURNING id, full_name, birthdate, role
            "#,
        )
        .bind(&user.full_name)
        .bind(&user.birthdate)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("user upserted: id={}, full_name={}", row.id, row.full_name);
        row.try_into()
    }

    pub async fn find_user(&self, user_id: i64) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, full_name, birthdate, role FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }
}
