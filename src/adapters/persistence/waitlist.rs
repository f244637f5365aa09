use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::AppResult,
    application::use_cases::waitlist::WaitlistRepo,
    domain::entities::waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
};

// Waitlist entry as stored in the db.
#[derive(sqlx::FromRow, Debug)]
struct WaitlistEntryDb {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    created_at: NaiveDateTime,
}

impl From<WaitlistEntryDb> for WaitlistEntry {
    fn from(row: WaitlistEntryDb) -> Self {
        WaitlistEntry {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, first_name, last_name, email, created_at FROM waitlist_entries";

#[async_trait]
impl WaitlistRepo for PostgresPersistence {
    async fn insert(&self, entry: &NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        // Unique violations on email surface as AppError::DuplicateEmail.
        let row = sqlx::query_as::<_, WaitlistEntryDb>(
            r#"INSERT INTO waitlist_entries (id, first_name, last_name, email)
               VALUES ($1, $2, $3, $4)
               RETURNING id, first_name, last_name, email, created_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(&entry.first_name)
        .bind(&entry.last_name)
        .bind(&entry.email)
        .fetch_one(self.pool())
        .await?;
        Ok(row.into())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>> {
        let row = sqlx::query_as::<_, WaitlistEntryDb>(&format!("{SELECT_COLUMNS} WHERE email = $1"))
            .bind(email)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.map(Into::into))
    }

    async fn list(&self) -> AppResult<Vec<WaitlistEntry>> {
        let rows = sqlx::query_as::<_, WaitlistEntryDb>(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM waitlist_entries")
            .fetch_one(self.pool())
            .await?;
        Ok(count)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM waitlist_entries")
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }
}
