use anyhow::Result;
use sqlx::{Executor, Pool, Sqlite};

use crate::{db::SqliteDb, model::contact::ContactModel};

const INSERT: &str = "INSERT INTO \"contacts\" (\"name\", \"email\", \"message\", \"date\") VALUES (?, ?, ?, ?)";
const SELECT: &str = "SELECT \"id\", \"name\", \"email\", \"message\", \"date\" FROM \"contacts\" WHERE \"id\" = ?";
const SELECT_MANY: &str = "SELECT \"id\", \"name\", \"email\", \"message\", \"date\" FROM \"contacts\" ORDER BY \"id\" ASC";
const COUNT: &str = "SELECT COUNT(1) FROM \"contacts\"";
const UPDATE: &str = "UPDATE \"contacts\" SET \"name\" = ?, \"email\" = ?, \"message\" = ?, \"date\" = ? WHERE \"id\" = ?";
const DELETE: &str = "DELETE FROM \"contacts\" WHERE \"id\" = ?";

pub async fn init(pool: &Pool<Sqlite>) -> Result<()> {
    pf_log::info(Some("🔧"), "[SQLite] Setting up contacts table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"contacts\" (\"id\" integer PRIMARY KEY AUTOINCREMENT, \"name\" varchar(200) NOT NULL, \"email\" varchar(200) NOT NULL, \"message\" text NOT NULL, \"date\" datetime NOT NULL)").await?;

    pool.prepare(INSERT).await?;
    pool.prepare(SELECT).await?;
    pool.prepare(SELECT_MANY).await?;
    pool.prepare(COUNT).await?;
    pool.prepare(UPDATE).await?;
    pool.prepare(DELETE).await?;

    Ok(())
}

impl SqliteDb {
    pub async fn insert_contact(&self, value: &ContactModel) -> Result<i64> {
        Ok(self
            .execute(
                sqlx::query(INSERT)
                    .bind(value.name())
                    .bind(value.email())
                    .bind(value.message())
                    .bind(value.date()),
            )
            .await?
            .last_insert_rowid())
    }

    pub async fn select_contact(&self, id: &i64) -> Result<Option<ContactModel>> {
        Ok(self.fetch_optional(sqlx::query_as(SELECT).bind(id)).await?)
    }

    pub async fn select_many_contacts(&self) -> Result<Vec<ContactModel>> {
        Ok(self.fetch_all(sqlx::query_as(SELECT_MANY)).await?)
    }

    pub async fn count_contacts(&self) -> Result<i64> {
        let (count,): (i64,) = self
            .fetch_optional(sqlx::query_as(COUNT))
            .await?
            .unwrap_or((0,));
        Ok(count)
    }

    pub async fn update_contact(&self, value: &ContactModel) -> Result<u64> {
        Ok(self
            .execute(
                sqlx::query(UPDATE)
                    .bind(value.name())
                    .bind(value.email())
                    .bind(value.message())
                    .bind(value.date())
                    .bind(value.id()),
            )
            .await?
            .rows_affected())
    }

    pub async fn delete_contact(&self, id: &i64) -> Result<u64> {
        Ok(self
            .execute(sqlx::query(DELETE).bind(id))
            .await?
            .rows_affected())
    }
}
