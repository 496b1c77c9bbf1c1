use anyhow::Result;
use sqlx::{Executor, Pool, Sqlite};

use crate::{db::SqliteDb, model::project::ProjectModel};

const INSERT: &str =
    "INSERT INTO \"projects\" (\"name\", \"description\", \"image\") VALUES (?, ?, ?)";
const SELECT: &str =
    "SELECT \"id\", \"name\", \"description\", \"image\" FROM \"projects\" WHERE \"id\" = ?";
const SELECT_MANY: &str =
    "SELECT \"id\", \"name\", \"description\", \"image\" FROM \"projects\" ORDER BY \"id\" ASC";
const COUNT: &str = "SELECT COUNT(1) FROM \"projects\"";
const UPDATE: &str = "UPDATE \"projects\" SET \"name\" = ?, \"description\" = ?, \"image\" = ? WHERE \"id\" = ?";
const DELETE: &str = "DELETE FROM \"projects\" WHERE \"id\" = ?";

pub async fn init(pool: &Pool<Sqlite>) -> Result<()> {
    pf_log::info(Some("🔧"), "[SQLite] Setting up projects table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"projects\" (\"id\" integer PRIMARY KEY AUTOINCREMENT, \"name\" varchar(200) NOT NULL, \"description\" text NOT NULL, \"image\" varchar(128))").await?;

    pool.prepare(INSERT).await?;
    pool.prepare(SELECT).await?;
    pool.prepare(SELECT_MANY).await?;
    pool.prepare(COUNT).await?;
    pool.prepare(UPDATE).await?;
    pool.prepare(DELETE).await?;

    Ok(())
}

impl SqliteDb {
    /// Returns the id assigned by the store.
    pub async fn insert_project(&self, value: &ProjectModel) -> Result<i64> {
        Ok(self
            .execute(
                sqlx::query(INSERT)
                    .bind(value.name())
                    .bind(value.description())
                    .bind(value.image()),
            )
            .await?
            .last_insert_rowid())
    }

    pub async fn select_project(&self, id: &i64) -> Result<Option<ProjectModel>> {
        Ok(self.fetch_optional(sqlx::query_as(SELECT).bind(id)).await?)
    }

    pub async fn select_many_projects(&self) -> Result<Vec<ProjectModel>> {
        Ok(self.fetch_all(sqlx::query_as(SELECT_MANY)).await?)
    }

    pub async fn count_projects(&self) -> Result<i64> {
        let (count,): (i64,) = self
            .fetch_optional(sqlx::query_as(COUNT))
            .await?
            .unwrap_or((0,));
        Ok(count)
    }

    /// Returns the number of rows touched, `0` when `id` does not exist.
    pub async fn update_project(&self, value: &ProjectModel) -> Result<u64> {
        Ok(self
            .execute(
                sqlx::query(UPDATE)
                    .bind(value.name())
                    .bind(value.description())
                    .bind(value.image())
                    .bind(value.id()),
            )
            .await?
            .rows_affected())
    }

    /// Returns the number of rows touched, `0` when `id` does not exist.
    pub async fn delete_project(&self, id: &i64) -> Result<u64> {
        Ok(self
            .execute(sqlx::query(DELETE).bind(id))
            .await?
            .rows_affected())
    }
}
