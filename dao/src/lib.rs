use pf_db_sqlite::db::SqliteDb;

pub mod contact;
pub mod entity;
pub mod project;
pub mod upload;
pub mod validation;

pub enum Db {
    SqliteDb(SqliteDb),
}
