use chrono::{DateTime, Utc};
use pf_db_sqlite::model::contact::ContactModel as ContactSqliteModel;
use pf_error::{Error, Result};
use serde::Serialize;

use crate::{
    entity::{Entity, EntityDescriptor, FieldDescriptor, FieldKind, FieldValues},
    validation::parse_datetime,
    Db,
};

pub static CONTACT_DESCRIPTOR: EntityDescriptor = EntityDescriptor::new(
    "contact",
    "Contact",
    &[
        FieldDescriptor::new("name", "Name", FieldKind::Text, true),
        FieldDescriptor::new("email", "Email", FieldKind::Email, true),
        FieldDescriptor::new("message", "Message", FieldKind::LongText, true),
        FieldDescriptor::new("date", "Date", FieldKind::DateTime, false),
    ],
);

#[derive(Serialize)]
pub struct ContactDao {
    id: i64,
    name: String,
    email: String,
    message: String,
    date: DateTime<Utc>,
}

impl ContactDao {
    /// Stamps `date` with the current time of this call.
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            id: 0,
            name: name.to_owned(),
            email: email.to_owned(),
            message: message.to_owned(),
            date: Utc::now(),
        }
    }

    pub fn id(&self) -> &i64 {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn date(&self) -> &DateTime<Utc> {
        &self.date
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    pub fn set_email(&mut self, email: &str) {
        self.email = email.to_owned();
    }

    pub fn set_message(&mut self, message: &str) {
        self.message = message.to_owned();
    }

    pub fn set_date(&mut self, date: &DateTime<Utc>) {
        self.date = *date;
    }

    pub async fn db_insert(&mut self, db: &Db) -> Result<()> {
        self.id = match db {
            Db::SqliteDb(db) => db.insert_contact(&self.to_sqlitedb_model()).await,
        }
        .map_err(Error::store)?;
        Ok(())
    }

    pub async fn db_select(db: &Db, id: &i64) -> Result<Self> {
        let model = match db {
            Db::SqliteDb(db) => db.select_contact(id).await,
        }
        .map_err(Error::store)?;

        match model {
            Some(model) => Ok(Self::from_sqlitedb_model(&model)),
            None => Err(Error::NotFound(format!("Contact {id} not found"))),
        }
    }

    pub async fn db_select_many(db: &Db) -> Result<Vec<Self>> {
        match db {
            Db::SqliteDb(db) => {
                let contacts = db.select_many_contacts().await.map_err(Error::store)?;
                Ok(contacts.iter().map(Self::from_sqlitedb_model).collect())
            }
        }
    }

    pub async fn db_count(db: &Db) -> Result<i64> {
        match db {
            Db::SqliteDb(db) => db.count_contacts().await.map_err(Error::store),
        }
    }

    pub async fn db_update(&self, db: &Db) -> Result<()> {
        let updated = match db {
            Db::SqliteDb(db) => db.update_contact(&self.to_sqlitedb_model()).await,
        }
        .map_err(Error::store)?;

        if updated == 0 {
            return Err(Error::NotFound(format!("Contact {} not found", self.id)));
        }
        Ok(())
    }

    pub async fn db_delete(db: &Db, id: &i64) -> Result<()> {
        let deleted = match db {
            Db::SqliteDb(db) => db.delete_contact(id).await,
        }
        .map_err(Error::store)?;

        if deleted == 0 {
            return Err(Error::NotFound(format!("Contact {id} not found")));
        }
        Ok(())
    }

    fn from_sqlitedb_model(model: &ContactSqliteModel) -> Self {
        Self {
            id: *model.id(),
            name: model.name().to_owned(),
            email: model.email().to_owned(),
            message: model.message().to_owned(),
            date: *model.date(),
        }
    }

    fn to_sqlitedb_model(&self) -> ContactSqliteModel {
        ContactSqliteModel::new(
            &self.id,
            &self.name,
            &self.email,
            &self.message,
            &self.date,
        )
    }
}

impl Entity for ContactDao {
    fn descriptor() -> &'static EntityDescriptor {
        &CONTACT_DESCRIPTOR
    }

    fn record_id(&self) -> &i64 {
        &self.id
    }

    fn from_values(values: &FieldValues) -> Result<Self> {
        CONTACT_DESCRIPTOR.validate(values, false)?;

        let mut contact = Self::new(
            values.text("name").unwrap_or_default(),
            values.text("email").unwrap_or_default(),
            values.text("message").unwrap_or_default(),
        );
        if let Some(date) = values.text("date").and_then(parse_datetime) {
            contact.set_date(&date);
        }
        Ok(contact)
    }

    fn apply_values(&mut self, values: &FieldValues) -> Result<()> {
        CONTACT_DESCRIPTOR.validate(values, true)?;

        if let Some(name) = values.text("name") {
            self.set_name(name);
        }
        if let Some(email) = values.text("email") {
            self.set_email(email);
        }
        if let Some(message) = values.text("message") {
            self.set_message(message);
        }
        if let Some(date) = values.text("date").and_then(parse_datetime) {
            self.set_date(&date);
        }
        Ok(())
    }

    async fn insert(&mut self, db: &Db) -> Result<()> {
        self.db_insert(db).await
    }

    async fn find(db: &Db, id: &i64) -> Result<Self> {
        Self::db_select(db, id).await
    }

    async fn find_all(db: &Db) -> Result<Vec<Self>> {
        Self::db_select_many(db).await
    }

    async fn count(db: &Db) -> Result<i64> {
        Self::db_count(db).await
    }

    async fn update(&self, db: &Db) -> Result<()> {
        self.db_update(db).await
    }

    async fn delete(db: &Db, id: &i64) -> Result<()> {
        Self::db_delete(db, id).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pf_db_sqlite::db::SqliteDb;
    use tempfile::TempDir;

    use super::*;

    async fn setup_test_db() -> (Db, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.sqlite3");
        let db = SqliteDb::new(path.to_str().unwrap(), &1).await.unwrap();
        (Db::SqliteDb(db), dir)
    }

    #[tokio::test]
    async fn each_contact_gets_its_own_timestamp() {
        let (db, _dir) = setup_test_db().await;

        let mut first = ContactDao::new("A", "a@example.com", "one");
        first.db_insert(&db).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let mut second = ContactDao::new("B", "b@example.com", "two");
        second.db_insert(&db).await.unwrap();

        let contacts = ContactDao::db_select_many(&db).await.unwrap();
        assert_eq!(contacts.len(), 2);
        assert!(contacts[1].date() > contacts[0].date());
    }

    #[tokio::test]
    async fn stored_fields_round_trip_exactly() {
        let (db, _dir) = setup_test_db().await;

        let mut contact = ContactDao::new("Jane Doe", "jane@example.com", "Hello");
        contact.db_insert(&db).await.unwrap();

        let stored = ContactDao::db_select(&db, contact.id()).await.unwrap();
        assert_eq!(stored.name(), "Jane Doe");
        assert_eq!(stored.email(), "jane@example.com");
        assert_eq!(stored.message(), "Hello");
    }

    #[tokio::test]
    async fn delete_removes_once_then_reports_not_found() {
        let (db, _dir) = setup_test_db().await;

        let mut contact = ContactDao::new("Jane", "jane@example.com", "Hi");
        contact.db_insert(&db).await.unwrap();

        ContactDao::db_delete(&db, contact.id()).await.unwrap();
        assert_eq!(ContactDao::db_count(&db).await.unwrap(), 0);
        assert!(matches!(
            ContactDao::db_select(&db, contact.id()).await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            ContactDao::db_delete(&db, contact.id()).await,
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn admin_values_are_checked_for_email_shape() {
        let mut values = FieldValues::new();
        values.insert_text("name", "Jane");
        values.insert_text("email", "jane");
        values.insert_text("message", "Hi");

        let Err(Error::Validation(errors)) = ContactDao::from_values(&values) else {
            panic!("expected a validation error");
        };
        assert!(errors.has_field("email"));
        assert!(!errors.has_field("date"));
    }

    #[test]
    fn admin_values_may_set_the_date() {
        let mut values = FieldValues::new();
        values.insert_text("name", "Jane");
        values.insert_text("email", "jane@example.com");
        values.insert_text("message", "Hi");
        values.insert_text("date", "2023-01-02 03:04:05");

        let contact = ContactDao::from_values(&values).unwrap();
        assert_eq!(contact.date().to_rfc3339(), "2023-01-02T03:04:05+00:00");
    }
}
