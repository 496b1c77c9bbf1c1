use sqlx::{
    prelude::FromRow,
    types::chrono::{DateTime, Utc},
};

#[derive(FromRow)]
pub struct ContactModel {
    id: i64,
    name: String,
    email: String,
    message: String,
    date: DateTime<Utc>,
}

impl ContactModel {
    pub fn new(id: &i64, name: &str, email: &str, message: &str, date: &DateTime<Utc>) -> Self {
        Self {
            id: *id,
            name: name.to_owned(),
            email: email.to_owned(),
            message: message.to_owned(),
            date: *date,
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
}
