//! Descriptor-driven access to the records managed through the admin surface.

use ahash::{HashMap, HashMapExt};
use pf_error::Result;
use serde::Serialize;

use crate::{
    upload::{UploadStore, UploadedFile},
    validation::{self, datetime, email, required, Rule, Validator},
    Db,
};

const NONE: &[Validator] = &[];
const REQUIRED: &[Validator] = &[required];
const EMAIL: &[Validator] = &[email];
const REQUIRED_EMAIL: &[Validator] = &[required, email];
const DATETIME: &[Validator] = &[datetime];
const REQUIRED_DATETIME: &[Validator] = &[required, datetime];

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    LongText,
    Email,
    DateTime,
    Image,
}

#[derive(Serialize, Debug)]
pub struct FieldDescriptor {
    name: &'static str,
    label: &'static str,
    kind: FieldKind,
    required: bool,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind, required: bool) -> Self {
        Self {
            name,
            label,
            kind,
            required,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn required(&self) -> &bool {
        &self.required
    }

    pub fn is_upload(&self) -> bool {
        self.kind == FieldKind::Image
    }

    fn validators(&self) -> &'static [Validator] {
        match (self.kind, self.required) {
            (FieldKind::Image, _) => NONE,
            (FieldKind::Email, true) => REQUIRED_EMAIL,
            (FieldKind::Email, false) => EMAIL,
            (FieldKind::DateTime, true) => REQUIRED_DATETIME,
            (FieldKind::DateTime, false) => DATETIME,
            (_, true) => REQUIRED,
            (_, false) => NONE,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct EntityDescriptor {
    name: &'static str,
    label: &'static str,
    fields: &'static [FieldDescriptor],
}

impl EntityDescriptor {
    pub const fn new(
        name: &'static str,
        label: &'static str,
        fields: &'static [FieldDescriptor],
    ) -> Self {
        Self {
            name,
            label,
            fields,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    pub fn upload_fields(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter().filter(|field| field.is_upload())
    }

    /// Checks every non-upload field of `values`.
    ///
    /// With `partial`, absent fields are skipped (edits); otherwise they are
    /// validated as empty (creates). Blank optional fields always pass.
    pub fn validate(&self, values: &FieldValues, partial: bool) -> Result<()> {
        let rules: Vec<Rule> = self
            .fields
            .iter()
            .filter(|field| !(partial && values.text(field.name()).is_none()))
            .filter(|field| {
                *field.required() || values.text(field.name()).is_some_and(|v| !v.trim().is_empty())
            })
            .map(|field| (field.name(), field.validators()))
            .collect();

        validation::validate(&rules, |field| values.text(field))
    }
}

/// Raw admin input: text parts plus any uploaded files, keyed by field name.
#[derive(Default)]
pub struct FieldValues {
    texts: HashMap<String, String>,
    uploads: HashMap<String, UploadedFile>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self {
            texts: HashMap::new(),
            uploads: HashMap::new(),
        }
    }

    pub fn insert_text(&mut self, field: &str, value: &str) {
        self.texts.insert(field.to_owned(), value.to_owned());
    }

    pub fn insert_upload(&mut self, field: &str, file: UploadedFile) {
        self.uploads.insert(field.to_owned(), file);
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.texts.get(field).map(String::as_str)
    }

    pub fn upload(&self, field: &str) -> Option<&UploadedFile> {
        self.uploads.get(field)
    }

    /// Checkbox-style flag: `true`, `on`, `1` or `yes`.
    pub fn flag(&self, field: &str) -> bool {
        self.text(field).is_some_and(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "true" | "on" | "1" | "yes"
            )
        })
    }
}

#[allow(async_fn_in_trait)]
pub trait Entity: Serialize + Sized {
    fn descriptor() -> &'static EntityDescriptor;

    fn record_id(&self) -> &i64;

    /// Builds an unsaved record; `values` must pass a full validation.
    fn from_values(values: &FieldValues) -> Result<Self>;

    /// Applies the fields present in `values`; they must pass a partial validation.
    fn apply_values(&mut self, values: &FieldValues) -> Result<()>;

    fn upload_path(&self, _field: &str) -> Option<&str> {
        None
    }

    fn set_upload_path(&mut self, _field: &str, _path: Option<String>) {}

    async fn insert(&mut self, db: &Db) -> Result<()>;

    async fn find(db: &Db, id: &i64) -> Result<Self>;

    async fn find_all(db: &Db) -> Result<Vec<Self>>;

    async fn count(db: &Db) -> Result<i64>;

    async fn update(&self, db: &Db) -> Result<()>;

    async fn delete(db: &Db, id: &i64) -> Result<()>;
}

/// Files written for one admin write, kept until the outcome is known.
#[derive(Default)]
pub struct UploadChanges {
    saved: Vec<String>,
    replaced: Vec<String>,
}

impl UploadChanges {
    /// Stores new uploads onto `record` and honours `<field>_delete` flags.
    pub async fn stage<E: Entity>(
        record: &mut E,
        values: &FieldValues,
        store: &UploadStore,
    ) -> Result<Self> {
        let mut changes = Self::default();

        for field in E::descriptor().upload_fields() {
            let old = record.upload_path(field.name()).map(str::to_owned);

            if let Some(file) = values.upload(field.name()) {
                let path = match store.save(file).await {
                    Ok(path) => path,
                    Err(err) => {
                        changes.rollback(store).await;
                        return Err(err);
                    }
                };
                changes.saved.push(path.clone());
                record.set_upload_path(field.name(), Some(path));
            } else if values.flag(&format!("{}_delete", field.name())) {
                record.set_upload_path(field.name(), None);
            } else {
                continue;
            }

            if let Some(old) = old {
                changes.replaced.push(old);
            }
        }

        Ok(changes)
    }

    /// Drops the files the record no longer points to.
    pub async fn commit(self, store: &UploadStore) {
        for path in &self.replaced {
            if let Err(err) = store.remove(path).await {
                pf_log::warn(None, format!("[UploadChanges] Failed to remove {path}: {err}"));
            }
        }
    }

    /// Drops the files saved for a write that did not happen.
    pub async fn rollback(self, store: &UploadStore) {
        for path in &self.saved {
            if let Err(err) = store.remove(path).await {
                pf_log::warn(None, format!("[UploadChanges] Failed to remove {path}: {err}"));
            }
        }
    }
}

/// Removes every upload a deleted record pointed to.
pub async fn remove_uploads<E: Entity>(record: &E, store: &UploadStore) {
    for field in E::descriptor().upload_fields() {
        if let Some(path) = record.upload_path(field.name()) {
            if let Err(err) = store.remove(path).await {
                pf_log::warn(None, format!("[Entity] Failed to remove {path}: {err}"));
            }
        }
    }
}
