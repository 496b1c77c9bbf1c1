use pf_db_sqlite::model::project::ProjectModel as ProjectSqliteModel;
use pf_error::{Error, Result};
use serde::Serialize;

use crate::{
    entity::{Entity, EntityDescriptor, FieldDescriptor, FieldKind, FieldValues},
    Db,
};

pub static PROJECT_DESCRIPTOR: EntityDescriptor = EntityDescriptor::new(
    "project",
    "Project",
    &[
        FieldDescriptor::new("name", "Name", FieldKind::Text, true),
        FieldDescriptor::new("description", "Description", FieldKind::LongText, true),
        FieldDescriptor::new("image", "Image", FieldKind::Image, false),
    ],
);

#[derive(Serialize)]
pub struct ProjectDao {
    id: i64,
    name: String,
    description: String,
    image: Option<String>,
}

impl ProjectDao {
    /// The id stays `0` until `db_insert` assigns one.
    pub fn new(name: &str, description: &str, image: &Option<String>) -> Self {
        Self {
            id: 0,
            name: name.to_owned(),
            description: description.to_owned(),
            image: image.to_owned(),
        }
    }

    pub fn id(&self) -> &i64 {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image(&self) -> &Option<String> {
        &self.image
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_owned();
    }

    pub fn set_image(&mut self, image: &Option<String>) {
        self.image = image.to_owned();
    }

    pub async fn db_insert(&mut self, db: &Db) -> Result<()> {
        self.id = match db {
            Db::SqliteDb(db) => db.insert_project(&self.to_sqlitedb_model()).await,
        }
        .map_err(Error::store)?;
        Ok(())
    }

    pub async fn db_select(db: &Db, id: &i64) -> Result<Self> {
        let model = match db {
            Db::SqliteDb(db) => db.select_project(id).await,
        }
        .map_err(Error::store)?;

        match model {
            Some(model) => Ok(Self::from_sqlitedb_model(&model)),
            None => Err(Error::NotFound(format!("Project {id} not found"))),
        }
    }

    /// Every project, in ascending id order.
    pub async fn db_select_many(db: &Db) -> Result<Vec<Self>> {
        match db {
            Db::SqliteDb(db) => {
                let projects = db.select_many_projects().await.map_err(Error::store)?;
                Ok(projects.iter().map(Self::from_sqlitedb_model).collect())
            }
        }
    }

    pub async fn db_count(db: &Db) -> Result<i64> {
        match db {
            Db::SqliteDb(db) => db.count_projects().await.map_err(Error::store),
        }
    }

    pub async fn db_update(&self, db: &Db) -> Result<()> {
        let updated = match db {
            Db::SqliteDb(db) => db.update_project(&self.to_sqlitedb_model()).await,
        }
        .map_err(Error::store)?;

        if updated == 0 {
            return Err(Error::NotFound(format!("Project {} not found", self.id)));
        }
        Ok(())
    }

    pub async fn db_delete(db: &Db, id: &i64) -> Result<()> {
        let deleted = match db {
            Db::SqliteDb(db) => db.delete_project(id).await,
        }
        .map_err(Error::store)?;

        if deleted == 0 {
            return Err(Error::NotFound(format!("Project {id} not found")));
        }
        Ok(())
    }

    fn from_sqlitedb_model(model: &ProjectSqliteModel) -> Self {
        Self {
            id: *model.id(),
            name: model.name().to_owned(),
            description: model.description().to_owned(),
            image: model.image().to_owned(),
        }
    }

    fn to_sqlitedb_model(&self) -> ProjectSqliteModel {
        ProjectSqliteModel::new(&self.id, &self.name, &self.description, &self.image)
    }
}

impl Entity for ProjectDao {
    fn descriptor() -> &'static EntityDescriptor {
        &PROJECT_DESCRIPTOR
    }

    fn record_id(&self) -> &i64 {
        &self.id
    }

    fn from_values(values: &FieldValues) -> Result<Self> {
        PROJECT_DESCRIPTOR.validate(values, false)?;

        Ok(Self::new(
            values.text("name").unwrap_or_default(),
            values.text("description").unwrap_or_default(),
            &None,
        ))
    }

    fn apply_values(&mut self, values: &FieldValues) -> Result<()> {
        PROJECT_DESCRIPTOR.validate(values, true)?;

        if let Some(name) = values.text("name") {
            self.set_name(name);
        }
        if let Some(description) = values.text("description") {
            self.set_description(description);
        }
        Ok(())
    }

    fn upload_path(&self, field: &str) -> Option<&str> {
        match field {
            "image" => self.image.as_deref(),
            _ => None,
        }
    }

    fn set_upload_path(&mut self, field: &str, path: Option<String>) {
        if field == "image" {
            self.image = path;
        }
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
