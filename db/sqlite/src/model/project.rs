use sqlx::prelude::FromRow;

#[derive(FromRow)]
pub struct ProjectModel {
    id: i64,
    name: String,
    description: String,
    image: Option<String>,
}

impl ProjectModel {
    pub fn new(id: &i64, name: &str, description: &str, image: &Option<String>) -> Self {
        Self {
            id: *id,
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
}
