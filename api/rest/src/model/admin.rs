use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct AdminRecordReqPath {
    id: i64,
}

impl AdminRecordReqPath {
    pub fn id(&self) -> &i64 {
        &self.id
    }
}

#[derive(Serialize)]
pub struct AdminRecordIDResJson {
    id: i64,
}

impl AdminRecordIDResJson {
    pub fn new(id: &i64) -> Self {
        Self { id: *id }
    }
}
