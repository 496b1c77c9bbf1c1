use serde::Deserialize;

#[derive(Deserialize)]
pub struct AdminConfig {
    username: String,
    password_hash: String,
}

impl AdminConfig {
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Argon2 PHC string, e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}
