use argon2::{
    password_hash::{self, rand_core::OsRng, SaltString},
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
};

pub struct Argon2Hash {
    argon2: Argon2<'static>,
}

impl Argon2Hash {
    pub fn new(algorithm: &str, version: &str) -> Self {
        pf_log::info(Some("⚡"), "[Argon2Hash] Initializing component");

        let algorithm = match algorithm {
            "Argon2d" => Algorithm::Argon2d,
            "Argon2i" => Algorithm::Argon2i,
            "Argon2id" => Algorithm::Argon2id,
            _ => pf_log::panic(None, "[Argon2Hash] Unknown argon2 algorithm"),
        };

        let version = match version {
            "V0x10" => Version::V0x10,
            "V0x13" => Version::V0x13,
            _ => pf_log::panic(None, "[Argon2Hash] Unknown argon2 version"),
        };

        Self {
            argon2: Argon2::new(algorithm, version, Params::DEFAULT),
        }
    }

    /// Hashes with a fresh random salt and returns the PHC string.
    pub fn hash_password(&self, password: &str) -> Result<String, password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(self
            .argon2
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    }

    /// Checks `password` against a PHC string; the parameters embedded in
    /// `hash` win over the ones this instance was built with.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<(), password_hash::Error> {
        let hash = PasswordHash::new(hash)?;
        self.argon2.verify_password(password.as_bytes(), &hash)
    }
}

impl Default for Argon2Hash {
    fn default() -> Self {
        Self::new("Argon2id", "V0x13")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_its_own_hash() {
        let argon2 = Argon2Hash::default();
        let hash = argon2.hash_password("hunter2").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(argon2.verify_password("hunter2", &hash).is_ok());
        assert!(argon2.verify_password("hunter3", &hash).is_err());
    }

    #[test]
    fn rejects_malformed_hash() {
        assert!(Argon2Hash::default()
            .verify_password("hunter2", "not-a-phc-string")
            .is_err());
    }

    #[test]
    #[should_panic]
    fn unknown_algorithm_panics() {
        Argon2Hash::new("Argon3", "V0x13");
    }
}
