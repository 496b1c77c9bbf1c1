use std::io::BufRead;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pf_hash_argon2::argon2::Argon2Hash;

/// Portfolio web server.
#[derive(Parser)]
#[command(name = "portfolio", version, about = "Portfolio web server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the site (the default when no command is given).
    Serve,
    /// Print the argon2 hash to put in `admin.password_hash`.
    HashPassword {
        /// Password to hash. Read from the first line of stdin when omitted.
        password: Option<String>,
    },
}

pub fn hash_password(password: Option<String>) -> Result<String> {
    let password = match password {
        Some(password) => password,
        None => {
            let mut line = String::new();
            std::io::stdin()
                .lock()
                .read_line(&mut line)
                .context("reading password from stdin")?;
            line.trim_end_matches(['\r', '\n']).to_owned()
        }
    };

    hash(&password)
}

fn hash(password: &str) -> Result<String> {
    if password.is_empty() {
        bail!("password must not be empty");
    }

    Argon2Hash::default()
        .hash_password(password)
        .map_err(|err| anyhow::anyhow!("hashing password failed: {err}"))
}
