//! Command-line interface.
//!
//! Accounts are administered here rather than over HTTP: `user add` creates
//! an account and prints its token once; only the hash is kept.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use veritas_core::errors::{StorageError, VeritasResult};
use veritas_core::IVeritasStorage;

use crate::middleware::{generate_token, hash_token};

#[derive(Debug, Parser)]
#[command(name = "veritas", version, about = "AI-vs-human content detection service")]
pub struct Cli {
    /// Path to the TOML config file (default: ./veritas.toml if present).
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve,
    /// Manage user accounts.
    #[command(subcommand)]
    User(UserCommand),
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create an account and print its API token.
    Add {
        #[arg(value_parser = clap::builder::NonEmptyStringValueParser::new())]
        username: String,
    },
    /// Issue a new token, invalidating the old one.
    RotateToken { username: String },
    /// List accounts.
    List,
    /// Delete an account and all of its history.
    Remove { username: String },
}

/// Run a user-management command, writing human-readable output to `out`.
pub fn run_user_command(
    storage: &dyn IVeritasStorage,
    command: &UserCommand,
    out: &mut impl Write,
) -> VeritasResult<()> {
    match command {
        UserCommand::Add { username } => {
            let token = generate_token();
            let user = storage.create_user(username.trim(), &hash_token(&token))?;
            writeln!(out, "created user {} (id {})", user.username, user.id)?;
            writeln!(out, "token: {token}")?;
        }
        UserCommand::RotateToken { username } => {
            let user = find_user(storage, username)?;
            let token = generate_token();
            storage.set_token_hash(user.id, &hash_token(&token))?;
            writeln!(out, "new token for {}: {token}", user.username)?;
        }
        UserCommand::List => {
            for user in storage.list_users()? {
                writeln!(out, "{}\t{}\t{}", user.id, user.username, user.created_at)?;
            }
        }
        UserCommand::Remove { username } => {
            let user = find_user(storage, username)?;
            storage.delete_user(user.id)?;
            writeln!(out, "removed user {} and their history", user.username)?;
        }
    }
    Ok(())
}

fn find_user(storage: &dyn IVeritasStorage, username: &str) -> VeritasResult<veritas_core::User> {
    storage
        .get_user_by_username(username)?
        .ok_or_else(|| StorageError::NotFound(format!("user {username}")).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritas_storage::StorageEngine;

    fn output(storage: &StorageEngine, command: UserCommand) -> String {
        let mut out = Vec::new();
        run_user_command(storage, &command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn token_from(output: &str) -> String {
        output
            .lines()
            .find_map(|l| l.rsplit(": ").next().filter(|_| l.contains("token")))
            .unwrap()
            .to_string()
    }

    #[test]
    fn parses_nested_user_commands() {
        let cli = Cli::parse_from(["veritas", "--config", "v.toml", "user", "rotate-token", "ann"]);
        assert_eq!(cli.config, Some(PathBuf::from("v.toml")));
        assert!(matches!(
            cli.command,
            Command::User(UserCommand::RotateToken { ref username }) if username == "ann"
        ));
    }

    #[test]
    fn empty_username_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["veritas", "user", "add", ""]).is_err());
    }

    #[test]
    fn add_prints_a_token_that_authenticates() {
        let storage = StorageEngine::open_in_memory().unwrap();
        let out = output(&storage, UserCommand::Add { username: "ann".into() });

        let token = token_from(&out);
        let user = storage
            .find_user_by_token_hash(&hash_token(&token))
            .unwrap()
            .unwrap();
        assert_eq!(user.username, "ann");
    }

    #[test]
    fn rotate_invalidates_old_token() {
        let storage = StorageEngine::open_in_memory().unwrap();
        let old = token_from(&output(&storage, UserCommand::Add { username: "bo".into() }));
        let new = token_from(&output(
            &storage,
            UserCommand::RotateToken { username: "bo".into() },
        ));

        assert_ne!(old, new);
        assert!(storage.find_user_by_token_hash(&hash_token(&old)).unwrap().is_none());
        assert!(storage.find_user_by_token_hash(&hash_token(&new)).unwrap().is_some());
    }

    #[test]
    fn remove_unknown_user_fails() {
        let storage = StorageEngine::open_in_memory().unwrap();
        let mut out = Vec::new();
        let err = run_user_command(
            &storage,
            &UserCommand::Remove { username: "ghost".into() },
            &mut out,
        )
        .unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }
}
