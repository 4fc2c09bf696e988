//! User management commands.

use std::io::{BufRead, Write as _};
use std::str::FromStr;

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use driftwood_core::{Email, Role};
use driftwood_site::db::UserRepository;

use super::{CommandError, database_url};

/// Create a user with the given role.
///
/// The password is read from stdin so it never lands in shell history.
///
/// # Errors
///
/// Returns an error for invalid input, a duplicate email, or database
/// failures.
pub async fn create_user(email: &str, name: &str, role: &str) -> Result<(), CommandError> {
    let email =
        Email::parse(email).map_err(|e| CommandError::InvalidInput(format!("email: {e}")))?;
    let role = Role::from_str(role).map_err(CommandError::InvalidInput)?;

    let name = name.trim();
    if name.is_empty() {
        return Err(CommandError::InvalidInput(
            "display name cannot be empty".to_owned(),
        ));
    }

    let password = read_password()?;
    if password.len() < 12 {
        return Err(CommandError::InvalidInput(
            "password must be at least 12 characters".to_owned(),
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CommandError::InvalidInput(format!("failed to hash password: {e}")))?
        .to_string();

    let url = database_url()?;
    let pool = PgPool::connect(url.expose_secret()).await?;

    let repo = UserRepository::new(&pool);
    let user = repo.create(&email, name, role, &password_hash).await?;

    tracing::info!(user_id = %user.id, email = %user.email, role = %user.role, "user created");
    Ok(())
}

/// Prompt for a password on stdin.
fn read_password() -> Result<String, CommandError> {
    #[allow(clippy::print_stderr)]
    {
        eprint!("Password: ");
    }
    std::io::stderr()
        .flush()
        .map_err(|e| CommandError::InvalidInput(e.to_string()))?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| CommandError::InvalidInput(e.to_string()))?;

    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}
