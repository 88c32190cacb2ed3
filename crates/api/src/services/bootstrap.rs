//! First-run admin account bootstrap.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::{info, warn};

use persistence::repositories::AdminRepository;
use shared::password::hash_password;

use crate::config::Config;

/// Creates the configured admin account if it does not exist yet.
///
/// A blank username or password skips bootstrap entirely, which is the
/// normal state once an admin exists.
pub async fn ensure_admin(pool: &PgPool, config: &Config) -> Result<()> {
    let bootstrap = &config.bootstrap;
    if bootstrap.admin_username.is_empty() || bootstrap.admin_password.is_empty() {
        return Ok(());
    }

    let repo = AdminRepository::new(pool.clone());
    if repo
        .find_by_username(&bootstrap.admin_username)
        .await
        .context("Failed to look up bootstrap admin")?
        .is_some()
    {
        return Ok(());
    }

    if repo.count().await? > 0 {
        warn!(
            "Admin accounts exist but none named '{}'; skipping bootstrap",
            bootstrap.admin_username
        );
        return Ok(());
    }

    let password_hash =
        hash_password(&bootstrap.admin_password).context("Failed to hash bootstrap password")?;
    let email = (!bootstrap.admin_email.is_empty()).then_some(bootstrap.admin_email.as_str());

    repo.create(&bootstrap.admin_username, email, &password_hash)
        .await
        .context("Failed to create bootstrap admin")?;

    info!("Created bootstrap admin '{}'", bootstrap.admin_username);
    Ok(())
}
