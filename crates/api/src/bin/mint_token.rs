//! Print an HS256 bearer token for local development.
//!
//! ```text
//! mint-token <role | permission,permission,...> [ttl-minutes]
//! ```
//!
//! Signs with `AUTH_SECRET` and uses `AUTH_AUDIENCE` / `AUTH_ISSUER` when set,
//! so the token is accepted by a server running with the same environment.

use anyhow::{bail, Context};
use casting_api::auth::jwt::{issue_token, Claims, DEFAULT_AUDIENCE};
use casting_core::permissions::is_known_permission;
use casting_core::roles::permissions_for_role;

const DEFAULT_TTL_MINUTES: i64 = 60;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let Some(grant) = args.next() else {
        bail!("usage: mint-token <role | permission,...> [ttl-minutes]");
    };
    let ttl_minutes: i64 = match args.next() {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("ttl-minutes must be an integer, got '{raw}'"))?,
        None => DEFAULT_TTL_MINUTES,
    };
    if ttl_minutes <= 0 {
        bail!("ttl-minutes must be positive");
    }

    let permissions = resolve_permissions(&grant)?;

    let secret = std::env::var("AUTH_SECRET").context("AUTH_SECRET must be set")?;
    let audience = std::env::var("AUTH_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.into());
    let issuer = std::env::var("AUTH_ISSUER").ok();

    let claims = Claims::for_permissions(
        &permissions,
        &audience,
        issuer.as_deref(),
        chrono::Duration::minutes(ttl_minutes),
    );
    let token = issue_token(secret.as_bytes(), &claims).context("Failed to sign token")?;

    println!("{token}");
    Ok(())
}

fn resolve_permissions(grant: &str) -> anyhow::Result<Vec<String>> {
    if let Some(perms) = permissions_for_role(grant) {
        return Ok(perms.iter().map(|p| p.to_string()).collect());
    }

    let perms: Vec<String> = grant
        .split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    if let Some(unknown) = perms.iter().find(|p| !is_known_permission(p)) {
        bail!("'{unknown}' is neither a role nor a known permission");
    }
    Ok(perms)
}
