use std::time::Duration;

use jsonwebtoken::jwk::JwkSet;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetch the identity provider's key set.
pub async fn fetch_jwks(url: &str) -> Result<JwkSet, reqwest::Error> {
    tracing::info!(url, "Fetching JWKS");
    let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
    client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<JwkSet>()
        .await
}
