//! Upstream auth-token cache flow.

use load_store::{LoadStore, TOKEN_TTL_SECS};
use omni_client::Upstream;

use crate::error::Result;

/// Return the cached bearer token, logging in and caching it when absent.
pub async fn access_token(upstream: &dyn Upstream, load: &dyn LoadStore) -> Result<String> {
    if let Some(token) = load.cached_token().await? {
        return Ok(token);
    }

    let token = upstream.login().await?;
    load.cache_token(&token, TOKEN_TTL_SECS).await?;

    Ok(token)
}
