//! Request forgery protection.
//!
//! Each client gets an HMAC-signed proof cookie and a matching token. Mutating
//! requests must echo the token in `X-CSRF-TOKEN` alongside the cookie.

use salvo::prelude::*;
use salvo_csrf::{CsrfDepotExt, HeaderFinder, hmac_cookie_csrf};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

pub(crate) const CSRF_HEADER: &str = "x-csrf-token";

pub(crate) const KEY_LEN: usize = 32;

#[derive(Debug, Error)]
pub(crate) enum CsrfKeyError {
    #[error("CSRF_SECRET must be exactly 32 bytes, got {0}")]
    Length(usize),
}

/// The configured signing key, or a random one for this process.
///
/// # Errors
///
/// Returns [`CsrfKeyError::Length`] when a configured secret is not [`KEY_LEN`] bytes.
pub(crate) fn resolve_key(configured: Option<&str>) -> Result<[u8; KEY_LEN], CsrfKeyError> {
    if let Some(secret) = configured {
        return <[u8; KEY_LEN]>::try_from(secret.as_bytes())
            .map_err(|_ignored| CsrfKeyError::Length(secret.len()));
    }

    let mut key = [0_u8; KEY_LEN];

    let random = Uuid::new_v4()
        .into_bytes()
        .into_iter()
        .chain(Uuid::new_v4().into_bytes());

    for (slot, byte) in key.iter_mut().zip(random) {
        *slot = byte;
    }

    Ok(key)
}

/// Issues tokens on every request and rejects POST/PUT/PATCH/DELETE without a valid one.
pub(crate) fn protection(key: [u8; KEY_LEN]) -> impl Handler {
    hmac_cookie_csrf(key, HeaderFinder::new(CSRF_HEADER))
}

/// Hands the client's current token back in the response headers.
#[salvo::handler]
pub(crate) async fn expose_token(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    ctrl.call_next(req, depot, res).await;

    let Some(token) = depot.csrf_token().map(ToString::to_string) else {
        return;
    };

    if let Err(error) = res.add_header(CSRF_HEADER, token, true) {
        warn!("failed to attach csrf token header: {error}");
    }
}
