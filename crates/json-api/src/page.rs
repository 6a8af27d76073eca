//! Operator page.

use salvo::prelude::*;
use salvo_csrf::CsrfDepotExt;

const TEMPLATE: &str = include_str!("../assets/index.html");
const TOKEN_PLACEHOLDER: &str = "{{csrf_token}}";

/// Serves the single-page admin UI with the client's CSRF token embedded.
#[handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Text<String>, StatusError> {
    let token = depot
        .csrf_token()
        .ok_or_else(|| StatusError::internal_server_error().brief("CSRF token unavailable"))?;

    Ok(Text::Html(render(token)))
}

fn render(token: &str) -> String {
    TEMPLATE.replace(TOKEN_PLACEHOLDER, &escape_attribute(token))
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }

    escaped
}
