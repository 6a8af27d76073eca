//! Route names for request spans.

use uuid::Uuid;

/// `/api/products/0190…` → `/api/products/{id}`
pub(super) fn route_for_path(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_uuid_segments() {
        assert_eq!(
            route_for_path("/api/products/0190b2c4-7c3f-7000-8000-000000000000"),
            "/api/products/{id}"
        );
    }

    #[test]
    fn keeps_static_paths() {
        assert_eq!(route_for_path("/"), "/");
        assert_eq!(route_for_path("/api/products/export"), "/api/products/export");
    }
}
