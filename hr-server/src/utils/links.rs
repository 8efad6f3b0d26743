//! Hyperlinked relations
//!
//! Related resources are rendered as absolute detail URLs built from the
//! request's `Host` (and `X-Forwarded-Proto`). Write bodies may send the
//! absolute form or just the path.

use axum::extract::FromRequestParts;
use http::header::HOST;
use http::request::Parts;
use std::convert::Infallible;

use crate::core::ServerState;

pub const NO_MATCH: &str = "Invalid hyperlink - No URL match.";
pub const INCORRECT_MATCH: &str = "Invalid hyperlink - Incorrect URL match.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Employee,
    Department,
    Appointment,
}

impl Resource {
    pub const ALL: [Resource; 3] = [
        Resource::Employee,
        Resource::Department,
        Resource::Appointment,
    ];

    /// URL segment of the collection
    pub const fn collection(&self) -> &'static str {
        match self {
            Resource::Employee => "employees",
            Resource::Department => "departments",
            Resource::Appointment => "appointments",
        }
    }
}

/// Request-scoped URL builder
#[derive(Debug, Clone)]
pub struct Links {
    origin: String,
    prefix: String,
}

impl Links {
    pub fn new(origin: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            prefix: prefix.into(),
        }
    }

    /// `http://host/api/v1/employees/3/`
    pub fn detail(&self, resource: Resource, id: i64) -> String {
        format!(
            "{}{}/{}/{}/",
            self.origin,
            self.prefix,
            resource.collection(),
            id
        )
    }

    /// Extract the id from a detail URL of `resource`
    pub fn resolve(&self, resource: Resource, href: &str) -> Result<i64, &'static str> {
        let path = match href.trim().split_once("://") {
            Some((_, rest)) => rest.find('/').map_or("/", |i| &rest[i..]),
            None => href.trim(),
        };
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let rest = path
            .strip_prefix(self.prefix.as_str())
            .and_then(|p| p.strip_prefix('/'))
            .ok_or(NO_MATCH)?;

        let mut segments = rest.trim_end_matches('/').split('/');
        let (Some(collection), Some(id), None) = (segments.next(), segments.next(), segments.next())
        else {
            return Err(NO_MATCH);
        };

        if collection != resource.collection() {
            return if Resource::ALL.iter().any(|r| r.collection() == collection) {
                Err(INCORRECT_MATCH)
            } else {
                Err(NO_MATCH)
            };
        }
        id.parse().map_err(|_| NO_MATCH)
    }
}

impl FromRequestParts<ServerState> for Links {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| parts.uri.authority().map(|a| a.as_str()))
            .unwrap_or("localhost");
        let scheme = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or("http");

        Ok(Links::new(
            format!("{scheme}://{host}"),
            state.config.api_prefix.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> Links {
        Links::new("http://testserver", "/api/v1")
    }

    #[test]
    fn test_detail_url() {
        assert_eq!(
            links().detail(Resource::Department, 4),
            "http://testserver/api/v1/departments/4/"
        );
    }

    #[test]
    fn test_resolve_absolute_and_path() {
        let links = links();
        assert_eq!(
            links.resolve(Resource::Employee, "http://testserver/api/v1/employees/7/"),
            Ok(7)
        );
        assert_eq!(
            links.resolve(Resource::Employee, "https://other.host/api/v1/employees/7"),
            Ok(7)
        );
        assert_eq!(links.resolve(Resource::Employee, "/api/v1/employees/7/?x=1"), Ok(7));
    }

    #[test]
    fn test_resolve_rejects_mismatch() {
        let links = links();
        assert_eq!(
            links.resolve(Resource::Employee, "/api/v1/departments/7/"),
            Err(INCORRECT_MATCH)
        );
        assert_eq!(links.resolve(Resource::Employee, "/elsewhere/7/"), Err(NO_MATCH));
        assert_eq!(links.resolve(Resource::Employee, "/api/v1/employees/"), Err(NO_MATCH));
        assert_eq!(links.resolve(Resource::Employee, "/api/v1/employees/x/"), Err(NO_MATCH));
        assert_eq!(links.resolve(Resource::Employee, "not a url"), Err(NO_MATCH));
    }

    #[test]
    fn test_empty_prefix() {
        let links = Links::new("http://h", "");
        assert_eq!(links.detail(Resource::Appointment, 1), "http://h/appointments/1/");
        assert_eq!(links.resolve(Resource::Appointment, "/appointments/1/"), Ok(1));
    }
}
