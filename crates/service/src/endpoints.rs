//! Backend paths, relative to the configured base address.

use std::fmt;

/// A relative path kept as separate segments so record ids are encoded as
/// one segment each, whatever characters they contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPath {
    segments: Vec<String>,
}

impl ApiPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { segments: segments.into_iter().map(Into::into).collect() }
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }
}

/// Splits on `/`; use [`ApiPath::new`] when a segment may itself contain one.
impl From<&str> for ApiPath {
    fn from(path: &str) -> Self {
        Self::new(path.split('/').filter(|s| !s.is_empty()))
    }
}

impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

pub fn list_loans() -> ApiPath {
    ApiPath::from("loans/all/list")
}

pub fn list_users() -> ApiPath {
    ApiPath::from("auth/users")
}

pub fn update_loan(id: &str) -> ApiPath {
    ApiPath::new(["loans", id])
}

pub fn update_user(id: &str) -> ApiPath {
    ApiPath::new(["auth", "users", id])
}

pub fn update_loan_status(id: &str) -> ApiPath {
    ApiPath::new(["loans", id, "status"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_operations_map_to_backend_paths() {
        assert_eq!(list_loans().to_string(), "loans/all/list");
        assert_eq!(list_users().to_string(), "auth/users");
        assert_eq!(update_loan("abc").to_string(), "loans/abc");
        assert_eq!(update_user("u1").to_string(), "auth/users/u1");
        assert_eq!(update_loan_status("abc").to_string(), "loans/abc/status");
    }

    #[test]
    fn ids_stay_a_single_segment() {
        let path = update_loan("a/b");
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["loans", "a/b"]);
    }

    #[test]
    fn parsing_ignores_stray_slashes() {
        let path = ApiPath::from("/loans//all/list/");
        assert_eq!(path, list_loans());
    }
}
