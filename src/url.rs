use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

const REGEX_PATTERN_ENDPOINT: &str =
    r"^((?P<scheme>[a-zA-Z][a-zA-Z0-9+.-]*)://)?(?P<host>[^:/?#]+)(:(?P<port>\d+))?/?$";

/// Where requests go: scheme, host and optional port. Paths are carried
/// separately by [`UrlPath`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    host: String,
    port: Option<u16>,
    scheme: Option<String>,
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let caps = Regex::new(REGEX_PATTERN_ENDPOINT)
            .expect("endpoint pattern is valid")
            .captures(s)
            .ok_or_else(|| Error::InvalidConfig(format!("not an endpoint: {s}")))?;

        let host = caps
            .name("host")
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| Error::InvalidConfig(format!("endpoint missing host: {s}")))?;
        let scheme = caps.name("scheme").map(|m| m.as_str().to_string());
        let port = caps
            .name("port")
            .map(|m| m.as_str().parse::<u16>())
            .transpose()
            .map_err(|_| Error::InvalidConfig(format!("endpoint port out of range: {s}")))?;

        Ok(Endpoint { host, port, scheme })
    }
}

impl Endpoint {
    pub fn new(host: String, port: Option<u16>, scheme: Option<String>) -> Self {
        Endpoint { host, port, scheme }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn scheme(&self) -> Option<&String> {
        self.scheme.as_ref()
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}://")?;
        }
        write!(f, "{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

/// Path plus query string, relative to an [`Endpoint`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlPath {
    path: String,
    query: Option<String>,
}

impl UrlPath {
    /// Joins ordered path segments and appends the query pairs. Segments are
    /// used verbatim; callers supply tokens from fixed sets.
    pub fn from_segments<S: AsRef<str>>(segments: &[S], query: &[(String, String)]) -> Self {
        let mut path = String::new();
        for segment in segments {
            path.push('/');
            path.push_str(segment.as_ref());
        }
        let query = if query.is_empty() {
            None
        } else {
            Some(
                query
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join("&"),
            )
        };
        UrlPath { path, query }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&String> {
        self.query.as_ref()
    }

    /// The absolute URL for this path at the given endpoint.
    pub fn at(&self, endpoint: &Endpoint) -> String {
        format!("{endpoint}{self}")
    }
}

impl Display for UrlPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}
