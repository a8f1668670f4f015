use crate::profile::ApiConfig;
use crate::selection::{Selection, CONTENT_TYPE};
use crate::url::UrlPath;
use std::fmt::{Display, Formatter};

const API_VERSION: &str = "v3";
const QUERY_FORMAT: &str = "format";
const QUERY_API_KEY: &str = "api_key";
const FORMAT_JSON: &str = "json";

/// Path and query for one fetch, derived from a selection snapshot. Segment
/// order is fixed: version, content type, congress, then bill type iff chosen,
/// then bill number iff both type and number are chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl RequestDescriptor {
    pub fn from_selection(selection: &Selection, config: &ApiConfig) -> RequestDescriptor {
        let mut segments = vec![
            API_VERSION.to_string(),
            CONTENT_TYPE.to_string(),
            selection.congress().to_string(),
        ];
        if let Some(bill_type) = selection.bill_type() {
            segments.push(bill_type.to_string());
            if let Some(number) = selection.bill_number() {
                segments.push(number.to_string());
            }
        }

        let query = vec![
            (QUERY_FORMAT.to_string(), FORMAT_JSON.to_string()),
            (QUERY_API_KEY.to_string(), config.api_key().to_string()),
        ];

        RequestDescriptor { segments, query }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn url_path(&self) -> UrlPath {
        UrlPath::from_segments(&self.segments, &self.query)
    }
}

impl Display for RequestDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Path only; the query carries the API key and stays out of logs.
        write!(f, "/{}", self.segments.join("/"))
    }
}
