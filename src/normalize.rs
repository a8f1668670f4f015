use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

const SINGLE_KEY: &str = "bill";
const COLLECTION_KEY: &str = "bills";

/// A payload classified by shape. Anything that is neither a single record nor
/// a sequence of records degrades to `Empty`; that is a valid outcome, not an
/// error.
#[derive(Debug, Clone)]
pub enum Normalized {
    Single(BillRecord),
    Collection(Vec<BillSummary>),
    Empty,
}

pub fn normalize(raw: &Value) -> Normalized {
    if let Some(record) = raw.get(SINGLE_KEY) {
        if record.is_object() {
            match serde_json::from_value::<BillRecord>(record.clone()) {
                Ok(bill) => return Normalized::Single(bill),
                Err(e) => debug!("single record failed to map: {e}"),
            }
        } else {
            debug!("'{SINGLE_KEY}' key present but not an object");
        }
    }

    match raw.get(COLLECTION_KEY) {
        Some(Value::Array(items)) => {
            let bills = items
                .iter()
                .map(|item| {
                    serde_json::from_value::<BillSummary>(item.clone()).unwrap_or_default()
                })
                .collect();
            Normalized::Collection(bills)
        }
        Some(_) => {
            debug!("'{COLLECTION_KEY}' key present but not a sequence");
            Normalized::Empty
        }
        None => Normalized::Empty,
    }
}

/// Accepts a value of the expected type, or yields `None` for anything else —
/// a single odd field must not take the rest of the record down with it.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Identifiers arrive as strings or bare numbers depending on the endpoint.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    })
}

/// Sub-objects whose only interesting part is a count. Presence of the parent
/// key is what the renderer keys on; a zero count is still present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Counted {
    #[serde(deserialize_with = "lenient_count")]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PolicyArea {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LatestAction {
    #[serde(deserialize_with = "lenient")]
    pub action_date: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CostEstimate {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sponsor {
    #[serde(deserialize_with = "lenient")]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Law {
    #[serde(deserialize_with = "lenient_string")]
    pub number: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub law_type: Option<String>,
}

/// The detail shape returned when a bill number is part of the request.
/// Every field is independently present-or-absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BillRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub congress: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub bill_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub number: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub origin_chamber: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub policy_area: Option<PolicyArea>,
    #[serde(deserialize_with = "lenient")]
    pub introduced_date: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub latest_action: Option<LatestAction>,
    #[serde(deserialize_with = "lenient")]
    pub cbo_cost_estimates: Option<Vec<CostEstimate>>,
    #[serde(deserialize_with = "lenient")]
    pub sponsors: Option<Vec<Sponsor>>,
    #[serde(deserialize_with = "lenient")]
    pub cosponsors: Option<Counted>,
    #[serde(deserialize_with = "lenient")]
    pub laws: Option<Vec<Law>>,
    #[serde(deserialize_with = "lenient")]
    pub text_versions: Option<Counted>,
    #[serde(deserialize_with = "lenient")]
    pub summaries: Option<Counted>,
    #[serde(deserialize_with = "lenient")]
    pub subjects: Option<Counted>,
    #[serde(deserialize_with = "lenient")]
    pub constitutional_authority_statement_text: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub related_bills: Option<Counted>,
}

/// One element of the collection shape returned for congress- and type-level
/// requests. `number` is nominally required, but that is enforced at render
/// time so one bad element cannot sink its neighbours here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BillSummary {
    #[serde(deserialize_with = "lenient_string")]
    pub number: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub congress: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub bill_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub origin_chamber: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub update_date: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub latest_action: Option<LatestAction>,
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
}
