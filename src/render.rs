use crate::error::Error;
use crate::normalize::{BillRecord, BillSummary, Normalized};
use crate::selection::Selection;
use tracing::warn;

/// One choice for the bill-number selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub id: String,
    pub label: String,
}

/// What one fetch renders to: the report pane text and the full replacement
/// contents of the bill-number selector.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub text: String,
    pub options: Vec<OptionEntry>,
}

pub fn render(normalized: &Normalized, selection: &Selection) -> Report {
    match normalized {
        Normalized::Single(bill) => render_single(bill, selection),
        Normalized::Collection(bills) => render_collection(bills, selection),
        Normalized::Empty => Report::default(),
    }
}

fn push_field(lines: &mut Vec<String>, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        lines.push(String::new());
        lines.push(format!("*{label}*: {value}"));
    }
}

fn push_list<T, F>(lines: &mut Vec<String>, label: &str, items: Option<&Vec<T>>, f: F)
where
    F: Fn(&T) -> Option<String>,
{
    if let Some(items) = items {
        lines.push(String::new());
        lines.push(format!("*{label}*:"));
        for item in items {
            if let Some(entry) = f(item) {
                lines.push(format!("- {entry}"));
            }
        }
    }
}

fn push_count(lines: &mut Vec<String>, label: &str, count: Option<u64>) {
    // A present-but-zero count still renders; only a missing key omits the line.
    push_field(lines, label, count.map(|c| c.to_string()).as_deref());
}

fn render_single(bill: &BillRecord, selection: &Selection) -> Report {
    let congress = bill
        .congress
        .clone()
        .unwrap_or_else(|| selection.congress().to_string());
    let bill_type = bill
        .bill_type
        .clone()
        .or_else(|| selection.bill_type().map(|t| t.to_string()))
        .unwrap_or_default();
    let number = bill
        .number
        .clone()
        .or_else(|| selection.bill_number().map(str::to_string))
        .unwrap_or_default();

    let identity = [bill_type.as_str(), number.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let mut lines = Vec::new();
    lines.push(format!("{congress} Congress -> {identity}").trim_end().to_string());
    lines.push(String::new());
    lines.push(match &bill.title {
        Some(title) if number.is_empty() => format!("# {title}"),
        Some(title) => format!("# {number} - {title}"),
        None => format!("# {number}"),
    });

    push_field(&mut lines, "Chamber", bill.origin_chamber.as_deref());
    push_field(
        &mut lines,
        "Policy Area",
        bill.policy_area.as_ref().and_then(|p| p.name.as_deref()),
    );
    push_field(&mut lines, "Introduced", bill.introduced_date.as_deref());
    if let Some(action) = &bill.latest_action {
        let parts: Vec<&str> = [action.action_date.as_deref(), action.text.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        push_field(&mut lines, "Latest Action", Some(parts.join(" - ").as_str()));
    }
    push_list(
        &mut lines,
        "Cost Estimates",
        bill.cbo_cost_estimates.as_ref(),
        |estimate| estimate.title.clone(),
    );
    push_list(&mut lines, "Sponsors", bill.sponsors.as_ref(), |sponsor| {
        sponsor.full_name.clone()
    });
    push_count(
        &mut lines,
        "Cosponsors",
        bill.cosponsors.as_ref().and_then(|c| c.count),
    );
    push_list(&mut lines, "Laws", bill.laws.as_ref(), |law| {
        match (law.number.as_deref(), law.law_type.as_deref()) {
            (Some(number), Some(law_type)) => Some(format!("{number} - {law_type}")),
            (Some(number), None) => Some(number.to_string()),
            (None, Some(law_type)) => Some(law_type.to_string()),
            (None, None) => None,
        }
    });
    push_count(
        &mut lines,
        "Text Versions",
        bill.text_versions.as_ref().and_then(|c| c.count),
    );
    push_count(
        &mut lines,
        "Summaries",
        bill.summaries.as_ref().and_then(|c| c.count),
    );
    push_count(
        &mut lines,
        "Subjects",
        bill.subjects.as_ref().and_then(|c| c.count),
    );
    push_field(
        &mut lines,
        "Constitutional Authority Statement",
        bill.constitutional_authority_statement_text.as_deref(),
    );
    push_count(
        &mut lines,
        "Related Bills",
        bill.related_bills.as_ref().and_then(|c| c.count),
    );

    Report {
        text: lines.join("\n"),
        options: Vec::new(),
    }
}

fn render_collection(bills: &[BillSummary], selection: &Selection) -> Report {
    let mut lines = Vec::new();
    let mut options = Vec::new();

    for bill in bills {
        // The identifying number is the one unconditionally required field;
        // without it the element is skipped and the rest still render.
        let Some(number) = bill.number.as_deref() else {
            let err = Error::MalformedRecord("collection element has no number".to_string());
            warn!(%err, "skipping element");
            continue;
        };

        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(match &bill.title {
            Some(title) => format!("# {number} - {title}"),
            None => format!("# {number}"),
        });
        if let Some(congress) = &bill.congress {
            lines.push(String::new());
            lines.push(format!("**Congress**: {congress}"));
        }
        if let Some(bill_type) = &bill.bill_type {
            lines.push(String::new());
            lines.push(format!("**Type**: {bill_type}"));
        }
        if let Some(chamber) = &bill.origin_chamber {
            lines.push(String::new());
            lines.push(format!("**Chamber**: {chamber}"));
        }
        if let Some(updated) = &bill.update_date {
            lines.push(String::new());
            lines.push(format!("**Updated**: {updated}"));
        }
        if let Some(action) = &bill.latest_action {
            let mut value = action.text.clone().unwrap_or_default();
            if let Some(date) = &action.action_date {
                value = format!("{value} ({date})");
            }
            lines.push(String::new());
            lines.push(format!("**Latest Action**: {}", value.trim()));
        }
        if let Some(url) = &bill.url {
            lines.push(String::new());
            lines.push(format!("**Link**: {url}"));
        }

        // Numbers only disambiguate within a type; with no type chosen the
        // selector stays empty even though the listing renders.
        if selection.bill_type().is_some() {
            options.push(OptionEntry {
                id: number.to_string(),
                label: number.to_string(),
            });
        }
    }

    Report {
        text: lines.join("\n"),
        options,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::normalize::normalize;
    use crate::selection::BillType;
    use serde_json::json;

    fn single_payload() -> serde_json::Value {
        json!({"bill": {
            "congress": "118",
            "type": "HR",
            "number": "1",
            "title": "Lower Costs Act",
            "originChamber": "House",
            "policyArea": {"name": "Health"},
            "introducedDate": "2023-01-09",
            "latestAction": {"actionDate": "2023-03-17", "text": "Referred to committee."},
            "sponsors": [{"fullName": "Rep. Smith"}],
            "cosponsors": {"count": 0}
        }})
    }

    fn selection_with_number() -> Selection {
        Selection::default()
            .with_bill_type(Some(BillType::Hr))
            .with_bill_number(Some("1".to_string()))
            .unwrap()
    }

    #[test]
    fn single_record_renders_sections_in_priority_order() {
        let report = render(&normalize(&single_payload()), &selection_with_number());
        let text = &report.text;

        assert!(text.starts_with("118 Congress -> HR 1"));
        assert!(text.contains("# 1 - Lower Costs Act"));
        let chamber = text.find("*Chamber*: House").unwrap();
        let policy = text.find("*Policy Area*: Health").unwrap();
        let introduced = text.find("*Introduced*: 2023-01-09").unwrap();
        let action = text
            .find("*Latest Action*: 2023-03-17 - Referred to committee.")
            .unwrap();
        assert!(chamber < policy && policy < introduced && introduced < action);
        assert!(report.options.is_empty());
    }

    #[test]
    fn absent_fields_omit_their_lines_entirely() {
        let mut payload = single_payload();
        payload["bill"]
            .as_object_mut()
            .unwrap()
            .remove("policyArea");
        let report = render(&normalize(&payload), &selection_with_number());

        assert!(!report.text.contains("Policy Area"));
        assert!(!report.text.contains("Cost Estimates"));
        assert!(report.text.contains("*Chamber*: House"));
    }

    #[test]
    fn zero_cosponsor_count_still_renders() {
        let report = render(&normalize(&single_payload()), &selection_with_number());
        assert!(report.text.contains("*Cosponsors*: 0"));
    }

    #[test]
    fn single_record_header_falls_back_to_the_selection() {
        let payload = json!({"bill": {"title": "Untitled Act"}});
        let report = render(&normalize(&payload), &selection_with_number());
        assert!(report.text.starts_with("118 Congress -> hr 1"));
    }

    #[test]
    fn collection_renders_every_element_in_payload_order() {
        let payload = json!({"bills": [
            {"number": "1", "title": "T1", "congress": "118", "type": "HR"},
            {"number": "2", "title": "T2", "updateDate": "2024-01-01"}
        ]});
        let report = render(&normalize(&payload), &Selection::default());

        let first = report.text.find("# 1 - T1").unwrap();
        let second = report.text.find("# 2 - T2").unwrap();
        assert!(first < second);
        assert!(report.text.contains("**Congress**: 118"));
        assert!(report.text.contains("**Updated**: 2024-01-01"));
    }

    #[test]
    fn options_are_gated_on_a_selected_bill_type() {
        let payload = json!({"bills": [{"number": "1"}, {"number": "2"}]});

        let untyped = render(&normalize(&payload), &Selection::default());
        assert!(untyped.options.is_empty());
        assert!(untyped.text.contains("# 1"));

        let typed_selection = Selection::default().with_bill_type(Some(BillType::Hr));
        let typed = render(&normalize(&payload), &typed_selection);
        let labels: Vec<&str> = typed.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2"]);
    }

    #[test]
    fn element_without_number_is_skipped_not_fatal() {
        let payload = json!({"bills": [
            {"title": "No Number Act"},
            {"number": "2", "title": "T2"}
        ]});
        let selection = Selection::default().with_bill_type(Some(BillType::Hr));
        let report = render(&normalize(&payload), &selection);

        assert!(!report.text.contains("No Number Act"));
        assert!(report.text.contains("# 2 - T2"));
        assert_eq!(report.options.len(), 1);
    }

    #[test]
    fn latest_action_line_tolerates_partial_contents() {
        let payload = json!({"bills": [
            {"number": "3", "latestAction": {"text": "Passed House."}}
        ]});
        let report = render(&normalize(&payload), &Selection::default());
        assert!(report.text.contains("**Latest Action**: Passed House."));
    }

    #[test]
    fn empty_renders_to_nothing() {
        let report = render(&Normalized::Empty, &Selection::default());
        assert!(report.text.is_empty());
        assert!(report.options.is_empty());
    }
}
