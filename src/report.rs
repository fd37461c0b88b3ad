use serde_json::json;

use crate::ScanOutcome;

/// Render the console report: one summary line, then one line per duplicate
/// property in document order.
pub fn render_text(outcome: &ScanOutcome, marker: &str) -> String {
    let report = match outcome {
        ScanOutcome::ContainerNotFound => return format!("Could not find {marker}\n"),
        ScanOutcome::Scanned(report) => report,
    };

    let mut out = format!(
        "Top-level duplicates: {}\n",
        quoted_list(&report.top_level_duplicates)
    );
    for dup in &report.duplicate_props {
        out.push_str(&format!(
            "Duplicate prop '{}' in '{}'\n",
            dup.property, dup.group
        ));
    }
    out
}

pub fn render_json(outcome: &ScanOutcome, marker: &str) -> serde_json::Result<String> {
    let value = match outcome {
        ScanOutcome::ContainerNotFound => json!({
            "error": "container_not_found",
            "marker": marker,
        }),
        ScanOutcome::Scanned(report) => serde_json::to_value(report)?,
    };
    let mut out = serde_json::to_string_pretty(&value)?;
    out.push('\n');
    Ok(out)
}

/// `['a', 'b']`
fn quoted_list(names: &[String]) -> String {
    let items: Vec<String> = names.iter().map(|n| format!("'{n}'")).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::{DuplicateProp, DuplicateReport};
    use pretty_assertions::assert_eq;

    fn sample() -> ScanOutcome {
        ScanOutcome::Scanned(DuplicateReport {
            top_level_duplicates: vec!["a".into(), "a".into()],
            duplicate_props: vec![DuplicateProp {
                group: "row".into(),
                property: "flex".into(),
                line: 7,
            }],
        })
    }

    #[test]
    fn test_text() {
        assert_eq!(
            render_text(&sample(), "StyleSheet.create"),
            "Top-level duplicates: ['a', 'a']\nDuplicate prop 'flex' in 'row'\n"
        );
        assert_eq!(
            render_text(&ScanOutcome::Scanned(DuplicateReport::default()), "x"),
            "Top-level duplicates: []\n"
        );
    }

    #[test]
    fn test_not_found() {
        assert_eq!(
            render_text(&ScanOutcome::ContainerNotFound, "StyleSheet.create"),
            "Could not find StyleSheet.create\n"
        );
        let v: serde_json::Value =
            serde_json::from_str(&render_json(&ScanOutcome::ContainerNotFound, "m").unwrap())
                .unwrap();
        assert_eq!(v["error"], "container_not_found");
        assert_eq!(v["marker"], "m");
    }

    #[test]
    fn test_json() {
        let v: serde_json::Value =
            serde_json::from_str(&render_json(&sample(), "m").unwrap()).unwrap();
        assert_eq!(v["top_level_duplicates"], json!(["a", "a"]));
        assert_eq!(
            v["duplicate_props"][0],
            json!({"group": "row", "property": "flex", "line": 7})
        );
    }
}
