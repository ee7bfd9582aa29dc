/// Human-readable day for progress labels, from a nanosecond block timestamp.
pub(crate) fn timestamp_date_label(timestamp_nanos: u64) -> String {
    chrono::DateTime::from_timestamp((timestamp_nanos / 1_000_000_000) as i64, 0)
        .map(|date| date.format("%a %b %d %Y").to_string())
        .unwrap_or_else(|| timestamp_nanos.to_string())
}

/// Name of the first action plus its method, the way it is surfaced to users.
/// On the wire an action is either a bare string (`"CreateAccount"`) or a
/// single-key object (`{"FunctionCall": {...}}`).
pub(crate) fn first_action_summary(
    actions: &[serde_json::Value],
) -> (Option<String>, Option<String>) {
    let Some(first) = actions.first() else {
        return (None, None);
    };
    match first {
        serde_json::Value::String(kind) => (Some(normalize_action_kind(kind)), None),
        serde_json::Value::Object(action) => match action.iter().next() {
            Some((kind, details)) => {
                let method_name = if kind == "FunctionCall" {
                    details
                        .get("method_name")
                        .and_then(|method| method.as_str())
                        .map(str::to_owned)
                } else {
                    None
                };
                (Some(normalize_action_kind(kind)), method_name)
            }
            None => (None, None),
        },
        _ => (None, None),
    }
}

fn normalize_action_kind(kind: &str) -> String {
    match kind {
        "FunctionCall" => "FUNCTION_CALL".to_owned(),
        other => other.to_owned(),
    }
}
