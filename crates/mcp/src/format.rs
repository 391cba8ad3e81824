use serde_json::Value;

/// Number of items a result holds: array length, object key count, 0 for null.
pub fn item_count(data: &Value) -> usize {
    match data {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        Value::Null => 0,
        _ => 1,
    }
}

pub fn render(summary: &str, data: &Value) -> String {
    let body = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
    format!("{}\n\n{}", summary, body)
}

/// `Found {n} {noun}:` followed by the full payload.
pub fn render_list(noun: &str, data: &Value) -> String {
    render(&format!("Found {} {}:", item_count(data), noun), data)
}
