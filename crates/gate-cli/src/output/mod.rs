use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Leading columns, in this order, when present. Anything else follows
/// alphabetically.
const COLUMN_ORDER: &[&str] = &[
    "id",
    "ok",
    "name",
    "email",
    "phone",
    "apartment",
    "shift",
    "role",
    "purpose",
    "member_name",
    "vehicle",
    "checkin_time",
    "checkout_time",
];

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    Ok(match value {
        Value::Array(items) => array_table(&items),
        Value::Object(map) => object_table(map),
        scalar => cell(&scalar),
    })
}

/// One row per object; columns are the union of keys.
fn array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return "(no rows)".to_string();
    }
    let objects = items.iter().filter_map(Value::as_object).collect::<Vec<_>>();
    if objects.len() != items.len() {
        let rows = items.iter().map(|v| vec![cell(v)]).collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, options());
    }

    let mut columns = Vec::<&str>::new();
    for key in objects.iter().flat_map(|m| m.keys()) {
        if !columns.contains(&key.as_str()) {
            columns.push(key);
        }
    }
    columns.sort_by_key(|c| column_rank(c));

    let rows = objects
        .iter()
        .map(|m| {
            columns
                .iter()
                .map(|c| m.get(*c).map_or_else(|| "-".to_string(), cell))
                .collect()
        })
        .collect::<Vec<_>>();
    table::render_table(&columns, &rows, options())
}

/// Key/value pairs; a nested list becomes its own table underneath.
fn object_table(map: Map<String, Value>) -> String {
    let mut keys = map.keys().cloned().collect::<Vec<_>>();
    keys.sort_by_key(|k| column_rank(k));

    let mut pairs = Vec::new();
    let mut nested = Vec::new();
    for key in keys {
        match map.get(&key) {
            Some(Value::Array(items)) if items.iter().any(Value::is_object) => {
                nested.push(format!("\n{key}:\n{}", array_table(items)));
            }
            Some(value) => pairs.push(vec![key.clone(), cell(value)]),
            None => {}
        }
    }
    let mut out = table::render_table(&["key", "value"], &pairs, options());
    for section in nested {
        out.push_str(&section);
    }
    out
}

fn column_rank(column: &str) -> (usize, String) {
    let rank = COLUMN_ORDER
        .iter()
        .position(|c| *c == column)
        .unwrap_or(COLUMN_ORDER.len());
    (rank, column.to_string())
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Row {
        phone: &'static str,
        name: &'static str,
        id: u32,
        zone: Option<&'static str>,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                phone: "+919999999999",
                name: "Ravi",
                id: 7,
                zone: None,
            },
            Row {
                phone: "+918888888888",
                name: "Meera",
                id: 8,
                zone: Some("B"),
            },
        ]
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&rows(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed[0]["name"], "Ravi");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&rows(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_puts_known_columns_first() {
        let out = render(&rows(), OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().unwrap_or_default();
        let pos = |c: &str| header.find(c).unwrap_or(usize::MAX);
        assert!(pos("id") < pos("name"));
        assert!(pos("name") < pos("phone"));
        assert!(pos("phone") < pos("zone"));
        assert!(out.contains("Meera"));
    }

    #[test]
    fn empty_list_says_so() {
        let out = render(&Vec::<Row>::new(), OutputFormat::Table).expect("table render");
        assert_eq!(out, "(no rows)");
    }

    #[test]
    fn object_with_list_renders_both() {
        #[derive(Serialize)]
        struct Outcome {
            ok: bool,
            visitors: Vec<Row>,
        }
        let out = render(
            &Outcome {
                ok: true,
                visitors: rows(),
            },
            OutputFormat::Table,
        )
        .expect("table render");
        assert!(out.starts_with("key"));
        assert!(out.contains("visitors:"));
        assert!(out.contains("Ravi"));
    }
}
