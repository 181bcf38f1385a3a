use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a response: the whole `value` as JSON, or `rows` as a table with
/// the given `columns`.
pub fn render<T: Serialize, R: Serialize>(
    value: &T,
    rows: &[R],
    columns: &[&str],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_rows(rows, columns),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a response in the requested format.
pub fn output<T: Serialize, R: Serialize>(
    value: &T,
    rows: &[R],
    columns: &[&str],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let rendered = render(value, rows, columns, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_rows<R: Serialize>(rows: &[R], columns: &[&str]) -> anyhow::Result<String> {
    if rows.is_empty() {
        return Ok(String::from("(no rows)"));
    }

    let prefs = ui::prefs();
    let options = table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    };

    let cells = rows
        .iter()
        .map(|row| -> anyhow::Result<Vec<String>> {
            let value = serde_json::to_value(row)?;
            Ok(columns
                .iter()
                .map(|column| value.get(column).map_or_else(|| String::from("-"), value_to_cell))
                .collect())
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(table::render_table(columns, &cells, options))
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.is_empty() => String::from("-"),
        Value::Array(items) if items.iter().all(|item| !item.is_object()) => items
            .iter()
            .map(value_to_cell)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Entry {
        task: &'static str,
        depends_on: Vec<&'static str>,
        detail: Option<&'static str>,
    }

    #[derive(Serialize)]
    struct Listing {
        tasks: Vec<Entry>,
    }

    fn listing() -> Listing {
        Listing {
            tasks: vec![
                Entry {
                    task: "dartdoc-acx",
                    depends_on: vec![],
                    detail: None,
                },
                Entry {
                    task: "finalize-api-docs-acx",
                    depends_on: vec!["dartdoc-acx"],
                    detail: Some("blocked"),
                },
            ],
        }
    }

    #[test]
    fn json_render_is_the_whole_value() {
        let value = listing();
        let out = render(&value, &value.tasks, &["task"], OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["tasks"][1]["depends_on"][0], "dartdoc-acx");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = listing();
        let out = render(&value, &value.tasks, &["task"], OutputFormat::Raw).unwrap();
        assert!(!out.contains('\n'));
        assert!(serde_json::from_str::<serde_json::Value>(&out).is_ok());
    }

    #[test]
    fn table_render_uses_requested_columns() {
        let value = listing();
        let out = render(
            &value,
            &value.tasks,
            &["task", "depends_on", "detail"],
            OutputFormat::Table,
        )
        .unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("task"));
        assert!(lines[0].contains("depends_on"));
        assert!(lines[2].starts_with("dartdoc-acx"));
        assert!(lines[2].trim_end().ends_with('-'));
        assert!(lines[3].contains("blocked"));
    }

    #[test]
    fn empty_table_says_so() {
        let rows: Vec<Entry> = Vec::new();
        let out = render(&rows, &rows, &["task"], OutputFormat::Table).unwrap();
        assert_eq!(out, "(no rows)");
    }
}
