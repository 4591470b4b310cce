use serde_json::Value;
use tabled::{builder::Builder, Table};

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => print_table(value),
        OutputFormat::Csv => print_csv(value),
        OutputFormat::Minimal => print_minimal(value),
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Column order for the year-by-year projection rows.
const YEARLY_COLUMNS: [(&str, &str); 7] = [
    ("year", "Year"),
    ("fee_basis", "Basis"),
    ("base_amount", "Base"),
    ("fee_rate", "Rate %"),
    ("fee_amount", "Fee"),
    ("cumulative_fees", "Cumulative"),
    ("fees_pct_of_commitments", "% of Commitments"),
];

const PHASE_COLUMNS: [(&str, &str); 4] = [
    ("start_year", "Start"),
    ("end_year", "End"),
    ("fee_basis", "Basis"),
    ("fee_rate", "Rate %"),
];

fn print_table(value: &Value) {
    if let Some(yearly) = value.pointer("/result/yearly").and_then(Value::as_array) {
        // Projection envelope: year table, then the summary scalars
        print_record_table(yearly, &YEARLY_COLUMNS);
        if let Some(Value::Object(result)) = value.get("result") {
            print_summary_table(result);
        }
        if let Some(Value::Array(warnings)) = value.get("warnings") {
            if !warnings.is_empty() {
                println!("\nWarnings:");
                for w in warnings {
                    if let Value::String(s) = w {
                        println!("  - {}", s);
                    }
                }
            }
        }
        if let Some(Value::String(methodology)) = value.get("methodology") {
            println!("\nMethodology: {}", methodology);
        }
    } else if is_validation_report(value) {
        print_validation_report(value);
    } else if let Some(phases) = value.as_array() {
        print_record_table(phases, &PHASE_COLUMNS);
    } else {
        print_flat_object(value);
    }
}

fn print_record_table(records: &[Value], columns: &[(&str, &str)]) {
    if records.is_empty() {
        println!("(empty)");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|(_, header)| header.to_string()));
    for record in records {
        builder.push_record(
            columns
                .iter()
                .map(|(key, _)| record.get(*key).map(format_value).unwrap_or_else(|| "-".into())),
        );
    }
    println!("{}", Table::from(builder));
}

fn print_summary_table(result: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Summary", "Value"]);
    for (key, val) in result {
        if key == "yearly" {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("\n{}", Table::from(builder));
}

fn is_validation_report(value: &Value) -> bool {
    value.get("valid").is_some() && value.get("issues").is_some()
}

fn print_validation_report(value: &Value) {
    let valid = value.get("valid").and_then(Value::as_bool).unwrap_or(false);
    println!("Valid: {}", valid);

    let issues = match value.get("issues").and_then(Value::as_array) {
        Some(issues) if !issues.is_empty() => issues,
        _ => return,
    };

    let mut builder = Builder::default();
    builder.push_record(["Severity", "Issue"]);
    for issue in issues {
        // Issues serialise as single-key objects: {"Structural": "..."}
        if let Some((severity, message)) = issue.as_object().and_then(|m| m.iter().next()) {
            builder.push_record([severity.as_str(), &format_value(message)]);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        println!("{}", value);
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

fn print_csv(value: &Value) {
    let stdout = std::io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(yearly) = value.pointer("/result/yearly").and_then(Value::as_array) {
        write_record_csv(&mut wtr, yearly, &YEARLY_COLUMNS);
    } else if let Some(phases) = value.as_array() {
        write_record_csv(&mut wtr, phases, &PHASE_COLUMNS);
    } else if is_validation_report(value) {
        let _ = wtr.write_record(["severity", "message"]);
        if let Some(issues) = value.get("issues").and_then(Value::as_array) {
            for issue in issues {
                if let Some((severity, message)) = issue.as_object().and_then(|m| m.iter().next())
                {
                    let _ = wtr.write_record([severity.as_str(), &format_value(message)]);
                }
            }
        }
    } else if let Value::Object(map) = value {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in map {
            let _ = wtr.write_record([key.as_str(), &format_value(val)]);
        }
    }

    let _ = wtr.flush();
}

fn write_record_csv<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    records: &[Value],
    columns: &[(&str, &str)],
) {
    let _ = wtr.write_record(columns.iter().map(|(key, _)| *key));
    for record in records {
        let _ = wtr.write_record(
            columns
                .iter()
                .map(|(key, _)| record.get(*key).map(format_value).unwrap_or_default()),
        );
    }
}

// ---------------------------------------------------------------------------
// Minimal
// ---------------------------------------------------------------------------

/// Print just the key answer value from the output.
fn print_minimal(value: &Value) {
    // Validation report: the verdict is the answer
    if is_validation_report(value) {
        if let Some(valid) = value.get("valid") {
            println!("{}", valid);
            return;
        }
    }

    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = ["total_fees", "fees_pct_of_commitments"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_value(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_value(val));
            return;
        }
    }

    println!("{}", format_value(result_obj));
}

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
