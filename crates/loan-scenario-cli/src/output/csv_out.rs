use serde_json::Value;
use std::io;

use super::decimal_str;

const SCENARIO_COLUMNS: [&str; 9] = [
    "scenarioId",
    "scenarioName",
    "totalPrincipal",
    "monthlyPayment",
    "totalInterest",
    "totalKurstab",
    "totalCost",
    "averageInterestRate",
    "effectiveInterestRate",
];

/// Write output as CSV to stdout. Comparison envelopes become one row
/// per scenario; everything else becomes field/value rows.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value.get("result").unwrap_or(value);
    if let Some(results) = result.get("results").and_then(Value::as_array) {
        let savings = result.get("savings").and_then(Value::as_array);
        write_comparison(&mut wtr, results, savings);
    } else if let Value::Object(map) = result {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in map {
            let _ = wtr.write_record([key.as_str(), &plain_value(val)]);
        }
    } else {
        let _ = wtr.write_record([plain_value(result)]);
    }

    let _ = wtr.flush();
}

fn write_comparison(
    wtr: &mut csv::Writer<io::StdoutLock<'_>>,
    results: &[Value],
    savings: Option<&Vec<Value>>,
) {
    let has_savings = savings.is_some_and(|s| !s.is_empty());

    let mut headers: Vec<&str> = SCENARIO_COLUMNS.to_vec();
    if has_savings {
        headers.push("savingsVsMostExpensive");
        headers.push("savingsPercentage");
    }
    let _ = wtr.write_record(&headers);

    for r in results {
        let id = r.get("scenarioId").and_then(Value::as_str).unwrap_or("");
        let mut row: Vec<String> = SCENARIO_COLUMNS
            .iter()
            .map(|col| r.get(*col).map(plain_value).unwrap_or_default())
            .collect();
        if has_savings {
            let entry = savings.and_then(|rows| {
                rows.iter()
                    .find(|s| s.get("scenarioId").and_then(Value::as_str) == Some(id))
            });
            for col in ["savingsVsMostExpensive", "savingsPercentage"] {
                row.push(
                    entry
                        .and_then(|e| e.get(col))
                        .map(plain_value)
                        .unwrap_or_default(),
                );
            }
        }
        let _ = wtr.write_record(&row);
    }
}

fn plain_value(value: &Value) -> String {
    if let Some(raw) = decimal_str(value) {
        return raw;
    }
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
