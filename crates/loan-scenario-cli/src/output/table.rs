use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::decimal_str;

/// Format output as a table using the tabled crate.
///
/// Comparison and single-scenario envelopes get purpose-built layouts;
/// anything else falls back to a generic field/value table.
pub fn print_table(value: &Value) {
    let result = value.get("result").unwrap_or(value);

    if let Some(results) = result.get("results").and_then(Value::as_array) {
        print_comparison(results, result);
    } else if let Some(details) = result.get("loanDetails").and_then(Value::as_array) {
        print_scenario(result, details);
    } else {
        print_flat_object(result);
    }

    print_envelope_notes(value);
}

fn print_comparison(results: &[Value], envelope: &Value) {
    let best_id = envelope.get("bestScenarioId").and_then(Value::as_str);
    let savings = envelope.get("savings").and_then(Value::as_array);

    let has_savings = savings.is_some_and(|s| !s.is_empty());

    let mut builder = Builder::default();
    let mut headers = vec![
        "Scenario",
        "Principal",
        "Monthly",
        "Interest",
        "Kurstab",
        "Total cost",
        "Eff. rate %",
    ];
    if has_savings {
        headers.push("Savings");
    }
    builder.push_record(headers);

    for r in results {
        let id = r.get("scenarioId").and_then(Value::as_str).unwrap_or("");
        let mut name = r
            .get("scenarioName")
            .and_then(Value::as_str)
            .unwrap_or(id)
            .to_string();
        if best_id == Some(id) {
            name.push_str(" *");
        }

        let mut row = vec![
            name,
            amount_cell(r, "totalPrincipal"),
            amount_cell(r, "monthlyPayment"),
            amount_cell(r, "totalInterest"),
            amount_cell(r, "totalKurstab"),
            amount_cell(r, "totalCost"),
            rate_cell(r, "effectiveInterestRate"),
        ];
        if has_savings {
            row.push(savings_cell(savings, id));
        }
        builder.push_record(row);
    }

    println!("{}", Table::from(builder));
    if best_id.is_some() {
        println!("\n* lowest total cost");
    }
}

fn print_scenario(result: &Value, details: &[Value]) {
    let summary = [
        ("Total principal", amount_cell(result, "totalPrincipal")),
        ("Monthly payment", amount_cell(result, "monthlyPayment")),
        ("Total interest", amount_cell(result, "totalInterest")),
        ("Total kurstab", amount_cell(result, "totalKurstab")),
        ("Total cost", amount_cell(result, "totalCost")),
        ("Avg. rate %", rate_cell(result, "averageInterestRate")),
        ("Eff. rate %", rate_cell(result, "effectiveInterestRate")),
        ("Weighted term", rate_cell(result, "totalLoanTerm")),
    ];
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (label, value) in summary {
        builder.push_record([label.to_string(), value]);
    }
    println!("{}", Table::from(builder));

    if details.is_empty() {
        return;
    }

    let mut builder = Builder::default();
    builder.push_record([
        "Loan",
        "Principal",
        "Kurs",
        "Monthly",
        "Interest",
        "Kurstab",
        "Eff. rate %",
    ]);
    for d in details {
        let name = d
            .get("loan")
            .and_then(|l| l.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("");
        let kurs = d
            .get("loan")
            .and_then(|l| l.get("kurs"))
            .map(format_rate)
            .unwrap_or_default();
        builder.push_record([
            name.to_string(),
            d.get("loan")
                .map(|l| amount_cell(l, "principal"))
                .unwrap_or_default(),
            kurs,
            amount_cell(d, "monthlyPayment"),
            amount_cell(d, "totalInterest"),
            amount_cell(d, "kurstab"),
            rate_cell(d, "effectiveInterestRate"),
        ]);
    }
    println!("\n{}", Table::from(builder));
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.clone(), display_value(val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        println!("{value}");
    }
}

fn print_envelope_notes(value: &Value) {
    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {s}");
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = value.get("methodology") {
        println!("\nMethodology: {methodology}");
    }
}

fn savings_cell(savings: Option<&Vec<Value>>, scenario_id: &str) -> String {
    savings
        .and_then(|rows| {
            rows.iter()
                .find(|s| s.get("scenarioId").and_then(Value::as_str) == Some(scenario_id))
        })
        .map(|s| amount_cell(s, "savingsVsMostExpensive"))
        .unwrap_or_default()
}

fn amount_cell(value: &Value, key: &str) -> String {
    value.get(key).map(format_amount).unwrap_or_default()
}

fn rate_cell(value: &Value, key: &str) -> String {
    value.get(key).map(format_rate).unwrap_or_default()
}

/// Danish-style money display: thousands grouped with '.', two decimals
/// after ','.
fn format_amount(value: &Value) -> String {
    let Some(raw) = decimal_str(value) else {
        return display_value(value);
    };
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let mut frac: String = frac_part.chars().take(2).collect();
    while frac.len() < 2 {
        frac.push('0');
    }

    format!("{sign}{grouped},{frac}")
}

/// Rates and other small figures: at most three decimals, comma-separated.
fn format_rate(value: &Value) -> String {
    let Some(raw) = decimal_str(value) else {
        return display_value(value);
    };
    match raw.split_once('.') {
        Some((int_part, frac_part)) => {
            let frac: String = frac_part.chars().take(3).collect();
            if frac.is_empty() {
                int_part.to_string()
            } else {
                format!("{int_part},{frac}")
            }
        }
        None => raw,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
