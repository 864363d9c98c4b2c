//! Import parsing: delimited text with a header row, or a structured JSON
//! list. Malformed rows are dropped and the batch continues; a payload that
//! is neither form rejects the whole import and leaves the prior working set
//! untouched (the caller only swaps the set on success).

use serde_json::Value;

use crate::errors::CoachError;
use crate::model::Transaction;

const FIELD_DATE: &str = "date";
const FIELD_DESCRIPTION: &str = "description";
const FIELD_AMOUNT: &str = "amount";
const FIELD_CATEGORY: &str = "category";

/// Parses an import payload, dispatching on shape: a JSON array is treated as
/// a structured list, anything else as delimited text.
pub fn parse_import(text: &str) -> Result<Vec<Transaction>, CoachError> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        let values: Vec<Value> = serde_json::from_str(text)
            .map_err(|err| CoachError::InvalidImport(format!("not a JSON list: {err}")))?;
        Ok(parse_structured(&values))
    } else {
        parse_delimited(text)
    }
}

/// Parses comma-delimited text whose header row declares at minimum `date`,
/// `description`, and `amount` (optionally `category`). Data rows map
/// positionally to the header; unusable rows are dropped silently.
pub fn parse_delimited(text: &str) -> Result<Vec<Transaction>, CoachError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.trim().as_bytes());
    let headers = reader
        .headers()
        .map_err(|err| CoachError::InvalidImport(format!("unreadable header row: {err}")))?
        .clone();
    let position = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name))
    };
    let (Some(date_idx), Some(description_idx), Some(amount_idx)) = (
        position(FIELD_DATE),
        position(FIELD_DESCRIPTION),
        position(FIELD_AMOUNT),
    ) else {
        return Err(CoachError::InvalidImport(
            "header must declare date, description and amount columns".into(),
        ));
    };
    let category_idx = position(FIELD_CATEGORY);

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for record in reader.records() {
        let Ok(record) = record else {
            dropped += 1;
            continue;
        };
        let date = record.get(date_idx).unwrap_or("").trim();
        let description = record.get(description_idx).unwrap_or("").trim();
        let amount = record.get(amount_idx).unwrap_or("").trim();
        match build_row(date, description, parse_amount(amount)) {
            Some(mut txn) => {
                if let Some(category) = category_idx
                    .and_then(|idx| record.get(idx))
                    .map(str::trim)
                    .filter(|category| !category.is_empty())
                {
                    txn.category = Some(category.to_string());
                }
                rows.push(txn);
            }
            None => dropped += 1,
        }
    }
    tracing::debug!(kept = rows.len(), dropped, "parsed delimited import");
    Ok(rows)
}

/// Parses a structured list of objects carrying the same field names as the
/// delimited form. Entries that are not objects, or that fail the row rules,
/// are dropped silently.
pub fn parse_structured(values: &[Value]) -> Vec<Transaction> {
    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for value in values {
        match record_from_value(value) {
            Some(txn) => rows.push(txn),
            None => dropped += 1,
        }
    }
    tracing::debug!(kept = rows.len(), dropped, "parsed structured import");
    rows
}

fn record_from_value(value: &Value) -> Option<Transaction> {
    let object = value.as_object()?;
    let date = object.get(FIELD_DATE).and_then(Value::as_str)?.trim();
    let description = object
        .get(FIELD_DESCRIPTION)
        .and_then(Value::as_str)?
        .trim();
    let amount = object.get(FIELD_AMOUNT).and_then(amount_from_value);
    let mut txn = build_row(date, description, amount)?;
    if let Some(category) = object
        .get(FIELD_CATEGORY)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|category| !category.is_empty())
    {
        txn.category = Some(category.to_string());
    }
    Some(txn)
}

/// A row is rejected when date or description is empty, or the amount does
/// not parse to a finite number. No partial-row repair is attempted.
fn build_row(date: &str, description: &str, amount: Option<f64>) -> Option<Transaction> {
    if date.is_empty() || description.is_empty() {
        return None;
    }
    Some(Transaction::new(date, description, amount?))
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

fn amount_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|amount| amount.is_finite()),
        Value::String(raw) => parse_amount(raw.trim()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimited_maps_columns_by_header() {
        let text = "date,description,amount,category\n\
                    2025-10-01,Starbucks - Latte,-6.25,\n\
                    2025-10-03,Payroll,850.00,Income\n";
        let rows = parse_delimited(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].description, "Starbucks - Latte");
        assert_eq!(rows[0].category, None);
        assert_eq!(rows[1].category.as_deref(), Some("Income"));
    }

    #[test]
    fn delimited_drops_unusable_rows_silently() {
        let text = "date,description,amount\n\
                    ,Missing date,-5.00\n\
                    2025-10-02,,-5.00\n\
                    2025-10-02,Bad amount,abc\n\
                    2025-10-02,Kept,-5.00\n";
        let rows = parse_delimited(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "Kept");
    }

    #[test]
    fn delimited_rejects_missing_header_columns() {
        let err = parse_delimited("date,memo\n2025-10-01,coffee\n").unwrap_err();
        assert!(matches!(err, CoachError::InvalidImport(_)));
    }

    #[test]
    fn structured_accepts_numeric_strings_and_drops_junk() {
        let values: Vec<Value> = serde_json::from_str(
            r#"[
                {"date":"2025-10-01","description":"Coffee","amount":-6.25},
                {"date":"2025-10-02","description":"Refund","amount":"12.50","category":"Shopping"},
                {"date":"","description":"No date","amount":-1.0},
                {"date":"2025-10-03","description":"Bad amount","amount":"zero"},
                "not an object"
            ]"#,
        )
        .unwrap();
        let rows = parse_structured(&values);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].amount, 12.50);
        assert_eq!(rows[1].category.as_deref(), Some("Shopping"));
    }

    #[test]
    fn import_rejects_payloads_that_are_neither_form() {
        assert!(matches!(
            parse_import("[{ truncated"),
            Err(CoachError::InvalidImport(_))
        ));
        assert!(matches!(
            parse_import("{\"not\":\"a list\"}"),
            Err(CoachError::InvalidImport(_))
        ));
    }

    #[test]
    fn import_dispatches_on_payload_shape() {
        let json = r#"[{"date":"2025-10-01","description":"Coffee","amount":-6.25}]"#;
        assert_eq!(parse_import(json).unwrap().len(), 1);
        let csv = "date,description,amount\n2025-10-01,Coffee,-6.25\n";
        assert_eq!(parse_import(csv).unwrap().len(), 1);
    }
}
