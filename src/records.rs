//! Row records for the raw data viewer.
//!
//! Renders DataFrame rows as a JSON array of objects keyed by column name,
//! in column order. Timestamps are written in the file's own format.

use chrono::DateTime;
use polars::datatypes::AnyValue;
use polars::prelude::*;

use crate::error::BikeshareError;
use crate::schema::TIMESTAMP_FORMAT;

pub fn records_to_json(df: &DataFrame) -> Result<String, BikeshareError> {
    let names = df.get_column_names_str();
    let columns = df.get_columns();

    let mut s = String::from("[");
    for i in 0..df.height() {
        if i > 0 {
            s.push(',');
        }
        s.push_str("\n  {");
        for (j, (name, column)) in names.iter().zip(columns).enumerate() {
            if j > 0 {
                s.push_str(", ");
            }
            let value = column.get(i)?;
            s.push_str(&format!(r#""{}": {}"#, escape_json(name), json_value(&value)));
        }
        s.push('}');
    }
    if df.height() > 0 {
        s.push('\n');
    }
    s.push(']');
    Ok(s)
}

fn json_value(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => "null".to_string(),
        AnyValue::String(v) => quoted(v),
        AnyValue::StringOwned(v) => quoted(v),
        AnyValue::Float64(f) if f.is_finite() => f.to_string(),
        AnyValue::Int32(n) => n.to_string(),
        AnyValue::Int64(n) => n.to_string(),
        AnyValue::Datetime(us, _, _) => match DateTime::from_timestamp_micros(*us) {
            Some(dt) => quoted(&dt.naive_utc().format(TIMESTAMP_FORMAT).to_string()),
            None => "null".to_string(),
        },
        other => quoted(&other.to_string()),
    }
}

fn quoted(s: &str) -> String {
    format!(r#""{}""#, escape_json(s))
}

fn escape_json(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_rows_as_objects() {
        let df = DataFrame::new(vec![
            Column::new("Start Station".into(), [Some("Clark \"St\""), None]),
            Column::new("Trip Duration".into(), [Some(776.0), Some(12.5)]),
        ])
        .unwrap();

        assert_eq!(
            records_to_json(&df).unwrap(),
            "[\n  {\"Start Station\": \"Clark \\\"St\\\"\", \"Trip Duration\": 776},\
             \n  {\"Start Station\": null, \"Trip Duration\": 12.5}\n]"
        );
    }

    #[test]
    fn empty_frame_is_empty_array() {
        let df = DataFrame::new(vec![Column::new("User Type".into(), Vec::<&str>::new())]).unwrap();
        assert_eq!(records_to_json(&df).unwrap(), "[]");
    }

    #[test]
    fn timestamps_use_file_format() {
        let value = AnyValue::Datetime(1_483_261_677_000_000, TimeUnit::Microseconds, None);
        assert_eq!(json_value(&value), "\"2017-01-01 09:07:57\"");
    }
}
