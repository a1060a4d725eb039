use chrono::{Datelike, NaiveDate};

use crate::errors::{Result, VisitError};
use crate::model::{CustomerCategory, FieldKind, FieldValue, VisitField, VisitFields, YesNo};

/// Accepted input format for visit dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Visit dates are stored as four-digit-year text; outside this range the
/// text no longer sorts in calendar order
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// A validated column paired with its canonical value
pub type Column = (VisitField, FieldValue);

/// Validate a field map for insertion
///
/// Returns every writable column in table order with its canonical value:
/// absent optional columns become `Null`, absent counts become 0.
///
/// # Errors
/// Returns the first validation failure, checking columns in table order.
pub fn validate_create(fields: &VisitFields) -> Result<Vec<Column>> {
    VisitField::ALL
        .iter()
        .map(|&field| {
            let value = fields.value_of(field);
            if value.is_null() {
                return match field.kind() {
                    FieldKind::Date | FieldKind::RequiredText => {
                        Err(VisitError::MissingRequiredField {
                            field: field.column().to_string(),
                        })
                    }
                    FieldKind::Count => Ok((field, FieldValue::Integer(0))),
                    _ => Ok((field, FieldValue::Null)),
                };
            }
            normalize_value(field, value).map(|v| (field, v))
        })
        .collect()
}

/// Validate a field map for a partial update
///
/// Only known columns with non-null values survive, in table order. An empty
/// result means there is nothing to write.
///
/// # Errors
/// Returns the first validation failure among the supplied columns.
pub fn validate_update(fields: &VisitFields) -> Result<Vec<Column>> {
    VisitField::ALL
        .iter()
        .filter_map(|&field| {
            let value = fields.value_of(field);
            if value.is_null() {
                None
            } else {
                Some(normalize_value(field, value).map(|v| (field, v)))
            }
        })
        .collect()
}

/// Check a month number for the by-month listing
///
/// # Errors
/// `MonthOutOfRange` unless `month` is in 1..=12.
pub fn validate_month(month: u32) -> Result<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(VisitError::MonthOutOfRange { month })
    }
}

/// Convert a single non-null value into its canonical stored shape
///
/// Dates become `Date`, enum literals become their uppercase text, integer
/// columns accept either integers or numeric text.
///
/// # Errors
/// Any value that does not fit the column's kind.
pub fn normalize_value(field: VisitField, value: &FieldValue) -> Result<FieldValue> {
    let column = field.column();
    match field.kind() {
        FieldKind::Date => match value {
            FieldValue::Date(d) => check_year(column, *d).map(FieldValue::Date),
            FieldValue::Text(s) => parse_date(column, s)
                .and_then(|d| check_year(column, d))
                .map(FieldValue::Date),
            other => Err(type_mismatch(column, "date", other)),
        },
        FieldKind::RequiredText => match value {
            FieldValue::Text(s) if s.trim().is_empty() => Err(VisitError::EmptyRequiredField {
                field: column.to_string(),
            }),
            FieldValue::Text(s) => Ok(FieldValue::Text(s.clone())),
            other => Err(type_mismatch(column, "text", other)),
        },
        FieldKind::Text => match value {
            FieldValue::Text(s) => Ok(FieldValue::Text(s.clone())),
            other => Err(type_mismatch(column, "text", other)),
        },
        FieldKind::Integer => integer_value(column, value).map(FieldValue::Integer),
        FieldKind::Count => {
            let n = integer_value(column, value)?;
            if n < 0 {
                return Err(VisitError::NegativeCount {
                    field: column.to_string(),
                    value: n,
                });
            }
            Ok(FieldValue::Integer(n))
        }
        FieldKind::Category => match value {
            FieldValue::Text(s) => CustomerCategory::parse(s)
                .map(FieldValue::from)
                .ok_or_else(|| invalid_enum(column, s, &CustomerCategory::ALLOWED)),
            other => Err(invalid_enum(
                column,
                &other.display_text(),
                &CustomerCategory::ALLOWED,
            )),
        },
        FieldKind::YesNo => match value {
            FieldValue::Text(s) => YesNo::parse_for(column, s).map(FieldValue::from),
            other => Err(invalid_enum(column, &other.display_text(), &YesNo::ALLOWED)),
        },
    }
}

fn parse_date(column: &str, input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| VisitError::InvalidDate {
        field: column.to_string(),
        value: input.to_string(),
    })
}

fn check_year(column: &str, date: NaiveDate) -> Result<NaiveDate> {
    if YEAR_RANGE.contains(&date.year()) {
        Ok(date)
    } else {
        Err(VisitError::InvalidDate {
            field: column.to_string(),
            value: date.to_string(),
        })
    }
}

fn integer_value(column: &str, value: &FieldValue) -> Result<i64> {
    match value {
        FieldValue::Integer(i) => Ok(*i),
        FieldValue::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| type_mismatch(column, "integer", value)),
        other => Err(type_mismatch(column, "integer", other)),
    }
}

fn type_mismatch(column: &str, expected: &str, value: &FieldValue) -> VisitError {
    VisitError::InvalidFieldType {
        field: column.to_string(),
        expected: expected.to_string(),
        value: value.display_text(),
    }
}

fn invalid_enum(column: &str, value: &str, allowed: &[&str]) -> VisitError {
    VisitError::InvalidEnumValue {
        field: column.to_string(),
        value: value.to_string(),
        allowed: allowed.iter().map(|a| a.to_string()).collect(),
    }
}
