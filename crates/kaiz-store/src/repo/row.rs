//! Conversions between model values and SQLite values

use chrono::{DateTime, NaiveDate, Utc};
use kaiz_core::rules::validation::DATE_FORMAT;
use kaiz_core::{CustomerCategory, FieldValue, Visit, YesNo};
use rusqlite::types::{Type, Value};
use rusqlite::Row;

/// Columns selected for every read, in `Visit` field order
pub(crate) const VISIT_COLUMNS: &str = "sr_no, visit_date, company_name, customer_address, \
    location, name_of_customer, designation, customer_contact_no, customer_mail_id, \
    tpe_or_non_tpe, existing_machine_turning, turning_make, existing_machines_milling, \
    milling_make, tpe_machines_nos, non_tpe_machines, sector, opportunity_for_new, \
    business_plan_current_fy, remarks, load_status, discussed_tpe_model, \
    regional_manager_remarks, created_at, updated_at";

/// Bindable SQLite value for a validated field value
pub(crate) fn to_sql_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Null => Value::Null,
        FieldValue::Integer(i) => Value::Integer(*i),
        FieldValue::Text(s) => Value::Text(s.clone()),
        FieldValue::Date(d) => Value::Text(date_to_sql(*d)),
    }
}

pub(crate) fn date_to_sql(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Decode one row selected with `VISIT_COLUMNS`
pub(crate) fn visit_from_row(row: &Row<'_>) -> rusqlite::Result<Visit> {
    let visit_date: String = row.get("visit_date")?;
    let visit_date = NaiveDate::parse_from_str(&visit_date, DATE_FORMAT)
        .map_err(|e| conversion_error(1, e))?;

    let tpe_or_non_tpe: Option<String> = row.get("tpe_or_non_tpe")?;
    let tpe_or_non_tpe = tpe_or_non_tpe
        .map(|s| s.parse::<CustomerCategory>())
        .transpose()
        .map_err(|e| conversion_error(9, e))?;

    Ok(Visit {
        sr_no: row.get("sr_no")?,
        visit_date,
        company_name: row.get("company_name")?,
        customer_address: row.get("customer_address")?,
        location: row.get("location")?,
        name_of_customer: row.get("name_of_customer")?,
        designation: row.get("designation")?,
        customer_contact_no: row.get("customer_contact_no")?,
        customer_mail_id: row.get("customer_mail_id")?,
        tpe_or_non_tpe,
        existing_machine_turning: row.get("existing_machine_turning")?,
        turning_make: row.get("turning_make")?,
        existing_machines_milling: row.get("existing_machines_milling")?,
        milling_make: row.get("milling_make")?,
        tpe_machines_nos: row.get("tpe_machines_nos")?,
        non_tpe_machines: row.get("non_tpe_machines")?,
        sector: row.get("sector")?,
        opportunity_for_new: yes_no(row, "opportunity_for_new", 17)?,
        business_plan_current_fy: row.get("business_plan_current_fy")?,
        remarks: row.get("remarks")?,
        load_status: yes_no(row, "load_status", 20)?,
        discussed_tpe_model: row.get("discussed_tpe_model")?,
        regional_manager_remarks: row.get("regional_manager_remarks")?,
        created_at: timestamp(row, "created_at", 23)?,
        updated_at: timestamp(row, "updated_at", 24)?,
    })
}

fn yes_no(row: &Row<'_>, column: &str, idx: usize) -> rusqlite::Result<Option<YesNo>> {
    let raw: Option<String> = row.get(column)?;
    raw.map(|s| YesNo::parse_for(column, &s))
        .transpose()
        .map_err(|e| conversion_error(idx, e))
}

fn timestamp(row: &Row<'_>, column: &str, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let millis: i64 = row.get(column)?;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("timestamp out of range: {}", millis).into(),
        )
    })
}

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_is_bound_as_iso_text() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(
            to_sql_value(&FieldValue::Date(d)),
            Value::Text("2024-02-01".to_string())
        );
        assert_eq!(to_sql_value(&FieldValue::Null), Value::Null);
    }

    #[test]
    fn test_select_list_matches_visit_field_count() {
        // 22 writable columns plus sr_no, created_at and updated_at
        assert_eq!(VISIT_COLUMNS.split(',').count(), 25);
    }
}
