//! Field maps and the explicit column set
//!
//! Callers describe a visit (or a change to one) as a map of column key to
//! value. Only keys that name a `VisitField` are ever written; the system
//! columns (`sr_no`, `created_at`, `updated_at`) are deliberately absent from
//! the set.

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// How a column's value is interpreted and validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Required calendar date
    Date,
    /// Required non-empty text
    RequiredText,
    /// Optional free text
    Text,
    /// Optional integer
    Integer,
    /// Non-negative integer defaulting to 0
    Count,
    /// TPE / NON-TPE
    Category,
    /// YES / NO
    YesNo,
}

/// A writable column of the visits table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VisitField {
    VisitDate,
    CompanyName,
    CustomerAddress,
    Location,
    NameOfCustomer,
    Designation,
    CustomerContactNo,
    CustomerMailId,
    TpeOrNonTpe,
    ExistingMachineTurning,
    TurningMake,
    ExistingMachinesMilling,
    MillingMake,
    TpeMachinesNos,
    NonTpeMachines,
    Sector,
    OpportunityForNew,
    BusinessPlanCurrentFy,
    Remarks,
    LoadStatus,
    DiscussedTpeModel,
    RegionalManagerRemarks,
}

impl VisitField {
    /// Every writable column, in table order
    pub const ALL: [VisitField; 22] = [
        VisitField::VisitDate,
        VisitField::CompanyName,
        VisitField::CustomerAddress,
        VisitField::Location,
        VisitField::NameOfCustomer,
        VisitField::Designation,
        VisitField::CustomerContactNo,
        VisitField::CustomerMailId,
        VisitField::TpeOrNonTpe,
        VisitField::ExistingMachineTurning,
        VisitField::TurningMake,
        VisitField::ExistingMachinesMilling,
        VisitField::MillingMake,
        VisitField::TpeMachinesNos,
        VisitField::NonTpeMachines,
        VisitField::Sector,
        VisitField::OpportunityForNew,
        VisitField::BusinessPlanCurrentFy,
        VisitField::Remarks,
        VisitField::LoadStatus,
        VisitField::DiscussedTpeModel,
        VisitField::RegionalManagerRemarks,
    ];

    /// Column name in the visits table, also the field-map key
    pub fn column(&self) -> &'static str {
        match self {
            VisitField::VisitDate => "visit_date",
            VisitField::CompanyName => "company_name",
            VisitField::CustomerAddress => "customer_address",
            VisitField::Location => "location",
            VisitField::NameOfCustomer => "name_of_customer",
            VisitField::Designation => "designation",
            VisitField::CustomerContactNo => "customer_contact_no",
            VisitField::CustomerMailId => "customer_mail_id",
            VisitField::TpeOrNonTpe => "tpe_or_non_tpe",
            VisitField::ExistingMachineTurning => "existing_machine_turning",
            VisitField::TurningMake => "turning_make",
            VisitField::ExistingMachinesMilling => "existing_machines_milling",
            VisitField::MillingMake => "milling_make",
            VisitField::TpeMachinesNos => "tpe_machines_nos",
            VisitField::NonTpeMachines => "non_tpe_machines",
            VisitField::Sector => "sector",
            VisitField::OpportunityForNew => "opportunity_for_new",
            VisitField::BusinessPlanCurrentFy => "business_plan_current_fy",
            VisitField::Remarks => "remarks",
            VisitField::LoadStatus => "load_status",
            VisitField::DiscussedTpeModel => "discussed_tpe_model",
            VisitField::RegionalManagerRemarks => "regional_manager_remarks",
        }
    }

    /// Look up a column by its field-map key
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.column() == name)
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            VisitField::VisitDate => "Visit Date",
            VisitField::CompanyName => "Company",
            VisitField::CustomerAddress => "Customer Address",
            VisitField::Location => "Location",
            VisitField::NameOfCustomer => "Customer",
            VisitField::Designation => "Designation",
            VisitField::CustomerContactNo => "Contact No",
            VisitField::CustomerMailId => "Email",
            VisitField::TpeOrNonTpe => "Customer Type",
            VisitField::ExistingMachineTurning => "Existing Machines [TURNING]",
            VisitField::TurningMake => "Turning Make",
            VisitField::ExistingMachinesMilling => "Existing Machines [MILLING]",
            VisitField::MillingMake => "Milling Make",
            VisitField::TpeMachinesNos => "TPE Machines",
            VisitField::NonTpeMachines => "Non-TPE Machines",
            VisitField::Sector => "Sector",
            VisitField::OpportunityForNew => "Opportunity For New",
            VisitField::BusinessPlanCurrentFy => "Business Plan (Current FY)",
            VisitField::Remarks => "Remarks",
            VisitField::LoadStatus => "Load Status",
            VisitField::DiscussedTpeModel => "Discussed TPE Model",
            VisitField::RegionalManagerRemarks => "RM Remarks",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            VisitField::VisitDate => FieldKind::Date,
            VisitField::CompanyName => FieldKind::RequiredText,
            VisitField::CustomerContactNo => FieldKind::Integer,
            VisitField::TpeMachinesNos | VisitField::NonTpeMachines => FieldKind::Count,
            VisitField::TpeOrNonTpe => FieldKind::Category,
            VisitField::OpportunityForNew | VisitField::LoadStatus => FieldKind::YesNo,
            _ => FieldKind::Text,
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self.kind(), FieldKind::Date | FieldKind::RequiredText)
    }
}

/// A single value in a field map
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Absent value; skipped by partial update
    Null,
    Integer(i64),
    Text(String),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Render the value the way a user typed or would read it
    pub fn display_text(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<super::CustomerCategory> for FieldValue {
    fn from(value: super::CustomerCategory) -> Self {
        FieldValue::Text(value.as_str().to_string())
    }
}

impl From<super::YesNo> for FieldValue {
    fn from(value: super::YesNo) -> Self {
        FieldValue::Text(value.as_str().to_string())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

static NULL_VALUE: FieldValue = FieldValue::Null;

/// Caller-supplied map of column key to value
///
/// Keys are free-form strings so that any front end can hand over whatever
/// it collected; unknown keys are ignored by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitFields {
    values: BTreeMap<String, FieldValue>,
}

impl VisitFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    /// Value for a known column, treating a missing key as `Null`
    pub fn value_of(&self, field: VisitField) -> &FieldValue {
        self.values.get(field.column()).unwrap_or(&NULL_VALUE)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keys that do not name a writable column
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|k| VisitField::from_column(k).is_none())
            .collect()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for VisitFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = VisitFields::new();
        for (k, v) in iter {
            fields.set(k, v);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_round_trip_covers_all_fields() {
        for field in VisitField::ALL {
            assert_eq!(VisitField::from_column(field.column()), Some(field));
        }
        assert_eq!(VisitField::from_column("sr_no"), None);
        assert_eq!(VisitField::from_column("updated_at"), None);
    }

    #[test]
    fn test_required_columns() {
        let required: Vec<_> = VisitField::ALL
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.column())
            .collect();
        assert_eq!(required, vec!["visit_date", "company_name"]);
    }

    #[test]
    fn test_option_none_becomes_null() {
        let fields = VisitFields::new()
            .with("remarks", None::<String>)
            .with("location", Some("Pune"));

        assert!(fields.value_of(VisitField::Remarks).is_null());
        assert_eq!(
            fields.value_of(VisitField::Location),
            &FieldValue::Text("Pune".to_string())
        );
        assert!(fields.value_of(VisitField::Sector).is_null());
    }

    #[test]
    fn test_unknown_keys() {
        let fields: VisitFields = [("remarks", "x"), ("sr_no", "9"), ("colour", "red")]
            .into_iter()
            .collect();

        assert_eq!(fields.unknown_keys(), vec!["colour", "sr_no"]);
    }
}
