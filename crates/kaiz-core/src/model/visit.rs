use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::choice::{CustomerCategory, YesNo};
use super::field::{FieldValue, VisitField, VisitFields};

/// Visit - one record of a customer-site visit
///
/// Values of this type are transient copies handed out by the store; the
/// durable representation is owned by the store alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    /// System-assigned serial number, never reused
    pub sr_no: i64,

    pub visit_date: NaiveDate,
    pub company_name: String,
    pub customer_address: Option<String>,
    pub location: Option<String>,
    pub name_of_customer: Option<String>,
    pub designation: Option<String>,
    pub customer_contact_no: Option<i64>,
    pub customer_mail_id: Option<String>,
    pub tpe_or_non_tpe: Option<CustomerCategory>,

    // Equipment inventory
    pub existing_machine_turning: Option<String>,
    pub turning_make: Option<String>,
    pub existing_machines_milling: Option<String>,
    pub milling_make: Option<String>,
    pub tpe_machines_nos: i64,
    pub non_tpe_machines: i64,

    pub sector: Option<String>,
    pub opportunity_for_new: Option<YesNo>,
    pub business_plan_current_fy: Option<String>,
    pub remarks: Option<String>,
    pub load_status: Option<YesNo>,
    pub discussed_tpe_model: Option<String>,
    pub regional_manager_remarks: Option<String>,

    /// Timestamp when this visit was recorded
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last successful update (equals `created_at` until then)
    pub updated_at: DateTime<Utc>,
}

impl Visit {
    /// Create a visit with only the required columns set
    ///
    /// Mostly useful for tests and front ends that build a record before it
    /// is stored; `sr_no` is 0 until the store assigns one.
    pub fn new(visit_date: NaiveDate, company_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            sr_no: 0,
            visit_date,
            company_name: company_name.into(),
            customer_address: None,
            location: None,
            name_of_customer: None,
            designation: None,
            customer_contact_no: None,
            customer_mail_id: None,
            tpe_or_non_tpe: None,
            existing_machine_turning: None,
            turning_make: None,
            existing_machines_milling: None,
            milling_make: None,
            tpe_machines_nos: 0,
            non_tpe_machines: 0,
            sector: None,
            opportunity_for_new: None,
            business_plan_current_fy: None,
            remarks: None,
            load_status: None,
            discussed_tpe_model: None,
            regional_manager_remarks: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Value of a writable column, in the same shape validation produces
    pub fn get(&self, field: VisitField) -> FieldValue {
        match field {
            VisitField::VisitDate => self.visit_date.into(),
            VisitField::CompanyName => self.company_name.clone().into(),
            VisitField::CustomerAddress => self.customer_address.clone().into(),
            VisitField::Location => self.location.clone().into(),
            VisitField::NameOfCustomer => self.name_of_customer.clone().into(),
            VisitField::Designation => self.designation.clone().into(),
            VisitField::CustomerContactNo => self.customer_contact_no.into(),
            VisitField::CustomerMailId => self.customer_mail_id.clone().into(),
            VisitField::TpeOrNonTpe => self.tpe_or_non_tpe.into(),
            VisitField::ExistingMachineTurning => self.existing_machine_turning.clone().into(),
            VisitField::TurningMake => self.turning_make.clone().into(),
            VisitField::ExistingMachinesMilling => self.existing_machines_milling.clone().into(),
            VisitField::MillingMake => self.milling_make.clone().into(),
            VisitField::TpeMachinesNos => self.tpe_machines_nos.into(),
            VisitField::NonTpeMachines => self.non_tpe_machines.into(),
            VisitField::Sector => self.sector.clone().into(),
            VisitField::OpportunityForNew => self.opportunity_for_new.into(),
            VisitField::BusinessPlanCurrentFy => self.business_plan_current_fy.clone().into(),
            VisitField::Remarks => self.remarks.clone().into(),
            VisitField::LoadStatus => self.load_status.into(),
            VisitField::DiscussedTpeModel => self.discussed_tpe_model.clone().into(),
            VisitField::RegionalManagerRemarks => self.regional_manager_remarks.clone().into(),
        }
    }

    /// Export the writable columns as a field map, omitting null values
    pub fn to_fields(&self) -> VisitFields {
        VisitField::ALL
            .iter()
            .map(|f| (f.column(), self.get(*f)))
            .filter(|(_, v)| !v.is_null())
            .collect()
    }

    /// Whether `updated_at` has moved past `created_at`
    pub fn was_updated(&self) -> bool {
        self.updated_at > self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_visit_defaults() {
        let visit = Visit::new(date(2024, 1, 5), "Acme Tools");

        assert_eq!(visit.sr_no, 0);
        assert_eq!(visit.company_name, "Acme Tools");
        assert_eq!(visit.tpe_machines_nos, 0);
        assert_eq!(visit.non_tpe_machines, 0);
        assert_eq!(visit.created_at, visit.updated_at);
        assert!(!visit.was_updated());
    }

    #[test]
    fn test_to_fields_skips_nulls_and_keeps_counts() {
        let mut visit = Visit::new(date(2024, 1, 5), "Acme Tools");
        visit.tpe_or_non_tpe = Some(CustomerCategory::NonTpe);
        visit.remarks = Some("follow up".to_string());

        let fields = visit.to_fields();

        assert_eq!(fields.len(), 6);
        assert_eq!(
            fields.get("tpe_or_non_tpe"),
            Some(&FieldValue::Text("NON-TPE".to_string()))
        );
        assert_eq!(fields.get("tpe_machines_nos"), Some(&FieldValue::Integer(0)));
        assert_eq!(fields.get("visit_date"), Some(&FieldValue::Date(date(2024, 1, 5))));
        assert!(fields.get("sector").is_none());
    }
}
