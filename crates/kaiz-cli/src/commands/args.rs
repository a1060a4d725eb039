//! Visit column flags shared by `add` and `update`

use chrono::NaiveDate;
use clap::Args;
use kaiz_core::{CustomerCategory, FieldValue, VisitFields, YesNo};

#[derive(Debug, Default, Args)]
pub struct VisitFieldArgs {
    /// Visit date (YYYY-MM-DD)
    #[arg(long, short = 'd', value_parser = parse_date)]
    pub visit_date: Option<NaiveDate>,

    /// Company name
    #[arg(long, short = 'c')]
    pub company_name: Option<String>,

    /// Customer address
    #[arg(long, short = 'a')]
    pub customer_address: Option<String>,

    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// Name of customer
    #[arg(long, short = 'n')]
    pub customer_name: Option<String>,

    /// Customer designation
    #[arg(long)]
    pub designation: Option<String>,

    /// Company contact number
    #[arg(long)]
    pub contact_no: Option<i64>,

    /// Customer email ID
    #[arg(long)]
    pub email: Option<String>,

    /// TPE or NON-TPE customer
    #[arg(long, value_parser = parse_tpe)]
    pub tpe_status: Option<CustomerCategory>,

    /// Existing machines [TURNING]
    #[arg(long)]
    pub existing_turning: Option<String>,

    /// Turning machine make
    #[arg(long)]
    pub turning_make: Option<String>,

    /// Existing machines [MILLING]
    #[arg(long)]
    pub existing_milling: Option<String>,

    /// Milling machine make
    #[arg(long)]
    pub milling_make: Option<String>,

    /// TPE machines count [default on add: 0]
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..))]
    pub tpe_machines: Option<i64>,

    /// Non-TPE machines count [default on add: 0]
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..))]
    pub non_tpe_machines: Option<i64>,

    /// Business sector
    #[arg(long)]
    pub sector: Option<String>,

    /// Opportunity for new (YES/NO)
    #[arg(long, value_parser = parse_yes_no)]
    pub opportunity: Option<YesNo>,

    /// Business plan - current FY
    #[arg(long)]
    pub business_plan: Option<String>,

    /// General remarks
    #[arg(long)]
    pub remarks: Option<String>,

    /// Load status (YES/NO)
    #[arg(long, value_parser = parse_yes_no)]
    pub load: Option<YesNo>,

    /// Discussed TPE model
    #[arg(long)]
    pub tpe_model: Option<String>,

    /// Regional Manager remarks
    #[arg(long)]
    pub rm_remarks: Option<String>,
}

impl VisitFieldArgs {
    /// Field map holding only the flags that were given
    pub fn into_fields(self) -> VisitFields {
        let mut fields = VisitFields::new();
        put(&mut fields, "visit_date", self.visit_date);
        put(&mut fields, "company_name", self.company_name);
        put(&mut fields, "customer_address", self.customer_address);
        put(&mut fields, "location", self.location);
        put(&mut fields, "name_of_customer", self.customer_name);
        put(&mut fields, "designation", self.designation);
        put(&mut fields, "customer_contact_no", self.contact_no);
        put(&mut fields, "customer_mail_id", self.email);
        put(&mut fields, "tpe_or_non_tpe", self.tpe_status);
        put(&mut fields, "existing_machine_turning", self.existing_turning);
        put(&mut fields, "turning_make", self.turning_make);
        put(&mut fields, "existing_machines_milling", self.existing_milling);
        put(&mut fields, "milling_make", self.milling_make);
        put(&mut fields, "tpe_machines_nos", self.tpe_machines);
        put(&mut fields, "non_tpe_machines", self.non_tpe_machines);
        put(&mut fields, "sector", self.sector);
        put(&mut fields, "opportunity_for_new", self.opportunity);
        put(&mut fields, "business_plan_current_fy", self.business_plan);
        put(&mut fields, "remarks", self.remarks);
        put(&mut fields, "load_status", self.load);
        put(&mut fields, "discussed_tpe_model", self.tpe_model);
        put(&mut fields, "regional_manager_remarks", self.rm_remarks);
        fields
    }
}

fn put<T: Into<FieldValue>>(fields: &mut VisitFields, key: &str, value: Option<T>) {
    if let Some(value) = value {
        fields.set(key, value);
    }
}

pub fn parse_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input.trim(), kaiz_core::rules::validation::DATE_FORMAT)
        .map_err(|_| "Date must be in YYYY-MM-DD format".to_string())
}

fn parse_tpe(input: &str) -> Result<CustomerCategory, String> {
    CustomerCategory::parse(input).ok_or_else(|| "Must be either TPE or NON-TPE".to_string())
}

fn parse_yes_no(input: &str) -> Result<YesNo, String> {
    YesNo::parse(input).ok_or_else(|| "Must be either YES or NO".to_string())
}
