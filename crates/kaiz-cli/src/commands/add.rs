//! Add command
//!
//! Usage: kaiz add [-d DATE] [-c COMPANY] [OPTIONS]

use clap::Args;
use kaiz_store::VisitStore;
use std::io::{BufRead, Write};

use super::args::{parse_date, VisitFieldArgs};
use crate::output;
use crate::prompt::{non_blank, prompt_value};

#[derive(Debug, Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub fields: VisitFieldArgs,
}

/// Execute add, prompting for a missing visit date or company name
pub fn execute<R: BufRead, W: Write>(
    mut args: AddArgs,
    store: &mut VisitStore,
    input: &mut R,
    prompt_out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.fields.visit_date.is_none() {
        args.fields.visit_date = Some(prompt_value(
            "Visit date(YYYY-MM-DD)",
            input,
            prompt_out,
            parse_date,
        )?);
    }
    if args.fields.company_name.is_none() {
        args.fields.company_name =
            Some(prompt_value("Company name", input, prompt_out, non_blank)?);
    }

    let sr_no = store.create(&args.fields.into_fields())?;

    match store.get_by_id(sr_no)? {
        Some(visit) => print!("{}", output::render_add_summary(&visit)),
        None => println!("Visit record added successfully with Serial No: {}", sr_no),
    }

    Ok(())
}
