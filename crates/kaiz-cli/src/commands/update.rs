//! Update command
//!
//! Usage: kaiz update <SR_NO> [OPTIONS]

use clap::Args;
use kaiz_store::VisitStore;

use super::args::VisitFieldArgs;

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Serial number of the visit to change
    pub sr_no: i64,

    #[command(flatten)]
    pub fields: VisitFieldArgs,
}

pub fn execute(args: UpdateArgs, store: &mut VisitStore) -> Result<(), Box<dyn std::error::Error>> {
    let fields = args.fields.into_fields();
    if fields.is_empty() {
        println!("Nothing to update for Serial No: {}", args.sr_no);
        return Ok(());
    }

    if store.update(args.sr_no, &fields)? {
        println!("Visit record {} updated", args.sr_no);
        Ok(())
    } else {
        Err(format!("No visit record found with Serial No: {}", args.sr_no).into())
    }
}
