//! Show command

use clap::Args;
use kaiz_store::VisitStore;

use crate::output;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Serial number of the visit
    pub sr_no: i64,
}

pub fn execute(args: ShowArgs, store: &VisitStore) -> Result<(), Box<dyn std::error::Error>> {
    let visit = store
        .get_by_id(args.sr_no)?
        .ok_or_else(|| format!("No visit record found with Serial No: {}", args.sr_no))?;

    print!("{}", output::render_visit_detail(&visit));
    Ok(())
}
