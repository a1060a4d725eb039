//! List command
//!
//! Usage: kaiz list [--year YEAR --month MONTH]

use clap::Args;
use kaiz_store::VisitStore;

use crate::output;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Calendar year to filter on (requires --month)
    #[arg(long, requires = "month")]
    pub year: Option<i32>,

    /// Month number 1-12 to filter on (requires --year)
    #[arg(long, requires = "year")]
    pub month: Option<u32>,
}

pub fn execute(args: ListArgs, store: &VisitStore) -> Result<(), Box<dyn std::error::Error>> {
    let visits = match (args.year, args.month) {
        (Some(year), Some(month)) => store.get_by_month(year, month)?,
        _ => store.get_all()?,
    };

    if visits.is_empty() {
        println!("No visit records found");
    } else {
        print!("{}", output::render_visit_table(&visits));
        println!();
        println!("Showing {} of {} visit record(s)", visits.len(), store.count()?);
    }
    Ok(())
}
