//! Plain-text rendering of visit records

use kaiz_core::{Visit, VisitField};
const EMPTY_CELL: &str = "-";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Confirmation block printed after a successful add
pub fn render_add_summary(visit: &Visit) -> String {
    let mut lines = vec![
        format!(
            "Visit record added successfully with Serial No: {}",
            visit.sr_no
        ),
        String::new(),
        "Added visit record:".to_string(),
        format!("Serial No: {}", visit.sr_no),
        format!("Visit Date: {}", visit.visit_date),
        format!("Company: {}", visit.company_name),
    ];
    if let Some(name) = &visit.name_of_customer {
        lines.push(format!("Customer: {}", name));
    }
    if let Some(category) = visit.tpe_or_non_tpe {
        lines.push(format!("Customer Type: {}", category));
    }
    join_lines(lines)
}

/// Every populated column of one visit, one `Label: value` per line
pub fn render_visit_detail(visit: &Visit) -> String {
    let mut lines = vec![format!("Serial No: {}", visit.sr_no)];
    lines.extend(VisitField::ALL.iter().filter_map(|field| {
        let value = visit.get(*field);
        (!value.is_null()).then(|| format!("{}: {}", field.label(), value.display_text()))
    }));
    lines.push(format!(
        "Recorded: {}",
        visit.created_at.format(TIMESTAMP_FORMAT)
    ));
    if visit.was_updated() {
        lines.push(format!(
            "Last Updated: {}",
            visit.updated_at.format(TIMESTAMP_FORMAT)
        ));
    }
    join_lines(lines)
}

/// Fixed-width table of visits in the order given
pub fn render_visit_table(visits: &[Visit]) -> String {
    let headers = [
        "Sr No",
        "Visit Date",
        "Company",
        "Location",
        "Customer",
        "Type",
        "Opportunity",
    ];
    let rows: Vec<[String; 7]> = visits.iter().map(table_row).collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = widths.map(|w| "-".repeat(w));
    let mut lines = vec![
        table_line(&headers.map(String::from), &widths),
        table_line(&rule, &widths),
    ];
    lines.extend(rows.iter().map(|row| table_line(row, &widths)));
    join_lines(lines)
}

fn table_row(visit: &Visit) -> [String; 7] {
    [
        visit.sr_no.to_string(),
        visit.visit_date.to_string(),
        visit.company_name.clone(),
        cell(visit.location.as_deref()),
        cell(visit.name_of_customer.as_deref()),
        cell(visit.tpe_or_non_tpe.map(|c| c.as_str())),
        cell(visit.opportunity_for_new.map(|o| o.as_str())),
    ]
}

fn cell(value: Option<&str>) -> String {
    value.unwrap_or(EMPTY_CELL).to_string()
}

fn table_line(cells: &[String; 7], widths: &[usize; 7]) -> String {
    let line = cells
        .iter()
        .zip(widths.iter())
        .map(|(c, w)| format!("{:<width$}", c, width = *w))
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

/// Newline-terminated block, one entry per line
fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
