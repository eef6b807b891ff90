use apportion::Apportionment;
use std::fmt::Write;

const HEADERS: [&str; 6] = [
    "party",
    "votes",
    "initial seats",
    "residual votes",
    "bonus seats",
    "total seats",
];

/// Plain-text results table with the grand-total row and any warnings
/// underneath.
pub fn render(apportionment: &Apportionment, district: Option<&str>) -> String {
    let mut rows: Vec<[String; 6]> = apportionment
        .results
        .iter()
        .map(|r| {
            [
                r.party.to_string(),
                r.votes.to_string(),
                r.initial_seats.to_string(),
                r.residual_votes.to_string(),
                r.bonus_seats.to_string(),
                r.total_seats.to_string(),
            ]
        })
        .collect();

    let t = &apportionment.totals;
    // residual column stays blank on the total row
    rows.push([
        "total".to_string(),
        t.votes.to_string(),
        t.initial_seats.to_string(),
        "".to_string(),
        t.bonus_seats.to_string(),
        t.total_seats.to_string(),
    ]);

    let mut widths: [usize; 6] = [0; 6];
    for (i, h) in HEADERS.iter().enumerate() {
        widths[i] = h.chars().count();
    }
    for row in rows.iter() {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    if let Some(name) = district {
        let _ = writeln!(out, "{}", name);
    }
    let _ = writeln!(out, "quota: {}", apportionment.quota);

    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    write_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(&mut out, &rule, &widths);
    for row in rows.iter() {
        write_row(&mut out, row, &widths);
    }

    if apportionment.unassigned_seats > 0 {
        let _ = writeln!(out, "unassigned seats: {}", apportionment.unassigned_seats);
    }
    for w in apportionment.warnings.iter() {
        let _ = writeln!(out, "warning: {}", w);
    }
    out
}

fn write_row(out: &mut String, cells: &[String], widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(i, (cell, w))| {
            let pad = w - cell.chars().count();
            match i {
                0 => format!("{}{}", cell, " ".repeat(pad)),
                _ => format!("{}{}", " ".repeat(pad), cell),
            }
        })
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}
