//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the numerical code stays clean and testable
//! - output changes are localized

use crate::domain::Catalog;

use super::{CatalogStats, DensityTable, ErrorBudget, catalog_stats};

/// Event count, ranges and median relative error.
pub fn format_catalog_summary(catalog: &Catalog, title: &str) -> String {
    let CatalogStats {
        events,
        redshift_range,
        distance_range,
        median_relative_error,
    } = catalog_stats(catalog);

    let mut out = String::new();
    out.push_str(&format!("=== gwc - {title} ===\n"));
    out.push_str(&format!("Events: {events}\n"));
    match redshift_range {
        Some((lo, hi)) => out.push_str(&format!("Redshift: [{lo:.4}, {hi:.4}]\n")),
        None => out.push_str("Redshift: n/a\n"),
    }
    match distance_range {
        Some((lo, hi)) => out.push_str(&format!("Distance: [{lo:.4}, {hi:.4}] Gpc\n")),
        None => out.push_str("Distance: n/a\n"),
    }
    match median_relative_error {
        Some(r) => out.push_str(&format!("Median σ/dL: {:.2}%\n", 100.0 * r)),
        None => out.push_str("Median σ/dL: n/a\n"),
    }
    out
}

/// Density samples with their normalisation.
pub fn format_density_table(table: &DensityTable, every: usize) -> String {
    let variable = match table.source {
        crate::domain::Source::Ligo => "dL [Gpc]",
        _ => "z",
    };
    let mut out = String::new();
    out.push_str(&format!("Distribution for {}\n", table.source));
    out.push_str(&format!("Area under the distribution curve = {:.6}\n", table.area));
    if let Some((total, years)) = table.reference {
        out.push_str(&format!("Expected events over {years} years = {total:.3}\n"));
    }
    out.push('\n');
    out.push_str(&format!("{variable:>10} {:>14}\n", "density"));
    out.push_str(&format!("{:-<10} {:-<14}\n", "", ""));
    for &(x, p) in table.points.iter().step_by(every.max(1)) {
        out.push_str(&format!("{x:>10.4} {p:>14.6e}\n"));
    }
    out
}

/// One row per redshift, one column per error term, then the total.
pub fn format_error_table(rows: &[ErrorBudget]) -> String {
    let names: Vec<&str> = rows
        .first()
        .map(|r| r.terms.iter().map(|t| t.0).collect())
        .unwrap_or_default();

    let mut out = String::new();
    let mut header = format!("{:>8} {:>12}", "z", "dL [Gpc]");
    let mut rule = format!("{:-<8} {:-<12}", "", "");
    for name in names.iter().chain(std::iter::once(&"total")) {
        header.push_str(&format!(" {name:>12}"));
        rule.push_str(&format!(" {:-<12}", ""));
    }
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(rule.trim_end());
    out.push('\n');

    for r in rows {
        let mut line = format!("{:>8.3} {:>12.5}", r.redshift, r.distance);
        for &(_, v) in &r.terms {
            line.push_str(&format!(" {v:>12.5e}"));
        }
        line.push_str(&format!(" {:>12.5e}", r.total));
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Source;

    #[test]
    fn summary_lists_ranges() {
        let c = Catalog::from_columns(&[0.1, 0.5], &[0.5, 3.0], &[0.05, 0.3]).unwrap();
        let txt = format_catalog_summary(&c, "BNS (ET)");
        assert_eq!(
            txt,
            concat!(
                "=== gwc - BNS (ET) ===\n",
                "Events: 2\n",
                "Redshift: [0.1000, 0.5000]\n",
                "Distance: [0.5000, 3.0000] Gpc\n",
                "Median σ/dL: 10.00%\n",
            )
        );
    }

    #[test]
    fn empty_summary_has_no_ranges() {
        let txt = format_catalog_summary(&Catalog::default(), "SNIa");
        assert!(txt.contains("Events: 0"));
        assert!(txt.contains("Redshift: n/a"));
    }

    #[test]
    fn error_table_columns_follow_terms() {
        let rows = vec![ErrorBudget {
            redshift: 0.5,
            distance: 2.9,
            terms: vec![("distance", 0.1), ("redshift", 0.02)],
            total: 0.102,
        }];
        let txt = format_error_table(&rows);
        let header = txt.lines().next().unwrap();
        assert!(header.contains("distance") && header.contains("redshift") && header.ends_with("total"));
        assert_eq!(txt.lines().count(), 3);
    }

    #[test]
    fn density_table_reports_reference_count() {
        let table = DensityTable {
            source: Source::Snia,
            points: vec![(0.1, 0.5), (0.2, 0.5)],
            area: 0.05,
            reference: Some((8800.0, 2.0)),
        };
        let txt = format_density_table(&table, 1);
        assert!(txt.contains("Expected events over 2 years = 8800.000"));
        assert!(txt.contains("Area under the distribution curve = 0.050000"));
    }
}
