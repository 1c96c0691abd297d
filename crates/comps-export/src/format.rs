//! Display formatting and download filenames.

use chrono::NaiveDate;

/// en-US grouping: `1234567` becomes `1,234,567`.
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `95` becomes `95%`, `94.5` becomes `94.5%`.
pub fn percent(value: f64) -> String {
    format!("{value}%")
}

/// Export dates are calendar days (`YYYY-MM-DD`).
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn dataset_csv_filename(date: NaiveDate) -> String {
    format!("comparables_data_{}.csv", iso_date(date))
}

pub fn units_csv_filename(date: NaiveDate) -> String {
    format!("comparables_units_{}.csv", iso_date(date))
}

pub fn dataset_workbook_filename(date: NaiveDate) -> String {
    format!("comparables_data_{}.xlsx", iso_date(date))
}

pub fn comp_set_workbook_filename(comp_set_name: &str, date: NaiveDate) -> String {
    format!("CompSet_{}_{}.xlsx", file_stem(comp_set_name), iso_date(date))
}

pub fn comp_set_csv_filename(comp_set_name: &str, date: NaiveDate) -> String {
    format!("CompSet_{}_{}.csv", file_stem(comp_set_name), iso_date(date))
}

pub fn comp_set_units_csv_filename(comp_set_name: &str, date: NaiveDate) -> String {
    format!(
        "CompSet_{}_units_{}.csv",
        file_stem(comp_set_name),
        iso_date(date)
    )
}

/// Every character outside `[A-Za-z0-9]` in the comp set name becomes `_`.
fn file_stem(comp_set_name: &str) -> String {
    comp_set_name
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(245_000), "245,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn percent_keeps_fraction_only_when_present() {
        assert_eq!(percent(95.0), "95%");
        assert_eq!(percent(94.5), "94.5%");
    }

    #[test]
    fn filenames_carry_the_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(dataset_csv_filename(date), "comparables_data_2026-03-09.csv");
        assert_eq!(units_csv_filename(date), "comparables_units_2026-03-09.csv");
        assert_eq!(
            dataset_workbook_filename(date),
            "comparables_data_2026-03-09.xlsx"
        );
        assert_eq!(
            comp_set_workbook_filename("SA-Downtown Q1", date),
            "CompSet_SA_Downtown_Q1_2026-03-09.xlsx"
        );
    }

    #[test]
    fn comp_set_csv_names_never_collide_with_dataset_exports() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(
            comp_set_csv_filename("comparables data", date),
            "CompSet_comparables_data_2026-03-09.csv"
        );
        assert_eq!(
            comp_set_units_csv_filename("Q1", date),
            "CompSet_Q1_units_2026-03-09.csv"
        );
        assert_ne!(
            comp_set_csv_filename("data", date),
            dataset_csv_filename(date)
        );
    }
}
