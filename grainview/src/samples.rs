//! Sample records backing the table.
//!
//! The surrounding system (importer, database) is out of scope; a fixture
//! set stands in for the rendered sample list.

use chrono::NaiveDate;
use sandtable::{Column, TableModel};

#[derive(Debug, Clone)]
pub struct Sample {
    pub id: u32,
    pub name: String,
    pub location: String,
    pub date_added: NaiveDate,
    /// Median grain diameter in millimeters.
    pub d50: f64,
}

impl Sample {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        location: impl Into<String>,
        date_added: NaiveDate,
        d50: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            location: location.into(),
            date_added,
            d50,
        }
    }
}

/// Display form of a sample date, e.g. "Mar 14, 2025".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

pub fn fixtures() -> Vec<Sample> {
    vec![
        Sample::new(1, "North Beach A", "North Beach", date(2025, 3, 14), 0.31),
        Sample::new(2, "Harbor mouth", "Harbor", date(2025, 1, 9), 0.27),
        Sample::new(3, "Dune crest", "East Dunes", date(2025, 4, 2), 0.35),
        Sample::new(4, "Tide line B", "North Beach", date(2024, 11, 30), 0.29),
        Sample::new(5, "Breakwater fill", "Harbor", date(2025, 4, 2), 0.33),
    ]
}

/// Build the sample table the page renders before any sort happens.
pub fn samples_table(samples: &[Sample]) -> TableModel {
    let mut table = TableModel::new(vec![
        Column::new("ID", "id"),
        Column::new("Name", "name"),
        Column::new("Location", "location"),
        Column::new("Date added", "date"),
        Column::new("D50 (mm)", "d50"),
    ]);

    for sample in samples {
        table.push_row(vec![
            sample.id.to_string(),
            sample.name.clone(),
            sample.location.clone(),
            format_date(sample.date_added),
            format!("{:.2}", sample.d50),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date(2025, 3, 14)), "Mar 14, 2025");
        assert_eq!(format_date(date(2024, 11, 30)), "Nov 30, 2024");
    }

    #[test]
    fn test_samples_table_is_rectangular() {
        let table = samples_table(&fixtures());
        assert_eq!(table.column_count(), 5);
        assert_eq!(table.row_count(), 5);
        table.check_rectangular().unwrap();
    }
}
