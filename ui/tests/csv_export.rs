//! The CSV export parses back into the same table it was written from.

use ui::core::config::DashboardConfig;
use ui::core::table::{MetricTable, RiskBucket, CSV_HEADER};
use ui::dashboard::{export, Dashboard};

#[test]
fn export_round_trips_through_the_parser() {
    let table = MetricTable::sample();
    let csv = export::build_csv(table).unwrap();
    let parsed = MetricTable::from_csv(&csv).unwrap();
    assert_eq!(&parsed, table);
}

#[test]
fn export_header_and_column_order() {
    let csv = export::build_csv(MetricTable::sample()).unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADER.to_vec());

    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 22);
    let bihar = records.iter().find(|r| &r[0] == "Bihar").unwrap();
    assert_eq!(
        bihar.iter().collect::<Vec<_>>(),
        ["Bihar", "15.9", "0.02", "0.57", "0.95", "East", "At Risk"]
    );
}

#[test]
fn stored_labels_survive_export() {
    let table = MetricTable::sample();
    let parsed = MetricTable::from_csv(&export::build_csv(table).unwrap()).unwrap();
    for bucket in RiskBucket::ALL {
        assert_eq!(parsed.count_stored(bucket), table.count_stored(bucket));
    }
    assert_eq!(parsed.discrepancies().len(), 2);
}

#[test]
fn dashboard_exports_its_own_table() {
    let rows = MetricTable::sample().rows()[..3].to_vec();
    let table = MetricTable::new(rows).unwrap();
    let dash = Dashboard::new(table, DashboardConfig::default());
    let csv = dash.export_csv().unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.starts_with("State,IFI,CLCR,TAES,Composite,Region,Risk\nMeghalaya,"));
}
