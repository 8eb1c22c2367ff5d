//! Tests for tariff-model table types.

use chrono::NaiveDate;
use tariff_model::{TariffRecord, TariffTable};

fn record(code: &str, file: &str, rate: Option<f64>) -> TariffRecord {
    let mut record = TariffRecord::new(code, file);
    record.mfn_ad_val_rate = rate;
    record
}

fn with_extra(mut record: TariffRecord, column: &str, value: &str) -> TariffRecord {
    record.extra.insert(column.to_string(), value.to_string());
    record
}

#[test]
fn concat_preserves_order_and_unions_columns() {
    let first = TariffTable::from_records(
        vec!["hts8".to_string(), "brief_description".to_string()],
        vec![
            with_extra(record("01011000", "a_2020.txt", Some(0.0)), "brief_description", "Horses"),
            record("01012000", "a_2020.txt", None),
        ],
    );
    let second = TariffTable::from_records(
        vec!["quantity_1_code".to_string(), "brief_description".to_string()],
        vec![with_extra(
            record("01011000", "b_2021.txt", Some(0.02)),
            "quantity_1_code",
            "NO",
        )],
    );

    let combined = TariffTable::concat([first, second]);

    assert_eq!(combined.len(), 3);
    assert_eq!(
        combined.extra_columns(),
        &["brief_description".to_string(), "quantity_1_code".to_string()]
    );
    let files: Vec<&str> = combined.iter().map(|r| r.source_file.as_str()).collect();
    assert_eq!(files, vec!["a_2020.txt", "a_2020.txt", "b_2021.txt"]);
    // no deduplication across files
    assert_eq!(
        combined.iter().filter(|r| r.hts8 == "01011000").count(),
        2
    );
    assert_eq!(combined.columns().len(), 8);
}

#[test]
fn select_returns_independent_copy() {
    let table = TariffTable::from_records(
        vec![],
        vec![
            record("01011000", "a.txt", Some(0.1)),
            record("02011000", "a.txt", Some(0.2)),
        ],
    );

    let mut selected = table.select(|r| r.hts8.starts_with("01"));
    assert_eq!(selected.len(), 1);

    let extra = TariffTable::from_records(vec![], vec![record("03011000", "b.txt", None)]);
    selected.append(extra);
    assert_eq!(selected.len(), 2);
    assert_eq!(table.len(), 2);
}

#[test]
fn source_summaries_group_by_file_in_load_order() {
    let mut late = record("01011000", "z_2022.txt", None);
    late.mfn_ave = Some(0.3);
    late.source_year = Some(2022);
    let table = TariffTable::from_records(
        vec![],
        vec![
            late,
            record("01011000", "a.txt", Some(0.1)),
            record("01012000", "a.txt", None),
            record("01013000", "a.txt", Some(0.3)),
        ],
    );

    let summaries = table.source_summaries();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].source_file, "z_2022.txt");
    assert_eq!(summaries[0].source_year, Some(2022));
    assert_eq!(summaries[0].rated_rows, 1);
    assert_eq!(summaries[1].source_file, "a.txt");
    assert_eq!(summaries[1].rows, 3);
    assert_eq!(summaries[1].rated_rows, 2);
    assert!((summaries[1].mean_rate.unwrap() - 0.2).abs() < 1e-12);
    assert_eq!(summaries[1].max_rate, Some(0.3));
}

#[test]
fn to_dataframe_has_typed_and_extra_columns() {
    let mut dated = record("01011000", "a_2021.txt", Some(0.1));
    dated.end_effective_date = NaiveDate::from_ymd_opt(2021, 12, 31);
    dated.source_year = Some(2021);
    let table = TariffTable::from_records(
        vec!["brief_description".to_string()],
        vec![
            with_extra(dated, "brief_description", "Horses"),
            record("01012000", "a_2021.txt", None),
        ],
    );

    let df = table.to_dataframe().expect("dataframe");

    assert_eq!(df.height(), 2);
    assert_eq!(df.width(), 7);
    let rates = df.column("mfn_ad_val_rate").expect("rate column");
    assert_eq!(rates.null_count(), 1);
    let descriptions = df.column("brief_description").expect("extra column");
    assert_eq!(descriptions.null_count(), 1);
}

#[test]
fn write_csv_emits_header_and_rows() {
    let table = TariffTable::from_records(
        vec![],
        vec![
            record("01011000", "a.txt", Some(0.1)),
            record("01012000", "a.txt", None),
        ],
    );
    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("combined.csv");

    table.write_csv(&path).expect("write csv");

    let contents = std::fs::read_to_string(&path).expect("read back");
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some("hts8,mfn_ad_val_rate,mfn_ave,end_effective_date,source_file,source_year")
    );
    assert_eq!(contents.lines().count(), 3);
    assert!(contents.contains("01011000"));
}

#[test]
fn records_serialize_to_json() {
    let table = TariffTable::from_records(vec![], vec![record("01011000", "a.txt", Some(0.1))]);

    let json = table.to_json().expect("json");
    let round: Vec<TariffRecord> = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(round, table.into_records());
}
