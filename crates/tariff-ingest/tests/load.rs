//! Integration tests for loading tariff schedule directories.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tariff_ingest::{
    Delimiter, IngestError, LoadOptions, load_tariff_data, load_tariff_data_with_options,
    resolve_data_dir,
};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &[u8]) {
    fs::create_dir_all(dir).expect("create dir");
    fs::write(dir.join(name), contents).expect("write file");
}

const COMMA_2020: &str = "\
hts8,brief_description,mfn_ad_val_rate,mfn_ave,end_effective_date
1011000,Horses,0,,2020-12-31
1012100.0,Purebred breeding horses,Free,0.01,12/31/2020
";

const PIPE_2021: &str = "\
hts8|brief_description|mfn_ad_val_rate|quantity_1_code
0101.21.00|Purebred breeding horses|0.0|NO
0101.29.00|Other horses|0.045|NO
";

#[test]
fn loads_all_files_in_filename_order() {
    let root = TempDir::new().expect("temp dir");
    let data = root.path().join("data");
    write(&data, "tariff_database_2021.txt", PIPE_2021.as_bytes());
    write(&data, "tariff_database_2020.txt", COMMA_2020.as_bytes());
    write(&data, "notes.md", b"ignored");

    let table = load_tariff_data(&data, None).expect("load");

    assert_eq!(table.len(), 4);
    let codes: Vec<&str> = table.iter().map(|r| r.hts8.as_str()).collect();
    assert_eq!(codes, vec!["01011000", "01012100", "01012100", "01012900"]);

    let first = &table.records()[0];
    assert_eq!(first.source_file, "tariff_database_2020.txt");
    assert_eq!(first.source_year, Some(2020));
    assert_eq!(first.mfn_ad_val_rate, Some(0.0));
    assert_eq!(first.end_effective_date, NaiveDate::from_ymd_opt(2020, 12, 31));

    let second = &table.records()[1];
    assert_eq!(second.mfn_ad_val_rate, None);
    assert_eq!(second.mfn_ave, Some(0.01));
    assert_eq!(second.end_effective_date, NaiveDate::from_ymd_opt(2020, 12, 31));

    let last = &table.records()[3];
    assert_eq!(last.source_year, Some(2021));
    assert_eq!(last.mfn_ad_val_rate, Some(0.045));
    assert_eq!(last.mfn_ave, None);
    assert_eq!(last.end_effective_date, None);
    assert_eq!(last.extra.get("quantity_1_code").map(String::as_str), Some("NO"));

    assert_eq!(
        table.extra_columns(),
        &["brief_description".to_string(), "quantity_1_code".to_string()]
    );
}

#[test]
fn filename_without_year_leaves_source_year_missing() {
    let root = TempDir::new().expect("temp dir");
    let data = root.path().join("data");
    write(&data, "schedule.txt", COMMA_2020.as_bytes());
    write(&data, "schedule_2009.txt", COMMA_2020.as_bytes());

    let table = load_tariff_data(&data, None).expect("load");

    assert_eq!(table.len(), 4);
    assert!(table.iter().all(|r| r.source_year.is_none()));
}

#[test]
fn forced_delimiter_overrides_guess() {
    let root = TempDir::new().expect("temp dir");
    let data = root.path().join("data");
    // more commas than pipes in the header, but the file is pipe separated
    write(
        &data,
        "tariff_2022.txt",
        b"hts8|description, short, en\n01011000|Horses, asses, mules\n",
    );

    let options = LoadOptions::new().with_delimiter(Some(Delimiter::Pipe));
    let table = load_tariff_data_with_options(&data, &options).expect("load");

    assert_eq!(table.len(), 1);
    assert_eq!(
        table.records()[0]
            .extra
            .get("description, short, en")
            .map(String::as_str),
        Some("Horses, asses, mules")
    );
}

#[test]
fn latin1_file_is_decoded() {
    let root = TempDir::new().expect("temp dir");
    let data = root.path().join("data");
    write(
        &data,
        "tariff_2023.txt",
        b"hts8|brief_description|mfn_ad_val_rate\n09012100|Caf\xe9 torr\xe9|0\n",
    );

    let table = load_tariff_data(&data, None).expect("load");

    assert_eq!(
        table.records()[0].extra.get("brief_description").map(String::as_str),
        Some("Caf\u{e9} torr\u{e9}")
    );
}

#[test]
fn bom_prefixed_latin1_file_keeps_code_header() {
    let root = TempDir::new().expect("temp dir");
    let data = root.path().join("data");
    write(
        &data,
        "tariff_2021.txt",
        b"\xEF\xBB\xBFhts8,brief_description\n01011000,Caf\xe9\n",
    );

    let table = load_tariff_data(&data, None).expect("load");

    assert_eq!(table.len(), 1);
    let record = &table.records()[0];
    assert_eq!(record.hts8, "01011000");
    assert_eq!(
        record.extra.get("brief_description").map(String::as_str),
        Some("Caf\u{e9}")
    );
    assert_eq!(table.extra_columns(), &["brief_description".to_string()]);
}

#[test]
fn directory_without_txt_files_is_not_found() {
    let root = TempDir::new().expect("temp dir");
    let nested = root.path().join("a").join("b");
    write(&nested.join("data"), "readme.csv", b"hts8\n1\n");

    let err = load_tariff_data(nested.join("data"), None).unwrap_err();

    match err {
        IngestError::DirectoryNotFound { candidates } => {
            assert_eq!(
                candidates,
                vec![nested.join("data"), root.path().join("a").join("data")]
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn resolves_sibling_data_directory() {
    let root = TempDir::new().expect("temp dir");
    let project = root.path().join("project");
    write(&project.join("data"), "tariff_2021.txt", PIPE_2021.as_bytes());

    let resolved = resolve_data_dir(&project.join("missing")).expect("resolve");

    assert_eq!(resolved, project.join("data"));
}

#[test]
fn unparseable_file_aborts_entire_load() {
    let root = TempDir::new().expect("temp dir");
    let data = root.path().join("data");
    write(&data, "a_2020.txt", COMMA_2020.as_bytes());
    write(&data, "b_empty.txt", b"");

    let err = load_tariff_data(&data, None).unwrap_err();

    match err {
        IngestError::Parse { path, attempts } => {
            assert!(path.ends_with("b_empty.txt"));
            assert_eq!(attempts.len(), 4);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn file_without_code_column_fails() {
    let root = TempDir::new().expect("temp dir");
    let data = root.path().join("data");
    write(&data, "rates.txt", b"code,rate\n01011000,0\n");

    let err = load_tariff_data(&data, None).unwrap_err();

    assert!(matches!(err, IngestError::MissingColumn { ref column, .. } if column == "hts8"));
}

#[test]
fn oversized_file_is_rejected() {
    let root = TempDir::new().expect("temp dir");
    let data = root.path().join("data");
    write(&data, "tariff_2021.txt", PIPE_2021.as_bytes());

    let options = LoadOptions::new().with_max_file_size(8);
    let err = load_tariff_data_with_options(&data, &options).unwrap_err();

    assert!(matches!(err, IngestError::FileTooLarge { max_size: 8, .. }));
}

#[test]
fn missing_directory_message_lists_candidates() {
    let err = load_tariff_data("/nonexistent/tariffs/data", None).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"could not find data directory with txt files among: /nonexistent/tariffs/data, /nonexistent/data"
    );
}
