use dart_lens::domain::insights::{
    DerivedRow, InsightMetric, Year, YearRecord, derive_rows, latest_valid, percent_of,
};
use insta::assert_json_snapshot;
use quickcheck_macros::quickcheck;

fn record(year: i64) -> YearRecord {
    YearRecord {
        year: Some(Year::Number(year)),
        ..YearRecord::default()
    }
}

#[test]
fn ratios_are_computed_from_raw_figures() {
    let row = DerivedRow::from_record(&YearRecord {
        revenue: Some(1000.0),
        op: Some(125.0),
        ni: Some(62.5),
        equity: Some(400.0),
        liab: Some(600.0),
        retained: Some(900.0),
        ..record(2024)
    });

    assert_eq!(row.year, "2024");
    assert_eq!(row.op_margin, Some(12.5));
    assert_eq!(row.ni_margin, Some(6.25));
    assert_eq!(row.debt_ratio, Some(150.0));
    assert_eq!(row.retained_ratio, Some(225.0));
}

#[test]
fn precomputed_ratios_win() {
    let row = DerivedRow::from_record(&YearRecord {
        revenue: Some(1000.0),
        op: Some(120.0),
        op_margin: Some(7.5),
        debt_ratio: Some(88.0),
        equity: Some(400.0),
        liab: Some(600.0),
        ..record(2023)
    });

    assert_eq!(row.op_margin, Some(7.5));
    assert_eq!(row.debt_ratio, Some(88.0));
}

#[test]
fn liabilities_alias_is_accepted() {
    let row = DerivedRow::from_record(&YearRecord {
        equity: Some(200.0),
        liabilities: Some(300.0),
        ..record(2022)
    });

    assert_eq!(row.debt_ratio, Some(150.0));
}

#[test]
fn zero_or_missing_denominators_yield_no_value() {
    let row = DerivedRow::from_record(&YearRecord {
        revenue: Some(0.0),
        op: Some(10.0),
        ni: Some(5.0),
        equity: Some(0.0),
        liab: Some(100.0),
        retained: None,
        ..record(2021)
    });

    assert_eq!(row.op_margin, None);
    assert_eq!(row.ni_margin, None);
    assert_eq!(row.debt_ratio, None);
    assert_eq!(row.retained_ratio, None);
    assert_eq!(percent_of(Some(1.0), None), None);
    assert_eq!(percent_of(None, Some(1.0)), None);
}

#[test]
fn string_years_are_kept_verbatim() {
    let record: YearRecord =
        serde_json::from_str(r#"{"year":"2024","revenue":1.5e12,"unknown":1}"#).expect("year record");
    assert_eq!(record.year_label(), "2024");
    assert_eq!(record.revenue, Some(1.5e12));
}

#[test]
fn numeric_strings_are_read_and_junk_becomes_missing() {
    let records: Vec<YearRecord> = serde_json::from_str(
        r#"[
            {"year":2023,"revenue":"1000","op":" 125 ","ni":"n/a","equity":true,"liab":null},
            {"year":2024,"revenue":2000,"op":500}
        ]"#,
    )
    .expect("one bad field does not sink the list");

    assert_eq!(records[0].revenue, Some(1000.0));
    assert_eq!(records[0].ni, None);
    assert_eq!(records[0].equity, None);

    let rows = derive_rows(&records);
    assert_eq!(rows[0].op_margin, Some(12.5));
    assert_eq!(rows[0].ni_margin, None);
    assert_eq!(rows[0].debt_ratio, None);
    assert_eq!(rows[1].op_margin, Some(25.0));
}

#[test]
fn latest_valid_skips_trailing_gaps() {
    assert_eq!(latest_valid(vec![Some(1.0), Some(2.0), None]), Some(2.0));
    assert_eq!(latest_valid(vec![None, None]), None);
    assert_eq!(latest_valid(Vec::<Option<f64>>::new()), None);

    let rows = derive_rows(&[
        YearRecord { revenue: Some(10.0), ..record(2022) },
        YearRecord { revenue: None, ..record(2023) },
    ]);
    assert_eq!(latest_valid(rows.iter().map(|r| r.value(InsightMetric::Revenue))), Some(10.0));
}

#[quickcheck]
fn percent_is_never_non_finite(numerator: f64, denominator: f64) -> bool {
    percent_of(Some(numerator), Some(denominator)).map_or(true, f64::is_finite)
}

#[quickcheck]
fn latest_valid_is_the_last_present_value(values: Vec<Option<i32>>) -> bool {
    let values: Vec<Option<f64>> = values.into_iter().map(|v| v.map(f64::from)).collect();
    let expected = values.iter().rev().find_map(|v| *v);
    latest_valid(values) == expected
}

#[test]
fn derived_rows_snapshot() {
    let rows = derive_rows(&[
        YearRecord {
            revenue: Some(1000.0),
            op: Some(125.0),
            ni: Some(62.5),
            equity: Some(400.0),
            liab: Some(1000.0),
            retained: Some(600.0),
            ..record(2023)
        },
        YearRecord {
            revenue: Some(2000.0),
            op: Some(500.0),
            ni: Some(-250.0),
            equity: Some(0.0),
            ..record(2024)
        },
    ]);

    assert_json_snapshot!(rows, @r###"
    [
      {
        "year": "2023",
        "revenue": 1000.0,
        "op_margin": 12.5,
        "ni_margin": 6.25,
        "debt_ratio": 250.0,
        "retained_ratio": 150.0
      },
      {
        "year": "2024",
        "revenue": 2000.0,
        "op_margin": 25.0,
        "ni_margin": -12.5,
        "debt_ratio": null,
        "retained_ratio": null
      }
    ]
    "###);
}
