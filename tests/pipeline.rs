use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use glucoweek_lib::error::GlucoseError;
use glucoweek_lib::generate_report;
use glucoweek_lib::report::{ToolOutput, Typesetter};
use glucoweek_lib::segmentation::WeekSelection;
use glucoweek_lib::settings::ReportSettings;

const HEADER: &str = "\
Glukosewerte,Erstellt am,08-10-2023 09:00,Erstellt von,tester
Gerät,Seriennummer,Gerätezeitstempel,Aufzeichnungstyp,Glukosewert-Verlauf mmol/L,Glukose-Scan mmol/L
";

/// Typesetter that pretends to compile and touches the PDF.
struct FakeTypesetter;

impl Typesetter for FakeTypesetter {
    fn name(&self) -> &str {
        "fake"
    }

    fn document_path(&self, source: &Path) -> PathBuf {
        source.with_extension("pdf")
    }

    fn compile(&self, source: &Path) -> glucoweek_lib::error::Result<ToolOutput> {
        fs::write(self.document_path(source), b"%PDF-1.5").unwrap();
        Ok(ToolOutput {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 0,
        })
    }
}

struct FailingTypesetter;

impl Typesetter for FailingTypesetter {
    fn name(&self) -> &str {
        "failing"
    }

    fn document_path(&self, source: &Path) -> PathBuf {
        source.with_extension("pdf")
    }

    fn compile(&self, _source: &Path) -> glucoweek_lib::error::Result<ToolOutput> {
        Err(GlucoseError::ExternalTool {
            tool: "failing".into(),
            code: Some(1),
            output: "! LaTeX Error: File `pgfplots.sty' not found.".into(),
        })
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One reading every six hours on each day, plus a scan-only row per day
/// that must be dropped.
fn export_rows(days: impl IntoIterator<Item = NaiveDate>) -> String {
    let mut out = String::from(HEADER);
    for day in days {
        for hour in [0u32, 6, 12, 18] {
            let ts: NaiveDateTime = day.and_hms_opt(hour, 30, 0).unwrap();
            let value = 5 + hour / 3;
            out.push_str(&format!(
                "FreeStyle,ABC,{},0,\"{},{}\",\n",
                ts.format("%m-%d-%Y %H:%M"),
                value,
                hour % 10
            ));
        }
        let scan = day.and_hms_opt(9, 0, 0).unwrap();
        out.push_str(&format!(
            "FreeStyle,ABC,{},1,,\"6,2\"\n",
            scan.format("%m-%d-%Y %H:%M")
        ));
    }
    out
}

fn days(first: NaiveDate, count: i64) -> impl Iterator<Item = NaiveDate> {
    (0..count).map(move |offset| first + Duration::days(offset))
}

fn settings_for(dir: &Path, csv: &str) -> ReportSettings {
    let csv_path = dir.join("export.csv");
    fs::write(&csv_path, csv).unwrap();
    ReportSettings {
        csv_path,
        figures_dir: dir.join("figures"),
        report_name: dir.join("report"),
        display_name: "Erika Musterfrau".into(),
        selection: WeekSelection::All,
        ..ReportSettings::default()
    }
}

fn input_lines(source: &str) -> Vec<&str> {
    source
        .lines()
        .filter(|line| line.trim_start().starts_with("\\input{"))
        .collect()
}

#[test]
fn two_full_weeks_give_two_charts_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    // Monday 2023-07-24 through Sunday 2023-08-06.
    let settings = settings_for(dir.path(), &export_rows(days(date(2023, 7, 24), 14)));

    let summary = generate_report(&settings, date(2023, 8, 10), FakeTypesetter).unwrap();

    assert_eq!(summary.series_len, 14 * 4);
    assert_eq!(summary.weeks.len(), 2);
    assert_eq!(summary.artifacts.len(), 2);
    assert!(summary.artifacts.iter().all(|a| a.is_rendered()));

    let source = fs::read_to_string(&summary.report.source_path).unwrap();
    let inputs = input_lines(&source);
    assert_eq!(inputs.len(), 2);
    assert!(inputs[0].contains("Week1-24.07.2023-30.07.2023.pgf"));
    assert!(inputs[1].contains("Week2-31.07.2023-06.08.2023.pgf"));
    assert!(source.contains("\\ihead{Erika Musterfrau}"));
    assert_eq!(
        summary.report.document_path,
        Some(dir.path().join("report.pdf"))
    );
    assert!(dir.path().join("report.pdf").exists());
}

#[test]
fn empty_middle_week_is_segmented_but_not_rendered() {
    let dir = tempfile::tempdir().expect("tempdir");
    // Data on Wed 2023-07-26 .. Fri 2023-07-28 and Mon 2023-08-07 .. Tue 2023-08-08.
    let data: Vec<NaiveDate> = days(date(2023, 7, 26), 3)
        .chain(days(date(2023, 8, 7), 2))
        .collect();
    let settings = settings_for(dir.path(), &export_rows(data));

    let summary = generate_report(&settings, date(2023, 8, 10), FakeTypesetter).unwrap();

    assert_eq!(summary.weeks.len(), 3);
    assert_eq!(summary.weeks[0].first_day(), date(2023, 7, 24));
    let rendered: Vec<bool> = summary.artifacts.iter().map(|a| a.is_rendered()).collect();
    assert_eq!(rendered, vec![true, false, true]);

    let source = fs::read_to_string(&summary.report.source_path).unwrap();
    assert_eq!(input_lines(&source).len(), summary.weeks.len() - 1);
    assert!(!dir
        .path()
        .join("figures/Week2-31.07.2023-06.08.2023.pgf")
        .exists());
}

#[test]
fn missing_value_column_fails_before_segmentation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut settings = settings_for(dir.path(), &export_rows(days(date(2023, 7, 24), 3)));
    settings.value_column = "Glukosewert mg/dL".into();

    let err = generate_report(&settings, date(2023, 8, 10), FakeTypesetter).unwrap_err();

    match err {
        GlucoseError::Schema { column, .. } => assert_eq!(column, "Glukosewert mg/dL"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!dir.path().join("figures").exists());
    assert!(!dir.path().join("report.tex").exists());
}

#[test]
fn rerun_overwrites_the_same_artifacts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_for(dir.path(), &export_rows(days(date(2023, 7, 24), 7)));

    let first = generate_report(&settings, date(2023, 8, 10), FakeTypesetter).unwrap();
    let second = generate_report(&settings, date(2023, 8, 10), FakeTypesetter).unwrap();

    assert_eq!(first.artifacts, second.artifacts);
    assert_eq!(fs::read_dir(dir.path().join("figures")).unwrap().count(), 1);
}

#[test]
fn last_week_selection_renders_one_chart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut settings = settings_for(dir.path(), &export_rows(days(date(2023, 7, 24), 21)));
    settings.selection = WeekSelection::Last;

    let summary = generate_report(&settings, date(2023, 8, 10), FakeTypesetter).unwrap();

    assert_eq!(summary.weeks.len(), 3);
    assert_eq!(summary.artifacts.len(), 1);
    assert_eq!(summary.artifacts[0].week.index(), 3);
}

#[test]
fn typesetter_failure_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_for(dir.path(), &export_rows(days(date(2023, 7, 24), 7)));

    let err = generate_report(&settings, date(2023, 8, 10), FailingTypesetter).unwrap_err();

    assert!(matches!(err, GlucoseError::ExternalTool { code: Some(1), .. }));
    assert!(dir.path().join("report.tex").exists());
}

#[test]
fn no_compile_only_writes_source() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut settings = settings_for(dir.path(), &export_rows(days(date(2023, 7, 24), 7)));
    settings.compile = false;

    let summary = generate_report(&settings, date(2023, 8, 10), FailingTypesetter).unwrap();

    assert!(summary.report.source_path.exists());
    assert!(summary.report.document_path.is_none());
}

#[test]
fn export_without_measurements_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_for(dir.path(), HEADER);

    let err = generate_report(&settings, date(2023, 8, 10), FakeTypesetter).unwrap_err();
    assert!(matches!(err, GlucoseError::EmptySeries(_)));
}

#[test]
fn figures_dir_that_breaks_input_is_rejected_up_front() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut settings = settings_for(dir.path(), &export_rows(days(date(2023, 7, 24), 7)));
    settings.figures_dir = dir.path().join("my figures");

    let err = generate_report(&settings, date(2023, 8, 10), FakeTypesetter).unwrap_err();

    assert!(matches!(err, GlucoseError::InvalidConfig(_)));
    assert!(!settings.figures_dir.exists());
    assert!(!dir.path().join("report.tex").exists());
}

#[test]
fn oversized_segment_length_is_a_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut settings = settings_for(dir.path(), &export_rows(days(date(2023, 7, 24), 7)));
    settings.days_per_segment = u32::MAX;

    let err = generate_report(&settings, date(2023, 8, 10), FakeTypesetter).unwrap_err();
    assert!(matches!(err, GlucoseError::InvalidConfig(_)));
}
