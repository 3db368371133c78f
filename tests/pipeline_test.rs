use popmetrics::commands::aggregate::{parse_filters, run, AggregateConfig};
use popmetrics::io::output::OutputFormat;
use popmetrics::export::{downloadable_dataset, LabelResolver};
use popmetrics::{
    aggregated_series, load_config, total_count, DashboardStore, Error, FilterSelection,
    FilterValue, MetricKind, MetricRecord, ALL, TIME_PERIOD,
};
use pretty_assertions::assert_eq;
use std::io::Write as _;

fn release_record(gender: &str, age: &str, district: &str, period: &str, count: u64) -> MetricRecord {
    MetricRecord::new(count)
        .with_dimension("gender", gender)
        .with_dimension("ageGroup", age)
        .with_dimension("district", district)
        .with_dimension(TIME_PERIOD, period)
}

fn gender_fixture() -> Vec<MetricRecord> {
    vec![
        release_record(ALL, ALL, ALL, ALL, 100),
        release_record("MALE", ALL, ALL, ALL, 70),
        release_record("FEMALE", ALL, ALL, ALL, 30),
    ]
}

#[test]
fn wildcard_filter_produces_gender_breakdown() {
    let series = aggregated_series(
        &gender_fixture(),
        MetricKind::Releases,
        &FilterSelection::new(),
        ALL,
        "gender",
    )
    .unwrap();

    let values: Vec<(&str, u64, &str)> = series
        .iter()
        .map(|e| (e.value.as_str(), e.count, e.population_proportion.as_str()))
        .collect();
    assert_eq!(values, vec![("MALE", 70, "70"), ("FEMALE", 30, "30")]);
}

#[test]
fn explicit_filter_selects_exactly_those_values() {
    let selection = FilterSelection::new().with("gender", FilterValue::values(["MALE"]));
    let series = aggregated_series(
        &gender_fixture(),
        MetricKind::Releases,
        &selection,
        ALL,
        "gender",
    )
    .unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].value, "MALE");
    assert_eq!(series[0].population_proportion, "70");
}

#[test]
fn missing_baseline_row_surfaces_as_error() {
    let records = vec![
        release_record("MALE", ALL, ALL, ALL, 70),
        release_record("FEMALE", ALL, ALL, ALL, 30),
    ];
    let err = total_count(&records, MetricKind::Releases, ALL).unwrap_err();
    assert!(matches!(err, Error::MissingTotalRow { .. }));
    // the full pipeline propagates it too
    assert!(aggregated_series(
        &records,
        MetricKind::Releases,
        &FilterSelection::new(),
        ALL,
        "gender"
    )
    .is_err());
}

#[test]
fn time_period_selection_narrows_the_window() {
    let records = vec![
        release_record(ALL, ALL, ALL, "36", 200),
        release_record("MALE", ALL, ALL, "36", 140),
        release_record("FEMALE", ALL, ALL, "36", 60),
        release_record(ALL, ALL, ALL, "12", 50),
        release_record("MALE", ALL, ALL, "12", 35),
        release_record("FEMALE", ALL, ALL, "12", 15),
    ];
    let series = aggregated_series(
        &records,
        MetricKind::Releases,
        &FilterSelection::new(),
        "12",
        "gender",
    )
    .unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].count, 35);
    assert_eq!(series[0].population_proportion, "70");
}

#[test]
fn snapshot_metrics_ignore_time_period() {
    let records = vec![
        MetricRecord::new(100)
            .with_dimension("gender", ALL)
            .with_dimension("ageGroup", ALL)
            .with_dimension("facility", ALL)
            .with_dimension("legalStatus", ALL),
        MetricRecord::new(100)
            .with_dimension("gender", ALL)
            .with_dimension("ageGroup", ALL)
            .with_dimension("facility", "MSP")
            .with_dimension("legalStatus", ALL),
    ];
    // selected period is irrelevant for a metric with no time dimension
    let series = aggregated_series(
        &records,
        MetricKind::PopulationSnapshot,
        &FilterSelection::new(),
        "12",
        "facility",
    )
    .unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].value, "MSP");
    assert_eq!(series[0].population_proportion, "100");
}

#[test]
fn store_memoizes_and_invalidates_across_the_pipeline() {
    let mut store = DashboardStore::new(MetricKind::Releases, gender_fixture());
    let first = store.series("gender").unwrap();
    let cached = store.series("gender").unwrap();
    assert_eq!(first, cached);
    assert_eq!(store.cache_stats(), (1, 1));

    store.set_time_period("12");
    // no "12" baseline row in the fixture
    assert!(store.series("gender").is_err());
}

#[test]
fn export_dataset_mirrors_series_order_with_labels() {
    let series = aggregated_series(
        &gender_fixture(),
        MetricKind::Releases,
        &FilterSelection::new(),
        ALL,
        "gender",
    )
    .unwrap();
    let dataset = downloadable_dataset(&series, "gender", "Releases by gender", &LabelResolver::new());
    assert_eq!(dataset.labels, vec!["Male", "Female"]);
    assert_eq!(
        dataset.rows.iter().map(|r| r.count).collect::<Vec<_>>(),
        vec![70, 30]
    );
    assert_eq!(dataset.column_label, "Gender");
}

#[test]
fn tenant_config_loads_from_disk_and_relabels_exports() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(
        file,
        r#"
name = "Demo State"
code = "US_DM"

[[sections]]
metric = "releases"
enabled_dimensions = ["gender", "district"]

[labels.gender]
MALE = "Men"
FEMALE = "Women"
"#
    )
    .unwrap();

    let tenant = load_config(file.path()).unwrap();
    assert_eq!(tenant.code, "US_DM");

    let series = aggregated_series(
        &gender_fixture(),
        MetricKind::Releases,
        &FilterSelection::new(),
        ALL,
        "gender",
    )
    .unwrap();
    let dataset = downloadable_dataset(&series, "gender", "Releases", &tenant.label_resolver());
    assert_eq!(dataset.labels, vec!["Men", "Women"]);
}

#[test]
fn records_load_from_backend_shaped_json() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"[
            {{"gender": "ALL", "ageGroup": "ALL", "district": "ALL", "timePeriod": "ALL", "count": 100}},
            {{"gender": "MALE", "ageGroup": "ALL", "district": "ALL", "timePeriod": "ALL", "count": 70}},
            {{"gender": "FEMALE", "ageGroup": "ALL", "district": "ALL", "timePeriod": "ALL", "count": 30}}
        ]"#
    )
    .unwrap();

    let records = popmetrics::io::records::load_records(file.path()).unwrap();
    let series = aggregated_series(
        &records,
        MetricKind::Releases,
        &FilterSelection::new(),
        ALL,
        "gender",
    )
    .unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].population_proportion, "70");
}

const TWO_WINDOW_RECORDS: &str = r#"[
    {"gender": "ALL", "ageGroup": "ALL", "district": "ALL", "timePeriod": "ALL", "count": 150},
    {"gender": "MALE", "ageGroup": "ALL", "district": "ALL", "timePeriod": "ALL", "count": 105},
    {"gender": "FEMALE", "ageGroup": "ALL", "district": "ALL", "timePeriod": "ALL", "count": 45},
    {"gender": "ALL", "ageGroup": "ALL", "district": "ALL", "timePeriod": "12", "count": 50},
    {"gender": "MALE", "ageGroup": "ALL", "district": "ALL", "timePeriod": "12", "count": 35},
    {"gender": "FEMALE", "ageGroup": "ALL", "district": "ALL", "timePeriod": "12", "count": 15}
]"#;

fn aggregate_config(
    records: std::path::PathBuf,
    time_period: Option<String>,
    output: std::path::PathBuf,
    config: Option<std::path::PathBuf>,
    filters: Vec<String>,
) -> AggregateConfig {
    AggregateConfig {
        records,
        metric: MetricKind::Releases,
        accessor: "gender".to_string(),
        filters,
        time_period,
        format: OutputFormat::Csv,
        output: Some(output),
        config,
    }
}

#[test]
fn explicit_all_time_window_survives_tenant_default() {
    let dir = tempfile::tempdir().unwrap();
    let records_path = dir.path().join("releases.json");
    std::fs::write(&records_path, TWO_WINDOW_RECORDS).unwrap();
    let config_path = dir.path().join("us_dm.toml");
    std::fs::write(
        &config_path,
        r#"
name = "Demo State"
code = "US_DM"
default_time_period = "12"

[[sections]]
metric = "releases"
"#,
    )
    .unwrap();

    // explicitly requested all-time totals keep the wildcard window
    let all_time = dir.path().join("all_time.csv");
    run(aggregate_config(
        records_path.clone(),
        Some(ALL.to_string()),
        all_time.clone(),
        Some(config_path.clone()),
        Vec::new(),
    ))
    .unwrap();
    let csv = std::fs::read_to_string(&all_time).unwrap();
    assert!(csv.contains("MALE,140,70"), "got: {csv}");

    // an absent flag falls back to the tenant's 12-month window
    let windowed = dir.path().join("windowed.csv");
    run(aggregate_config(
        records_path,
        None,
        windowed.clone(),
        Some(config_path),
        Vec::new(),
    ))
    .unwrap();
    let csv = std::fs::read_to_string(&windowed).unwrap();
    assert!(csv.contains("MALE,35,70"), "got: {csv}");
}

#[test]
fn misspelled_filter_dimension_is_rejected_not_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let records_path = dir.path().join("releases.json");
    std::fs::write(&records_path, TWO_WINDOW_RECORDS).unwrap();

    let out = dir.path().join("series.csv");
    let err = run(aggregate_config(
        records_path,
        Some(ALL.to_string()),
        out,
        None,
        vec!["gendr=MALE".to_string()],
    ))
    .unwrap_err();
    assert!(err.to_string().contains("gendr"));
}

#[test]
fn cli_filter_args_drive_the_same_semantics() {
    let selection = parse_filters(&["gender=FEMALE".to_string()]).unwrap();
    let series = aggregated_series(
        &gender_fixture(),
        MetricKind::Releases,
        &selection,
        ALL,
        "gender",
    )
    .unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].value, "FEMALE");
    assert_eq!(series[0].population_proportion, "30");
}
