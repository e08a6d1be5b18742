use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use vahti::Vahti;
use vahti_core::FreshnessReport;
use vahti_mock::{MockSink, MockStorage};

fn noon() -> DateTime<Utc> {
    "2024-05-02T12:00:00Z".parse().unwrap()
}

fn monitor_with(storage: MockStorage) -> (Vahti, Arc<MockSink>) {
    let sink = Arc::new(MockSink::new());
    let vahti = Vahti::builder()
        .with_storage(Arc::new(storage))
        .with_sink(sink.clone())
        .build()
        .unwrap();
    (vahti, sink)
}

#[tokio::test]
async fn recent_name_and_fresh_modification_stay_silent() {
    let storage = MockStorage::builder()
        .blob("2024-05-02T11-2_vp.csv.zst")
        .last_modified("2024-05-02T11-2_vp.csv.zst", noon() - Duration::hours(1))
        .build();
    let (vahti, sink) = monitor_with(storage);

    let report = vahti.current_day_freshness(noon()).await.unwrap();
    assert_eq!(
        report,
        FreshnessReport::Fresh {
            blob_name: "2024-05-02T11-2_vp.csv.zst".to_string()
        }
    );

    vahti.run_current_day(noon()).await;
    assert!(sink.messages().is_empty());
}

#[tokio::test]
async fn stale_modification_raises_the_critical_alert() {
    // Recent name, but nothing touched within the modification threshold.
    let storage = MockStorage::builder()
        .blob("2024-05-02T11-2_vp.csv.zst")
        .last_modified("2024-05-02T11-2_vp.csv.zst", noon() - Duration::hours(6))
        .build();
    let (vahti, sink) = monitor_with(storage);

    vahti.run_current_day(noon()).await;
    assert_eq!(
        sink.messages(),
        ["Critical alert: HFP sink might be down. Did not find any blob with lastModified \
          within 4 hours. Investigate and fix the problem as soon as possible."]
    );
}

#[tokio::test]
async fn old_names_with_fresh_modification_raise_the_name_alert() {
    // A blob from 18 hours ago (outside the 12-hour name window) that was
    // just rewritten: modification is fresh, naming is not.
    let storage = MockStorage::builder()
        .blob("2024-05-01T18-1_vp.csv.zst")
        .last_modified("2024-05-01T18-1_vp.csv.zst", noon() - Duration::hours(1))
        .build();
    let (vahti, sink) = monitor_with(storage);

    vahti.run_current_day(noon()).await;
    assert_eq!(
        sink.messages(),
        ["Did not find any blob with name within 12 hours. Investigate and fix the \
          problem as soon as possible."]
    );
}

#[tokio::test]
async fn empty_listing_counts_as_stale_modification() {
    let (vahti, sink) = monitor_with(MockStorage::builder().build());
    vahti.run_current_day(noon()).await;
    assert_eq!(
        sink.messages(),
        ["Critical alert: HFP sink might be down. Did not find any blob with lastModified \
          within 4 hours. Investigate and fix the problem as soon as possible."]
    );
}

#[tokio::test]
async fn property_lookups_stop_at_the_first_fresh_blob() {
    // Two unique hours; only the first has a recorded timestamp. If the
    // check did not stop early, the second lookup would fail the run.
    let storage = MockStorage::builder()
        .blob("2024-05-02T11-2_vp.csv.zst")
        .blob("2024-05-02T07-1_vp.csv.zst")
        .last_modified("2024-05-02T11-2_vp.csv.zst", noon() - Duration::hours(1))
        .build();
    let (vahti, sink) = monitor_with(storage);

    vahti.run_current_day(noon()).await;
    assert!(sink.messages().is_empty());
}

#[tokio::test]
async fn same_hour_segments_share_one_property_lookup() {
    // Four segments of hour 11; dedup by (day, hour) keeps the first name
    // only, and that one carries the timestamp.
    let mut builder = MockStorage::builder();
    for segment in 1..=4 {
        builder = builder.blob(&format!("2024-05-02T11-{segment}_vp.csv.zst"));
    }
    let storage = builder
        .last_modified("2024-05-02T11-1_vp.csv.zst", noon() - Duration::hours(1))
        .build();
    let (vahti, sink) = monitor_with(storage);

    vahti.run_current_day(noon()).await;
    assert!(sink.messages().is_empty());
}

#[tokio::test]
async fn property_failure_degrades_to_generic_alert() {
    let storage = MockStorage::builder()
        .blob("2024-05-02T11-2_vp.csv.zst")
        .fail_properties()
        .build();
    let (vahti, sink) = monitor_with(storage);

    vahti.run_current_day(noon()).await;
    assert_eq!(
        sink.messages(),
        ["Something bad happened. There seems to be an issue with monitoring HFP-data. \
          Investigate and fix the problem."]
    );
}
