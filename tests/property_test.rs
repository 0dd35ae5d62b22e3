use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use docstore_chrono::core::duration::DurationConverter;
use docstore_chrono::core::local_date::LocalDateConverter;
use docstore_chrono::core::time_span::TimeSpan;
use docstore_chrono::{
    Converter, ConverterConfig, DocumentStore, Entity, Operand, Relaxed, TimeValue,
};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Sample {
    id: String,
    #[serde(with = "docstore_chrono::field")]
    length: TimeDelta,
    #[serde(with = "docstore_chrono::field")]
    day: NaiveDate,
    #[serde(with = "docstore_chrono::field")]
    at: DateTime<Utc>,
}

impl Entity for Sample {
    const COLLECTION: &'static str = "samples";

    fn id(&self) -> &str {
        &self.id
    }
}

fn epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(0, 0).expect("epoch is representable")
}

fn any_delta() -> impl Strategy<Value = TimeDelta> {
    any::<i64>().prop_map(|ticks| TimeSpan::from_ticks(ticks).to_time_delta().expect("ticks fit a delta"))
}

fn any_instant() -> impl Strategy<Value = DateTime<Utc>> {
    let (min, max) = (
        NaiveDate::MIN.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp(),
        NaiveDate::MAX.and_hms_opt(23, 59, 59).unwrap().and_utc().timestamp(),
    );
    (min..=max, 0u32..1_000_000_000)
        .prop_map(|(secs, nanos)| DateTime::from_timestamp(secs, nanos).expect("timestamp in range"))
}

fn store_pair(
    length: TimeDelta,
    other_length: TimeDelta,
    day: NaiveDate,
    other_day: NaiveDate,
    at: DateTime<Utc>,
    other_at: DateTime<Utc>,
) -> (DocumentStore, [Sample; 2]) {
    let samples = [
        Sample {
            id: "samples/1".to_string(),
            length,
            day,
            at,
        },
        Sample {
            id: "samples/2".to_string(),
            length: other_length,
            day: other_day,
            at: other_at,
        },
    ];
    let store = DocumentStore::new();
    store.configure_time_converters(&ConverterConfig::strict()).unwrap();
    let mut session = store.open_session();
    for sample in &samples {
        session.store(sample).unwrap();
    }
    session.save_changes().unwrap();
    (store, samples)
}

/// Range queries against the second value and ordering over both agree with
/// the native comparison.
fn check_order<V, F>(store: &DocumentStore, field: &str, values: &[V; 2], key: F)
where
    V: Operand + Ord + Copy + Debug,
    F: Fn(&Sample) -> V,
{
    let session = store.open_session();
    let pivot = values[1];

    let greater = session.query::<Sample>().where_gt(field, &pivot).unwrap().count().unwrap();
    let less = session.query::<Sample>().where_lt(field, &pivot).unwrap().count().unwrap();
    let equal = session.query::<Sample>().where_eq(field, &pivot).unwrap().count().unwrap();
    assert_eq!(greater, values.iter().filter(|v| **v > pivot).count());
    assert_eq!(less, values.iter().filter(|v| **v < pivot).count());
    assert_eq!(equal, values.iter().filter(|v| **v == pivot).count());

    let ordered: Vec<V> = session
        .query::<Sample>()
        .order_by(field)
        .to_list()
        .unwrap()
        .iter()
        .map(&key)
        .collect();
    let mut expected = values.to_vec();
    expected.sort();
    assert_eq!(ordered, expected);
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (NaiveDate::MIN.num_days_from_ce()..=NaiveDate::MAX.num_days_from_ce())
        .prop_map(|days| NaiveDate::from_num_days_from_ce_opt(days).expect("day in range"))
}

proptest! {
    #[test]
    fn duration_round_trips_through_time_span(ticks in any::<i64>()) {
        let delta = TimeSpan::from_ticks(ticks).to_time_delta().unwrap();
        let wire = DurationConverter.write(&delta).unwrap();

        prop_assert!(wire.is_string());
        prop_assert_eq!(DurationConverter.read(&wire).unwrap(), delta);
    }

    #[test]
    fn duration_legacy_needs_relaxed(ticks in any::<i64>()) {
        let delta = TimeSpan::from_ticks(ticks).to_time_delta().unwrap();
        let legacy = delta.to_legacy().unwrap();

        prop_assert!(DurationConverter.read(&legacy).is_err());
        prop_assert_eq!(Relaxed::new(DurationConverter).read(&legacy).unwrap(), delta);
    }

    #[test]
    fn date_round_trips_through_iso_text(date in any_date()) {
        let wire = LocalDateConverter.write(&date).unwrap();
        let expected = date.format("%Y-%m-%d").to_string();

        prop_assert_eq!(wire.as_str(), Some(expected.as_str()));
        prop_assert_eq!(LocalDateConverter.read(&wire).unwrap(), date);
    }

    #[test]
    fn date_legacy_needs_relaxed(date in any_date()) {
        let legacy = date.to_legacy().unwrap();

        prop_assert!(LocalDateConverter.read(&legacy).is_err());
        prop_assert_eq!(Relaxed::new(LocalDateConverter).read(&legacy).unwrap(), date);
    }

    #[test]
    fn duration_queries_follow_native_order(a in any_delta(), b in any_delta()) {
        let (store, stored) = store_pair(a, b, NaiveDate::MIN, NaiveDate::MIN, epoch(), epoch());
        check_order(&store, "length", &stored.map(|s| s.length), |s| s.length);
    }

    #[test]
    fn date_queries_follow_native_order(a in any_date(), b in any_date()) {
        let (store, stored) = store_pair(TimeDelta::zero(), TimeDelta::zero(), a, b, epoch(), epoch());
        check_order(&store, "day", &stored.map(|s| s.day), |s| s.day);
    }

    #[test]
    fn instant_queries_follow_native_order(a in any_instant(), b in any_instant()) {
        let zero = TimeDelta::zero();
        let (store, stored) = store_pair(zero, zero, NaiveDate::MIN, NaiveDate::MIN, a, b);
        check_order(&store, "at", &stored.map(|s| s.at), |s| s.at);
    }
}
