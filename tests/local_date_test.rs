use anyhow::Result;
use chrono::{Days, NaiveDate, Utc};
use docstore_chrono::{ConverterConfig, DocStoreError, DocumentStore, Entity, IndexDefinition, Query, Session};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Foo {
    id: String,
    #[serde(with = "docstore_chrono::field")]
    local_date: NaiveDate,
}

impl Entity for Foo {
    const COLLECTION: &'static str = "foos";

    fn id(&self) -> &str {
        &self.id
    }
}

const INDEX_NAME: &str = "Foos/ByLocalDate";

fn foo(id: &str, local_date: NaiveDate) -> Foo {
    Foo {
        id: id.to_string(),
        local_date,
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn plus_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).expect("date in range")
}

fn minus_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).expect("date in range")
}

fn can_use_local_date_in_document(ld: NaiveDate, use_relaxed_converters: bool) -> Result<()> {
    let store = DocumentStore::new();

    if use_relaxed_converters {
        let mut session = store.open_session();
        session.store(&foo("foos/1", ld))?;

        // 尚未設定轉換器，以 legacy 結構寫入
        session.save_changes()?;
        assert!(store.get_raw("foos/1").unwrap()["local_date"].is_object());
    }

    store.configure_time_converters(&ConverterConfig::with_relaxed(use_relaxed_converters))?;

    {
        let mut session = store.open_session();
        if use_relaxed_converters {
            let loaded = session.load::<Foo>("foos/1")?.expect("foos/1 was stored");

            // legacy 結構仍可讀取
            assert_eq!(loaded.local_date, ld);

            session.store(&loaded)?;
        } else {
            session.store(&foo("foos/1", ld))?;
        }

        // 以 ISO 格式寫回
        session.save_changes()?;
    }

    {
        let session = store.open_session();
        let loaded = session.load::<Foo>("foos/1")?.expect("foos/1 was stored");
        assert_eq!(loaded.local_date, ld);
    }

    let json = store.get_raw("foos/1").expect("raw document");
    let expected = ld.format("%Y-%m-%d").to_string();
    assert_eq!(json["local_date"].as_str(), Some(expected.as_str()));
    Ok(())
}

#[test]
fn test_local_date_in_document_today() -> Result<()> {
    can_use_local_date_in_document(today(), false)?;
    can_use_local_date_in_document(today(), true)
}

#[test]
fn test_local_date_in_document_min() -> Result<()> {
    can_use_local_date_in_document(NaiveDate::MIN, false)?;
    can_use_local_date_in_document(NaiveDate::MIN, true)
}

#[test]
fn test_local_date_in_document_max() -> Result<()> {
    can_use_local_date_in_document(NaiveDate::MAX, false)?;
    can_use_local_date_in_document(NaiveDate::MAX, true)
}

fn store_three(store: &DocumentStore, dates: [NaiveDate; 3]) -> Result<()> {
    let mut session = store.open_session();
    for (n, date) in dates.into_iter().enumerate() {
        session.store(&foo(&format!("foos/{}", n + 1), date))?;
    }
    session.save_changes()?;
    Ok(())
}

fn new_store(with_index: bool) -> Result<DocumentStore> {
    let store = DocumentStore::new();
    store.configure_time_converters(&ConverterConfig::strict())?;
    if with_index {
        store.execute_index(IndexDefinition::for_entity::<Foo>(INDEX_NAME).field("local_date"))?;
    }
    Ok(store)
}

fn foo_query<'s>(session: &'s Session<'_>, with_index: bool) -> Result<Query<'s, Foo>> {
    if with_index {
        Ok(session.query_index::<Foo>(INDEX_NAME)?)
    } else {
        Ok(session.query::<Foo>())
    }
}

/// Stores ld, ld+1, ld+2 and queries upwards from ld.
fn query_upwards(ld: NaiveDate, with_index: bool) -> Result<()> {
    let store = new_store(with_index)?;
    store_three(&store, [ld, plus_days(ld, 1), plus_days(ld, 2)])?;

    let session = store.open_session();
    let query = || foo_query(&session, with_index);

    let results1 = query()?.where_eq("local_date", &ld)?.to_list()?;
    assert_eq!(results1.len(), 1);
    assert_eq!(results1[0].local_date, ld);

    let results2 = query()?
        .where_gt("local_date", &ld)?
        .order_by_descending("local_date")
        .to_list()?;
    assert_eq!(results2.len(), 2);
    assert!(results2[0].local_date > results2[1].local_date);

    let results3 = query()?
        .where_ge("local_date", &ld)?
        .order_by_descending("local_date")
        .to_list()?;
    assert_eq!(results3.len(), 3);
    assert!(results3[0].local_date > results3[1].local_date);
    assert!(results3[1].local_date > results3[2].local_date);
    Ok(())
}

/// Stores ld, ld-1, ld-2 and queries downwards from ld.
fn query_downwards(ld: NaiveDate, with_index: bool) -> Result<()> {
    let store = new_store(with_index)?;
    store_three(&store, [ld, minus_days(ld, 1), minus_days(ld, 2)])?;

    let session = store.open_session();
    let query = || foo_query(&session, with_index);

    let results1 = query()?.where_eq("local_date", &ld)?.to_list()?;
    assert_eq!(results1.len(), 1);

    let results2 = query()?
        .where_lt("local_date", &ld)?
        .order_by("local_date")
        .to_list()?;
    assert_eq!(results2.len(), 2);
    assert!(results2[0].local_date < results2[1].local_date);

    let results3 = query()?
        .where_le("local_date", &ld)?
        .order_by("local_date")
        .to_list()?;
    assert_eq!(results3.len(), 3);
    assert!(results3[0].local_date < results3[1].local_date);
    assert!(results3[1].local_date < results3[2].local_date);
    Ok(())
}

#[test]
fn test_local_date_in_dynamic_query_today() -> Result<()> {
    query_upwards(today(), false)
}

#[test]
fn test_local_date_in_dynamic_query_min() -> Result<()> {
    query_upwards(NaiveDate::MIN, false)
}

#[test]
fn test_local_date_in_dynamic_query_max() -> Result<()> {
    query_downwards(NaiveDate::MAX, false)
}

#[test]
fn test_local_date_in_static_index_today() -> Result<()> {
    query_upwards(today(), true)
}

#[test]
fn test_local_date_in_static_index_min() -> Result<()> {
    query_upwards(NaiveDate::MIN, true)
}

#[test]
fn test_local_date_in_static_index_max() -> Result<()> {
    query_downwards(NaiveDate::MAX, true)
}

#[test]
fn test_static_index_rejects_unmapped_field() -> Result<()> {
    let store = new_store(true)?;
    let session = store.open_session();

    let result = session.query_index::<Foo>(INDEX_NAME)?.where_eq("id", "foos/1");
    assert!(matches!(result, Err(DocStoreError::QueryError { .. })));
    Ok(())
}

#[test]
fn test_query_count_matches_list() -> Result<()> {
    let ld = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
    let store = new_store(false)?;
    store_three(&store, [ld, plus_days(ld, 1), plus_days(ld, 2)])?;

    let session = store.open_session();
    let query = session.query::<Foo>().where_gt("local_date", &ld)?;
    assert_eq!(query.count()?, 2);
    assert_eq!(query.to_list()?.len(), 2);
    Ok(())
}

#[test]
fn test_local_date_order_across_years() -> Result<()> {
    let dates = [
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(-5, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(-1, 12, 31).unwrap(),
        NaiveDate::from_ymd_opt(1999, 12, 31).unwrap(),
        NaiveDate::from_ymd_opt(1, 1, 1).unwrap(),
    ];
    let store = new_store(false)?;
    let mut session = store.open_session();
    for (n, date) in dates.into_iter().enumerate() {
        session.store(&foo(&format!("foos/{}", n + 1), date))?;
    }
    session.save_changes()?;

    let mut expected = dates.to_vec();
    expected.sort();

    let ascending = session.query::<Foo>().order_by("local_date").to_list()?;
    let ascending: Vec<NaiveDate> = ascending.iter().map(|item| item.local_date).collect();
    assert_eq!(ascending, expected);

    let cutoff = NaiveDate::from_ymd_opt(-1, 12, 31).unwrap();
    let later = session
        .query::<Foo>()
        .where_gt("local_date", &cutoff)?
        .order_by_descending("local_date")
        .to_list()?;
    let later: Vec<NaiveDate> = later.iter().map(|item| item.local_date).collect();
    let mut expected_later: Vec<NaiveDate> = dates.into_iter().filter(|date| *date > cutoff).collect();
    expected_later.sort_by(|a, b| b.cmp(a));
    assert_eq!(later, expected_later);

    let millennium = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    assert_eq!(session.query::<Foo>().where_lt("local_date", &millennium)?.count()?, 4);
    Ok(())
}
