//! Listing and lookup through the query service.

use chrono::NaiveDate;
use loandesk_core::{
    borrower::BorrowerRecord,
    clock::DeskClock,
    config::DeskConfig,
    error::DeskError,
    query::{ListCriteria, SortOrder},
    service::QueryService,
};
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::Instant;

fn clock() -> DeskClock {
    DeskClock::fixed_on(NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date"))
}

fn build_service() -> QueryService {
    let _ = env_logger::builder().is_test(true).try_init();
    QueryService::from_config(&DeskConfig::default_test(), clock())
}

fn matches(record: &BorrowerRecord, search: &str) -> bool {
    let needle = search.to_lowercase();
    record.customer_name.to_lowercase().contains(&needle)
        || record.loan_id.to_lowercase().contains(&needle)
        || record.status.label().to_lowercase().contains(&needle)
}

/// Walk every page and return what came back, in order.
async fn collect_pages(service: &QueryService, criteria: ListCriteria) -> Vec<BorrowerRecord> {
    let first = service.list(&criteria).await;
    let mut all = first.data;
    for page in 2..=first.total_pages as u32 {
        let next = service.list(&criteria.clone().page(page)).await;
        assert_eq!(next.total, first.total, "total changed between pages");
        all.extend(next.data);
    }
    all
}

#[tokio::test]
async fn search_returns_exactly_the_matching_records() {
    let service = build_service();

    for search in ["an", "LOAN-001", "paid", "PROGRESS", "martinez", "zzz"] {
        let criteria = ListCriteria::default().limit(4).search(search);
        let returned = collect_pages(&service, criteria.clone()).await;

        assert!(
            returned.iter().all(|r| matches(r, search)),
            "non-matching record returned for {search:?}"
        );

        let expected: HashSet<u64> = service
            .store()
            .records()
            .iter()
            .filter(|r| matches(r, search))
            .map(|r| r.id)
            .collect();
        let got: HashSet<u64> = returned.iter().map(|r| r.id).collect();
        assert_eq!(got, expected, "search {search:?}");

        let total = service.list(&criteria).await.total;
        assert_eq!(total, expected.len(), "total for {search:?}");
    }
}

#[tokio::test]
async fn paging_covers_the_book_once() {
    let service = build_service();
    let everyone: HashSet<u64> = service.store().records().iter().map(|r| r.id).collect();

    for limit in [5, 7, 30, 100] {
        let pages = collect_pages(&service, ListCriteria::default().limit(limit)).await;
        let ids: Vec<u64> = pages.iter().map(|r| r.id).collect();
        let unique: HashSet<u64> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len(), "duplicates at limit {limit}");
        assert_eq!(unique, everyone, "omissions at limit {limit}");
    }

    let first = service.list(&ListCriteria::default().limit(5)).await;
    assert_eq!(first.total, 30);
    assert_eq!(first.total_pages, 6);
}

#[tokio::test]
async fn sorted_listing_is_ordered_across_pages() {
    let service = build_service();
    let criteria = ListCriteria::default().limit(8).sort("dueDate", SortOrder::Desc);
    let records = collect_pages(&service, criteria).await;

    for pair in records.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.due_date > b.due_date || (a.due_date == b.due_date && a.id < b.id),
            "{} ({}) before {} ({})",
            a.id,
            a.due_date,
            b.id,
            b.due_date
        );
    }
}

#[tokio::test]
async fn listing_never_mutates_the_store() {
    let service = build_service();
    let before = service.store().records().to_vec();
    service
        .list(&ListCriteria::default().sort("customerName", SortOrder::Desc).search("a"))
        .await;
    assert_eq!(service.store().records(), before.as_slice());
}

#[tokio::test]
async fn get_by_id_matches_exactly() {
    let service = build_service();
    for id in 1..=30 {
        let record = service.get_by_id(id).await.expect("present id");
        assert_eq!(record.id, id);
    }
}

#[tokio::test]
async fn get_by_id_outside_the_book_is_not_found() {
    let service = build_service();
    for id in [0, 31, 10_000] {
        let err = service.get_by_id(id).await.unwrap_err();
        assert!(matches!(err, DeskError::NotFound { .. }), "id {id}: {err}");
    }
}

#[tokio::test]
async fn raw_ids_are_resolved_before_lookup() {
    let service = build_service();
    assert_eq!(service.get_by_raw_id(" 4 ").await.expect("resolves").id, 4);

    let err = service.get_by_raw_id("abc").await.unwrap_err();
    assert!(matches!(err, DeskError::NotFound { ref id } if id == "abc"));
}

#[tokio::test(start_paused = true)]
async fn queries_wait_out_their_latency() {
    let service = QueryService::from_config(&DeskConfig::default(), clock());

    let started = Instant::now();
    service.list(&ListCriteria::default()).await;
    assert!(started.elapsed() >= Duration::from_millis(500));

    let started = Instant::now();
    service.get_by_id(1).await.expect("present id");
    assert!(started.elapsed() >= Duration::from_millis(300));

    let started = Instant::now();
    let _ = service.get_by_id(99).await;
    assert!(started.elapsed() >= Duration::from_millis(300));

    let started = Instant::now();
    service.analytics().await;
    assert!(started.elapsed() >= Duration::from_millis(400));
}

#[tokio::test(start_paused = true)]
async fn concurrent_queries_see_the_same_book() {
    let service = QueryService::from_config(&DeskConfig::default(), clock());
    let criteria = ListCriteria::default().sort("amountDue", SortOrder::Asc);

    let (a, b, c) = tokio::join!(
        service.list(&criteria),
        service.list(&criteria),
        service.get_by_id(3),
    );
    assert_eq!(a, b);
    assert_eq!(c.expect("present id").id, 3);
}
