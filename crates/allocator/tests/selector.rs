//! Selector behavior: eligibility, cap boundaries, staleness, and budget.

mod common;

use std::time::Duration;

use allocator::selector::Selector;
use allocator::AllocError;
use load_store::{LoadStore, MemoryLoadStore, UNKNOWN_CUSTOMER_COUNT};

use common::{agent, StubUpstream};

fn fast_selector() -> Selector {
    Selector::new(Duration::from_millis(200), Duration::from_millis(20))
}

async fn seed(load: &MemoryLoadStore, id: &str, online: bool, count: Option<i64>) {
    load.add_agent_id(id).await.unwrap();
    load.set_online(id, online).await.unwrap();
    if let Some(count) = count {
        load.set_customer_count(id, count).await.unwrap();
    }
}

#[tokio::test]
async fn picks_least_loaded_online_agent() {
    let upstream = StubUpstream::new();
    let load = MemoryLoadStore::new();
    seed(&load, "7", true, Some(1)).await;
    seed(&load, "8", true, Some(0)).await;

    let selected = fast_selector()
        .select(&upstream, &load, "R1", 3)
        .await
        .unwrap();

    assert_eq!(selected, "8");
}

#[tokio::test]
async fn offline_agents_are_skipped() {
    let upstream = StubUpstream::new();
    let load = MemoryLoadStore::new();
    seed(&load, "7", false, Some(0)).await;
    seed(&load, "8", true, Some(2)).await;

    let selected = fast_selector()
        .select(&upstream, &load, "R1", 3)
        .await
        .unwrap();

    assert_eq!(selected, "8");
}

#[tokio::test]
async fn agent_at_cap_is_not_eligible() {
    let upstream = StubUpstream::new();
    let load = MemoryLoadStore::new();
    seed(&load, "7", true, Some(3)).await;
    seed(&load, "8", true, Some(2)).await;

    let selected = fast_selector()
        .select(&upstream, &load, "R1", 3)
        .await
        .unwrap();

    // count == max excluded, count == max - 1 still eligible
    assert_eq!(selected, "8");
}

#[tokio::test]
async fn cap_of_zero_makes_nobody_eligible() {
    let upstream = StubUpstream::new();
    let load = MemoryLoadStore::new();
    seed(&load, "7", true, Some(0)).await;

    let result = fast_selector().select(&upstream, &load, "R1", 0).await;

    assert!(matches!(
        result,
        Err(AllocError::NoAgentAvailable { room_id }) if room_id == "R1"
    ));
}

#[tokio::test]
async fn tie_goes_to_last_scanned_eligible_agent() {
    let upstream = StubUpstream::new();
    let load = MemoryLoadStore::new();
    seed(&load, "7", true, Some(0)).await;
    seed(&load, "8", true, Some(0)).await;

    // The memory roster iterates sorted, so "8" is scanned after "7" and an
    // equal count replaces the earlier candidate.
    let selected = fast_selector()
        .select(&upstream, &load, "R1", 3)
        .await
        .unwrap();

    assert_eq!(selected, "8");
}

#[tokio::test]
async fn sentinel_counter_triggers_cold_refresh() {
    let upstream = StubUpstream::new();
    upstream.set_available("R1", vec![agent(5, true, Some(2))]);

    let load = MemoryLoadStore::new();
    seed(&load, "5", true, Some(UNKNOWN_CUSTOMER_COUNT)).await;

    let selected = fast_selector()
        .select(&upstream, &load, "R1", 3)
        .await
        .unwrap();

    assert_eq!(selected, "5");
    // The cold refresh repaired the cache with the authoritative count.
    assert_eq!(load.customer_count("5").await.unwrap(), Some(2));
}

#[tokio::test]
async fn missing_counter_key_triggers_cold_refresh() {
    let upstream = StubUpstream::new();
    upstream.set_available("R1", vec![agent(5, true, Some(1))]);

    let load = MemoryLoadStore::new();
    seed(&load, "5", true, None).await;

    let selected = fast_selector()
        .select(&upstream, &load, "R1", 3)
        .await
        .unwrap();

    assert_eq!(selected, "5");
    assert_eq!(load.customer_count("5").await.unwrap(), Some(1));
}

#[tokio::test]
async fn cold_refresh_returns_nothing_when_all_over_cap() {
    let upstream = StubUpstream::new();
    upstream.set_available("R1", vec![agent(5, true, Some(3))]);

    let load = MemoryLoadStore::new();
    seed(&load, "5", true, Some(UNKNOWN_CUSTOMER_COUNT)).await;

    let result = fast_selector().select(&upstream, &load, "R1", 3).await;

    assert!(matches!(result, Err(AllocError::NoAgentAvailable { .. })));
    // The refresh still repaired the counter.
    assert_eq!(load.customer_count("5").await.unwrap(), Some(3));
}

#[tokio::test]
async fn cold_refresh_failure_keeps_polling_until_budget() {
    let upstream = StubUpstream::new();
    upstream
        .fail_available
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let load = MemoryLoadStore::new();
    seed(&load, "5", true, Some(UNKNOWN_CUSTOMER_COUNT)).await;

    let result = fast_selector().select(&upstream, &load, "R1", 3).await;

    // An unreachable upstream downgrades to a retry, not a hard error.
    assert!(matches!(result, Err(AllocError::NoAgentAvailable { .. })));
}

#[tokio::test]
async fn times_out_within_budget_plus_one_interval() {
    let upstream = StubUpstream::new();
    let load = MemoryLoadStore::new();

    let selector = Selector::new(Duration::from_millis(100), Duration::from_millis(20));
    let start = std::time::Instant::now();
    let result = selector.select(&upstream, &load, "R1", 3).await;

    assert!(matches!(result, Err(AllocError::NoAgentAvailable { .. })));
    assert!(start.elapsed() < Duration::from_millis(100 + 20 + 80));
}

#[tokio::test]
async fn waits_for_capacity_freed_mid_poll() {
    let upstream = StubUpstream::new();
    let load = std::sync::Arc::new(MemoryLoadStore::new());
    seed(&load, "7", true, Some(3)).await;
    seed(&load, "8", true, Some(3)).await;

    // A resolution frees agent 8 while the selector is polling.
    let freed = load.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(60)).await;
        freed.decr_customer_count("8").await.unwrap();
    });

    let selector = Selector::new(Duration::from_millis(500), Duration::from_millis(20));
    let selected = selector.select(&upstream, &*load, "R1", 3).await.unwrap();

    assert_eq!(selected, "8");
}

#[tokio::test]
async fn never_selects_offline_or_over_cap() {
    let upstream = StubUpstream::new();
    let load = MemoryLoadStore::new();
    seed(&load, "1", false, Some(0)).await;
    seed(&load, "2", true, Some(5)).await;
    seed(&load, "3", true, Some(4)).await;
    seed(&load, "4", true, Some(2)).await;

    let selected = fast_selector()
        .select(&upstream, &load, "R1", 3)
        .await
        .unwrap();

    assert_eq!(selected, "4");
    assert!(load.is_online(&selected).await.unwrap().unwrap());
    assert!(load.customer_count(&selected).await.unwrap().unwrap() < 3);
}
