//! Roster reconciliation behavior.

mod common;

use allocator::refresher::refresh_agent_status;
use load_store::{LoadStore, MemoryLoadStore, UNKNOWN_CUSTOMER_COUNT};

use common::{agent, StubUpstream};

#[tokio::test]
async fn seeds_roster_presence_and_sentinel() {
    let upstream = StubUpstream::with_roster(vec![
        agent(7, true, Some(1)),
        agent(8, false, Some(0)),
    ]);
    let load = MemoryLoadStore::new();

    refresh_agent_status(&upstream, &load).await.unwrap();

    let ids = load.agent_ids().await.unwrap();
    assert_eq!(ids, vec!["7".to_string(), "8".to_string()]);
    assert_eq!(load.is_online("7").await.unwrap(), Some(true));
    assert_eq!(load.is_online("8").await.unwrap(), Some(false));
    // Counters start unknown; the roster's reported counts are not trusted.
    assert_eq!(
        load.customer_count("7").await.unwrap(),
        Some(UNKNOWN_CUSTOMER_COUNT)
    );
    assert_eq!(
        load.customer_count("8").await.unwrap(),
        Some(UNKNOWN_CUSTOMER_COUNT)
    );
}

#[tokio::test]
async fn known_counter_is_left_alone() {
    let upstream = StubUpstream::with_roster(vec![agent(7, true, None)]);
    let load = MemoryLoadStore::new();
    load.set_customer_count("7", 2).await.unwrap();

    refresh_agent_status(&upstream, &load).await.unwrap();

    assert_eq!(load.customer_count("7").await.unwrap(), Some(2));
}

#[tokio::test]
async fn sentinel_counter_is_not_reseeded() {
    // The key exists (holding the sentinel), so reseeding must not touch it.
    let upstream = StubUpstream::with_roster(vec![agent(7, true, None)]);
    let load = MemoryLoadStore::new();
    load.set_customer_count("7", UNKNOWN_CUSTOMER_COUNT)
        .await
        .unwrap();

    refresh_agent_status(&upstream, &load).await.unwrap();

    assert_eq!(
        load.customer_count("7").await.unwrap(),
        Some(UNKNOWN_CUSTOMER_COUNT)
    );
}

#[tokio::test]
async fn stragglers_lose_presence_but_keep_counters() {
    let upstream = StubUpstream::with_roster(vec![agent(7, true, None)]);
    let load = MemoryLoadStore::new();

    // Agent 9 was cached on a previous tick but left the roster since.
    load.add_agent_id("9").await.unwrap();
    load.set_online("9", true).await.unwrap();
    load.set_customer_count("9", 2).await.unwrap();

    refresh_agent_status(&upstream, &load).await.unwrap();

    let ids = load.agent_ids().await.unwrap();
    assert_eq!(ids, vec!["7".to_string()]);
    assert_eq!(load.is_online("9").await.unwrap(), None);
    // The counter self-heals via reseeding if the agent reappears.
    assert_eq!(load.customer_count("9").await.unwrap(), Some(2));
}

#[tokio::test]
async fn reappearing_agent_is_reseeded_only_if_counter_missing() {
    let upstream = StubUpstream::with_roster(vec![agent(9, true, None)]);
    let load = MemoryLoadStore::new();
    load.set_customer_count("9", 2).await.unwrap();

    refresh_agent_status(&upstream, &load).await.unwrap();

    assert!(load.agent_ids().await.unwrap().contains(&"9".to_string()));
    assert_eq!(load.customer_count("9").await.unwrap(), Some(2));
}

#[tokio::test]
async fn roster_fetch_failure_surfaces() {
    let upstream = StubUpstream::new();
    upstream
        .fail_roster
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let load = MemoryLoadStore::new();

    let result = refresh_agent_status(&upstream, &load).await;
    assert!(result.is_err());
}
