mod helpers;

use std::sync::Arc;
use std::time::Duration;

use bankwire_core::{GetAccountBalanceRequest, Provider};
use helpers::{
    ACCESS_EXPIRES, REFRESH_EXPIRES, RecordingCache, StubApi, access_key, connector, refresh_key,
};

fn secs(n: i64) -> Duration {
    Duration::from_secs(u64::try_from(n).unwrap())
}

#[tokio::test]
async fn empty_cache_runs_one_exchange_and_caches_both_tokens() {
    let api = Arc::new(StubApi::default());
    let cache = Arc::new(RecordingCache::default());
    let gc = connector(&api, &cache);

    let token = gc.access_token().await.unwrap();

    assert_eq!(token, "access-1");
    assert_eq!(StubApi::calls(&api.new_token_calls), 1);
    assert_eq!(StubApi::calls(&api.refresh_calls), 0);

    let mut puts = cache.puts();
    puts.sort_by_key(|(k, _, _)| k.to_string());
    assert_eq!(
        puts,
        vec![
            (access_key(), "access-1".to_string(), secs(ACCESS_EXPIRES - 3600)),
            (refresh_key(), "refresh-1".to_string(), secs(REFRESH_EXPIRES - 3600)),
        ]
    );
}

#[tokio::test]
async fn cached_access_token_needs_no_network() {
    let api = Arc::new(StubApi::default());
    let cache = Arc::new(RecordingCache::seeded(&[(access_key(), "cached-access")]));
    let gc = connector(&api, &cache);

    assert_eq!(gc.access_token().await.unwrap(), "cached-access");
    assert_eq!(api.network_calls(), 0);
    assert!(cache.puts().is_empty());
}

#[tokio::test]
async fn expired_access_with_live_refresh_refreshes_once() {
    let api = Arc::new(StubApi::default());
    let cache = Arc::new(RecordingCache::seeded(&[(refresh_key(), "refresh-9")]));
    let gc = connector(&api, &cache);

    let token = gc.access_token().await.unwrap();

    assert_eq!(token, "access-from-refresh-9");
    assert_eq!(StubApi::calls(&api.refresh_calls), 1);
    assert_eq!(StubApi::calls(&api.new_token_calls), 0);
    // Only the access entry is rewritten.
    assert_eq!(
        cache.puts(),
        vec![(
            access_key(),
            "access-from-refresh-9".to_string(),
            secs(ACCESS_EXPIRES - 3600)
        )]
    );
}

#[tokio::test]
async fn rejected_refresh_token_falls_back_to_exchange() {
    let api = Arc::new(StubApi {
        refresh_status: Some(401),
        ..StubApi::default()
    });
    let cache = Arc::new(RecordingCache::seeded(&[(refresh_key(), "revoked")]));
    let gc = connector(&api, &cache);

    assert_eq!(gc.access_token().await.unwrap(), "access-1");
    assert_eq!(StubApi::calls(&api.refresh_calls), 1);
    assert_eq!(StubApi::calls(&api.new_token_calls), 1);
    assert!(cache.deletes().contains(&refresh_key()));
}

#[tokio::test]
async fn refresh_outage_is_not_masked_by_an_exchange() {
    let api = Arc::new(StubApi {
        refresh_status: Some(500),
        ..StubApi::default()
    });
    let cache = Arc::new(RecordingCache::seeded(&[(refresh_key(), "refresh-9")]));
    let gc = connector(&api, &cache);

    let err = gc.access_token().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(StubApi::calls(&api.new_token_calls), 0);
}

#[tokio::test]
async fn unauthorized_data_call_renews_session_and_retries_once() {
    let api = Arc::new(StubApi {
        rejected_tokens: vec!["stale".into()],
        ..StubApi::default()
    });
    let cache = Arc::new(RecordingCache::seeded(&[(access_key(), "stale")]));
    let gc = connector(&api, &cache);

    let balance = gc
        .get_account_balance(&GetAccountBalanceRequest {
            account_id: "acc-1".into(),
            access_token: None,
        })
        .await
        .unwrap();

    assert_eq!(balance, None);
    assert_eq!(StubApi::calls(&api.data_calls), 2);
    assert_eq!(StubApi::calls(&api.new_token_calls), 1);
    assert!(cache.deletes().contains(&access_key()));
}

#[tokio::test]
async fn second_unauthorized_response_surfaces() {
    let api = Arc::new(StubApi {
        rejected_tokens: vec!["stale".into(), "access-1".into()],
        ..StubApi::default()
    });
    let cache = Arc::new(RecordingCache::seeded(&[(access_key(), "stale")]));
    let gc = connector(&api, &cache);

    let err = gc
        .get_account_balance(&GetAccountBalanceRequest {
            account_id: "acc-1".into(),
            access_token: None,
        })
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(StubApi::calls(&api.data_calls), 2);
}
