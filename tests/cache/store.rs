use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use mojang_rs::{Cache, CacheEntry, MemoryCache, MojangError, PastName, Profile, Properties, Store};

use crate::common::{self, DUSH_ID, FORFAL_ID, NERG_ID, NERG_NAME};

/// Records every call before delegating to a [`MemoryCache`].
#[derive(Default)]
struct LoggingCache {
    inner: MemoryCache,
    log: Mutex<Vec<String>>,
}

impl LoggingCache {
    fn record(&self, call: String) {
        self.log.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn writes(&self) -> usize {
        self.calls().iter().filter(|c| c.starts_with("cache(")).count()
    }
}

#[async_trait]
impl Cache for LoggingCache {
    async fn cache_name_at_time(&self, name: &str, at: DateTime<Utc>, id: &str) {
        self.record(format!("cache_name_at_time({name}, {}, {id})", at.timestamp()));
        self.inner.cache_name_at_time(name, at, id).await;
    }

    async fn cache(&self, entry: CacheEntry) {
        self.record(format!("cache({})", entry.id));
        self.inner.cache(entry).await;
    }

    async fn get_name(&self, name: &str) -> Option<CacheEntry> {
        self.record(format!("get_name({name})"));
        self.inner.get_name(name).await
    }

    async fn get_name_at_time(&self, name: &str, at: DateTime<Utc>) -> Option<CacheEntry> {
        self.record(format!("get_name_at_time({name}, {})", at.timestamp()));
        self.inner.get_name_at_time(name, at).await
    }

    async fn get_id(&self, id: &str) -> Option<CacheEntry> {
        self.record(format!("get_id({id})"));
        self.inner.get_id(id).await
    }
}

fn store_for(server: &httpmock::MockServer) -> Store<Arc<LoggingCache>> {
    Store::new(common::client_for(server), Arc::new(LoggingCache::default()))
}

const NERG_BODY: &str = r#"{"id":"087cc153c3434ff7ac497de1569affa1","name":"Nergalic"}"#;

#[tokio::test]
async fn load_writes_through_then_serves_from_cache() {
    let server = common::setup_server();
    let mock = common::mock_name(&server, NERG_NAME, NERG_BODY);
    let store = store_for(&server);

    let first = store.load(NERG_NAME).await.unwrap();
    let second = store.load("nergalic").await.unwrap();

    mock.assert_calls(1);
    assert_eq!(first, second);
    assert_eq!(
        store.cache().calls(),
        [
            "get_name(Nergalic)",
            "cache(087cc153c3434ff7ac497de1569affa1)",
            "get_name(nergalic)",
        ]
    );
}

#[tokio::test]
async fn empty_inputs_touch_neither_cache_nor_network() {
    let server = common::setup_server();
    let any = common::mock_any(&server);
    let store = store_for(&server);
    let at = Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap();

    for r in [
        store.load("").await,
        store.load_at_time("", at).await,
        store.load_by_id("").await,
        store.load_with_name_history("").await,
        store.load_with_properties("").await,
    ] {
        assert!(matches!(r, Err(MojangError::NoSuchProfile)), "got {r:?}");
    }
    any.assert_calls(0);
    assert!(store.cache().calls().is_empty());
}

#[tokio::test]
async fn failed_loads_cache_nothing() {
    let server = common::setup_server();
    let _mock = common::mock_status(&server, "/api/users/profiles/minecraft/Nobody", 204, "");
    let store = store_for(&server);

    let err = store.load("Nobody").await.unwrap_err();
    assert!(matches!(err, MojangError::NoSuchProfile), "got {err:?}");
    assert_eq!(store.cache().writes(), 0);
    assert!(store.cache().inner.is_empty().await);
}

#[tokio::test]
async fn load_at_time_remembers_the_mapping() {
    let server = common::setup_server();
    let at = Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap();
    let mock = common::mock_name_at(&server, "GeneralSnow", at.timestamp(), NERG_BODY);
    let store = store_for(&server);

    let first = store.load_at_time("GeneralSnow", at).await.unwrap();
    let second = store.load_at_time("GENERALSNOW", at).await.unwrap();
    mock.assert_calls(1);
    assert_eq!(first, second);
    assert_eq!(second.name(), NERG_NAME);

    // The profile is also known under its current name now.
    let any = common::mock_any(&server);
    store.load(NERG_NAME).await.unwrap();
    any.assert_calls(0);
}

#[tokio::test]
async fn history_load_needs_cached_history() {
    let server = common::setup_server();
    let names = common::mock_names(&server, NERG_ID);
    let by_name = common::mock_name(&server, NERG_NAME, NERG_BODY);
    let store = store_for(&server);

    // Seeds an entry without history.
    store.load(NERG_NAME).await.unwrap();

    let p = store.load_with_name_history(NERG_ID).await.unwrap();
    assert_eq!(p.name_history().map(<[_]>::len), Some(2));
    let again = store.load_with_name_history(NERG_ID).await.unwrap();
    assert_eq!(again, p);

    by_name.assert_calls(1);
    names.assert_calls(1);
}

#[tokio::test]
async fn insufficient_hit_is_overwritten_by_fresh_load() {
    let server = common::setup_server();
    let session = common::mock_session(&server, NERG_ID, NERG_ID);
    let store = store_for(&server);

    let hist = vec![PastName::new("Snow", None)];
    store
        .cache()
        .cache(CacheEntry::from(
            &Profile::new(NERG_ID, NERG_NAME).with_name_history(hist),
        ))
        .await;

    let p = store.load_with_properties(NERG_ID).await.unwrap();
    session.assert();
    assert!(p.properties().is_some());

    // The properties load carried no history, and the entry was replaced whole.
    let cached = store.cache().inner.get_id(NERG_ID).await.unwrap();
    assert!(cached.name_history.is_none());
    assert!(cached.properties.is_some());
}

#[tokio::test]
async fn any_entry_satisfies_load_by_id() {
    let server = common::setup_server();
    let any = common::mock_any(&server);
    let store = store_for(&server);
    store
        .cache()
        .cache(CacheEntry::from(&Profile::new(NERG_ID, NERG_NAME)))
        .await;

    let p = store.load_by_id(NERG_ID).await.unwrap();
    any.assert_calls(0);
    assert_eq!(p.name(), NERG_NAME);
    assert!(p.name_history().is_none());
}

#[tokio::test]
async fn store_backs_lazy_loads() {
    let server = common::setup_server();
    let session = common::mock_session(&server, NERG_ID, NERG_ID);
    let store = store_for(&server);

    let mut a = Profile::new(NERG_ID, NERG_NAME);
    let mut b = Profile::new(NERG_ID, NERG_NAME);
    let pa = a.load_properties(&store, false).await.unwrap();
    let pb = b.load_properties(&store, false).await.unwrap();

    // `b` is served by the cache `a` filled.
    session.assert_calls(1);
    assert_eq!(pa, pb);
    assert_eq!(
        pa,
        Properties {
            skin_url: Some(
                "http://textures.minecraft.net/texture/5b40f251f7c8db60943495db6bf54353102d6cad20d2299d5f973f36b4f3677e"
                    .into()
            ),
            cape_url: None,
            model: mojang_rs::Model::Steve,
        }
    );
}

#[tokio::test]
async fn forced_properties_refresh_bypasses_cache_and_writes_through() {
    let server = common::setup_server();
    let session = common::mock_session(&server, NERG_ID, NERG_ID);
    let store = store_for(&server);

    let stale = Profile::new(NERG_ID, "GeneralSnow").with_properties(Properties::default());
    store.cache().cache(CacheEntry::from(&stale)).await;

    let mut p = stale.clone();
    p.load_properties(&store, false).await.unwrap();
    session.assert_calls(0);

    let props = p.load_properties(&store, true).await.unwrap();
    session.assert_calls(1);
    assert!(props.skin_url.is_some());
    assert_eq!(p.name(), NERG_NAME);

    let cached = store.cache().inner.get_id(NERG_ID).await.unwrap();
    assert_eq!(cached.name, NERG_NAME);
    assert_eq!(cached.properties.as_ref(), Some(&props));

    // A second forced refresh goes to the servers again.
    p.load_properties(&store, true).await.unwrap();
    session.assert_calls(2);
}

#[tokio::test]
async fn forced_history_refresh_bypasses_cache() {
    let server = common::setup_server();
    let names = common::mock_names(&server, NERG_ID);
    let store = store_for(&server);

    let stale = Profile::new(NERG_ID, "GeneralSnow").with_name_history(Vec::new());
    store.cache().cache(CacheEntry::from(&stale)).await;

    let mut fresh = Profile::new(NERG_ID, "GeneralSnow");
    assert!(fresh.load_name_history(&store, false).await.unwrap().is_empty());
    names.assert_calls(0);

    let hist = fresh.load_name_history(&store, true).await.unwrap();
    names.assert_calls(1);
    assert_eq!(hist.len(), 2);
    assert_eq!(fresh.name(), NERG_NAME);

    let cached = store.cache().inner.get_id(NERG_ID).await.unwrap();
    assert_eq!(cached.name_history.as_deref(), Some(&hist[..]));
}

#[tokio::test]
async fn forced_refresh_failure_keeps_cache() {
    let server = common::setup_server();
    let _mock = common::mock_status(
        &server,
        &format!("/session/session/minecraft/profile/{NERG_ID}"),
        429,
        "",
    );
    let store = store_for(&server);

    let stale = Profile::new(NERG_ID, NERG_NAME).with_properties(Properties::default());
    store.cache().cache(CacheEntry::from(&stale)).await;

    let mut p = stale.clone();
    let err = p.load_properties(&store, true).await.unwrap_err();
    assert!(matches!(err, MojangError::TooManyRequests), "got {err:?}");
    assert_eq!(p, stale);
    assert_eq!(store.cache().writes(), 1);
}

#[tokio::test]
async fn load_many_only_requests_missing_names() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::POST)
            .path("/api/profiles/minecraft")
            .json_body(serde_json::json!(["Forfal", "Dushmursts"]));
        then.status(200)
            .header("content-type", "application/json")
            .body(common::fixture("bulk", "profiles", "json"));
    });
    let store = store_for(&server);
    store
        .cache()
        .cache(CacheEntry::from(&Profile::new(NERG_ID, NERG_NAME)))
        .await;

    let got = store
        .load_many(["nergalic", "Forfal", "", "Dushmursts"])
        .await
        .unwrap();
    mock.assert();

    // The bulk answer repeats Nergalic; it is listed once.
    let ids: Vec<&str> = got.iter().map(|p| p.id()).collect();
    assert_eq!(ids, [NERG_ID, FORFAL_ID]);
    assert!(!ids.contains(&DUSH_ID));
    assert!(store.cache().inner.get_name("Forfal").await.is_some());
}

#[tokio::test]
async fn load_many_fully_cached_sends_nothing() {
    let server = common::setup_server();
    let any = common::mock_any(&server);
    let store = store_for(&server);
    store
        .cache()
        .cache(CacheEntry::from(&Profile::new(NERG_ID, NERG_NAME)))
        .await;

    let got = store.load_many(["Nergalic", "NERGALIC"]).await.unwrap();
    any.assert_calls(0);
    assert_eq!(got.len(), 1);
}

#[tokio::test]
async fn load_many_checks_size_before_cache() {
    let server = common::setup_server();
    let store = store_for(&server);

    let names: Vec<String> = (0..101).map(|i| format!("p{i}")).collect();
    let err = store.load_many(&names).await.unwrap_err();
    assert!(
        matches!(err, MojangError::MaxSizeExceeded { size: 101 }),
        "got {err:?}"
    );
    assert!(store.cache().calls().is_empty());
}
