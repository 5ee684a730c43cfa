use chrono::DateTime;
use mojang_rs::{Model, MojangError, PastName, Profile, Properties, SharedProfile};

use crate::common::{self, NERG_ID, NERG_NAME};

#[tokio::test]
async fn loads_history_once_unless_forced() {
    let server = common::setup_server();
    let mock = common::mock_names(&server, NERG_ID);
    let client = common::client_for(&server);

    let mut p = Profile::new(NERG_ID, "GeneralSnow");
    let first = p.load_name_history(&client, false).await.unwrap();
    assert_eq!(first.len(), 2);
    // Loading the history also refreshes the current name.
    assert_eq!(p.name(), NERG_NAME);

    let again = p.load_name_history(&client, false).await.unwrap();
    mock.assert_calls(1);
    assert_eq!(again, first);

    p.load_name_history(&client, true).await.unwrap();
    mock.assert_calls(2);
}

#[tokio::test]
async fn already_known_history_needs_no_request() {
    let server = common::setup_server();
    let any = common::mock_any(&server);
    let client = common::client_for(&server);

    let hist = vec![PastName::new("Old", DateTime::from_timestamp_millis(1))];
    let mut p = Profile::new(NERG_ID, NERG_NAME).with_name_history(hist.clone());
    assert_eq!(p.load_name_history(&client, false).await.unwrap(), hist);
    any.assert_calls(0);
}

#[tokio::test]
async fn failed_refresh_keeps_previous_state() {
    let server = common::setup_server();
    let _mock = common::mock_status(
        &server,
        &format!("/api/user/profiles/{NERG_ID}/names"),
        429,
        "",
    );
    let client = common::client_for(&server);

    let hist = vec![PastName::new("Old", None)];
    let mut p = Profile::new(NERG_ID, NERG_NAME).with_name_history(hist.clone());
    let before = p.clone();

    let err = p.load_name_history(&client, true).await.unwrap_err();
    assert!(matches!(err, MojangError::TooManyRequests), "got {err:?}");
    assert_eq!(p, before);
}

#[tokio::test]
async fn profile_without_id_cannot_lazy_load() {
    let server = common::setup_server();
    let any = common::mock_any(&server);
    let client = common::client_for(&server);

    let mut p = Profile::new("", "Someone");
    let err = p.load_name_history(&client, false).await.unwrap_err();
    assert!(matches!(err, MojangError::IdNotSet), "got {err:?}");
    let err = p.load_properties(&client, false).await.unwrap_err();
    assert!(matches!(err, MojangError::IdNotSet), "got {err:?}");
    any.assert_calls(0);
}

#[tokio::test]
async fn loads_properties_once_unless_forced() {
    let server = common::setup_server();
    let mock = common::mock_session(&server, NERG_ID, NERG_ID);
    let client = common::client_for(&server);

    let mut p = Profile::new(NERG_ID, "stale");
    let props = p.load_properties(&client, false).await.unwrap();
    assert_eq!(props.model, Model::Steve);
    assert_eq!(p.name(), NERG_NAME);
    assert_eq!(p.properties(), Some(&props));

    p.load_properties(&client, false).await.unwrap();
    mock.assert_calls(1);
    p.load_properties(&client, true).await.unwrap();
    mock.assert_calls(2);
}

#[tokio::test]
async fn shared_profile_serializes_loads() {
    let server = common::setup_server();
    let mock = common::mock_names(&server, NERG_ID);
    let client = common::client_for(&server);

    let shared = SharedProfile::new(Profile::new(NERG_ID, "GeneralSnow"));
    let (a, b) = tokio::join!(
        shared.load_name_history(&client, false),
        shared.load_name_history(&client, false),
    );

    // The second load sees the first one's result.
    mock.assert_calls(1);
    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(shared.snapshot().await.name(), NERG_NAME);
}

#[tokio::test]
async fn shared_profile_copies_are_independent() {
    let shared: SharedProfile = Profile::new(NERG_ID, NERG_NAME)
        .with_properties(Properties::default())
        .into();
    let server = common::setup_server();
    let any = common::mock_any(&server);
    let client = common::client_for(&server);

    let mut copy = shared.load_properties(&client, false).await.unwrap();
    copy.model = Model::Alex;
    any.assert_calls(0);
    assert_eq!(
        shared.snapshot().await.properties().unwrap().model,
        Model::Steve
    );
}
