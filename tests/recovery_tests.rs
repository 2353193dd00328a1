// Integration tests for credential and session recovery.

mod common;

use common::{MockRemote, ScriptedFrontEnd};
use openlist_organizer::config::ConfigStore;
use openlist_organizer::recovery;
use openlist_organizer::remote::LoginOutcome;

fn seeded_config(tmp: &tempfile::TempDir) -> ConfigStore {
    let mut config = ConfigStore::open(tmp.path().join("conf.json")).unwrap();
    config.set("username", "a").unwrap();
    config.set("password", "b").unwrap();
    config.set("dest", "http://h").unwrap();
    config.set("base_dir", "/x").unwrap();
    config.set("dst_dir", "/y").unwrap();
    config
}

#[tokio::test]
async fn valid_stored_token_short_circuits_login() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = seeded_config(&tmp);
    config.set("token", "OLD").unwrap();

    let mut api = MockRemote::new();
    api.verify_results.borrow_mut().push_back(true);
    let front = ScriptedFrontEnd::new();

    recovery::ensure_ready(&mut config, &mut api, &front)
        .await
        .unwrap();

    assert_eq!(api.count_calls("login"), 0);
    assert_eq!(*api.token.borrow(), "OLD");
    assert!(front.prompts_seen().is_empty());
}

#[tokio::test]
async fn empty_token_logs_in_and_persists() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = seeded_config(&tmp);

    let mut api = MockRemote::new();
    api.login_outcomes
        .borrow_mut()
        .push_back(LoginOutcome::Token("T1".to_string()));
    api.verify_results.borrow_mut().push_back(true);
    let front = ScriptedFrontEnd::new();

    recovery::ensure_ready(&mut config, &mut api, &front)
        .await
        .unwrap();

    assert_eq!(config.get("token"), "T1");
    assert_eq!(*api.token.borrow(), "T1");
    assert!(front.prompts_seen().is_empty());
    // No verify call is wasted on the empty stored token.
    assert_eq!(api.calls(), vec!["login", "verify T1"]);
}

#[tokio::test]
async fn unauthorized_login_reprompts_credentials_once_per_attempt() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = seeded_config(&tmp);

    let mut api = MockRemote::new();
    api.login_outcomes
        .borrow_mut()
        .push_back(LoginOutcome::Unauthorized);
    api.login_outcomes
        .borrow_mut()
        .push_back(LoginOutcome::Token("T2".to_string()));
    api.verify_results.borrow_mut().push_back(true);

    let front = ScriptedFrontEnd::new();
    front.push_reply("new-user");
    front.push_reply("new-pass");

    recovery::ensure_ready(&mut config, &mut api, &front)
        .await
        .unwrap();

    // Exactly one credential re-prompt cycle (two prompts), then success.
    assert_eq!(front.prompts_seen().len(), 2);
    assert_eq!(config.get("username"), "new-user");
    assert_eq!(config.get("password"), "new-pass");
    assert_eq!(config.get("token"), "T2");
    assert_eq!(api.count_calls("login"), 2);
}

#[tokio::test]
async fn server_error_reprompts_destination_url() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = seeded_config(&tmp);

    let mut api = MockRemote::new();
    api.login_outcomes
        .borrow_mut()
        .push_back(LoginOutcome::ServerError);
    api.login_outcomes
        .borrow_mut()
        .push_back(LoginOutcome::Token("T3".to_string()));
    api.verify_results.borrow_mut().push_back(true);

    let front = ScriptedFrontEnd::new();
    front.push_reply("http://elsewhere");

    recovery::ensure_ready(&mut config, &mut api, &front)
        .await
        .unwrap();

    assert_eq!(config.get("dest"), "http://elsewhere");
    assert_eq!(*api.base_url.borrow(), "http://elsewhere");
    assert_eq!(config.get("token"), "T3");
}

#[tokio::test]
async fn stale_token_is_replaced_without_new_prompts() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = seeded_config(&tmp);
    config.set("token", "STALE").unwrap();

    let mut api = MockRemote::new();
    api.verify_results.borrow_mut().push_back(false); // stored token rejected
    api.login_outcomes
        .borrow_mut()
        .push_back(LoginOutcome::Token("FRESH".to_string()));
    api.verify_results.borrow_mut().push_back(true); // fresh token verifies
    let front = ScriptedFrontEnd::new();

    recovery::ensure_ready(&mut config, &mut api, &front)
        .await
        .unwrap();

    assert_eq!(config.get("token"), "FRESH");
    assert!(front.prompts_seen().is_empty());
}

#[tokio::test]
async fn unverifiable_fresh_token_reprompts_destination() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = seeded_config(&tmp);

    let mut api = MockRemote::new();
    api.login_outcomes
        .borrow_mut()
        .push_back(LoginOutcome::Token("T4".to_string()));
    api.verify_results.borrow_mut().push_back(false); // fresh token rejected
    api.login_outcomes
        .borrow_mut()
        .push_back(LoginOutcome::Token("T5".to_string()));
    api.verify_results.borrow_mut().push_back(true);

    let front = ScriptedFrontEnd::new();
    front.push_reply("http://fixed");

    recovery::ensure_ready(&mut config, &mut api, &front)
        .await
        .unwrap();

    assert_eq!(front.prompts_seen(), vec!["OpenList server URL"]);
    assert_eq!(config.get("token"), "T5");
}

#[tokio::test]
async fn missing_settings_are_prompted_before_auth() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = ConfigStore::open(tmp.path().join("conf.json")).unwrap();

    let mut api = MockRemote::new();
    api.login_outcomes
        .borrow_mut()
        .push_back(LoginOutcome::Token("T6".to_string()));
    api.verify_results.borrow_mut().push_back(true);

    let front = ScriptedFrontEnd::new();
    front.push_reply(" admin ");
    front.push_reply("secret");
    front.push_reply("http://h/");
    front.push_reply("/src");
    front.push_reply("/lib");

    recovery::ensure_ready(&mut config, &mut api, &front)
        .await
        .unwrap();

    // Prompted values are trimmed before persisting.
    assert_eq!(config.get("username"), "admin");
    assert_eq!(config.get("base_dir"), "/src");
    assert_eq!(config.get("dst_dir"), "/lib");
    assert_eq!(config.get("token"), "T6");
    assert_eq!(front.prompts_seen().len(), 5);
}
