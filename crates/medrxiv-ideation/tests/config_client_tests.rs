//! Configuration and client tests.
//!
//! Tests actual behavior, not constants.

use std::collections::HashMap;

use medrxiv_ideation::client::{ChatClient, PreprintClient, ScholarClient, SeeChatClient};
use medrxiv_ideation::config::{Config, env};
use medrxiv_ideation::error::ConfigError;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> =
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |name| map.get(name).cloned()
}

fn required() -> Vec<(&'static str, &'static str)> {
    vec![
        (env::SEECHAT_API_KEY, "seechat-secret"),
        (env::LLM_API_KEY, "llm-secret"),
        (env::LLM_ENDPOINT, "https://llama.example.com/models/"),
    ]
}

// =============================================================================
// Config Behavior Tests
// =============================================================================

#[test]
fn test_config_without_scholar_key_cannot_rank() {
    let config = Config::from_lookup(lookup(&required())).unwrap();
    assert!(!config.has_scholar_key());
    assert!(matches!(
        config.require_scholar_key(),
        Err(ConfigError::MissingVar { var }) if var == env::SCHOLAR_API_KEY
    ));
}

#[test]
fn test_config_overrides_endpoints() {
    let mut pairs = required();
    pairs.push((env::PREPRINT_API_URL, "http://localhost:9000/details/medrxiv/"));
    pairs.push((env::SCHOLAR_API_KEY, "s2-secret"));

    let config = Config::from_lookup(lookup(&pairs)).unwrap();
    assert_eq!(config.preprint_api_url, "http://localhost:9000/details/medrxiv");
    assert_eq!(config.llm_endpoint, "https://llama.example.com/models");
    assert_eq!(config.require_scholar_key().unwrap(), "s2-secret");
}

#[test]
fn test_config_each_required_variable_is_fatal() {
    for missing in [env::SEECHAT_API_KEY, env::LLM_API_KEY, env::LLM_ENDPOINT] {
        let pairs: Vec<_> = required().into_iter().filter(|(k, _)| *k != missing).collect();
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar { var } if var == missing));
    }
}

// =============================================================================
// Client Behavior Tests
// =============================================================================

#[test]
fn test_clients_build_from_test_config() {
    let config = Config::for_testing("http://localhost:8080");
    assert!(PreprintClient::new(&config).is_ok());
    assert!(ScholarClient::new(&config).is_ok());
    assert!(ChatClient::new(&config).is_ok());
    assert!(SeeChatClient::new(&config).is_ok());
}

#[test]
fn test_client_debug_hides_keys() {
    let config = Config::for_testing("http://localhost:8080");
    let debug = format!(
        "{:?} {:?} {:?} {:?}",
        config,
        ScholarClient::new(&config).unwrap(),
        ChatClient::new(&config).unwrap(),
        SeeChatClient::new(&config).unwrap()
    );
    for secret in ["test-scholar-key", "test-llm-key", "test-seechat-key"] {
        assert!(!debug.contains(secret), "{secret} leaked");
    }
}

#[test]
fn test_preprint_page_url() {
    use chrono::NaiveDate;
    use medrxiv_ideation::models::{DateRange, FetchCursor};

    let config = Config::for_testing("http://localhost:8080");
    let client = PreprintClient::new(&config).unwrap();
    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
    )
    .unwrap();
    let cursor = FetchCursor { offset: 100, total: Some(250) };

    assert_eq!(
        client.page_url(range, cursor),
        "http://localhost:8080/details/medrxiv/2024-03-01/2024-03-02/100"
    );
}
