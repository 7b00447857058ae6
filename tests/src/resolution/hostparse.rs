#![cfg(test)]
use hostmap_common::config::Config;
use hostmap_common::host::HostModel;
use hostmap_core::ResolutionContext;
use serde_json::json;

use crate::fixtures::{self, Fixture};

async fn resolve(fixture: &Fixture, inventory: &str) -> anyhow::Result<HostModel> {
    let cfg: Config = Config {
        fact_dirs: vec![fixture.path("out")],
        inventory: Some(fixture.path(inventory)),
        ..Config::default()
    };
    Ok(ResolutionContext::new(cfg).resolve().await?)
}

/// Children groups contain every host of their descendants.
#[tokio::test]
async fn child_group_hosts() -> anyhow::Result<()> {
    let fixture = fixtures::hostparse()?;
    let model = resolve(&fixture, "hosts").await?;
    let groups = &model["db.dev.local"].groups;

    for group in ["all", "db", "dev", "dev_local"] {
        assert!(groups.contains(group), "db.dev.local is not in {group}: {groups:?}");
    }
    assert!(!groups.contains("ungrouped"));
    Ok(())
}

/// Vars set on a parent group reach the hosts of its children.
#[tokio::test]
async fn child_group_vars() -> anyhow::Result<()> {
    let fixture = fixtures::hostparse()?;
    let model = resolve(&fixture, "hosts").await?;
    let hostvars = &model["db.dev.local"].hostvars;

    assert_eq!(hostvars["function"], json!("db"));
    assert_eq!(hostvars["dtap"], json!("dev"));
    Ok(())
}

/// Every file of an inventory directory is parsed.
#[tokio::test]
async fn hosts_directory() -> anyhow::Result<()> {
    let fixture = fixtures::hostparse()?;
    let model = resolve(&fixture, "hostsdir").await?;
    let db = &model["db.dev.local"];

    assert_eq!(db.hostvars["function"], json!("db"));
    assert_eq!(db.hostvars["dtap"], json!("dev"));
    assert_eq!(db.hostvars["backup"], json!(true));
    assert!(db.in_group("db"));
    assert!(db.in_group("dev"));

    assert_eq!(model["web03.dev.local"].hostvars["http_port"], json!(8080));
    Ok(())
}

/// Inventory dir, fact-cache facts and extension keys all land on one record.
#[tokio::test]
async fn hosts_directory_with_cached_and_extended_facts() -> anyhow::Result<()> {
    let fixture = fixtures::hostparse()?;
    let cfg: Config = Config {
        fact_dirs: vec![fixture.path("cache"), fixture.path("extend")],
        inventory: Some(fixture.path("hostsdir")),
        ..Config::default()
    };
    let model = ResolutionContext::new(cfg).resolve().await?;
    let db = &model["db.dev.local"];

    assert_eq!(db.facts["ansible_env"]["EDITOR"], json!("vim"));
    assert_eq!(db.facts["ansible_hostname"], json!("db"));
    assert_eq!(db.get("software"), Some(json!(["Apache2"])));
    for group in ["all", "db", "dev", "dev_local"] {
        assert!(db.in_group(group), "db.dev.local is not in {group}");
    }
    assert_eq!(db.hostvars["function"], json!("db"));
    Ok(())
}

/// `web[01-03]` declares three hosts.
#[tokio::test]
async fn expand_host_ranges() -> anyhow::Result<()> {
    let fixture = fixtures::hostparse()?;
    let model = resolve(&fixture, "hosts").await?;

    for host in ["web01.dev.local", "web02.dev.local", "web03.dev.local"] {
        assert!(model.contains_key(host), "{host} missing");
        assert!(model[host].in_group("web"));
    }
    assert!(model["web03.dev.local"].facts.is_empty());
    assert_eq!(model["web02.dev.local"].facts["ansible_hostname"], json!("web02"));
    Ok(())
}

#[tokio::test]
async fn top_level_hosts_are_ungrouped() -> anyhow::Result<()> {
    let fixture = fixtures::hostparse()?;
    let model = resolve(&fixture, "hosts").await?;
    let bastion = &model["bastion.dev.local"];

    assert!(bastion.in_group("ungrouped"));
    assert!(!bastion.in_group("dev"));
    Ok(())
}

/// Fact-cache dirs hold bare facts; they land under `ansible_facts`.
#[tokio::test]
async fn fact_cache() -> anyhow::Result<()> {
    let fixture = fixtures::factcache()?;
    let cfg: Config = Config {
        fact_dirs: vec![fixture.path("out")],
        inventory: Some(fixture.path("hosts")),
        fact_cache: Some(true),
        ..Config::default()
    };
    let model = ResolutionContext::new(cfg).resolve().await?;
    let host = &model["debian.dev.local"];

    assert!(host.in_group("dev"));
    assert_eq!(host.hostvars["dtap"], json!("dev"));
    assert!(host.facts.contains_key("ansible_env"));
    assert!(host.extensions.is_empty());
    Ok(())
}

#[tokio::test]
async fn fact_cache_is_detected() -> anyhow::Result<()> {
    let fixture = fixtures::factcache()?;
    let model = resolve(&fixture, "hosts").await?;
    assert!(model["debian.dev.local"].facts.contains_key("ansible_env"));
    Ok(())
}

#[tokio::test]
async fn limit_narrows_the_model() -> anyhow::Result<()> {
    let fixture = fixtures::hostparse()?;
    let cfg: Config = Config {
        fact_dirs: vec![fixture.path("out")],
        inventory: Some(fixture.path("hosts")),
        limit: Some("dev,!web02.dev.local".to_string()),
        ..Config::default()
    };
    let model = ResolutionContext::new(cfg).resolve().await?;

    let names: Vec<&str> = model.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["db.dev.local", "web01.dev.local", "web03.dev.local"]);
    Ok(())
}

/// Identical inputs serialize identically.
#[tokio::test]
async fn output_is_deterministic() -> anyhow::Result<()> {
    let fixture = fixtures::hostparse()?;
    let first = serde_json::to_string(&resolve(&fixture, "hosts").await?)?;
    let second = serde_json::to_string(&resolve(&fixture, "hosts").await?)?;
    assert_eq!(first, second);

    let value: serde_json::Value = serde_json::from_str(&first)?;
    assert_eq!(value["db.dev.local"]["name"], json!("db.dev.local"));
    assert_eq!(value["db.dev.local"]["ansible_facts"]["ansible_hostname"], json!("db"));
    Ok(())
}

#[tokio::test]
async fn missing_inventory_is_an_error() {
    let fixture = fixtures::hostparse().unwrap();
    let result = resolve(&fixture, "no-such-hosts").await;
    assert!(result.is_err());
}
