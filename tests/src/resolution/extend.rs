#![cfg(test)]
use hostmap_common::config::Config;
use hostmap_common::facts::MergePolicy;
use hostmap_common::host::HostModel;
use hostmap_core::ResolutionContext;
use serde_json::json;

use crate::fixtures;

async fn resolve_extend(policy: MergePolicy) -> anyhow::Result<HostModel> {
    let fixture = fixtures::extend()?;
    let cfg: Config = Config {
        fact_dirs: vec![fixture.path("out_setup"), fixture.path("extend")],
        merge_policy: policy,
        ..Config::default()
    };
    Ok(ResolutionContext::new(cfg).resolve().await?)
}

/// A later fact dir overrides a native fact.
#[tokio::test]
async fn extend_overrides_facts() -> anyhow::Result<()> {
    let model = resolve_extend(MergePolicy::Override).await?;
    let host = &model["debian.dev.local"];

    assert_eq!(host.facts["ansible_env"]["EDITOR"], json!("nano"));
    assert_eq!(host.facts["ansible_hostname"], json!("debian"));
    Ok(())
}

/// Keys outside the fact namespace become top-level keys of the record.
#[tokio::test]
async fn extend_adds_top_level_keys() -> anyhow::Result<()> {
    let model = resolve_extend(MergePolicy::Override).await?;
    let host = &model["debian.dev.local"];

    let software = host.get("software").expect("software key");
    assert!(software.as_array().unwrap().contains(&json!("Apache2")));
    assert_eq!(host.get("changed"), Some(json!(false)));
    Ok(())
}

#[tokio::test]
async fn override_replaces_nested_mappings() -> anyhow::Result<()> {
    let model = resolve_extend(MergePolicy::Override).await?;
    assert!(model["debian.dev.local"].facts["ansible_env"].get("HOME").is_none());
    Ok(())
}

#[tokio::test]
async fn deep_merge_keeps_nested_keys() -> anyhow::Result<()> {
    let model = resolve_extend(MergePolicy::Deep).await?;
    let env = &model["debian.dev.local"].facts["ansible_env"];

    assert_eq!(env["EDITOR"], json!("nano"));
    assert_eq!(env["HOME"], json!("/root"));
    Ok(())
}

#[tokio::test]
async fn fact_only_hosts_are_ungrouped() -> anyhow::Result<()> {
    let model = resolve_extend(MergePolicy::Override).await?;
    let host = &model["debian.dev.local"];

    assert!(host.in_group("all"));
    assert!(host.in_group("ungrouped"));
    assert!(host.hostvars.is_empty());
    Ok(())
}
