#![cfg(all(test, unix))]
use std::time::Duration;

use hostmap_common::config::Config;
use hostmap_common::error::ResolveError;
use hostmap_core::ResolutionContext;
use serde_json::json;

use crate::fixtures;

#[tokio::test]
async fn dynamic_inventory_parse() -> anyhow::Result<()> {
    let facts = fixtures::hostparse()?;
    let inventory = fixtures::dyninv()?;
    let cfg: Config = Config {
        fact_dirs: vec![facts.path("out")],
        inventory: Some(inventory.path("dyninv.sh")),
        ..Config::default()
    };
    let model = ResolutionContext::new(cfg).resolve().await?;

    let host5 = &model["host5.example.com"];
    assert_eq!(host5.hostvars["b"], json!(false));
    assert_eq!(host5.hostvars["ansible_port"], json!(2222));
    assert_eq!(host5.hostvars["halon_system_timeout"], json!(30));
    for group in ["atlanta", "raleigh", "southeast", "all"] {
        assert!(host5.in_group(group), "host5 is not in {group}");
    }

    assert_eq!(model["host1.example.com"].hostvars["b"], json!(true));
    assert!(model.contains_key("db.dev.local"));
    Ok(())
}

#[tokio::test]
async fn dynamic_inventory_failure_aborts() -> anyhow::Result<()> {
    let fixture = fixtures::Fixture::new()?;
    let script = fixture.write_executable("broken.sh", "#!/bin/sh\necho boom >&2\nexit 1\n")?;
    let cfg: Config = Config {
        inventory: Some(script),
        dynamic_timeout: Duration::from_secs(10),
        ..Config::default()
    };

    let result = ResolutionContext::new(cfg).resolve().await;
    assert!(matches!(result, Err(ResolveError::DynamicInventoryExecution { .. })));
    Ok(())
}
