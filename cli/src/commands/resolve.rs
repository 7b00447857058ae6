use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use hostmap_common::host::HostModel;
use hostmap_core::ResolutionContext;
use tracing::Instrument;
use unicode_width::UnicodeWidthStr;

use crate::commands::CommandLine;
use crate::mprint;
use crate::terminal::{colors, format, print, spinner};

pub async fn resolve(commands: &CommandLine) -> anyhow::Result<()> {
    let context = ResolutionContext::new(commands.config());

    let start_time: Instant = Instant::now();
    let span = spinner::resolution_span(commands.fact_dirs.len());
    let model: HostModel = context
        .resolve()
        .instrument(span)
        .await
        .context("resolution failed")?;

    if commands.json {
        let json: String =
            serde_json::to_string_pretty(&model).context("cannot serialize host model")?;
        println!("{json}");
        return Ok(());
    }

    resolution_ends(&model, start_time.elapsed(), commands.quiet);
    Ok(())
}

fn resolution_ends(model: &HostModel, total_time: Duration, quiet: u8) {
    if model.is_empty() {
        print::header("zero hosts resolved", quiet);
        print::no_results();
        return;
    }

    if quiet < 2 {
        print_hosts(model);
    }
    print_summary(model.len(), total_time, quiet);
}

fn print_hosts(model: &HostModel) {
    for (idx, host) in model.values().enumerate() {
        print::tree_head(idx, &host.name);
        print::as_tree_one_level(format::host_details(host));
        if idx + 1 != model.len() {
            mprint!();
        }
    }
}

fn print_summary(hosts_len: usize, total_time: Duration, quiet: u8) {
    let hosts: String = format!("{hosts_len} hosts");
    let time: String = format!("{:.2}s", total_time.as_secs_f64());
    let plain_width: usize =
        UnicodeWidthStr::width(format!("Resolution Complete: {hosts} in {time}").as_str());

    let output: String = format!(
        "Resolution Complete: {} in {}",
        hosts.bold().green(),
        time.bold().yellow()
    )
    .color(colors::TEXT_DEFAULT)
    .to_string();

    match quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output, plain_width);
        }
        _ => {
            mprint!();
            print::print(&output);
        }
    }
}
