// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::fs;
use std::process;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use attrweave::apply::Applicator;
use attrweave::config::consts::COMPLETION_EVENT;
use attrweave::config::load_and_validate_config;
use attrweave::pipeline::RenderPipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <config.yaml> <page.html>", args[0]);
        eprintln!("Example: {} configs/demo.yaml configs/demo-page.html", args[0]);
        process::exit(1);
    }

    let config = load_and_validate_config(&args[1])
        .map_err(|error| anyhow::anyhow!("{error}"))
        .with_context(|| format!("loading config {}", args[1]))?;
    let page = fs::read_to_string(&args[2]).with_context(|| format!("reading page {}", args[2]))?;

    let pipeline = RenderPipeline::new(config);
    let rendered = pipeline.render_document(&page)?;

    let applicator = Applicator::new(pipeline.config().on_malformed_marker);
    let mut subscription = applicator.subscribe();
    let waiter = tokio::spawn(async move {
        if subscription.wait().await {
            tracing::info!("{COMPLETION_EVENT} received");
        }
    });

    let decorated = pipeline.apply_document(&rendered, &applicator)?;
    waiter.await?;

    println!("{decorated}");
    Ok(())
}
