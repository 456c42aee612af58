//! `srms check`: verify configuration and connectivity.

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use srms_core::SrmsConfig;
use srms_gateway::{Call, PostgresGateway, ProcedureGateway};

pub async fn check(config: &SrmsConfig) -> Result<()> {
    let target = config.upstream.display_target();
    println!("Checking connection to {target}");

    let mut gateway = PostgresGateway::connect(&config.upstream)
        .await
        .with_context(|| format!("cannot connect to {target}"))?;

    let rs = gateway
        .invoke(&Call::query("SELECT 1 AS ok"))
        .await
        .context("connected, but a trivial query failed")?;
    info!(rows = rs.row_count(), "Round trip succeeded");

    gateway.close().await?;
    println!("{}", format!("✓ Connected to {target}").green());
    Ok(())
}
