//! namepool-runner: headless name generation from participation records.
//!
//! Usage:
//!   namepool-runner --data records.csv --seed 12345 --region 3 --count 10
//!   namepool-runner --data - --daily 2025-01-31 --json < records.csv
//!   namepool-runner --config pool.json --data records.csv --region-name Zhejiang

use anyhow::{Context, Result};
use chrono::NaiveDate;
use namepool_core::{
    daily_seed, loader, pool::PoolSummary, NameEngine, NamePoolConfig, UsedNames,
};
use std::env;
use std::io;

#[derive(serde::Serialize)]
struct RunReport {
    seed:  Option<i64>,
    names: Vec<String>,
    pools: PoolSummary,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let region = parse_arg(&args, "--region", -1i64);
    let count = parse_arg(&args, "--count", 10usize);
    let json = args.iter().any(|a| a == "--json");
    let data = string_arg(&args, "--data");
    let region_name = string_arg(&args, "--region-name");

    let config = match string_arg(&args, "--config") {
        Some(path) => NamePoolConfig::load(path)?,
        None => NamePoolConfig::default(),
    };

    let seed = match string_arg(&args, "--daily") {
        Some(raw) => {
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("--daily expects YYYY-MM-DD, got {raw}"))?;
            Some(daily_seed(date))
        }
        None => args
            .windows(2)
            .find(|w| w[0] == "--seed")
            .and_then(|w| w[1].parse::<i64>().ok()),
    };

    let mut engine = NameEngine::build(config, seed)?;

    match data {
        Some("-") => {
            if let Err(e) = loader::load_reader(&mut engine, io::stdin().lock()) {
                log::warn!("stdin not loaded: {e}");
            }
        }
        Some(path) => {
            loader::ingest_path(&mut engine, path);
        }
        None => log::warn!("No --data given; only placeholder names are available"),
    }

    if !json {
        println!("namepool-runner");
        println!("  seed:    {}", seed.map_or("clock".to_string(), |s| s.to_string()));
        println!("  data:    {}", data.unwrap_or("(none)"));
        println!("  region:  {}", region_name.map_or(region.to_string(), str::to_string));
        println!("  count:   {count}");
        println!();
    }

    let mut used = UsedNames::new();
    let names: Vec<String> = (0..count)
        .map(|_| match region_name {
            Some(name) => engine.generate_for_region_name(name, &mut used),
            None => engine.generate_any(region, &mut used),
        })
        .collect();

    if json {
        let report = RunReport {
            seed,
            names,
            pools: engine.pools().summary(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for name in &names {
            println!("  {name}");
        }
        print_summary(&engine.pools().summary(), engine.config());
    }

    Ok(())
}

fn print_summary(summary: &PoolSummary, config: &NamePoolConfig) {
    println!();
    println!("=== Pools ===");
    println!("  threshold:   matchId >= {}", summary.threshold);
    println!(
        "  global:      {} names, weight {:.1}",
        summary.global_size, summary.global_weight_sum
    );
    for region in &summary.regions {
        let label = config
            .regions
            .get(region.key)
            .map(String::as_str)
            .unwrap_or("?");
        println!(
            "  [{:>2}] {:<16} {:>2} names, weight {:.1}",
            region.key, label, region.size, region.weight_sum
        );
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
