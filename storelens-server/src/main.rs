//! CLI entry point: load a metrics CSV, run the insights engine once, and
//! print the report as JSON or a formatted digest.

use std::env;
use std::process;
use std::time::Instant;

use storelens_engine::insights::generate_insights;
use storelens_engine::source::{CsvMetricsSource, MetricsSource};
use storelens_engine::types::{InsightsReport, Priority};

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

/// Format a number with comma thousands separators.
fn format_dollars(amount: f64) -> String {
    let whole = amount.abs() as u64;
    let sign = if amount < 0.0 { "-" } else { "" };

    if whole < 1_000 {
        return format!("{}{}", sign, whole);
    }

    let s = whole.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    format!("{}{}", sign, result.chars().rev().collect::<String>())
}

fn print_human(report: &InsightsReport, load_ms: u128, engine_ms: u128) {
    println!();
    println!("  \u{2554}{}\u{2557}", "\u{2550}".repeat(62));
    println!("  \u{2551}              STORELENS \u{2014} Store Insights Report               \u{2551}");
    println!("  \u{255a}{}\u{255d}", "\u{2550}".repeat(62));
    println!();

    let o = &report.overview;
    println!(
        "  {} stores \u{00b7} {} orders \u{00b7} ${} revenue \u{00b7} ${} profit",
        o.store_count,
        o.total_orders,
        format_dollars(o.total_revenue),
        format_dollars(o.total_profit)
    );
    println!("  {}", o.summary);
    println!();

    println!("  Clusters      {}", report.clusters.summary);
    println!("  Anomalies     {}", report.anomalies.summary);
    println!("  Head/tail     {}", report.head_tail.summary);
    println!("  Attribution   {}", report.attribution.summary);
    if let Some(trend) = &report.trend {
        println!("  Trend         {}", trend.summary);
    }
    println!("  Health        {}", report.health.summary);
    println!("  Costs         {}", report.cost_structure.summary);
    println!();

    if report.recommendations.is_empty() {
        println!("  No recommendations. All clear!");
    } else {
        println!("  {:\u{2500}<64}", "");
        for (i, rec) in report.recommendations.iter().enumerate() {
            let marker = match rec.priority {
                Priority::Urgent => "!!",
                Priority::Important => "! ",
                Priority::General => "  ",
            };
            println!(
                "  {} {}. [{}] {} \u{2014} {}",
                marker,
                i + 1,
                rec.priority,
                rec.title,
                rec.category
            );
            println!("       {}", rec.description);
            for item in &rec.action_items {
                println!("       \u{2022} {}", item);
            }
            if !rec.affected_stores.is_empty() {
                let display = if rec.affected_stores.len() <= 4 {
                    rec.affected_stores.join(", ")
                } else {
                    format!(
                        "{}, +{} more",
                        rec.affected_stores[..3].join(", "),
                        rec.affected_stores.len() - 3
                    )
                };
                println!("       Stores: {}", display);
            }
            println!();
        }
        println!("  {:\u{2500}<64}", "");
    }

    println!();
    println!(
        "  \u{23f1}  CSV loaded in {}ms \u{00b7} Engine ran in {}ms \u{00b7} Total {}ms",
        load_ms,
        engine_ms,
        load_ms + engine_ms
    );
    println!();
}

fn usage() -> ! {
    eprintln!("Usage: storelens-server <current.csv> [--previous prev.csv] [--json]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --previous   Previous-period CSV; enables trend analysis");
    eprintln!("  --json       Output as JSON instead of formatted text");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  storelens-server fixtures/current_period.csv");
    eprintln!("  storelens-server fixtures/current_period.csv --previous fixtures/previous_period.csv --json");
    process::exit(1);
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let current_path = args[1].clone();
    let mut previous_path: Option<String> = None;
    let mut json_output = false;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--previous" => {
                if i + 1 < args.len() {
                    previous_path = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --previous requires a file path");
                    process::exit(1);
                }
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                usage();
            }
        }
    }

    let source = CsvMetricsSource::new(current_path, previous_path);

    let load_start = Instant::now();
    let stores = match source.fetch_current().await {
        Ok(stores) => stores,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let deltas = match source.fetch_deltas().await {
        Ok(deltas) => deltas,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let load_ms = load_start.elapsed().as_millis();
    log::info!("loaded {} stores from {}", stores.len(), source.name());

    let engine_start = Instant::now();
    let report = match generate_insights(&stores, deltas.as_deref()) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let engine_ms = engine_start.elapsed().as_millis();

    if json_output {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_human(&report, load_ms, engine_ms);
    }
}
