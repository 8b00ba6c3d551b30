//! CLI tool for toby - replays scroll positions against a headless target
//!
//! Usage:
//!   toby_cli <dataset.json>                          # First window, demo columns
//!   toby_cli <dataset.json> --scroll 0,620,4000      # Replay scroll positions
//!   toby_cli <dataset.json> --columns all --height 200 --config cfg.json -v

#![allow(clippy::exit)]

use std::env;
use std::fs;
use std::process;
use std::rc::Rc;

use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use toby::{ColumnSet, DataProvider, Dataset, Engine, EngineConfig, MemoryTarget, Viewport};

const USAGE: &str = "Usage: toby_cli <dataset.json> [--columns all|sample] [--height PX] \
                     [--scroll PX,PX,...] [--config cfg.json] [-v]";

/// Characters shown per cell in the text grid.
const CELL_CHARS: usize = 10;

struct Args {
    dataset: String,
    columns: ColumnSet,
    height: f64,
    scrolls: Vec<f64>,
    config: Option<String>,
    verbose: u8,
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    process::exit(1);
}

fn parse_args() -> Args {
    let mut dataset = None;
    let mut args = Args {
        dataset: String::new(),
        columns: ColumnSet::DEMO,
        height: 310.0,
        scrolls: vec![0.0],
        config: None,
        verbose: 0,
    };

    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--columns" => {
                args.columns = match iter.next().as_deref() {
                    Some("all") => ColumnSet::All,
                    Some("sample") => ColumnSet::DEMO,
                    _ => fail("--columns expects 'all' or 'sample'"),
                };
            }
            "--height" => {
                args.height = iter
                    .next()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_else(|| fail("--height expects a number of pixels"));
            }
            "--scroll" => {
                let list = iter
                    .next()
                    .unwrap_or_else(|| fail("--scroll expects PX,PX,..."));
                args.scrolls = list
                    .split(',')
                    .map(|v| {
                        v.trim()
                            .parse()
                            .unwrap_or_else(|_| fail(&format!("invalid scroll offset: {v}")))
                    })
                    .collect();
            }
            "--config" => {
                args.config = Some(iter.next().unwrap_or_else(|| fail("--config expects a path")));
            }
            "-v" => args.verbose = args.verbose.saturating_add(1),
            "-vv" => args.verbose = args.verbose.saturating_add(2),
            "-h" | "--help" => {
                println!("{USAGE}");
                process::exit(0);
            }
            _ if dataset.is_none() && !arg.starts_with('-') => dataset = Some(arg),
            _ => fail(&format!("unexpected argument: {arg}\n{USAGE}")),
        }
    }

    args.dataset = dataset.unwrap_or_else(|| fail(USAGE));
    args
}

fn main() {
    let args = parse_args();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let config = match &args.config {
        Some(path) => fs::read_to_string(path)
            .map_err(toby::TobyError::from)
            .and_then(|json| EngineConfig::from_json(&json)),
        None => Ok(EngineConfig::default()),
    };
    let config = config.unwrap_or_else(|e| fail(&format!("Error loading config: {e}")));

    let dataset = Dataset::from_path(&args.dataset)
        .unwrap_or_else(|e| fail(&format!("Error reading {}: {e}", args.dataset)));
    eprintln!(
        "Loaded {} records, {} columns",
        dataset.len(),
        dataset.available_columns().len()
    );

    let provider = DataProvider::with_columns(Rc::new(dataset), args.columns);
    let mut engine = Engine::new(provider, config);

    let first = args.scrolls.first().copied().unwrap_or(0.0);
    let target = MemoryTarget::new(Viewport::new(first, args.height));
    let mut stats = engine
        .attach_to(target)
        .unwrap_or_else(|e| fail(&format!("Error attaching: {e}")));

    for (step, &scroll_top) in args.scrolls.iter().enumerate() {
        if step > 0 {
            if let Some(target) = engine.target_mut() {
                target.set_scroll_top(scroll_top);
            }
            stats = engine
                .refresh()
                .unwrap_or_else(|e| fail(&format!("Error reconciling: {e}")));
        }

        let visible = Viewport::new(scroll_top, args.height).visible_rows(engine.metrics());
        println!("== scroll_top {scroll_top} ==");
        println!("visible:      {}..={}", visible.first, visible.last);
        if let Some(range) = engine.materialized_range() {
            println!("materialized: {}..={}", range.first, range.last);
        }
        println!(
            "created {}, removed {}, recycled {}",
            stats.created, stats.removed, stats.recycled
        );
        if let Some(row) = engine.sentinel_row() {
            println!("sentinel:     row {row}");
        }
        if let Some(target) = engine.target() {
            print!("{}", target.render_text(CELL_CHARS));
        }
        println!();
    }
}
