use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use heatmap_rs::viz::types::MAX_SIDE_PX;
use heatmap_rs::viz::{self, Layout};
use heatmap_rs::{Client, DEFAULT_DATA_URL, Dataset, api, stats};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "heatmap",
    version,
    about = "Render monthly global land-surface temperature as a heat map"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the dataset and write the heat map (.html, .svg or .png).
    Render(RenderArgs),
    /// Load the dataset and print summary statistics.
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Dataset URL.
    #[arg(long, default_value = DEFAULT_DATA_URL, conflicts_with = "input")]
    url: String,
    /// Read the dataset from a local JSON file instead of fetching it.
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Output path; the extension selects the format.
    #[arg(short, long)]
    out: PathBuf,
    /// JSON file with layout overrides (width, height, margin, legend_*, font_px).
    #[arg(long)]
    layout: Option<PathBuf>,
    /// Width of the plot area in pixels (default 1080).
    #[arg(long, value_parser = parse_side)]
    width: Option<f64>,
    /// Height of the plot area in pixels (default 540).
    #[arg(long, value_parser = parse_side)]
    height: Option<f64>,
    /// TTF/OTF font used for labels in PNG output.
    #[arg(long)]
    font: Option<PathBuf>,
    /// Also print summary statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(Args, Debug)]
struct StatsArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Print the summary as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn parse_side(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("{s:?} is not a number"))?;
    if v.is_finite() && v > 0.0 && v <= MAX_SIDE_PX {
        Ok(v)
    } else {
        Err(format!("must be greater than 0 and at most {MAX_SIDE_PX}"))
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 3 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.3}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn load(source: &SourceArgs) -> Result<Dataset> {
    match &source.input {
        Some(path) => api::load_dataset_file(path),
        None => Client::default().fetch_dataset(&source.url),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Stats(args) => cmd_stats(args),
    };
    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn load_layout(args: &RenderArgs) -> Result<Layout> {
    let mut layout = match &args.layout {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parse layout {}", path.display()))?
        }
        None => Layout::default(),
    };
    if let Some(w) = args.width {
        layout.width = w;
    }
    if let Some(h) = args.height {
        layout.height = h;
    }
    Ok(layout)
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    // Nothing is drawn unless the dataset loads.
    let data = load(&args.source)?;

    if let Some(font) = args.font.as_ref() {
        viz::raster::register_font_file(font)?;
    }
    let layout = load_layout(&args)?;
    viz::render_to_path(&data, &layout, &args.out)?;
    eprintln!("Wrote heat map to {}", args.out.display());

    if args.stats {
        print_stats(&data);
    }
    Ok(())
}

fn cmd_stats(args: StatsArgs) -> Result<()> {
    let data = load(&args.source)?;
    if args.json {
        let summary = stats::summarize(&data);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_stats(&data);
    }
    Ok(())
}

fn print_stats(data: &Dataset) {
    let s = stats::summarize(data);
    let years = match (s.first_year, s.last_year) {
        (Some(a), Some(b)) => format!("{a}-{b}"),
        _ => "NA".to_string(),
    };
    println!(
        "records={}  years={}  base={}  min={} max={} mean={}",
        s.records,
        years,
        fmt_opt(Some(s.base_temperature)),
        fmt_opt(s.min_temp),
        fmt_opt(s.max_temp),
        fmt_opt(s.mean_temp)
    );
    if let (Some(c), Some(w)) = (s.coldest, s.warmest) {
        println!(
            "coldest={}-{:02}  warmest={}-{:02}",
            c.year, c.month, w.year, w.month
        );
    }
}
