//! # BuildCalc CLI Application
//!
//! Terminal front end for the estimation engine.
//!
//! - `buildcalc estimate` prices a building from flags or a JSON request
//! - `buildcalc wizard` asks for each value in turn, then prices it
//! - `buildcalc prices` prints the active price table as JSON
//!
//! Set `RUST_LOG=debug` to see file and engine activity on stderr.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use estimate_core::calculations::{EstimateInput, EstimateResult, Estimator};
use estimate_core::file_io::{load_estimate_input, load_price_table, save_report};
use estimate_core::format::format_currency;
use estimate_core::pricing::PriceTable;
use estimate_core::project::{
    BuildingType, MaterialCategory, MaterialSelection, ProjectInput, RateConfig, UpperFloorType,
};
use estimate_core::report::{report_file_name, EstimateReport};

#[derive(Parser, Debug)]
#[command(name = "buildcalc", version, about = "Construction cost estimator")]
struct Cli {
    /// Price table JSON (defaults to US national averages, 2024)
    #[arg(long, value_name = "PATH", global = true)]
    prices: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Price a building described by flags or a JSON request
    Estimate(EstimateArgs),
    /// Enter the building step by step
    Wizard(OutputArgs),
    /// Print the active price table as JSON
    Prices,
}

#[derive(Args, Debug)]
struct EstimateArgs {
    /// JSON estimate request (replaces the building flags below)
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Project name
    #[arg(long, default_value = "")]
    name: String,

    /// residential, commercial, or apartment
    #[arg(long = "type", default_value = "residential")]
    building_type: BuildingType,

    /// Building length in feet
    #[arg(long, default_value = "")]
    length: String,

    /// Building width in feet
    #[arg(long, default_value = "")]
    width: String,

    /// Wall height per floor in feet
    #[arg(long, default_value = "")]
    height: String,

    /// Number of floors
    #[arg(long, default_value = "1")]
    floors: String,

    /// Slab thickness in inches
    #[arg(long, default_value = "4")]
    slab_thickness: String,

    /// Upper floor construction: slab, suspended, or wood
    #[arg(long, default_value = "slab")]
    upper_floor: UpperFloorType,

    /// Comma-separated materials, "all", or "none"
    #[arg(long, default_value = "concrete")]
    materials: String,

    /// Labor rate in percent of materials
    #[arg(long, default_value_t = 10.0)]
    labor_rate: f64,

    /// Contingency rate in percent of materials plus labor
    #[arg(long, default_value_t = 5.0)]
    contingency_rate: f64,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Print the result as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Write the text report to this path
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Write the text report to the current directory with a generated name
    #[arg(long, conflicts_with = "report")]
    save_report: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let prices = match &cli.prices {
        Some(path) => load_price_table(path)
            .with_context(|| format!("loading price table {}", path.display()))?,
        None => PriceTable::default(),
    };
    debug!(basis = %prices.basis, "price table ready");

    match cli.command {
        Commands::Estimate(args) => cmd_estimate(args, prices),
        Commands::Wizard(output) => cmd_wizard(output, prices),
        Commands::Prices => cmd_prices(&prices),
    }
}

fn cmd_estimate(args: EstimateArgs, prices: PriceTable) -> Result<()> {
    let input = match &args.input {
        Some(path) => load_estimate_input(path)
            .with_context(|| format!("loading estimate request {}", path.display()))?,
        None => {
            let project = ProjectInput {
                name: args.name.clone(),
                building_type: args.building_type,
                length: args.length.clone(),
                width: args.width.clone(),
                height: args.height.clone(),
                floors: args.floors.clone(),
                slab_thickness: args.slab_thickness.clone(),
                upper_floor_type: args.upper_floor,
            }
            .to_spec();
            EstimateInput {
                project,
                materials: MaterialSelection::from_keys(&args.materials)?,
                rates: RateConfig::new(args.labor_rate, args.contingency_rate),
            }
        }
    };

    run(&input, prices, &args.output)
}

fn cmd_wizard(output: OutputArgs, prices: PriceTable) -> Result<()> {
    println!("BuildCalc - Construction Cost Estimator");
    println!("=======================================");
    println!();
    println!("Step 1 of 2: Project details");
    println!();

    let name = prompt("Project name []: ", "");
    let building_type = prompt_parse(
        "Building type (residential/apartment/commercial) [residential]: ",
        BuildingType::Residential,
    );
    let length = prompt("Length (ft) []: ", "");
    let width = prompt("Width (ft) []: ", "");
    let height = prompt("Wall height per floor (ft) []: ", "");
    let floors = prompt("Floors [1]: ", "1");
    let slab_thickness = prompt("Slab thickness (in) [4]: ", "4");

    let mut project = ProjectInput {
        name,
        building_type,
        length,
        width,
        height,
        floors,
        slab_thickness,
        upper_floor_type: UpperFloorType::SlabOnGrade,
    };
    if project.to_spec().floors > 1 {
        project.upper_floor_type = prompt_parse(
            "Upper floor type (slab/suspended/wood) [slab]: ",
            UpperFloorType::SlabOnGrade,
        );
    }

    println!();
    println!("Step 2 of 2: Materials and rates");
    println!();

    let defaults = MaterialSelection::default();
    let mut materials = MaterialSelection::none();
    for category in MaterialCategory::ALL {
        let (label, detail) = category.description();
        let default = defaults.is_selected(category);
        let hint = if default { "Y/n" } else { "y/N" };
        let answer = prompt(&format!("Include {} ({})? [{}]: ", label, detail, hint), "");
        let selected = match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => true,
            "n" | "no" => false,
            _ => default,
        };
        materials.set(category, selected);
    }

    let rate_defaults = RateConfig::default();
    let (lmin, lmax) = RateConfig::LABOR_RANGE;
    let (cmin, cmax) = RateConfig::CONTINGENCY_RANGE;
    let rates = RateConfig::new(
        prompt_parse(
            &format!("Labor rate % ({}-{}) [{}]: ", lmin, lmax, rate_defaults.labor_rate_percent),
            rate_defaults.labor_rate_percent,
        ),
        prompt_parse(
            &format!(
                "Contingency rate % ({}-{}) [{}]: ",
                cmin, cmax, rate_defaults.contingency_rate_percent
            ),
            rate_defaults.contingency_rate_percent,
        ),
    )
    .clamped();

    println!();
    let input = EstimateInput {
        project: project.to_spec(),
        materials,
        rates,
    };
    run(&input, prices, &output)
}

fn cmd_prices(prices: &PriceTable) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(prices)?);
    Ok(())
}

/// Estimate, print, and optionally export.
fn run(input: &EstimateInput, prices: PriceTable, output: &OutputArgs) -> Result<()> {
    let estimator = Estimator::new(prices);
    let result = estimator.estimate(&input.project, &input.materials, &input.rates);
    info!(
        lines = result.line_items.len(),
        total = result.total,
        "estimate complete"
    );

    if output.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_breakdown(input, &result);
    }

    let report_path = match (&output.report, output.save_report) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(PathBuf::from(report_file_name(&input.project, Utc::now()))),
        (None, false) => None,
    };
    if let Some(path) = report_path {
        export_report(input, &result, estimator.prices(), &path)?;
    }
    Ok(())
}

fn export_report(
    input: &EstimateInput,
    result: &EstimateResult,
    prices: &PriceTable,
    path: &Path,
) -> Result<()> {
    let text = EstimateReport::new(
        &input.project,
        &input.rates,
        result,
        prices,
        Local::now().date_naive(),
    )
    .render();
    save_report(&text, path).with_context(|| format!("saving report {}", path.display()))?;
    eprintln!("Report saved to {}", path.display());
    Ok(())
}

fn print_breakdown(input: &EstimateInput, result: &EstimateResult) {
    let project = &input.project;
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  {} ({})", project.display_name(), project.building_type.description());
    println!(
        "  {} floor(s) • {} sq ft total",
        result.floors,
        estimate_core::format::format_grouped(result.total_floor_area)
    );
    println!("═══════════════════════════════════════════════════════════════════");
    println!();

    if result.line_items.is_empty() {
        println!("  No materials selected.");
    }
    for item in &result.line_items {
        println!(
            "  {:<22} {:>10} {:<9} ${:>13}",
            item.name,
            item.display_quantity(),
            item.unit,
            format_currency(item.cost)
        );
        println!("  {:<22} {}", "", item.note);
    }

    println!();
    println!("  {:<43} ${:>13}", "Materials Subtotal", format_currency(result.material_subtotal));
    println!(
        "  {:<43} ${:>13}",
        format!("Labor ({}%)", input.rates.labor_rate_percent),
        format_currency(result.labor_cost)
    );
    println!(
        "  {:<43} ${:>13}",
        format!("Contingency ({}%)", input.rates.contingency_rate_percent),
        format_currency(result.contingency_cost)
    );
    println!("───────────────────────────────────────────────────────────────────");
    println!("  {:<43} ${:>13}", "TOTAL ESTIMATE", format_currency(result.total));
    println!("═══════════════════════════════════════════════════════════════════");
}

/// Print a prompt and read one line, falling back to `default` on EOF or error.
fn prompt(text: &str, default: &str) -> String {
    print!("{}", text);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => default.to_string(),
        Ok(_) => {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                default.to_string()
            } else {
                trimmed.to_string()
            }
        }
    }
}

/// Prompt for a parseable value, keeping `default` when the answer does not parse.
fn prompt_parse<T: std::str::FromStr>(text: &str, default: T) -> T {
    prompt(text, "").parse().unwrap_or(default)
}
