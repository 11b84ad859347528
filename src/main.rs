use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod aircraft;
mod analytics;
mod cache;
mod category;
mod charts;
mod error;
mod export;
mod gateway;
mod hardware;
mod normalizer;
mod percents;
mod stats;

use analytics::{AnalyticsClient, Dimension, UserGroup};
use export::CsvReport;
use gateway::{GatewayClient, GatewayStat};
use hardware::HardwareStats;
use percents::{counts_to_percents, map_to_percents, rank_by_count};
use stats::AircraftStats;

#[derive(Parser)]
#[command(name = "simstats")]
#[command(about = "Usage analytics for X-Plane: aircraft, hardware, VR, and Scenery Gateway", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Aircraft popularity report (rankings, categories, first- vs third-party)
    Aircraft {
        /// Simulator version window (e.g. 11, 10, 11.33r2)
        #[arg(long, default_value = "11")]
        version: String,

        /// Which users to include
        #[arg(long, value_enum, default_value_t = UserGroup::PaidOnly)]
        group: UserGroup,

        /// Write a sectioned CSV report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Render PNG charts
        #[arg(long)]
        charts: bool,

        /// Output directory for charts (default: current directory)
        #[arg(long)]
        chart_dir: Option<PathBuf>,
    },

    /// Hardware, OS, VR, and flight-controls report
    Hardware {
        /// Simulator version window (e.g. 11, 10, 11.33r2)
        #[arg(long, default_value = "11")]
        version: String,

        /// Which users to include
        #[arg(long, value_enum, default_value_t = UserGroup::PaidOnly)]
        group: UserGroup,

        /// Write a sectioned CSV report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Render PNG charts
        #[arg(long)]
        charts: bool,

        /// Output directory for charts (default: current directory)
        #[arg(long)]
        chart_dir: Option<PathBuf>,
    },

    /// Scenery Gateway growth report (airports, submissions, artists)
    Gateway {
        /// Report a single counter (default: all four)
        #[arg(long, value_enum)]
        stat: Option<GatewayStat>,

        /// Write a sectioned CSV report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Render PNG charts
        #[arg(long)]
        charts: bool,

        /// Output directory for charts (default: current directory)
        #[arg(long)]
        chart_dir: Option<PathBuf>,
    },

    /// Manage the upstream response cache
    Cache {
        /// Action: stats, clear
        #[arg(default_value = "stats")]
        action: String,
    },
}

fn spinner(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::with_template("{spinner} {msg}").expect("spinner template"));
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Aircraft { version, group, output, charts, chart_dir } => {
            aircraft_report(&version, group, output, charts, chart_dir).await
        }
        Commands::Hardware { version, group, output, charts, chart_dir } => {
            hardware_report(&version, group, output, charts, chart_dir).await
        }
        Commands::Gateway { stat, output, charts, chart_dir } => {
            gateway_report(stat, output, charts, chart_dir).await
        }
        Commands::Cache { action } => cache_command(&action),
    }
}

async fn aircraft_report(
    version: &str,
    group: UserGroup,
    output: Option<PathBuf>,
    render_charts: bool,
    chart_dir: Option<PathBuf>,
) -> Result<()> {
    let window = analytics::version_named(version)?;
    let client = AnalyticsClient::from_env()?;

    let bar = spinner("Fetching aircraft usage rows...");
    let rows = client.events(window, Dimension::Aircraft, group).await?;
    bar.finish_and_clear();
    info!("aggregating {} raw rows", rows.len());

    let stats = AircraftStats::from_rows(rows)?;
    let total = stats.total_flights();

    let category_labels: Vec<(String, u64)> = rank_by_count(&stats.categories())
        .into_iter()
        .map(|(category, count)| (category.label().to_string(), count))
        .collect();
    let first_party = rank_by_count(&stats.first_party);
    let third_party = rank_by_count(&stats.third_party);
    let combined = rank_by_count(&stats.combined);

    export::print_percent_table(
        "AIRCRAFT CATEGORIES (BY POPULARITY)",
        "Category",
        &counts_to_percents(&category_labels, Some(total), 0.0),
    );
    export::print_aircraft_table("FIRST PARTY PLANES (BY POPULARITY)", &first_party, total);
    export::print_aircraft_table("THIRD PARTY PLANES (BY POPULARITY)", &third_party, total);
    export::print_aircraft_table("ALL PLANES (BY POPULARITY)", &combined, total);

    println!();
    println!(
        "Total flights: {}  (first-party {}, third-party {})",
        total,
        stats.first_party_flights(),
        stats.third_party_flights()
    );

    if let Some(path) = output {
        let mut report = CsvReport::new();
        report.percent_section(
            "AIRCRAFT CATEGORIES (BY POPULARITY)",
            "Category",
            "Flights",
            &counts_to_percents(&category_labels, Some(total), 0.0),
        );
        report.aircraft_section("FIRST PARTY PLANES (BY POPULARITY)", &first_party, total);
        report.aircraft_section("THIRD PARTY PLANES (BY POPULARITY)", &third_party, total);
        report.aircraft_section("ALL PLANES (BY POPULARITY)", &combined, total);
        report.write_to(&path)?;
        info!("wrote {}", path.display());
    }

    if render_charts {
        let dir = chart_dir.unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&dir)?;
        let suffix = export::file_suffix(version, group.label());

        charts::bar_chart_png(
            &counts_to_percents(&category_labels, Some(total), 2.0),
            &dir.join(format!("aircraft_categories{suffix}.png")),
            "Flights by Aircraft Category",
            "% Flights",
            false,
        )?;

        let first_vs_third = vec![
            (
                aircraft::LR_STUDIO.to_string(),
                percents::round_to(stats.first_party_flights() as f64 / total.max(1) as f64 * 100.0, 1),
            ),
            (
                "Third Party".to_string(),
                percents::round_to(stats.third_party_flights() as f64 / total.max(1) as f64 * 100.0, 1),
            ),
        ];
        charts::pie_chart_png(
            &first_vs_third,
            &dir.join(format!("first_vs_third_party{suffix}.png")),
            "First- vs. Third-Party Aircraft Usage",
        )?;

        charts::bar_chart_png(
            &counts_to_percents(&stats.top_third_party_labeled(10), None, 0.0),
            &dir.join(format!("top_third_party_aircraft{suffix}.png")),
            "Top Third-Party Aircraft",
            "% Third-Party Aircraft Flights",
            true,
        )?;

        charts::bar_chart_png(
            &counts_to_percents(&stats.top_first_party_labeled(10), None, 0.0),
            &dir.join(format!("top_first_party_aircraft{suffix}.png")),
            "Top First-Party Aircraft",
            "% First-Party Aircraft Flights",
            true,
        )?;
        info!("wrote charts to {}", dir.display());
    }

    Ok(())
}

async fn hardware_report(
    version: &str,
    group: UserGroup,
    output: Option<PathBuf>,
    render_charts: bool,
    chart_dir: Option<PathBuf>,
) -> Result<()> {
    let window = analytics::version_named(version)?;
    let client = AnalyticsClient::from_env()?;
    let hardware = HardwareStats::new(&client, window, group);

    let bar = spinner("Fetching hardware dimensions...");
    let platforms = hardware.operating_systems().await?;
    let os_versions = hardware.operating_system_versions().await?;
    let ram = hardware.ram_amounts().await?;
    let gpu_makers = hardware.gpu_manufacturers().await?;
    let gpu_generations = hardware.gpu_generations().await?;
    let gpu_platforms = hardware.gpu_platforms().await?;
    let vr_headsets = hardware.vr_headsets().await?;
    let vr_usage = hardware.vr_usage().await?;
    let cpu_cores = hardware.cpu_cores().await?;
    let controls = hardware.flight_controls().await?;
    bar.finish_and_clear();

    export::print_percent_table("PLATFORM BREAKDOWN", "Operating System", &platforms);
    for platform in ["Windows", "Mac", "Linux"] {
        if let Some(versions) = os_versions.get(platform) {
            export::print_percent_table(
                &format!("{} VERSIONS", platform.to_uppercase()),
                "OS Version",
                &map_to_percents(versions, None, 0.0),
            );
        }
    }
    export::print_percent_table("USERS WITH AT LEAST THIS MUCH RAM", "RAM Amount", &ram);
    export::print_percent_table("GPU MANUFACTURER", "Manufacturer", &gpu_makers);
    export::print_percent_table("GPU GENERATION", "Generation", &gpu_generations);
    export::print_percent_table("GPU PLATFORM", "Platform", &gpu_platforms);
    export::print_percent_table("VR HEADSETS", "Headset Type", &vr_headsets);
    export::print_percent_table("VR USAGE", "VR Status", &vr_usage);
    export::print_count_table("NUMBER OF CPU CORES", "CPU Cores", &cpu_cores);
    export::print_count_table(
        "PRIMARY FLIGHT CONTROLS MODEL (for non-mouse users)",
        "Flight Controls Model",
        &controls.models,
    );
    export::print_percent_table(
        "PRIMARY FLIGHT CONTROLS TYPE",
        "Flight Controls Type",
        &map_to_percents(&controls.classes, None, 0.0),
    );
    export::print_count_table(
        "USERS FLYING WITH PEDALS",
        "Has Pedals?",
        &[
            ("Yes".to_string(), controls.with_pedals),
            ("No".to_string(), controls.without_pedals),
        ],
    );

    if let Some(path) = output {
        let mut report = CsvReport::new();
        report.percent_section("PLATFORM BREAKDOWN", "Operating System", "Machines", &platforms);
        for platform in ["Windows", "Mac", "Linux"] {
            if let Some(versions) = os_versions.get(platform) {
                report.percent_section(
                    &format!("{} VERSIONS", platform.to_uppercase()),
                    "OS Version",
                    "Machines",
                    &map_to_percents(versions, None, 0.0),
                );
            }
        }
        report.percent_section("USERS WITH AT LEAST THIS MUCH RAM", "RAM Amount", "Users", &ram);
        report.percent_section("GPU MANUFACTURER", "GPU Manufacturer", "Machines", &gpu_makers);
        report.percent_section("GPU GENERATION", "GPU Generation", "Machines", &gpu_generations);
        report.percent_section("GPU PLATFORM", "GPU Platform", "Machines", &gpu_platforms);
        report.percent_section("VR HEADSETS", "Headset Type", "Users", &vr_headsets);
        report.percent_section("VR USAGE", "VR Status", "Users", &vr_usage);
        report.count_section("NUMBER OF CPU CORES", "CPU Cores", "Machines", &cpu_cores);
        report.percent_section(
            "PRIMARY FLIGHT CONTROLS TYPE",
            "Flight Controls Type",
            "Users",
            &map_to_percents(&controls.classes, None, 0.0),
        );
        report.count_section(
            "PRIMARY FLIGHT CONTROLS MODEL (for non-mouse users)",
            "Flight Controls Model",
            "Users",
            &controls.models,
        );
        report.count_section(
            "USERS FLYING WITH PEDALS",
            "Has Pedals?",
            "Users",
            &[
                ("Yes".to_string(), controls.with_pedals),
                ("No".to_string(), controls.without_pedals),
            ],
        );
        report.write_to(&path)?;
        info!("wrote {}", path.display());
    }

    if render_charts {
        let dir = chart_dir.unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&dir)?;
        let suffix = export::file_suffix(version, group.label());

        charts::pie_chart_png(
            &platforms,
            &dir.join(format!("os_breakdown{suffix}.png")),
            "Operating Systems",
        )?;
        charts::bar_chart_png(
            &ram,
            &dir.join(format!("ram_amounts{suffix}.png")),
            "Users with at Least x GB RAM",
            "% Users",
            false,
        )?;
        charts::bar_chart_png(
            &gpu_makers,
            &dir.join(format!("gpu_manufacturer{suffix}.png")),
            "GPU Manufacturers",
            "% Machines",
            false,
        )?;
        charts::bar_chart_png(
            &vr_headsets,
            &dir.join(format!("vr_headsets{suffix}.png")),
            "VR Headsets in Use",
            "% VR Users",
            false,
        )?;
        charts::pie_chart_png(
            &vr_usage,
            &dir.join(format!("vr_usage{suffix}.png")),
            "VR Adoption",
        )?;
        info!("wrote charts to {}", dir.display());
    }

    Ok(())
}

async fn gateway_report(
    stat: Option<GatewayStat>,
    output: Option<PathBuf>,
    render_charts: bool,
    chart_dir: Option<PathBuf>,
) -> Result<()> {
    let client = GatewayClient::new();
    let stats: Vec<GatewayStat> = match stat {
        Some(one) => vec![one],
        None => GatewayStat::ALL.to_vec(),
    };

    let bar = spinner("Fetching Scenery Gateway statistics...");
    let mut series = Vec::with_capacity(stats.len());
    for stat in &stats {
        series.push((*stat, client.stat_over_time(*stat).await?));
    }
    bar.finish_and_clear();

    for (stat, rows) in &series {
        export::print_count_table(stat.label(), "Month", rows);
    }

    if let Some(path) = output {
        let mut report = CsvReport::new();
        for (stat, rows) in &series {
            report.count_section(stat.label(), "Month", stat.metric_label(), rows);
        }
        report.write_to(&path)?;
        info!("wrote {}", path.display());
    }

    if render_charts {
        let dir = chart_dir.unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&dir)?;
        for (stat, rows) in &series {
            let file = format!(
                "gateway_{}.png",
                stat.label().to_lowercase().replace(' ', "_").replace(['(', ')', '-'], "")
            );
            charts::time_series_png(rows, &dir.join(file), stat.label(), stat.axis_label())?;
        }
        info!("wrote charts to {}", dir.display());
    }

    Ok(())
}

fn cache_command(action: &str) -> Result<()> {
    match action {
        "clear" => {
            cache::clear_all()?;
            println!("Response cache cleared.");
        }
        _ => {
            let stats = cache::stats()?;
            println!("Cache directory: {}", stats.cache_dir.display());
            println!("Cached responses: {}", stats.file_count);
            println!("Total size: {}", stats.format_size());
        }
    }
    Ok(())
}
