//! Opstrack CLI - construction operation tracking.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use opstrack_core::{format_duration, to_days, Blocker, BlockerCategory, OperationId, PhaseId};
use opstrack_engine::{parse_kind, template, total_template_duration, InsertPosition, PhaseBlueprint};
use opstrack_service::{summarize, done_phase_count, OperationManager};
use opstrack_storage::JsonStore;
use tracing::Level;

#[derive(Parser)]
#[command(name = "opstrack")]
#[command(about = "Construction operation tracking", long_about = None)]
struct Cli {
    /// Storage directory
    #[arg(long, default_value = ".opstrack")]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an operation from its kind's template
    Create {
        /// Operation name
        name: String,
        /// Kind: OPP, VEFA, MANDAT_ETUDES, MANDAT_REALISATION, AMO
        #[arg(long)]
        kind: String,
        /// Responsible project officer
        #[arg(long)]
        officer: String,
        /// Budget in euros
        #[arg(long, default_value = "500000")]
        budget: f64,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// Planned end date (YYYY-MM-DD)
        #[arg(long)]
        end: String,
    },
    /// List operations
    List,
    /// Show one operation and its phases
    Show {
        /// Operation ID
        id: String,
    },
    /// Show a kind's phase template
    Template {
        /// Kind: OPP, VEFA, MANDAT_ETUDES, MANDAT_REALISATION, AMO
        kind: String,
    },
    /// Add a phase to an operation
    AddPhase {
        /// Operation ID
        operation: String,
        /// Phase name
        name: String,
        /// Duration value
        #[arg(long, default_value = "30")]
        duration: i64,
        /// Duration unit: jours, semaines, mois
        #[arg(long, default_value = "jours")]
        unit: String,
        /// Display color
        #[arg(long, default_value = "#1f77b4")]
        color: String,
        /// Insert before this phase ID instead of appending
        #[arg(long)]
        before: Option<String>,
    },
    /// Change a phase's status
    SetStatus {
        /// Operation ID
        operation: String,
        /// Phase ID
        phase: String,
        /// Status: pending, in-progress, done, delayed
        status: String,
    },
    /// Report a blocker against a phase
    AddBlocker {
        /// Operation ID
        operation: String,
        /// Phase ID
        phase: String,
        /// Blocker title
        title: String,
        /// Category: supplier, technical, validation, weather, admin, resources
        #[arg(long, default_value = "technical")]
        category: String,
        /// Reporter name
        #[arg(long, default_value = "cli")]
        reporter: String,
    },
    /// Lift every blocker on a phase
    ClearBlockers {
        /// Operation ID
        operation: String,
        /// Phase ID
        phase: String,
    },
    /// Extend a phase's end date
    Reschedule {
        /// Operation ID
        operation: String,
        /// Phase ID
        phase: String,
        /// Days to add
        #[arg(long, default_value = "7")]
        days: u32,
    },
    /// Print the Gantt timeline of an operation
    Timeline {
        /// Operation ID
        id: String,
    },
    /// Portfolio dashboard
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .init();

    let cli = Cli::parse();

    let store = JsonStore::new(&cli.data_dir).await?;
    let mut manager = OperationManager::new(store);

    match cli.command {
        Commands::Create { name, kind, officer, budget, start, end } => {
            let req = opstrack_service::CreateOperationRequest {
                name,
                kind: parse_kind(&kind)?,
                officer,
                budget,
                start: parse_date(&start)?,
                planned_end: parse_date(&end)?,
                custom_blueprints: None,
            };
            let op = manager.create_operation(req).await?;
            println!("Created operation {} with {} phases", op.id, op.phases.len());
            println!(
                "  {} | {} | {} -> {}",
                op.name, op.kind, op.start, op.phases.last().map(|p| p.end).unwrap_or(op.start)
            );
        }
        Commands::List => {
            let operations = manager.list().await?;
            println!("Operations ({})", operations.len());
            for op in operations {
                println!(
                    "  {} | {} | {} | {} | {}/{} phases",
                    op.id,
                    op.kind,
                    op.status,
                    op.officer,
                    done_phase_count(&op),
                    op.phases.len(),
                );
            }
        }
        Commands::Show { id } => {
            let op = manager.get(parse_operation_id(&id)?).await?;
            println!("Operation: {}", op.id);
            println!("  Name: {}", op.name);
            println!("  Kind: {}", op.kind);
            println!("  Officer: {}", op.officer);
            println!("  Status: {}", op.status);
            println!("  Budget: {:.0} EUR", op.budget);
            println!("  Window: {} -> {}", op.start, op.planned_end);
            println!("  Phases:");
            for phase in &op.phases {
                let marker = if phase.is_blocked() { " [!]" } else { "" };
                println!(
                    "    {} | {} -> {} | {} | {}{}",
                    phase.id, phase.start, phase.end, phase.status, phase.name, marker,
                );
            }
        }
        Commands::Template { kind } => {
            let kind = parse_kind(&kind)?;
            let blueprints = template(kind);
            println!(
                "Template {} : {} phases, {}",
                kind,
                blueprints.len(),
                format_duration(total_template_duration(kind)),
            );
            for (i, bp) in blueprints.iter().enumerate() {
                println!("  {:2}. {} ({})", i + 1, bp.name, format_duration(bp.duration_days));
            }
        }
        Commands::AddPhase { operation, name, duration, unit, color, before } => {
            let days = to_days(duration, unit.parse()?)?;
            let blueprint = PhaseBlueprint::new(name, days, color);
            let position = match before {
                Some(target) => InsertPosition::Before(parse_phase_id(&target)?),
                None => InsertPosition::Append,
            };
            let op = manager
                .add_phase(parse_operation_id(&operation)?, &blueprint, position)
                .await?;
            println!("Added phase; operation now has {} phases", op.phases.len());
        }
        Commands::SetStatus { operation, phase, status } => {
            let status = status.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            manager
                .set_phase_status(parse_operation_id(&operation)?, parse_phase_id(&phase)?, status)
                .await?;
            println!("Phase status set to {}", status);
        }
        Commands::AddBlocker { operation, phase, title, category, reporter } => {
            let blocker = Blocker::new(title, reporter).with_category(parse_category(&category)?);
            let op = manager
                .add_blocker(parse_operation_id(&operation)?, parse_phase_id(&phase)?, blocker)
                .await?;
            let agg = opstrack_engine::aggregates(&op.phases);
            println!("Blocker recorded ({} blocked phases)", agg.blocked_phase_count);
        }
        Commands::ClearBlockers { operation, phase } => {
            manager
                .clear_blockers(parse_operation_id(&operation)?, parse_phase_id(&phase)?)
                .await?;
            println!("Blockers lifted");
        }
        Commands::Reschedule { operation, phase, days } => {
            manager
                .reschedule_phase(parse_operation_id(&operation)?, parse_phase_id(&phase)?, days)
                .await?;
            println!("Phase extended by {} days", days);
        }
        Commands::Timeline { id } => {
            let op_id = parse_operation_id(&id)?;
            let op = manager.get(op_id).await?;
            let layout = manager.timeline(op_id).await?;
            if layout.bars.is_empty() {
                println!("No phases on {}", op.name);
                return Ok(());
            }
            println!("Timeline {} ({})", op.name, op.kind);
            for bar in &layout.bars {
                let marker = if bar.has_blocker_marker { " [!]" } else { "" };
                println!(
                    "  {} +{:>4}d {} {}{}",
                    bar.start,
                    bar.span_days,
                    bar.color,
                    bar.label,
                    marker,
                );
            }
            println!("  ({} connectors)", layout.connectors.len());
        }
        Commands::Dashboard => {
            let operations = manager.list().await?;
            let summary = summarize(&operations);
            println!("Portfolio");
            println!("  Operations: {}", summary.operation_count);
            println!("  Total budget: {:.0} EUR", summary.total_budget);
            println!("  Average progress: {:.1}%", summary.average_progress * 100.0);
            println!("  Delayed phases: {}", summary.delayed_phase_count);
            println!("  Blocked phases: {}", summary.blocked_phase_count);
            println!("  Blocked operations: {}", summary.blocked_operation_count);
        }
    }

    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("invalid date (expected YYYY-MM-DD): {s}"))
}

fn parse_operation_id(s: &str) -> Result<OperationId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("invalid operation ID: {s}"))
}

fn parse_phase_id(s: &str) -> Result<PhaseId> {
    s.parse().map_err(|_| anyhow::anyhow!("invalid phase ID: {s}"))
}

fn parse_category(s: &str) -> Result<BlockerCategory> {
    let category = match s.to_ascii_lowercase().as_str() {
        "supplier" | "fournisseur" => BlockerCategory::SupplierDelay,
        "technical" | "technique" => BlockerCategory::Technical,
        "validation" => BlockerCategory::PendingValidation,
        "weather" | "meteo" => BlockerCategory::Weather,
        "admin" | "administrative" => BlockerCategory::Administrative,
        "resources" | "ressources" => BlockerCategory::Resources,
        "other" | "autre" => BlockerCategory::Other,
        other => anyhow::bail!("unknown blocker category: {other}"),
    };
    Ok(category)
}
