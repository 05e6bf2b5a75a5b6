//! `slotbook` CLI -- manage provider availability and client reservations
//! from the command line, backed by a JSON state file.
//!
//! ## Usage
//!
//! ```sh
//! # Declare a provider's availability window
//! slotbook add-availability --provider 1 \
//!     --start 2026-08-10T09:00:00Z --end 2026-08-10T12:00:00Z
//!
//! # List the bookable 15-minute slots derived from it
//! slotbook list-slots --provider 1
//!
//! # Request a reservation (at least 24 hours in advance)
//! slotbook reserve --provider 1 --client Alice \
//!     --start 2026-08-10T09:00:00Z --end 2026-08-10T09:15:00Z
//!
//! # Confirm it
//! slotbook confirm 1
//!
//! # Drop unconfirmed reservations older than 30 minutes
//! slotbook cleanup
//! ```
//!
//! State lives in `slotbook.json` by default; `--state` points at a
//! different file. Each invocation loads the snapshot, applies one
//! operation with the current UTC time, and writes the snapshot back.
//! Nothing is written when the operation fails.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde_json::json;
use slotbook_engine::{Policy, ProviderId, ReservationId, Scheduler, Snapshot};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slotbook",
    version,
    about = "Provider availability and reservation scheduling"
)]
struct Cli {
    /// Path to the JSON state file
    #[arg(long, global = true, default_value = "slotbook.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Declare an availability window for a provider
    AddAvailability {
        #[arg(long)]
        provider: ProviderId,
        /// Window start (RFC 3339, e.g. 2026-08-10T09:00:00Z)
        #[arg(long, value_parser = parse_timestamp)]
        start: DateTime<Utc>,
        /// Window end (RFC 3339)
        #[arg(long, value_parser = parse_timestamp)]
        end: DateTime<Utc>,
    },
    /// List every bookable slot derived from the provider's windows
    ListSlots {
        #[arg(long)]
        provider: ProviderId,
    },
    /// List derived slots together with their confirmed-booking state
    SlotStatus {
        #[arg(long)]
        provider: ProviderId,
    },
    /// Request a reservation against a provider slot
    Reserve {
        #[arg(long)]
        provider: ProviderId,
        /// Name of the client making the reservation
        #[arg(long)]
        client: String,
        /// Reservation start (RFC 3339)
        #[arg(long, value_parser = parse_timestamp)]
        start: DateTime<Utc>,
        /// Reservation end (RFC 3339)
        #[arg(long, value_parser = parse_timestamp)]
        end: DateTime<Utc>,
    },
    /// Confirm a pending reservation
    Confirm { reservation_id: ReservationId },
    /// Remove unconfirmed reservations older than the grace period
    Cleanup,
    /// List a provider's reservations
    Reservations {
        #[arg(long)]
        provider: ProviderId,
    },
}

fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp {raw:?}: {e}"))
}

fn load(path: &Path) -> Result<Scheduler> {
    if !path.exists() {
        return Ok(Scheduler::new());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading state file {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&raw)
        .with_context(|| format!("parsing state file {}", path.display()))?;
    Ok(Scheduler::from_snapshot(snapshot, Policy::default()))
}

fn store(path: &Path, engine: &Scheduler) -> Result<()> {
    let snapshot = engine.snapshot()?;
    let raw = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, raw).with_context(|| format!("writing state file {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let engine = load(&cli.state)?;
    let now = Utc::now();

    let output = match cli.command {
        Commands::AddAvailability {
            provider,
            start,
            end,
        } => {
            let window_id = engine.add_availability(provider, start, end)?;
            json!({ "window_id": window_id })
        }
        Commands::ListSlots { provider } => serde_json::to_value(engine.available_slots(provider)?)?,
        Commands::SlotStatus { provider } => serde_json::to_value(engine.slot_statuses(provider)?)?,
        Commands::Reserve {
            provider,
            client,
            start,
            end,
        } => {
            let reservation_id = engine.request_reservation(provider, &client, start, end, now)?;
            json!({ "reservation_id": reservation_id })
        }
        Commands::Confirm { reservation_id } => {
            engine.confirm_reservation(reservation_id)?;
            json!({ "confirmed": reservation_id })
        }
        Commands::Cleanup => {
            let removed = engine.run_cleanup(now)?;
            json!({ "removed": removed })
        }
        Commands::Reservations { provider } => {
            serde_json::to_value(engine.reservations_for(provider)?)?
        }
    };

    store(&cli.state, &engine)?;
    println!("{output}");
    Ok(())
}
