use chrono::Utc;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use parkade::application::facility::Facility;
use parkade::config::{AllocationKind, PricingConfig, PricingKind};
use parkade::error::ParkingError;
use parkade::infrastructure::clock::ManualClock;
use parkade::interfaces::csv::availability_writer::AvailabilityWriter;
use parkade::interfaces::csv::event_reader::{Event, EventReader, ExitTarget};
use parkade::interfaces::csv::slot_reader::SlotReader;
use parkade::logging;
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Slot layout CSV file (slot, category, floor, charger)
    slots: PathBuf,

    /// Events CSV file (type, at, plate, category, stay, channel, policy)
    events: PathBuf,

    /// Initial slot allocation policy
    #[arg(long, value_enum, default_value_t = AllocationKind::Nearest)]
    allocation: AllocationKind,

    /// Seed for random allocation, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Initial pricing policy
    #[arg(long, value_enum, default_value_t = PricingKind::Hourly)]
    pricing: PricingKind,

    /// JSON file overriding the default rate tables
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Facility name used in logs
    #[arg(long, default_value = "Premium Parking")]
    name: String,
}

async fn apply(
    facility: &Facility,
    event: Event,
    seed: Option<u64>,
    rates: &PricingConfig,
) -> parkade::error::Result<()> {
    match event {
        Event::Park { vehicle, .. } => {
            facility.park(vehicle).await?;
        }
        Event::Exit {
            target, channel, ..
        } => {
            let stay = match target {
                ExitTarget::Stay(id) => id,
                ExitTarget::Plate(plate) => facility
                    .active_stay_for(&plate)
                    .await
                    .map(|stay| stay.id)
                    .ok_or_else(|| {
                        ParkingError::Validation(format!("No active stay for plate {plate}"))
                    })?,
            };
            let settler = channel.settler();
            facility.exit(stay, settler.as_ref()).await?;
        }
        Event::Allocation { kind, .. } => {
            facility.set_allocation_policy(kind.build(seed)).await;
        }
        Event::Pricing { kind, .. } => {
            facility.set_pricing_policy(rates.policy(kind)).await;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let rates = match &cli.rates {
        Some(path) => PricingConfig::load(path).into_diagnostic()?,
        None => PricingConfig::default(),
    };

    let layout = File::open(&cli.slots).into_diagnostic()?;
    let slots = SlotReader::new(layout)
        .slots()
        .collect::<parkade::error::Result<Vec<_>>>()
        .into_diagnostic()?;

    // Event timestamps drive the clock, so fees follow the scripted times.
    let clock = ManualClock::new(Utc::now());
    let facility = Facility::builder(cli.name)
        .slots(slots)
        .allocation(cli.allocation.build(cli.seed))
        .pricing(rates.policy(cli.pricing))
        .clock(Box::new(clock.clone()))
        .build()
        .into_diagnostic()?;

    let file = File::open(&cli.events).into_diagnostic()?;
    for event in EventReader::new(file).events() {
        match event {
            Ok(event) => {
                clock.set(event.at());
                if let Err(e) = apply(&facility, event, cli.seed, &rates).await {
                    eprintln!("Error processing event: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error reading event: {}", e);
            }
        }
    }

    let snapshot = facility.availability_snapshot().await;
    let stdout = io::stdout();
    let mut writer = AvailabilityWriter::new(stdout.lock());
    writer.write_snapshot(&snapshot).into_diagnostic()?;

    Ok(())
}
