use anyhow::{bail, Context, Result};
use clap::Parser;
use regex::Regex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rigkontrol_midi::{bridge, daemon, midi, InputDevice, MidiOut, Pedal, Resolution};

/// Turn RigKontrol3 footswitch and expression-pedal events into ALSA
/// sequencer MIDI events.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Event device of the controller, e.g. /dev/input/event17
    #[arg(value_name = "DEVICE")]
    device: String,

    /// Stay attached to the terminal instead of detaching after setup
    #[arg(short, long)]
    foreground: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let pattern = Regex::new("^/dev/input/event").expect("device pattern compiles");
    if !pattern.is_match(&cli.device) {
        bail!(
            "{} is not an input event device (expected /dev/input/eventNN)",
            cli.device
        );
    }

    let mut device =
        InputDevice::open(&cli.device).with_context(|| format!("cannot use {}", cli.device))?;
    let mut out = MidiOut::open().context("cannot open ALSA sequencer")?;
    let mut pedal = Pedal::new(Resolution::default());

    info!(
        device = %cli.device,
        channel = midi::CHANNEL,
        "translating controller events"
    );

    if !cli.foreground {
        daemon::daemonize().context("cannot detach from session")?;
    }

    bridge::run(&mut device, &mut out, &mut pedal).context("MIDI output failed")?;
    Ok(())
}
