use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use study_catcher_core::stats::format_clock;
use study_catcher_core::Config;

#[derive(Subcommand)]
pub enum TimerAction {
    /// List available presets
    Presets,
    /// Run a study session with the given preset
    Run {
        /// Preset ID (e.g. "preset-1")
        preset: String,
        /// Stop after this many seconds instead of the preset duration
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Update the custom preset
    SetCustom {
        /// Duration in minutes
        #[arg(long)]
        duration: u32,
        /// Number of breaks
        #[arg(long, default_value = "1")]
        intervals: u32,
    },
    /// Print the current timer snapshot as JSON
    Status,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut mgr = super::open_manager();

    match action {
        TimerAction::Presets => {
            println!("{}", serde_json::to_string_pretty(mgr.presets())?);
        }
        TimerAction::Run { preset, seconds } => {
            if !mgr.select_preset(&preset) {
                return Err(format!("unknown preset: {preset}").into());
            }
            let target_secs = seconds.unwrap_or_else(|| {
                mgr.selected_preset()
                    .map(|p| u64::from(p.duration_min) * 60)
                    .unwrap_or(0)
            });

            let started = mgr
                .start_timer()
                .ok_or("timer failed to start (already running?)")?;
            println!("{}", serde_json::to_string_pretty(&started)?);

            // One tick per elapsed second, owned by this loop for the
            // whole run.
            let mut stdout = std::io::stdout();
            for _ in 0..target_secs {
                std::thread::sleep(Duration::from_secs(1));
                let elapsed = mgr.tick();
                write!(stdout, "\r{}", format_clock(elapsed))?;
                stdout.flush()?;
            }
            println!();

            let stopped = mgr.stop_timer();
            println!("{}", serde_json::to_string_pretty(&stopped)?);
        }
        TimerAction::SetCustom {
            duration,
            intervals,
        } => {
            let preset = mgr
                .update_custom_preset(duration, intervals)
                .ok_or("duration must be at least 1 minute")?
                .clone();
            let mut config = Config::load_or_default();
            config.custom_preset.duration_min = duration;
            config.custom_preset.intervals = intervals;
            config.save()?;
            println!("{}", serde_json::to_string_pretty(&preset)?);
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&mgr.snapshot())?);
        }
    }
    Ok(())
}
