use chrono::Utc;
use clap::Subcommand;
use study_catcher_core::session;
use study_catcher_core::stats::{format_hours_minutes, DashboardSummary};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Dashboard summary
    Summary,
    /// Sessions from the last 7 days
    Recent,
    /// Today's sessions
    Today,
    /// Full session log
    All,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mgr = super::open_manager();
    let now = Utc::now();

    match action {
        StatsAction::Summary => {
            let summary = DashboardSummary::compute(mgr.sessions(), mgr.total_secs(), now);
            println!("{}", serde_json::to_string_pretty(&summary)?);
            println!("total:   {}", format_hours_minutes(summary.total_secs));
            println!("today:   {}", format_hours_minutes(summary.today_secs));
            println!(
                "average: {}",
                format_hours_minutes(summary.average_session_secs)
            );
        }
        StatsAction::Recent => {
            let recent = session::within_last_week(mgr.sessions(), now);
            println!("{}", serde_json::to_string_pretty(&recent)?);
        }
        StatsAction::Today => {
            let today = session::on_same_local_day(mgr.sessions(), now);
            println!("{}", serde_json::to_string_pretty(&today)?);
        }
        StatsAction::All => {
            println!("{}", serde_json::to_string_pretty(mgr.sessions())?);
        }
    }
    Ok(())
}
