use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "churnverse", version, about = "ChurnVerse card inactivity alerts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every user's cards once and send the inactivity alerts
    Run {
        #[arg(long, help = "Evaluate as of this date (YYYY-MM-DD) instead of today")]
        date: Option<NaiveDate>,
        #[arg(long, help = "Override the warning threshold in days")]
        warning_days: Option<i64>,
        #[arg(long, help = "Override the critical threshold in days")]
        critical_days: Option<i64>,
        #[arg(long, default_value_t = false, help = "Log the alerts instead of sending them")]
        dry_run: bool,
    },
    /// Keep running and check the cards every day at ALERT_SEND_TIME
    Schedule,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_overrides() {
        let cli = Cli::try_parse_from([
            "churnverse",
            "run",
            "--date",
            "2024-06-01",
            "--warning-days",
            "30",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                date,
                warning_days,
                critical_days,
                dry_run,
            } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 1));
                assert_eq!(warning_days, Some(30));
                assert_eq!(critical_days, None);
                assert!(dry_run);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(Cli::try_parse_from(["churnverse", "run", "--date", "01/06/2024"]).is_err());
    }

    #[test]
    fn parses_schedule() {
        let cli = Cli::try_parse_from(["churnverse", "schedule"]).unwrap();
        assert!(matches!(cli.command, Commands::Schedule));
    }
}
