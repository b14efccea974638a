use clap::Subcommand;
use studyzen_core::format::format_duration;
use studyzen_core::{Ledger, Store};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Full aggregate stats for a user
    Show { username: String },
    /// Time studied today
    Today { username: String },
    /// Per-subject totals, most-studied first
    Subjects { username: String },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let ledger = Ledger::new(&store);

    match action {
        StatsAction::Show { username } => match ledger.stats(&username)? {
            Some(stats) => println!("{}", serde_json::to_string_pretty(&stats)?),
            None => {
                eprintln!("unknown user: {username}");
                std::process::exit(1);
            }
        },
        StatsAction::Today { username } => {
            let seconds = ledger.today_study_time(&username)?;
            println!("{}", format_duration(seconds));
        }
        StatsAction::Subjects { username } => {
            for entry in ledger.subject_totals(&username)? {
                println!("{}  {}", entry.subject, format_duration(entry.seconds));
            }
        }
    }
    Ok(())
}
