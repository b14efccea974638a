use clap::Subcommand;
use studyzen_core::{Ledger, Store, ACHIEVEMENTS};

#[derive(Subcommand)]
pub enum AchievementsAction {
    /// Evaluate predicates and report new unlocks
    Check { username: String },
    /// List all achievements with unlock status
    List { username: String },
    /// Print the global unlock log as JSON
    Log,
}

pub fn run(action: AchievementsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let ledger = Ledger::new(&store);

    match action {
        AchievementsAction::Check { username } => {
            let unlocked = ledger.check_achievements(&username)?;
            if unlocked.is_empty() {
                println!("no new achievements");
            }
            for achievement in unlocked {
                println!(
                    "{} {} -- {}",
                    achievement.icon, achievement.title, achievement.description
                );
            }
        }
        AchievementsAction::List { username } => {
            let Some(user) = ledger.user(&username)? else {
                eprintln!("unknown user: {username}");
                std::process::exit(1);
            };
            for def in ACHIEVEMENTS {
                let mark = if user.achievements.iter().any(|id| id == def.id) {
                    "[x]"
                } else {
                    "[ ]"
                };
                println!("{mark} {} {} -- {}", def.icon, def.title, def.description);
            }
        }
        AchievementsAction::Log => {
            let log = ledger.unlock_log()?;
            println!("{}", serde_json::to_string_pretty(&log)?);
        }
    }
    Ok(())
}
