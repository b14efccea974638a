use clap::Subcommand;
use studyzen_core::format::relative_time;
use studyzen_core::{Notifications, Store};

#[derive(Subcommand)]
pub enum NotifyAction {
    /// List a user's notifications, newest first
    List {
        username: String,
        /// Only unread notifications
        #[arg(long)]
        unread: bool,
    },
    /// Mark a notification as read
    Read { id: String },
}

pub fn run(action: NotifyAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let notifications = Notifications::new(&store);

    match action {
        NotifyAction::List { username, unread } => {
            let now = chrono::Utc::now();
            for n in notifications.for_user(&username)? {
                if unread && n.read {
                    continue;
                }
                let mark = if n.read { " " } else { "*" };
                println!(
                    "{mark} [{}] {}: {} ({})",
                    n.id,
                    n.title,
                    n.message,
                    relative_time(n.created_at, now)
                );
            }
        }
        NotifyAction::Read { id } => match notifications.mark_read(&id)? {
            Some(n) => println!("read: {}", n.title),
            None => {
                eprintln!("unknown notification id: {id}");
                std::process::exit(1);
            }
        },
    }
    Ok(())
}
