use clap::Subcommand;
use studyzen_core::{Accounts, Store};

#[derive(Subcommand)]
pub enum AccountAction {
    /// Create a new account
    Register {
        username: String,
        /// Display name shown to other users
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
    },
    /// Verify credentials
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Search users by username or display name
    Search { query: String },
    /// Follow another user
    Follow { username: String, target: String },
    /// Unfollow a user
    Unfollow { username: String, target: String },
}

pub fn run(action: AccountAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let accounts = Accounts::new(&store);

    match action {
        AccountAction::Register {
            username,
            name,
            password,
        } => {
            let user = accounts.register(&username, &name, &password)?;
            println!("registered {}", user.username);
        }
        AccountAction::Login { username, password } => match accounts
            .authenticate(&username, &password)?
        {
            Some(user) => println!("welcome back, {}", user.display_name),
            None => {
                eprintln!("invalid username or password");
                std::process::exit(1);
            }
        },
        AccountAction::Search { query } => {
            let found = accounts.search(&query)?;
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
        AccountAction::Follow { username, target } => {
            if accounts.follow(&username, &target)? {
                println!("{username} now follows {target}");
            } else {
                println!("no change");
            }
        }
        AccountAction::Unfollow { username, target } => {
            if accounts.unfollow(&username, &target)? {
                println!("{username} unfollowed {target}");
            } else {
                println!("no change");
            }
        }
    }
    Ok(())
}
