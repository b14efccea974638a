use clap::Subcommand;
use studyzen_core::{Community, PostFilter, Store};

#[derive(Subcommand)]
pub enum CommunityAction {
    /// Create a forum post
    Post {
        username: String,
        title: String,
        content: String,
        #[arg(long)]
        subject: Option<String>,
        /// May be given multiple times
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// List posts, newest first
    List {
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        username: Option<String>,
    },
    /// Like a post
    Like { id: String },
    /// Comment on a post
    Comment {
        id: String,
        username: String,
        content: String,
    },
}

pub fn run(action: CommunityAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let community = Community::new(&store);

    match action {
        CommunityAction::Post {
            username,
            title,
            content,
            subject,
            tags,
        } => {
            let post =
                community.create_post(&username, &title, &content, subject.as_deref(), tags)?;
            println!("{}", serde_json::to_string_pretty(&post)?);
        }
        CommunityAction::List { subject, username } => {
            let posts = community.posts(&PostFilter { subject, username })?;
            println!("{}", serde_json::to_string_pretty(&posts)?);
        }
        CommunityAction::Like { id } => match community.like_post(&id)? {
            Some(post) => println!("{} now has {} likes", post.title, post.likes),
            None => {
                eprintln!("unknown post id: {id}");
                std::process::exit(1);
            }
        },
        CommunityAction::Comment {
            id,
            username,
            content,
        } => match community.add_comment(&id, &username, &content)? {
            Some(post) => println!("{} comments on '{}'", post.comments.len(), post.title),
            None => {
                eprintln!("unknown post id: {id}");
                std::process::exit(1);
            }
        },
    }
    Ok(())
}
