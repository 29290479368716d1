use clap::Parser;
use postbox::{Client, CreatePostRequest};
use std::process::ExitCode;
use std::time::Duration;

/// Create one post, then list everything the server holds.
#[derive(Debug, Parser)]
#[command(name = "postbox-client", version, about)]
struct Args {
    /// Server root URL.
    #[arg(long, env = "POSTBOX_URL", default_value = "http://127.0.0.1:3000")]
    url: String,

    #[arg(long, default_value = "My very first post")]
    title: String,

    #[arg(long, default_value = "This is a test post")]
    content: String,

    #[arg(long, default_value = "postbox client")]
    author: String,

    /// Per-call timeout in milliseconds.
    #[arg(long, default_value_t = 1000)]
    timeout_ms: u64,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> postbox::Result<()> {
    let client = Client::with_timeout(args.url, Duration::from_millis(args.timeout_ms))?;

    let post = client.create_post(&CreatePostRequest::new(args.title, args.content, args.author))?;
    println!("Created post: {post:?}");

    println!("\nAll posts:");
    for p in client.get_posts()? {
        println!(
            "Title: {}\nAuthor: {}\nContent: {}\nView count: {}\n",
            p.title, p.author, p.content, p.view_count
        );
    }
    Ok(())
}
