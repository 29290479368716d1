use clap::Parser;
use postbox::{BlogServer, PostStore, Server, WritePolicy, DEFAULT_FILE};
use std::path::PathBuf;
use std::process::ExitCode;

/// Serve posts stored in a JSON file.
#[derive(Debug, Parser)]
#[command(name = "postbox", version, about)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "POSTBOX_ADDR", default_value = "0.0.0.0:3000")]
    addr: String,

    /// Posts file. Must exist unless --init is given.
    #[arg(long, env = "POSTBOX_FILE", default_value = DEFAULT_FILE)]
    file: PathBuf,

    /// `direct` (no locking, lost updates possible) or `serialized`.
    #[arg(long, env = "POSTBOX_POLICY", default_value = "direct")]
    policy: WritePolicy,

    /// Write single-line JSON instead of indented.
    #[arg(long)]
    compact: bool,

    /// Create the posts file with an empty list if it is missing.
    #[arg(long)]
    init: bool,
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
    let store = PostStore::builder(&args.file)
        .pretty(!args.compact)
        .policy(args.policy)
        .build()?;
    if args.init {
        store.init()?;
    }
    log::info!(
        "serving {} with {:?} write policy",
        store.path().display(),
        store.policy()
    );
    Server::bind(args.addr.as_str(), BlogServer::new(store))?.serve()
}
