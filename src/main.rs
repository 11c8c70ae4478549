use clap::error::ErrorKind;
use clap::{ArgGroup, Parser, Subcommand};
use gitlet::areas::repository::Repository;
use gitlet::artifacts::core::PagerWriter;
use gitlet::errors::GitletError;
use is_terminal::IsTerminal;
use minus::Pager;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directives
const LOG_ENV: &str = "GITLET_LOG";
/// Environment variable disabling the pager for history output
const NO_PAGER_ENV: &str = "NO_PAGER";

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A small local version-control system",
    long_about = "gitlet snapshots the files of the current directory into an \
    immutable commit history, with branches and three-way merges.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

COMMANDS:
{subcommands}

OPTIONS:
    {options}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Create a repository in the current directory")]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "commit", about = "Record the staged changes")]
    Commit {
        #[arg(index = 1, allow_hyphen_values = true)]
        message: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage a tracked file for removal"
    )]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current head")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1, allow_hyphen_values = true)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged files and working tree state")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file> restores a file from the head commit, \
        checkout <commit-id> -- <file> restores it from the given commit and \
        checkout <branch> switches to a branch."
    )]
    #[command(group(
        ArgGroup::new("checkout_source")
            .required(true)
            .multiple(true)
            .args(["target", "file"])
    ))]
    Checkout {
        #[arg(index = 1, help = "Commit id (with a file) or branch name")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "File to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the head commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "reset", about = "Check out a commit and move the current branch to it")]
    Reset {
        #[arg(index = 1)]
        commit_id: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

impl Commands {
    fn is_paged(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    colored::control::set_override(std::io::stdout().is_terminal());

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return report_usage_error(error),
    };

    let Some(command) = cli.command else {
        println!("{}", GitletError::NoCommand);
        return ExitCode::SUCCESS;
    };

    match run(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => match error.downcast_ref::<GitletError>() {
            Some(gitlet_error) => {
                println!("{}", gitlet_error);
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("fatal: {:#}", error);
                ExitCode::FAILURE
            }
        },
    }
}

fn init_tracing() {
    let default_directives = if cfg!(feature = "debug_merge") {
        "warn,gitlet::artifacts::merge=trace"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn report_usage_error(error: clap::Error) -> ExitCode {
    let usage_error = match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => GitletError::NoCommand,
        ErrorKind::InvalidSubcommand => GitletError::UnknownCommand,
        _ => GitletError::IncorrectOperands,
    };

    tracing::debug!(kind = ?error.kind(), "rejected command line");
    println!("{}", usage_error);

    ExitCode::SUCCESS
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let pwd = std::env::current_dir()?;

    let pager = (command.is_paged()
        && std::io::stdout().is_terminal()
        && std::env::var_os(NO_PAGER_ENV).is_none())
    .then(Pager::new);
    let writer: Box<dyn std::io::Write> = match &pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };

    let mut repository = Repository::new(&pwd, writer)?;
    if !matches!(command, Commands::Init) {
        repository.rehydrate().await?;
    }

    match command {
        Commands::Init => repository.init().await?,
        Commands::Add { file } => repository.add(&file).await?,
        Commands::Commit { message } => repository.commit(&message).await?,
        Commands::Rm { file } => repository.rm(&file).await?,
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => repository.find(&message)?,
        Commands::Status => repository.status().await?,
        Commands::Checkout { target, file } => {
            repository
                .checkout(target.as_deref(), file.as_deref())
                .await?
        }
        Commands::Branch { name } => repository.branch(&name)?,
        Commands::RmBranch { name } => repository.rm_branch(&name)?,
        Commands::Reset { commit_id } => repository.reset(&commit_id).await?,
        Commands::Merge { branch } => repository.merge(&branch).await?,
    }

    repository.persist().await?;
    drop(repository);

    if let Some(pager) = pager {
        minus::page_all(pager)?;
    }

    Ok(())
}
