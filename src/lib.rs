//! zosmf-files: a client for the IBM z/OSMF REST files API.
//!
//! Connections are described by Zowe z/OSMF profiles, whose credentials may
//! live in the operating system's secure credential store. A loaded profile
//! yields a [`ZosmfConnection`], which the [`files::Files`] client uses to
//! list, read, write, download and upload datasets.
//!
//! # Modules
//!
//! - [`profile`]: Profile loading and secure credential resolution
//! - [`files`]: Dataset operations against `/zosmf/restfiles/`
//! - [`api`]: Request shaping and the HTTP transport seam
//! - [`error`]: Error types for z/OSMF operations

pub mod api;
pub mod connection;
pub mod error;
pub mod files;
pub mod profile;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use connection::ZosmfConnection;
pub use error::{SecretError, ZosmfError};

use files::{records, DatasetCreateParams, Files, DEFAULT_MEMBER_LIMIT};
use profile::{SecureCredentialResolver, ZosmfProfile};

/// The zosmf-files CLI application.
#[derive(Parser)]
#[command(name = "zosmf-files")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// z/OSMF profile to connect with.
    #[arg(short, long, global = true, env = "ZOSMF_PROFILE")]
    profile: Option<String>,

    /// Directory holding profile files (default: $ZOWE_CLI_HOME/profiles/zosmf or ~/.zowe/profiles/zosmf).
    #[arg(long, global = true, value_name = "DIR")]
    profiles_dir: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Show the resolved connection for the profile (password hidden).
    Profile,

    /// List datasets matching a pattern.
    Ls {
        /// Dataset name pattern, e.g. 'IBMUSER.*'.
        pattern: String,
    },

    /// List the members of a partitioned dataset.
    Members(MembersArgs),

    /// Print the content of a dataset.
    Cat(TransferArgs),

    /// Save the content of a dataset to a local file.
    Download {
        #[command(flatten)]
        transfer: TransferArgs,

        /// Local file to create.
        output: PathBuf,
    },

    /// Write a local file into an existing dataset.
    Upload {
        /// Local file to read.
        input: PathBuf,

        /// Target dataset.
        dataset: String,
    },

    /// Replace the content of an existing dataset with the given text.
    Write {
        /// Target dataset.
        dataset: String,

        /// Text to write.
        text: String,
    },

    /// Allocate a new dataset.
    Create(CreateArgs),

    /// Delete a dataset or member.
    Delete {
        /// Dataset or 'PDS(MEMBER)' to delete.
        dataset: String,
    },
}

/// Arguments for the members subcommand.
#[derive(clap::Args)]
struct MembersArgs {
    /// Partitioned dataset name.
    dataset: String,

    /// Only list members matching this pattern.
    #[arg(long)]
    pattern: Option<String>,

    /// Start listing after this member.
    #[arg(long)]
    start: Option<String>,

    /// Maximum number of members returned.
    #[arg(long, default_value_t = DEFAULT_MEMBER_LIMIT)]
    limit: u32,
}

/// Dataset selection and content mode shared by cat and download.
#[derive(clap::Args)]
struct TransferArgs {
    /// Dataset or 'PDS(MEMBER)' to read.
    dataset: String,

    /// Read raw bytes without codepage conversion.
    #[arg(long)]
    binary: bool,

    /// Read records with 4-byte big-endian length prefixes (implies --binary).
    #[arg(long)]
    records: bool,
}

/// Arguments for the create subcommand.
#[derive(clap::Args)]
struct CreateArgs {
    /// Dataset name to allocate.
    dataset: String,

    /// Organization ('PS' or 'PO').
    #[arg(long, default_value = "PS")]
    dsorg: String,

    /// Record format.
    #[arg(long, default_value = "FB")]
    recfm: String,

    /// Logical record length.
    #[arg(long, default_value_t = 80)]
    lrecl: u32,

    /// Block size.
    #[arg(long)]
    blksize: Option<u32>,

    /// Primary space.
    #[arg(long, default_value_t = 1)]
    primary: u32,

    /// Secondary space.
    #[arg(long)]
    secondary: Option<u32>,

    /// Space unit ('TRK', 'CYL' or 'BLK').
    #[arg(long, default_value = "TRK")]
    alcunit: String,

    /// Directory blocks (partitioned datasets only).
    #[arg(long)]
    dirblk: Option<u32>,
}

/// Run the zosmf-files CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ZosmfError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        println!("zosmf-files {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Client for the z/OSMF REST files API.");
        println!();
        println!("Run 'zosmf-files --help' for usage information.");
        return Ok(());
    };

    let connection = load_connection(cli.profile, cli.profiles_dir)?;
    let files = Files::new(&connection)?;
    match command {
        Commands::Profile => {
            println!("{}", connection);
            Ok(())
        }
        Commands::Ls { pattern } => {
            for item in files.list_dsn(&pattern)?.items {
                println!("{}", item.dsname);
            }
            Ok(())
        }
        Commands::Members(args) => {
            let members = files.list_dsn_members(
                &args.dataset,
                args.pattern.as_deref(),
                args.start.as_deref(),
                args.limit,
            )?;
            for member in members {
                println!("{}", member.member);
            }
            Ok(())
        }
        Commands::Cat(args) => run_cat(&files, &args),
        Commands::Download { transfer, output } => {
            if transfer.binary || transfer.records {
                files.download_binary_dsn(&transfer.dataset, &output, transfer.records)
            } else {
                files.download_dsn(&transfer.dataset, &output)
            }
        }
        Commands::Upload { input, dataset } => files.upload_file_to_dsn(&input, &dataset),
        Commands::Write { dataset, text } => files.write_to_dsn(&dataset, &text),
        Commands::Create(args) => {
            let params = DatasetCreateParams {
                dsorg: Some(args.dsorg),
                recfm: Some(args.recfm),
                lrecl: Some(args.lrecl),
                blksize: args.blksize,
                primary: Some(args.primary),
                secondary: args.secondary,
                alcunit: Some(args.alcunit),
                dirblk: args.dirblk,
            };
            files.create_dsn(&args.dataset, &params)
        }
        Commands::Delete { dataset } => files.delete_dsn(&dataset),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .try_init();
}

fn load_connection(
    name: Option<String>,
    profiles_dir: Option<PathBuf>,
) -> Result<ZosmfConnection, ZosmfError> {
    let name = name.unwrap_or_default();
    let profile = match profiles_dir {
        Some(dir) => ZosmfProfile::with_profiles_dir(name, dir),
        None => ZosmfProfile::new(name),
    };
    profile.load(&SecureCredentialResolver::from_environment())
}

/// Execute the cat subcommand.
fn run_cat(files: &Files, args: &TransferArgs) -> Result<(), ZosmfError> {
    if !args.binary && !args.records {
        print!("{}", files.get_dsn_content(&args.dataset)?);
        return Ok(());
    }

    let content = files.get_dsn_binary_content(&args.dataset, args.records)?;
    let mut stdout = std::io::stdout().lock();
    if args.records {
        for record in records::split_record_prefixed(&content)? {
            stdout.write_all(record)?;
            stdout.write_all(b"\n")?;
        }
    } else {
        stdout.write_all(&content)?;
    }
    stdout.flush()?;
    Ok(())
}
