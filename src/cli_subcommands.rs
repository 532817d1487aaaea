use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Initialize a vault (.blobdock)
    Init {
        /// Re-initialize if .blobdock already exists
        #[arg(long)]
        force: bool,
        /// Path to initialize (defaults to current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Configure the remote object store
    Login {
        #[arg(long)]
        url: String,
        #[arg(long)]
        token: String,
        /// Prefix for root-level uploads
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Show or change store settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },

    /// List remote objects as a folder tree
    List {
        /// Restrict the listing to this pathname prefix
        #[arg(long)]
        prefix: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Upload files to the remote store
    Upload {
        /// Local files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Destination folder (slash-separated; defaults to the configured prefix)
        #[arg(long)]
        to: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Upload local images referenced by a markdown note and rewrite the note
    Import {
        note: PathBuf,
        /// Report what would be uploaded without changing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the public URL for a stored pathname
    Url {
        pathname: String,
        /// Print a markdown reference instead of the bare URL
        #[arg(long)]
        markdown: bool,
    },

    /// Delete a stored object by pathname
    Delete { pathname: String },
}

#[derive(Subcommand)]
pub(crate) enum SettingsCommands {
    /// Show current settings
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// Update settings
    Set {
        #[arg(long)]
        prefix: Option<String>,
        #[arg(long)]
        slugify: Option<bool>,
        #[arg(long)]
        allow_overwrite: Option<bool>,
        #[arg(long)]
        max_file_size_mb: Option<u64>,
        /// Explorer view mode: grid or list
        #[arg(long)]
        view_mode: Option<String>,
    },
}
