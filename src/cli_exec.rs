use std::fs;

use anyhow::{Context, Result, anyhow};

use blobdock::error::StoreError;
use blobdock::model::{StoreSettings, ViewMode};
use blobdock::naming::is_image;
use blobdock::notes::import_note;
use blobdock::remote::StoreClient;
use blobdock::store::LocalStore;
use blobdock::tree::{FolderNode, build_tree, count_files};
use blobdock::upload::{FileOutcome, upload_many};

use crate::cli_runtime::{discover_store, require_settings};
use crate::cli_subcommands::{Commands, SettingsCommands};

pub(crate) fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Init { force, path } => {
            let root = path.unwrap_or(std::env::current_dir().context("get current dir")?);
            LocalStore::init(&root, force)?;
            println!("Initialized blobdock vault at {}", root.display());
        }

        Commands::Login { url, token, prefix } => {
            let store = discover_store()?;
            let mut cfg = store.read_config()?;
            let mut settings = match cfg.store.take() {
                Some(mut existing) => {
                    existing.base_url = url;
                    existing.token = token;
                    existing
                }
                None => StoreSettings::new(url, token),
            };
            if let Some(prefix) = prefix {
                settings.base_prefix = prefix;
            }
            cfg.store = Some(settings);
            store.write_config(&cfg)?;
            println!("Remote store configured");
        }

        Commands::Settings { command } => handle_settings(command)?,

        Commands::List { prefix, json } => {
            let store = discover_store()?;
            let client = new_client(&store)?;
            let objects = client.list(prefix.as_deref())?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&objects).context("serialize listing")?
                );
            } else if objects.is_empty() {
                println!("(empty)");
            } else {
                let tree = build_tree(&objects);
                print_tree(&tree, 0);
            }
        }

        Commands::Upload { files, to, json } => {
            let store = discover_store()?;
            let client = new_client(&store)?;
            let target: Option<Vec<String>> =
                to.map(|t| t.split('/').filter(|s| !s.is_empty()).map(String::from).collect());
            let report = upload_many(&client, &files, target.as_deref());

            if json {
                let entries: Vec<serde_json::Value> = report
                    .outcomes
                    .iter()
                    .map(|o| match o {
                        FileOutcome::Uploaded { source, result } => serde_json::json!({
                            "source": source.display().to_string(),
                            "pathname": result.pathname,
                            "url": result.url,
                        }),
                        FileOutcome::Failed { source, error } => serde_json::json!({
                            "source": source.display().to_string(),
                            "error": error.to_string(),
                        }),
                    })
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&entries).context("serialize report")?
                );
            } else {
                for outcome in &report.outcomes {
                    match outcome {
                        FileOutcome::Uploaded { source, result } => {
                            println!("{} -> {}", source.display(), result.url);
                        }
                        FileOutcome::Failed { source, error } => {
                            println!("{} failed: {}", source.display(), error);
                        }
                    }
                }
                println!("{}", report.summary());
            }

            if report.failed() > 0 {
                return Err(anyhow!("{}", report.summary()));
            }
        }

        Commands::Import { note, dry_run } => {
            let store = discover_store()?;
            let client = new_client(&store)?;
            let note = note
                .canonicalize()
                .with_context(|| format!("resolve {}", note.display()))?;

            if dry_run {
                let text = fs::read_to_string(&note)
                    .with_context(|| format!("read note {}", note.display()))?;
                let refs = blobdock::notes::scan_local_refs(&text);
                if refs.is_empty() {
                    println!("no local references found");
                } else {
                    for r in refs {
                        println!("would upload {}", r.target);
                    }
                }
                return Ok(());
            }

            let outcome = import_note(&client, &note, store.vault_root())?;
            for o in &outcome.report.outcomes {
                match o {
                    FileOutcome::Uploaded { source, result } => {
                        println!("{} -> {}", source.display(), result.url);
                    }
                    FileOutcome::Failed { source, error } => {
                        println!("{} failed: {}", source.display(), error);
                    }
                }
            }
            if outcome.changed {
                fs::write(&note, outcome.text)
                    .with_context(|| format!("rewrite note {}", note.display()))?;
            }
            println!("{}", outcome.report.summary());
        }

        Commands::Url { pathname, markdown } => {
            let store = discover_store()?;
            let client = new_client(&store)?;
            let object = find_object(&client, &pathname)?;
            if markdown {
                if is_image(&object.pathname) {
                    println!("![{}]({})", object.display_name(), object.url);
                } else {
                    println!("[{}]({})", object.display_name(), object.url);
                }
            } else {
                println!("{}", object.url);
            }
        }

        Commands::Delete { pathname } => {
            let store = discover_store()?;
            let client = new_client(&store)?;
            let object = find_object(&client, &pathname)?;
            client.delete(&object.url)?;
            println!("Deleted {}", pathname);
        }
    }

    Ok(())
}

fn new_client(store: &LocalStore) -> Result<StoreClient> {
    let settings = require_settings(store)?;
    StoreClient::new(settings).map_err(|err| match err {
        StoreError::NotConfigured => {
            anyhow!("no remote token configured (run `blobdock login --url ... --token ...`)")
        }
        other => anyhow!(other),
    })
}

fn find_object(client: &StoreClient, pathname: &str) -> Result<blobdock::model::RemoteObject> {
    let objects = client.list(None)?;
    objects
        .into_iter()
        .find(|o| o.pathname == pathname)
        .ok_or_else(|| anyhow!("no object with pathname {}", pathname))
}

fn print_tree(node: &FolderNode, depth: usize) {
    for child in &node.children {
        println!("{}{}/ ({})", "  ".repeat(depth), child.name, count_files(child));
        print_tree(child, depth + 1);
    }
    for file in &node.files {
        println!("{}{}", "  ".repeat(depth), file.display_name());
    }
}

fn handle_settings(command: SettingsCommands) -> Result<()> {
    let store = discover_store()?;
    match command {
        SettingsCommands::Show { json } => {
            let settings = require_settings(&store)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&settings).context("serialize settings")?
                );
            } else {
                println!("url: {}", settings.base_url);
                println!("prefix: {}", settings.base_prefix);
                println!("slugify: {}", settings.slugify_filenames);
                println!("allow_overwrite: {}", settings.allow_overwrite);
                println!("max_file_size_mb: {}", settings.max_file_size_mb);
                println!(
                    "view_mode: {}",
                    match settings.view_mode {
                        ViewMode::Grid => "grid",
                        ViewMode::List => "list",
                    }
                );
            }
        }
        SettingsCommands::Set {
            prefix,
            slugify,
            allow_overwrite,
            max_file_size_mb,
            view_mode,
        } => {
            let mut cfg = store.read_config()?;
            let settings = cfg
                .store
                .as_mut()
                .context("no remote store configured (run `blobdock login --url ... --token ...`)")?;
            if let Some(prefix) = prefix {
                settings.base_prefix = prefix;
            }
            if let Some(slugify) = slugify {
                settings.slugify_filenames = slugify;
            }
            if let Some(allow_overwrite) = allow_overwrite {
                settings.allow_overwrite = allow_overwrite;
            }
            if let Some(max) = max_file_size_mb {
                settings.max_file_size_mb = max;
            }
            if let Some(mode) = view_mode {
                settings.view_mode = match mode.as_str() {
                    "grid" => ViewMode::Grid,
                    "list" => ViewMode::List,
                    other => anyhow::bail!("unknown view mode {} (grid|list)", other),
                };
            }
            store.write_config(&cfg)?;
            println!("Settings updated");
        }
    }
    Ok(())
}
