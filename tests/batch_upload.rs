mod common;

use std::path::PathBuf;

use anyhow::Result;
use common::{spawn_server, store_settings};

use blobdock::remote::StoreClient;
use blobdock::upload::{FileOutcome, upload_many};

fn write_file(dir: &std::path::Path, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, bytes)?;
    Ok(path)
}

#[test]
fn batch_continues_past_oversized_file() -> Result<()> {
    let guard = spawn_server()?;
    let mut settings = store_settings(&guard);
    settings.max_file_size_mb = 1;
    let client = StoreClient::new(settings)?;

    let dir = tempfile::tempdir()?;
    let files = vec![
        write_file(dir.path(), "First Shot.PNG", b"small")?,
        write_file(dir.path(), "huge.bin", &vec![0u8; 2 * 1024 * 1024])?,
        write_file(dir.path(), "second.jpg", b"also small")?,
    ];

    let report = upload_many(&client, &files, None);
    assert_eq!(report.summary(), "2 of 3 uploaded");

    match &report.outcomes[1] {
        FileOutcome::Failed { error, .. } => {
            assert!(error.to_string().contains("limit"), "{}", error);
        }
        other => panic!("expected oversize failure, got {:?}", other),
    }

    // The survivors landed under the base prefix with slugified names.
    let objects = client.list(None)?;
    let pathnames: Vec<&str> = objects.iter().map(|o| o.pathname.as_str()).collect();
    assert_eq!(pathnames, ["attachments/first-shot.png", "attachments/second.jpg"]);
    Ok(())
}

#[test]
fn batch_targets_an_explorer_folder() -> Result<()> {
    let guard = spawn_server()?;
    let client = StoreClient::new(store_settings(&guard))?;

    let dir = tempfile::tempdir()?;
    let files = vec![
        write_file(dir.path(), "a.png", b"a")?,
        write_file(dir.path(), "b.png", b"b")?,
    ];

    let target = vec!["attachments".to_string(), "trip".to_string()];
    let report = upload_many(&client, &files, Some(&target));
    assert_eq!(report.summary(), "2 of 2 uploaded");

    let objects = client.list(Some("attachments/trip"))?;
    assert_eq!(objects.len(), 2);
    Ok(())
}

#[test]
fn missing_file_fails_without_aborting_batch() -> Result<()> {
    let guard = spawn_server()?;
    let client = StoreClient::new(store_settings(&guard))?;

    let dir = tempfile::tempdir()?;
    let files = vec![
        dir.path().join("does-not-exist.png"),
        write_file(dir.path(), "real.png", b"ok")?,
    ];

    let report = upload_many(&client, &files, None);
    assert_eq!(report.summary(), "1 of 2 uploaded");
    Ok(())
}
