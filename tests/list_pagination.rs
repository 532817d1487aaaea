mod common;

use anyhow::Result;
use common::{spawn_server_with_max_page, store_settings};

use blobdock::remote::StoreClient;

/// The client always asks for full pages; a small server-side clamp forces it
/// to walk the cursor chain.
#[test]
fn listing_follows_cursor_across_pages() -> Result<()> {
    let guard = spawn_server_with_max_page(2)?;
    let client = StoreClient::new(store_settings(&guard))?;

    for name in ["attachments/a.png", "attachments/b.png", "attachments/c.png"] {
        client.upload(b"bytes".to_vec(), name, "x.png")?;
    }

    let objects = client.list(None)?;
    let pathnames: Vec<&str> = objects.iter().map(|o| o.pathname.as_str()).collect();
    assert_eq!(
        pathnames,
        ["attachments/a.png", "attachments/b.png", "attachments/c.png"]
    );
    Ok(())
}

#[test]
fn listing_honors_prefix_filter() -> Result<()> {
    let guard = spawn_server_with_max_page(2)?;
    let client = StoreClient::new(store_settings(&guard))?;

    client.upload(b"bytes".to_vec(), "attachments/keep/a.png", "a.png")?;
    client.upload(b"bytes".to_vec(), "attachments/keep/b.png", "b.png")?;
    client.upload(b"bytes".to_vec(), "other/skip.png", "skip.png")?;

    let objects = client.list(Some("attachments/keep"))?;
    let pathnames: Vec<&str> = objects.iter().map(|o| o.pathname.as_str()).collect();
    assert_eq!(pathnames, ["attachments/keep/a.png", "attachments/keep/b.png"]);
    Ok(())
}

#[test]
fn empty_store_lists_no_objects() -> Result<()> {
    let guard = spawn_server_with_max_page(2)?;
    let client = StoreClient::new(store_settings(&guard))?;

    assert!(client.list(None)?.is_empty());
    Ok(())
}

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use blobdock::model::StoreSettings;

/// Canned-response listener for termination cases the dev server cannot
/// produce: it only hands out a cursor when more pages actually exist. Serves
/// exactly the given bodies, then closes; an unexpected extra request fails
/// to connect and surfaces as a listing error.
fn serve_canned_pages(pages: Vec<&'static str>) -> (String, thread::JoinHandle<usize>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let mut served = 0;
        for body in pages {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let resp = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(resp.as_bytes()).unwrap();
            served += 1;
        }
        served
    });
    (format!("http://{}", addr), handle)
}

#[test]
fn cursor_on_final_page_does_not_trigger_another_request() -> Result<()> {
    // hasMore is authoritative: a leftover cursor on the last page is ignored.
    let (base, handle) = serve_canned_pages(vec![
        r#"{"blobs":[{"url":"http://x/b/a.png","pathname":"a.png","size":1,"uploadedAt":"2026-01-01T00:00:00Z"}],"cursor":"stale","hasMore":false}"#,
    ]);
    let client = StoreClient::new(StoreSettings::new(base, "dev".into()))?;

    let objects = client.list(None)?;
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].pathname, "a.png");
    assert_eq!(handle.join().unwrap(), 1);
    Ok(())
}

#[test]
fn missing_cursor_ends_listing_despite_has_more() -> Result<()> {
    // A server claiming more pages without saying where they are must not
    // send the client back to the first page forever.
    let (base, handle) = serve_canned_pages(vec![
        r#"{"blobs":[{"url":"http://x/b/a.png","pathname":"a.png","size":1,"uploadedAt":"2026-01-01T00:00:00Z"}],"hasMore":true}"#,
    ]);
    let client = StoreClient::new(StoreSettings::new(base, "dev".into()))?;

    let objects = client.list(None)?;
    assert_eq!(objects.len(), 1);
    assert_eq!(handle.join().unwrap(), 1);
    Ok(())
}
