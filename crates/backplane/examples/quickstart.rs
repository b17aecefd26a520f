//! Quickstart: sign in, read and write rows, upload a file.
//!
//! Run with: cargo run --example quickstart -p backplane
//!
//! Requires `BACKPLANE_PROJECT` and `BACKPLANE_API_KEY`; `BACKPLANE_URL`
//! points at a non-default deployment. Set `RUST_LOG=backplane_core=debug`
//! to see each request.

use backplane::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let client = BackplaneClient::from_env()?;

    // ── Auth ──
    let email = std::env::var("BACKPLANE_EMAIL").unwrap_or_else(|_| "demo@example.com".into());
    let password = std::env::var("BACKPLANE_PASSWORD").unwrap_or_else(|_| "demo-password".into());
    match client.auth().sign_in(&email, &password).await {
        Ok(session) => println!("Signed in as {}", session.user.email),
        Err(err) => println!("Sign-in failed ({}), continuing with the API key", err),
    }

    // ── Database ──
    let inserted = client
        .database()
        .insert("todos", vec![row![("title", "Try Backplane"), ("done", false)]])
        .await?;
    println!("Inserted {} row(s)", inserted.len());

    let page = client
        .from("todos")
        .order_by("id", SortOrder::Desc)
        .limit(5)
        .select()
        .await?;
    println!("Latest {} of {} todos:", page.len(), page.count);
    for todo in &page.rows {
        println!(
            "  {}",
            todo.get_as::<String>("title").unwrap_or_else(|| "?".into())
        );
    }

    // ── Storage ──
    let notes = client.storage().from("notes");
    match notes
        .upload("hello.txt", b"hello from Rust".to_vec(), "text/plain")
        .await
    {
        Ok(file) => println!("Uploaded {}: {}", file.name, notes.get_public_url(&file.name)),
        Err(err) => println!("Upload failed: {}", err),
    }

    client.auth().sign_out().await?;
    Ok(())
}
