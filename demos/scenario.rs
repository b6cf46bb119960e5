//! Walks one message through its life with callers of different roles.
//!
//! ```text
//! RUST_LOG=news_proxy=debug cargo run --example scenario
//! ```

use news_proxy::{Caller, FacadeConfig, InMemoryContentStore, NewsFacade, Role};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = FacadeConfig::from_env()?;
    let facade = NewsFacade::with_config(InMemoryContentStore::new(), config);

    let john = Caller::new("John", Role::User);
    let maria = Caller::new("Maria", Role::Moderator);
    let root = Caller::new("Root", Role::Admin);

    let steps = [
        ("John adds", facade.add_message("Title", "Content", &john)),
        ("John reads", facade.read_message(1, &john)),
        ("John reads again", facade.read_message(1, &john)),
        (
            "Maria edits",
            facade.edit_message(1, "Updated content", &maria),
        ),
        ("John reads", facade.read_message(1, &john)),
        ("John deletes", facade.delete_message(1, &john)),
        ("Root deletes", facade.delete_message(1, &root)),
        ("John reads", facade.read_message(1, &john)),
    ];

    for (step, result) in steps {
        println!("{step:<18} {result}");
    }

    let stats = facade.cache().stats();
    println!(
        "cache: {} hits, {} misses, {} invalidations",
        stats.hits, stats.misses, stats.invalidations
    );

    Ok(())
}
