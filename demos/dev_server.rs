//! Minimal supervised dev loop: a setup step, a long-running main
//! process, and a synthetic change feed that triggers a reload every few
//! seconds.
//!
//! Run with `cargo run --example dev_server`; stop with Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use futures::{StreamExt, stream};
use procvisor::{
    ChangeBatch, ChangeEvent, ChangeKind, Config, Daemon, DaemonEvent, ScriptOptions,
    ShellCommand, StaticSource,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let source = Arc::new(StaticSource::new().script(
        "dev",
        vec![
            ShellCommand::arc("echo preparing workspace", ScriptOptions::default()),
            ShellCommand::arc(
                "while true; do echo serving; sleep 1; done",
                ScriptOptions::default().with_watch(true),
            ),
        ],
    ));

    // Synthetic feed standing in for a filesystem watcher: pretend
    // someone saves a file every five seconds.
    let changes = stream::unfold(
        tokio::time::interval(Duration::from_secs(5)),
        |mut tick| async {
            tick.tick().await;
            let batch = ChangeBatch::from(vec![ChangeEvent::new("src/main.rs", ChangeKind::Modify)]);
            Some((batch, tick))
        },
    );

    let config = Config {
        paths: vec!["src/**/*.rs".into()],
        ..Config::default()
    };
    let mut events = Daemon::new("dev", source, config).run(changes);

    while let Some(event) = events.next().await {
        match event {
            DaemonEvent::Start => println!("[demo] supervision started"),
            DaemonEvent::Reload { change } => {
                println!("[demo] reloading ({} change records)", change.len());
            }
            DaemonEvent::Exit => {
                println!("[demo] supervisor exiting");
                break;
            }
        }
    }
}
