use std::sync::Arc;

use anyhow::{Context, bail};

use merchdesk_app::render::render_table;
use merchdesk_app::{AppConfig, InventorySession};

const USAGE: &str = "usage: merchdesk [--json] [publish|unpublish <id>...]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    merchdesk_observability::init(config.log_format);

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let json = match args.first() {
        Some(flag) if flag == "--json" => {
            args.remove(0);
            true
        }
        _ => false,
    };

    let catalog = Arc::new(config.load_catalog()?);
    let mut session = InventorySession::new(catalog);

    let (products, inventory) = session.load().await;
    if let Err(err) = &products {
        tracing::error!(%err, "products query failed");
    }
    if let Err(err) = &inventory {
        tracing::error!(%err, "inventory query failed");
    }

    let published = match args.first().map(String::as_str) {
        None => return print_view(&session, json),
        Some("publish") => true,
        Some("unpublish") => false,
        Some(other) => bail!("unknown command `{other}`\n{USAGE}"),
    };
    if args.len() < 2 {
        bail!("no ids given\n{USAGE}");
    }

    session.select_keys(&args[1..]);
    let tasks = if published {
        session.publish()
    } else {
        session.unpublish()
    };
    let report = tasks.settle().await;
    tracing::info!(?report, "bulk action settled");

    print_view(&session, json)
}

fn print_view(session: &InventorySession, json: bool) -> anyhow::Result<()> {
    let view = session.view();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_table(&view));
    }
    Ok(())
}
