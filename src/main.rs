use anyhow::Result;
use tokio::sync::mpsc;

use openlist_organizer::config::ConfigStore;
use openlist_organizer::front::UiHandle;
use openlist_organizer::remote::OpenListClient;
use openlist_organizer::workflow::Workflow;
use openlist_organizer::{logging, tui};

/// One workflow instance and one terminal surface share a single-threaded
/// event loop; the workflow suspends at every remote call and every operator
/// prompt, so no locking is needed anywhere.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    logging::init(tx.clone());

    let config = ConfigStore::open(ConfigStore::default_path())?;
    let api = OpenListClient::new(config.get("dest").trim());
    let front = UiHandle::new(tx);

    let mut workflow = Workflow::new(config, api, front);
    let worker = tokio::spawn(async move {
        if let Err(err) = workflow.run().await {
            // Leaves the surface open so the operator can read the log.
            tracing::error!("workflow stopped: {err:#}");
        }
    });

    let res = tui::run(rx).await;
    worker.abort();
    res
}
