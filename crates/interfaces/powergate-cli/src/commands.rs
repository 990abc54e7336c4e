use crate::WatchOutcome;
use anyhow::{bail, Context, Result};
use powergate_app_core::persistence::FilePersistence;
use powergate_app_core::{GateSettings, GateView, PowerAction, PowergateApplication, SystemStatus};
use powergate_infra::{default_http_client, HttpSystemClient};
use tokio::runtime::Handle;

pub fn describe_view(view: &GateView) -> String {
    match view {
        GateView::Checking => "Checking backend status...".into(),
        GateView::Children => "Backend is running".into(),
        GateView::ShuttingDown => "Backend is shutting down...".into(),
        GateView::Restarting => "Backend is restarting...".into(),
        GateView::ShutdownComplete => "Backend has shut down".into(),
        GateView::Unexpected(raw) => format!("Unexpected backend status: {raw}"),
    }
}

pub async fn cmd_status(
    persistence: &FilePersistence,
    settings: &GateSettings,
) -> Result<SystemStatus> {
    println!(":: Querying {}", settings.backend_url);

    let client = default_http_client().context("Failed to build HTTP client")?;
    let rpc = HttpSystemClient::new(client, &settings.backend_url)?
        .with_token_store(persistence.state_store()?);
    let status = rpc.status().await.context("Status query failed")?;

    println!("   Status: {status}");
    Ok(status)
}

/// Run the gate, printing each view change.
///
/// With an action, it is fired as soon as the backend reports `running` and
/// the cycle is followed until the forced logout or the shutdown grace
/// period. Without one, this returns only on a forced logout or an error.
pub async fn cmd_watch(
    persistence: &FilePersistence,
    settings: &GateSettings,
    action: Option<PowerAction>,
) -> Result<WatchOutcome> {
    let mut app = PowergateApplication::new(Handle::current(), persistence, settings.clone())?;
    println!(":: Watching {}", settings.backend_url);
    app.kernel.start();

    let mut pending = action;
    let mut last_view = None;
    loop {
        if let Some(path) = app.navigator.take_pending() {
            println!(":: Session cleared, returned to {path}");
            return Ok(WatchOutcome::LoggedOut);
        }

        let view = app.kernel.view();
        if last_view.as_ref() != Some(&view) {
            println!("   {}", describe_view(&view));
            last_view = Some(view.clone());
        }
        if view == GateView::ShutdownComplete {
            return Ok(WatchOutcome::ShutdownComplete);
        }

        if let Some(action) = pending {
            if let Some(actions) = app.kernel.actions() {
                println!(":: Requesting {action}");
                actions.request(action);
                pending = None;
            }
        }

        let state = app.kernel.state();
        if let Some(message) = state.action_error {
            if !state.flags.triggered {
                bail!(message);
            }
            // The backend may still be going down; keep following it.
            eprintln!("!! {message}");
            app.kernel.dismiss_action_error();
        }

        app.kernel
            .next_event()
            .await
            .context("Backend status unavailable")?;
    }
}
