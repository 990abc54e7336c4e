use crate::components::header;
use crate::screens::{backend, cover, fatal};
use eframe::egui;
use egui_taffy::taffy::prelude::{length, percent};
use egui_taffy::{taffy, tui, TuiBuilderLogic};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{error, info};

use powergate_app_core::persistence::FilePersistence;
use powergate_app_core::viewmodel::{cover_vm, header_vm};
use powergate_app_core::{GateSettings, GateState, PowergateApplication};

/// Kernel events arrive off the UI thread, so the window polls for them.
const REPAINT_INTERVAL: Duration = Duration::from_millis(100);

pub struct PowerUiApp {
    runtime: Handle,
    persistence: FilePersistence,
    settings: GateSettings,
    session: Option<PowergateApplication>,
    fatal: Option<String>,
}

impl PowerUiApp {
    pub fn new(runtime: Handle, persistence: FilePersistence, settings: GateSettings) -> Self {
        let mut app = Self {
            runtime,
            persistence,
            settings,
            session: None,
            fatal: None,
        };
        app.open_session();
        app
    }

    fn open_session(&mut self) {
        match PowergateApplication::new(
            self.runtime.clone(),
            &self.persistence,
            self.settings.clone(),
        ) {
            Ok(mut session) => {
                session.kernel.start();
                self.session = Some(session);
                self.fatal = None;
            }
            Err(e) => {
                error!("Failed to start the gate: {e:#}");
                self.fatal = Some(format!("{e:#}"));
            }
        }
    }

    /// Drain kernel events. A forced logout reopens the gate as a fresh session.
    fn pump(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if let Err(e) = session.kernel.tick() {
            error!("{e}");
            self.fatal = Some(e.to_string());
            self.session = None;
            return;
        }

        if let Some(path) = session.navigator.take_pending() {
            info!(%path, "session cleared, reopening the gate");
            self.session = None;
            self.open_session();
        }
    }
}

impl eframe::App for PowerUiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pump();

        let state = self
            .session
            .as_ref()
            .map(|s| s.kernel.state())
            .unwrap_or_default();
        let view = self.session.as_ref().map(|s| s.kernel.view());
        let header_model = header_vm(&state, &self.settings);

        let mut retry = false;
        let mut resp = backend::BackendResponse::default();

        egui::CentralPanel::default().show(ctx, |ui| {
            tui(ui, ui.id().with("root"))
                .reserve_available_space()
                .style(taffy::Style {
                    flex_direction: taffy::FlexDirection::Column,
                    size: percent(1.),
                    ..Default::default()
                })
                .show(|tui| {
                    tui.style(taffy::Style {
                        size: taffy::Size {
                            width: percent(1.),
                            height: length(28.0),
                        },
                        flex_shrink: 0.0,
                        ..Default::default()
                    })
                    .add(|tui| header::draw(tui, &header_model));

                    tui.style(taffy::Style {
                        flex_direction: taffy::FlexDirection::Column,
                        flex_grow: 1.0,
                        ..Default::default()
                    })
                    .add(|tui| {
                        if let Some(message) = &self.fatal {
                            retry = fatal::draw(tui, message);
                            return;
                        }
                        let Some(view) = &view else {
                            return;
                        };
                        match cover_vm(view) {
                            Some(vm) => cover::draw(tui, &vm),
                            None => {
                                let actions_enabled = self
                                    .session
                                    .as_ref()
                                    .is_some_and(|s| s.kernel.actions().is_some());
                                resp = backend::draw(
                                    tui,
                                    state.action_error.as_deref(),
                                    actions_enabled,
                                );
                            }
                        }
                    });
                });
        });

        if retry {
            self.open_session();
        }
        self.apply(resp, &state);

        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}

impl PowerUiApp {
    fn apply(&mut self, resp: backend::BackendResponse, state: &GateState) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if resp.dismiss_error && state.action_error.is_some() {
            session.kernel.dismiss_action_error();
        }
        if let Some(actions) = session.kernel.actions() {
            if resp.restart {
                actions.restart();
            } else if resp.shutdown {
                actions.shutdown();
            }
        }
    }
}
