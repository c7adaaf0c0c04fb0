//! `NeuralLinkApp` — the top-level egui application state.
//!
//! This module declares the app struct and its frame loop. Methods are split
//! across the sibling sub-modules:
//!
//! - `requests` — background scan/query lifecycle
//! - `view`     — diagnosis and query panels
//!
//! The tests drive the app without a window: an `egui::Context` plus the
//! loopback service from `net/testing.rs`.

pub mod requests;
pub mod view;

use std::time::Duration;

use eframe::egui;

use neural_link::config::Config;
use neural_link::net::client::ServiceClient;
use neural_link::net::diagnosis::{AnalyzeResponse, DiagnosisClient};
use neural_link::net::query::{QueryClient, QueryResponse};
use neural_link::net::task::RequestTask;
use neural_link::panel::{DiagnosisPanel, QueryPanel};
use neural_link::render::background::paint_scene;
use neural_link::render::scene::SceneContext;

// ─── Application state ───────────────────────────────────────────────────────

pub struct NeuralLinkApp {
    pub config: Config,
    pub scene: SceneContext,
    pub diagnosis: DiagnosisPanel,
    pub query: QueryPanel,
    /// `None` when the configured endpoint is unusable; requests then fail fast
    pub diagnosis_client: Option<DiagnosisClient>,
    pub query_client: Option<QueryClient>,
    pub scan_task: Option<RequestTask<AnalyzeResponse>>,
    pub query_task: Option<RequestTask<QueryResponse>>,
}

impl NeuralLinkApp {
    pub fn new(config: Config) -> Self {
        let service = ServiceClient::new(
            &config.endpoint.base_url,
            Duration::from_secs(config.endpoint.timeout_secs),
        );
        let (diagnosis_client, query_client) = match service {
            Ok(service) => {
                log::info!("Analysis service at {}", service.base_url());
                (
                    Some(DiagnosisClient::new(service.clone())),
                    Some(QueryClient::new(service)),
                )
            }
            Err(e) => {
                log::error!("Endpoint {:?} unusable: {}", config.endpoint.base_url, e);
                (None, None)
            }
        };

        let scene = SceneContext::new(config.window.width, config.window.height)
            .with_rotation_step(config.scene.rotation_step_x, config.scene.rotation_step_y)
            .with_color(config.scene.color);

        Self {
            config,
            scene,
            diagnosis: DiagnosisPanel::new(),
            query: QueryPanel::default(),
            diagnosis_client,
            query_client,
            scan_task: None,
            query_task: None,
        }
    }
}

impl eframe::App for NeuralLinkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_scan();
        self.check_query();

        // Background: advance one frame, then draw beneath every panel
        let screen = ctx.screen_rect();
        self.scene.resize(screen.width(), screen.height());
        self.scene.advance();
        let painter = ctx.layer_painter(egui::LayerId::background());
        paint_scene(&painter, screen, &self.scene);

        self.draw_panels(ctx);

        // Continuous animation
        ctx.request_repaint();
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }
}

impl Drop for NeuralLinkApp {
    fn drop(&mut self) {
        self.cancel_requests();
        self.scene.shutdown();
    }
}

#[cfg(test)]
#[path = "../net/testing.rs"]
mod testing;
