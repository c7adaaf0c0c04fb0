//! Request lifecycle for `NeuralLinkApp`.
//!
//! `start_*` fires a background task (replacing and cancelling any in-flight
//! one), `check_*` polls it once per frame and writes the outcome into the
//! matching panel.

use eframe::egui;

use neural_link::error::RequestError;
use neural_link::net::diagnosis::AnalyzeRequest;
use neural_link::net::query::QueryRequest;
use neural_link::net::task::RequestTask;

use super::NeuralLinkApp;

impl NeuralLinkApp {
    /// Analyze button handler.
    pub fn start_scan(&mut self, ctx: &egui::Context) {
        self.diagnosis.begin_scan();

        if let Some(previous) = self.scan_task.take() {
            previous.cancel();
        }

        let Some(client) = self.diagnosis_client.clone() else {
            self.diagnosis
                .fail(&RequestError::Client("no usable analysis endpoint".into()));
            return;
        };

        let request = AnalyzeRequest::new(self.config.patient.clone());
        log::info!(
            "Scanning biometrics (scalp: {}, vision: {})",
            request.patient_metrics.scalp_health,
            request.patient_metrics.vision_clarity
        );

        let ctx = ctx.clone();
        self.scan_task = Some(RequestTask::spawn(
            "scan",
            move |_| client.analyze(&request),
            move || ctx.request_repaint(),
        ));
    }

    /// Poll the scan task and update the diagnosis panel when it finishes.
    pub fn check_scan(&mut self) {
        let Some(result) = self.scan_task.as_ref().and_then(|task| task.poll()) else {
            return;
        };
        match result {
            Ok(response) => self.diagnosis.show(&response),
            Err(e) => self.diagnosis.fail(&e),
        }
        self.scan_task = None;
    }

    /// Ask button handler.
    pub fn start_query(&mut self, ctx: &egui::Context) {
        let request = match QueryRequest::new(self.query.input.trim()) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Query not sent: {}", e);
                return;
            }
        };

        if let Some(previous) = self.query_task.take() {
            previous.cancel();
        }

        let Some(client) = self.query_client.clone() else {
            self.query
                .fail(&RequestError::Client("no usable analysis endpoint".into()));
            return;
        };

        self.query.begin();
        let ctx = ctx.clone();
        self.query_task = Some(RequestTask::spawn(
            "query",
            move |_| client.ask(&request),
            move || ctx.request_repaint(),
        ));
    }

    pub fn check_query(&mut self) {
        let Some(result) = self.query_task.as_ref().and_then(|task| task.poll()) else {
            return;
        };
        match result {
            Ok(response) => self.query.show(&response),
            Err(e) => self.query.fail(&e),
        }
        self.query_task = None;
    }

    pub fn cancel_requests(&mut self) {
        if let Some(task) = self.scan_task.take() {
            task.cancel();
        }
        if let Some(task) = self.query_task.take() {
            task.cancel();
        }
    }
}
