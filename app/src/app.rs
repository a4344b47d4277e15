use std::sync::Arc;

use qr_engine::QrCodeRenderer;
use qr_form::FormController;
use tokio::sync::{Mutex, MutexGuard};

use crate::config::AppConfig;

/// The page controller as hosted by this application.
pub type Controller = FormController<QrCodeRenderer>;

/// Application shared state accessible from axum handlers.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Application configuration
    config: AppConfig,
    /// The one page session served by this process
    controller: Mutex<Controller>,
}

impl SharedState {
    pub fn new(config: AppConfig) -> Self {
        let controller = FormController::with_config(QrCodeRenderer::new(), config.form_config());
        Self {
            inner: Arc::new(SharedStateInner {
                config,
                controller: Mutex::new(controller),
            }),
        }
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.server_port
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Lock the page controller. Do not hold the guard across a render.
    pub async fn controller(&self) -> MutexGuard<'_, Controller> {
        self.inner.controller.lock().await
    }
}
