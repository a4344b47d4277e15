//! The form controller and its session state.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone, Utc};
use qr_engine::{QrRenderer, RenderRequest, RenderedQr};
use tracing::{debug, error, info};

use crate::error::SubmitError;
use crate::input::{self, EXPIRATION_MONTHS_RANGE, FormDefaults, FormInput, SIZE_RANGE};
use crate::payload::{QrPayload, add_months};
use crate::view::{Notice, ResultView, UrlFieldState, format_long_date};

/// Controller tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormConfig {
    pub defaults: FormDefaults,
    /// How long a render may take before the submission fails.
    pub render_timeout: Duration,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            defaults: FormDefaults::default(),
            render_timeout: Duration::from_millis(5000),
        }
    }
}

/// Mutable state of one page session.
#[derive(Debug, Default)]
struct SessionState {
    rendered_image: Option<RenderedQr>,
    source_url: String,
    expiration_date: Option<DateTime<Utc>>,
    url_field: UrlFieldState,
    view: ResultView,
    generation: u64,
}

/// A validated submission waiting for its image.
#[derive(Debug, Clone)]
pub struct PendingRender {
    generation: u64,
    request: RenderRequest,
    url: String,
    include_metadata: bool,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    expiration_text: String,
    deadline: Duration,
}

impl PendingRender {
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Run the renderer and wait for its completion, bounded by the
    /// configured deadline.
    pub async fn render<R: QrRenderer>(&self, renderer: &R) -> Result<RenderedQr, SubmitError> {
        match tokio::time::timeout(self.deadline, renderer.render(self.request.clone())).await {
            Ok(Ok(qr)) => Ok(qr),
            Ok(Err(e)) => Err(SubmitError::RenderFailure(e.to_string())),
            Err(_) => Err(SubmitError::RenderFailure(format!(
                "sin imagen después de {} ms",
                self.deadline.as_millis()
            ))),
        }
    }
}

/// A stored image ready to be saved by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub png: Vec<u8>,
}

impl Download {
    pub fn data_uri(&self) -> String {
        qr_engine::to_data_uri(&self.png)
    }
}

/// Mediates between raw form edits and the renderer.
pub struct FormController<R> {
    renderer: Arc<R>,
    config: FormConfig,
    state: SessionState,
}

impl<R: QrRenderer> FormController<R> {
    pub fn new(renderer: R) -> Self {
        Self::with_config(renderer, FormConfig::default())
    }

    pub fn with_config(renderer: R, config: FormConfig) -> Self {
        Self {
            renderer: Arc::new(renderer),
            config,
            state: SessionState::default(),
        }
    }

    /// Shared handle to the renderer, for hosts that render outside the
    /// controller (see [`Self::begin_submit`]).
    pub fn renderer(&self) -> Arc<R> {
        Arc::clone(&self.renderer)
    }

    pub fn view(&self) -> &ResultView {
        &self.state.view
    }

    pub fn url_field(&self) -> UrlFieldState {
        self.state.url_field
    }

    pub fn rendered_image(&self) -> Option<&RenderedQr> {
        self.state.rendered_image.as_ref()
    }

    pub fn source_url(&self) -> &str {
        &self.state.source_url
    }

    pub fn expiration_date(&self) -> Option<DateTime<Utc>> {
        self.state.expiration_date
    }

    pub fn on_url_edited(&mut self, raw: &str) -> UrlFieldState {
        let url = raw.trim();
        self.state.url_field = if !url.is_empty() && !input::is_valid_url(url) {
            UrlFieldState::Invalid
        } else {
            UrlFieldState::Valid
        };
        self.state.url_field
    }

    pub fn on_expiration_edited(&self, raw: &str) -> String {
        input::expiration_help(raw)
    }

    pub fn on_size_edited(&self, raw: &str) -> String {
        input::size_help(raw, self.config.defaults.size)
    }

    pub fn on_metadata_toggled(&self, checked: bool) -> &'static str {
        input::metadata_help(checked)
    }

    /// Validate, render and publish a submission.
    pub async fn on_submit(&mut self, form: &FormInput) -> Result<&ResultView, SubmitError> {
        self.on_submit_at(form, Local::now()).await
    }

    /// Submit as of `now`. The expiration is counted in the calendar of
    /// `now`'s time zone and shown in it.
    pub async fn on_submit_at<Tz>(
        &mut self,
        form: &FormInput,
        now: DateTime<Tz>,
    ) -> Result<&ResultView, SubmitError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let pending = self.begin_submit(form, now)?;
        let result = pending.render(self.renderer.as_ref()).await;
        self.complete_submit(pending, result)
    }

    /// Validate the form and prepare the render request. Nothing visible
    /// changes until [`Self::complete_submit`].
    pub fn begin_submit<Tz>(
        &mut self,
        form: &FormInput,
        now: DateTime<Tz>,
    ) -> Result<PendingRender, SubmitError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let url = form.url.trim();
        if url.is_empty() {
            debug!("Submission rejected: empty URL");
            return Err(SubmitError::EmptyUrl);
        }
        if !input::is_valid_url(url) {
            debug!(url, "Submission rejected: invalid URL");
            return Err(SubmitError::InvalidUrl);
        }

        let defaults = self.config.defaults;
        let months = input::number_or_default(&form.expiration, defaults.expiration_months);
        if !EXPIRATION_MONTHS_RANGE.contains(&months) {
            return Err(SubmitError::ExpirationOutOfRange(months));
        }
        let size = input::number_or_default(&form.size, defaults.size);
        if !SIZE_RANGE.contains(&size) {
            return Err(SubmitError::SizeOutOfRange(size));
        }
        // Both ranges are positive and fit in u32.
        let (months, size) = (months as u32, size as u32);

        let expires_local = add_months(&now, months)
            .ok_or(SubmitError::ExpirationOutOfRange(i64::from(months)))?;
        let created_at = now.with_timezone(&Utc);
        let expires_at = expires_local.with_timezone(&Utc);
        let payload = QrPayload::build(url, form.include_metadata, created_at, expires_at)
            .encode()
            .map_err(|e| SubmitError::RenderFailure(e.to_string()))?;

        self.state.generation += 1;
        Ok(PendingRender {
            generation: self.state.generation,
            request: RenderRequest::new(payload, size),
            url: url.to_string(),
            include_metadata: form.include_metadata,
            created_at,
            expires_at,
            expiration_text: format_long_date(&expires_local),
            deadline: self.config.render_timeout,
        })
    }

    /// Publish a finished render. Results from a submission that has since
    /// been replaced (or reset) are dropped.
    pub fn complete_submit(
        &mut self,
        pending: PendingRender,
        result: Result<RenderedQr, SubmitError>,
    ) -> Result<&ResultView, SubmitError> {
        if pending.generation != self.state.generation {
            debug!(
                generation = pending.generation,
                current = self.state.generation,
                "Discarding stale render"
            );
            return Err(SubmitError::Superseded);
        }

        let image = result.inspect_err(|e| error!("Error generando QR: {e}"))?;

        info!(
            url = %pending.url,
            size = image.width,
            metadata = pending.include_metadata,
            expires_at = %pending.expires_at,
            "QR code generated"
        );

        let notice = Notice::for_metadata(pending.include_metadata);
        self.state.view = ResultView::Rendered {
            notice,
            url_text: (!pending.include_metadata).then(|| pending.url.clone()),
            expiration_text: pending.expiration_text,
        };
        self.state.rendered_image = Some(image);
        self.state.source_url = pending.url;
        self.state.expiration_date = Some(pending.expires_at);
        Ok(&self.state.view)
    }

    /// The stored image under a `qr-code-<unix-ms>.png` name, if any.
    pub fn on_download(&self) -> Option<Download> {
        let image = self.state.rendered_image.as_ref()?;
        Some(Download {
            filename: download_filename(Utc::now()),
            png: image.png.clone(),
        })
    }

    pub fn on_reset(&mut self) {
        let generation = self.state.generation + 1;
        self.state = SessionState {
            generation,
            ..SessionState::default()
        };
        debug!("Form reset");
    }
}

pub fn download_filename(at: DateTime<Utc>) -> String {
    format!("qr-code-{}.png", at.timestamp_millis())
}
