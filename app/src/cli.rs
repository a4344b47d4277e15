//! Interactive terminal generator.
//!
//! Asks for the URL, the months until expiration, the kind of QR and the
//! output file, then renders through the same controller as the page.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;
use qr_engine::QrCodeRenderer;
use qr_form::input::EXPIRATION_MONTHS_RANGE;
use qr_form::{FormController, FormInput, SubmitError};

use crate::config::AppConfig;

/// What kind of QR the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrKind {
    /// Bare URL; the date is a reference for the user only.
    Simple,
    /// JSON envelope with creation and expiration dates.
    Metadata,
}

impl QrKind {
    fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(Self::Simple),
            "2" => Some(Self::Metadata),
            _ => None,
        }
    }

    fn default_filename(self) -> &'static str {
        match self {
            Self::Simple => "qr_simple.png",
            Self::Metadata => "qr_metadata.png",
        }
    }
}

/// `name` with a `.png` extension, or `default` when blank.
pub fn output_filename(name: &str, default: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        default.to_string()
    } else if name.ends_with(".png") {
        name.to_string()
    } else {
        format!("{name}.png")
    }
}

fn prompt<I: BufRead, O: Write>(input: &mut I, out: &mut O, question: &str) -> Result<String> {
    write!(out, "{question}")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("failed to read answer")?;
    Ok(line.trim().to_string())
}

/// Run one interactive session, writing the PNG under `dir`.
pub async fn run<I: BufRead, O: Write>(
    input: &mut I,
    out: &mut O,
    config: &AppConfig,
    dir: &Path,
) -> Result<PathBuf> {
    writeln!(out, "╔═══════════════════════════════════════════════╗")?;
    writeln!(out, "║    🎯 Generador de Códigos QR con Expiración  ║")?;
    writeln!(out, "╚═══════════════════════════════════════════════╝\n")?;

    let url = prompt(input, out, "📎 Ingresa el link/URL: ")?;
    if url.is_empty() {
        bail!("Error: Debes ingresar una URL válida");
    }

    writeln!(out, "\n⏰ ¿Cuántos meses hasta la expiración?")?;
    let months = prompt(
        input,
        out,
        &format!(
            "   (Enter para {} meses): ",
            config.default_expiration_months
        ),
    )?;
    // Anything but plain digits means "use the default"; digits are taken
    // as typed, so 0 is rejected instead of silently becoming the default.
    let months = if !months.is_empty() && months.chars().all(|c| c.is_ascii_digit()) {
        let n = months.parse::<i64>().unwrap_or(i64::MAX);
        if !EXPIRATION_MONTHS_RANGE.contains(&n) {
            return Err(SubmitError::ExpirationOutOfRange(n).into());
        }
        months
    } else {
        String::new()
    };

    writeln!(out, "\n📋 ¿Qué tipo de QR deseas generar?")?;
    writeln!(out, "   1. QR Simple (solo URL)")?;
    writeln!(out, "   2. QR con Metadata (incluye fechas en JSON)")?;
    let choice = prompt(input, out, "\n   Selecciona una opción (1/2): ")?;
    let Some(kind) = QrKind::from_choice(&choice) else {
        bail!("Opción no válida");
    };

    let default_name = kind.default_filename();
    let name = prompt(
        input,
        out,
        &format!("\n💾 Nombre del archivo (Enter para '{default_name}'): "),
    )?;
    let path = dir.join(output_filename(&name, default_name));

    let mut controller =
        FormController::with_config(QrCodeRenderer::new(), config.form_config());
    let form = FormInput::new(url)
        .expiration(months)
        .metadata(kind == QrKind::Metadata);
    let pending = controller.begin_submit(&form, Local::now())?;
    let (created_at, expires_at) = (pending.created_at(), pending.expires_at());
    let result = pending.render(controller.renderer().as_ref()).await;
    controller.complete_submit(pending, result)?;

    let image = controller
        .rendered_image()
        .context("render finished without an image")?;
    tokio::fs::write(&path, &image.png)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "QR image saved");

    let created = created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
    let expires = expires_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");

    writeln!(out, "\n✓ Código QR generado exitosamente: {}", path.display())?;
    writeln!(out, "✓ URL: {}", controller.source_url())?;
    match kind {
        QrKind::Metadata => {
            writeln!(out, "✓ Fecha de creación: {created}")?;
            writeln!(out, "✓ Fecha de expiración: {expires}")?;
            writeln!(out, "\n⚠️  IMPORTANTE:")?;
            writeln!(out, "   Este QR contiene un JSON con la URL y las fechas.")?;
            writeln!(out, "   Necesitas una app que valide la fecha de expiración.")?;
            writeln!(out, "   El QR por sí mismo NO expirará automáticamente.\n")?;
        }
        QrKind::Simple => {
            writeln!(out, "✓ Fecha de referencia de expiración: {expires}")?;
            writeln!(out, "\n⚠️  IMPORTANTE:")?;
            writeln!(out, "   Los códigos QR NO expiran automáticamente.")?;
            writeln!(out, "   Este QR funcionará siempre mientras la URL sea válida.")?;
            writeln!(out, "   La fecha es solo una referencia para tu control.\n")?;
            writeln!(out, "💡 TIP: Para expiración real, usa un acortador de URLs con caducidad")?;
            writeln!(out, "   y luego genera el QR del link corto.\n")?;
        }
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "qr-expiry-cli-{name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    async fn run_with(answers: &str, dir: &Path) -> (Result<PathBuf>, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = run(&mut input, &mut out, &AppConfig::default(), dir).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn output_filename_appends_png() {
        assert_eq!(output_filename("", "qr_simple.png"), "qr_simple.png");
        assert_eq!(output_filename("mine", "qr_simple.png"), "mine.png");
        assert_eq!(output_filename("mine.png", "qr_simple.png"), "mine.png");
    }

    #[test]
    fn kind_choices() {
        assert_eq!(QrKind::from_choice("1"), Some(QrKind::Simple));
        assert_eq!(QrKind::from_choice("2"), Some(QrKind::Metadata));
        assert_eq!(QrKind::from_choice("3"), None);
        assert_eq!(QrKind::Metadata.default_filename(), "qr_metadata.png");
    }

    #[tokio::test]
    async fn metadata_session_writes_png() {
        let dir = scratch_dir("metadata");
        let (result, output) = run_with("https://example.com\n3\n2\ncard\n", &dir).await;
        let path = result.unwrap();

        assert_eq!(path, dir.join("card.png"));
        let png = std::fs::read(&path).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert!(output.contains("✓ URL: https://example.com"));
        assert!(output.contains("Fecha de expiración"));
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn simple_session_uses_default_name_and_months() {
        let dir = scratch_dir("simple");
        let (result, output) = run_with("https://example.com\n\n1\n\n", &dir).await;
        assert_eq!(result.unwrap(), dir.join("qr_simple.png"));
        assert!(output.contains("Fecha de referencia de expiración"));
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn empty_url_is_an_error() {
        let dir = scratch_dir("empty");
        let (result, _) = run_with("\n", &dir).await;
        assert!(result.unwrap_err().to_string().contains("URL válida"));
    }

    #[tokio::test]
    async fn unknown_option_is_an_error() {
        let dir = scratch_dir("option");
        let (result, _) = run_with("https://example.com\n12\n7\n", &dir).await;
        assert_eq!(result.unwrap_err().to_string(), "Opción no válida");
    }

    #[tokio::test]
    async fn zero_months_is_out_of_range() {
        let dir = scratch_dir("zero");
        let (result, _) = run_with("https://example.com\n0\n1\n\n", &dir).await;
        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<SubmitError>(),
            Some(&SubmitError::ExpirationOutOfRange(0))
        );
        assert!(!dir.join("qr_simple.png").exists());
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn summary_dates_match_the_payload() {
        let dir = scratch_dir("dates");
        let (result, output) = run_with("https://example.com\n2\n2\n\n", &dir).await;
        result.unwrap();

        let date_of = |label: &str| {
            let line = output.lines().find(|l| l.contains(label)).unwrap();
            let stamp = line.rsplit(": ").next().unwrap();
            chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").unwrap()
        };
        let created = date_of("Fecha de creación");
        let expires = date_of("Fecha de expiración");
        assert!(expires > created);
        assert_eq!(expires.time(), created.time());
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn invalid_url_reports_controller_error() {
        let dir = scratch_dir("invalid");
        let (result, _) = run_with("example.com\n\n1\n\n", &dir).await;
        assert!(result.unwrap_err().to_string().contains("http://"));
    }
}
