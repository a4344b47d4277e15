//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    ("SERVER_PORT", "8080", "HTTP port for the page and its API"),
    ("BIND_ADDRESS", "127.0.0.1", "Interface the server listens on"),
    (
        "QR_DEFAULT_EXPIRATION_MONTHS",
        "12",
        "Months used when the expiration field is empty",
    ),
    ("QR_DEFAULT_SIZE", "256", "Image side in pixels when the size field is empty"),
    (
        "QR_RENDER_TIMEOUT_MS",
        "5000",
        "How long a render may take before the submission fails",
    ),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}
