use metrics_exporter_prometheus::PrometheusHandle;
use quote_grader::error::AppError;
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read an extraction payload from disk. Accepts either the bare signals
/// object or a `{ "signals": ... }` request envelope.
pub(crate) fn load_signals(path: &Path) -> Result<Value, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&raw)?;
    Ok(unwrap_envelope(document))
}

fn unwrap_envelope(document: Value) -> Value {
    match document {
        Value::Object(mut object) if !object.contains_key("isValidQuote") => {
            match object.remove("signals") {
                Some(signals) => signals,
                None => Value::Object(object),
            }
        }
        other => other,
    }
}
