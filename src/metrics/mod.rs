//! Metrics for cleaning runs
//!
//! Counters and histograms are emitted through the `metrics` facade. When no
//! recorder is installed the macros are no-ops, so library users and tests pay
//! nothing. The binary installs a Prometheus recorder when a snapshot path is
//! configured and writes the rendered text at the end of the run.

pub mod cleaning;

pub use cleaning::CleaningMetrics;

use std::fs;
use std::path::Path;
use std::sync::{Once, OnceLock};
use tracing::{info, warn};

use crate::error::Result;

static INIT: Once = Once::new();
static HANDLE: OnceLock<metrics_exporter_prometheus::PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Idempotent.
pub fn init_metrics() {
    INIT.call_once(|| {
        match metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                if HANDLE.set(handle).is_err() {
                    warn!("METRICS: recorder handle was already stored");
                }
                cleaning::register_metrics();
                info!("Prometheus recorder installed");
            }
            Err(e) => {
                warn!("Failed to install Prometheus recorder: {}", e);
            }
        }
    });
}

/// Rendered Prometheus text for everything recorded so far, if a recorder is installed
pub fn render_snapshot() -> Option<String> {
    HANDLE.get().map(|handle| handle.render())
}

/// Write the current snapshot to `path`. Does nothing without a recorder.
pub fn write_snapshot(path: &Path) -> Result<()> {
    let Some(snapshot) = render_snapshot() else {
        warn!("Metrics snapshot requested but no recorder is installed");
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, snapshot)?;
    info!("📈 Wrote metrics snapshot to {}", path.display());
    Ok(())
}

/// Builds metric names following the convention:
/// sales_{phase}_{metric_name}_{type}
macro_rules! phase_metric {
    (counter, $phase:literal, $name:literal) => {
        concat!("sales_", $phase, "_", $name, "_total")
    };
    (histogram, $phase:literal, $name:literal) => {
        concat!("sales_", $phase, "_", $name)
    };
    (gauge, $phase:literal, $name:literal) => {
        concat!("sales_", $phase, "_", $name)
    };
}

pub(crate) use phase_metric;
