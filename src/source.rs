//! Read access to the external data API.
//!
//! The core only ever reads collections; nothing is written back. The
//! [`HistorySource`] trait is the seam, and [`JsonExportSource`] reads a
//! directory of JSON files exported from the API.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::history::{rollup_sales, DailyHistoryItem};
use crate::sale::{Haircut, ServicePrice};

/// Export file holding the day-level history
pub const DAILY_HISTORY_FILE: &str = "daily_history.json";

/// Export file holding individual sales
pub const SALES_FILE: &str = "haircuts.json";

/// Export file holding the service price table
pub const SERVICE_PRICES_FILE: &str = "service_prices.json";

/// A read-only provider of sales data.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Day-level history, one item per day.
    async fn daily_history(&self) -> Result<Vec<DailyHistoryItem>>;

    /// Every recorded sale.
    async fn sales(&self) -> Result<Vec<Haircut>>;

    /// Configured base prices per service.
    async fn service_prices(&self) -> Result<Vec<ServicePrice>>;
}

/// Fetch sales and prices together, as the report needs both.
pub async fn load_report_data(
    source: &dyn HistorySource,
) -> Result<(Vec<Haircut>, Vec<ServicePrice>)> {
    futures::try_join!(source.sales(), source.service_prices())
}

/// Reads the API's JSON export from a directory.
#[derive(Debug, Clone)]
pub struct JsonExportSource {
    dir: PathBuf,
}

impl JsonExportSource {
    /// Create a source reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory this source reads from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<T> {
        let path = self.dir.join(file);
        let contents = tokio::fs::read_to_string(&path)
            .await
            .inspect_err(|e| warn!(path = %path.display(), error = %e, "Could not read export file"))?;
        let parsed = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), "Loaded export file");
        Ok(parsed)
    }

    async fn exists(&self, file: &str) -> bool {
        tokio::fs::try_exists(self.dir.join(file))
            .await
            .unwrap_or(false)
    }
}

#[async_trait]
impl HistorySource for JsonExportSource {
    async fn daily_history(&self) -> Result<Vec<DailyHistoryItem>> {
        if self.exists(DAILY_HISTORY_FILE).await {
            return self.read_json(DAILY_HISTORY_FILE).await;
        }

        info!(
            dir = %self.dir.display(),
            "No daily history export, rolling it up from individual sales"
        );
        let sales = self.sales().await?;
        Ok(rollup_sales(&sales))
    }

    async fn sales(&self) -> Result<Vec<Haircut>> {
        self.read_json(SALES_FILE).await
    }

    async fn service_prices(&self) -> Result<Vec<ServicePrice>> {
        if self.exists(SERVICE_PRICES_FILE).await {
            self.read_json(SERVICE_PRICES_FILE).await
        } else {
            debug!("No service price export, using default base price for every service");
            Ok(Vec::new())
        }
    }
}
