pub mod exercises;
pub mod training;

use crate::config::AnalyticsConfig;
use crate::source::SessionSource;
use std::sync::Arc;

/// Shared state handed to every command
#[derive(Clone)]
pub struct AppState {
  pub source: Arc<dyn SessionSource>,
  pub config: AnalyticsConfig,
}

impl AppState {
  pub fn new(source: impl SessionSource + 'static, config: AnalyticsConfig) -> Self {
    Self {
      source: Arc::new(source),
      config,
    }
  }
}
