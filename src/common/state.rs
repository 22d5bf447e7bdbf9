// Application state shared across all modules

use std::sync::Arc;

use crate::common::clock::Clock;
use crate::common::config::AppConfig;
use crate::reservations::policy::ReservationPolicy;
use crate::reservations::store::ReservationLog;
use crate::static_files::StaticRoot;

/// Read-only state built once at startup and handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub clock: Arc<dyn Clock>,
    pub policy: ReservationPolicy,
    pub reservation_log: ReservationLog,
    pub site: StaticRoot,
}

impl AppState {
    pub fn new(config: AppConfig, clock: Arc<dyn Clock>, site: StaticRoot) -> Self {
        let policy = ReservationPolicy::new(config.min_lead_days);
        let reservation_log = ReservationLog::new(config.reservations_log.clone());
        Self {
            config,
            clock,
            policy,
            reservation_log,
            site,
        }
    }
}
