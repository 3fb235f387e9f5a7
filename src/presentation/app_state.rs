// Application state for HTTP handlers
use crate::application::fleet_service::FleetService;
use crate::application::live_ticker::LiveFeed;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub fleet_service: FleetService,
    pub live_feed: Arc<LiveFeed>,
}
