use metrics_exporter_prometheus::PrometheusHandle;
use room_allocator::allocation::RoomInventory;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) default_inventory: RoomInventory,
}

pub(crate) fn parse_inventory(raw: &str) -> Result<RoomInventory, String> {
    raw.parse::<RoomInventory>()
        .map_err(|err| format!("failed to parse '{raw}' as <capacity>=<count>,... ({err})"))
}
