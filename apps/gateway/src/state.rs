use ppe_portal_application::RelayService;

/// Shared gateway state.
#[derive(Clone)]
pub struct AppState {
    pub relay_service: RelayService,
}
