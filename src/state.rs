use crate::services::MessageStore;

/// Shared handler state. The store handle is injected here rather than
/// living in a global; handlers reach the backing file only through it.
#[derive(Clone)]
pub struct AppState {
    pub store: MessageStore,
}
