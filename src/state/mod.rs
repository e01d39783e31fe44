// State stores
// Pure functions over `AppState` snapshots: every write returns a new snapshot.

pub mod basic_auth_state;
pub mod persistence;
pub mod tab_state;
pub mod window_state;
