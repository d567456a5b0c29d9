use sea_orm::DatabaseConnection;

/// Shared handler state. The single database handle is opened at startup and
/// passed explicitly rather than living in a global.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
}
