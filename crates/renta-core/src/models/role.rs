//! Role domain model.

use serde::{Deserialize, Serialize};

/// A named user category (`roles` table): "admin", "empleado",
/// "cliente".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
}
