use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Role of the acting user, as established by the upstream auth layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    Admin,
    Editor,
}

impl FromStr for ActorRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(ActorRole::Admin),
            "editor" => Ok(ActorRole::Editor),
            _ => Err(anyhow::anyhow!("Invalid role: {}", s)),
        }
    }
}

/// The identity an import, export or upload is performed on behalf of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub role: ActorRole,
}

impl Actor {
    pub fn new(id: Uuid, role: ActorRole) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ActorRole::Admin
    }
}
