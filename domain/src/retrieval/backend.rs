//! Backend identity value objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default name of the in-memory flat index backend
pub const IN_MEMORY_BACKEND: &str = "faiss";

/// Default name of the disk-persisted index backend
pub const DISK_BACKEND: &str = "chroma";

/// Default name of the encrypted index backend (the system of record)
pub const ENCRYPTED_BACKEND: &str = "cyborg";

/// Storage engine family of a similarity-search backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Index held entirely in process memory
    InMemory,
    /// Index loaded from a persisted file
    DiskBacked,
    /// Index served by an encrypted vector service
    Encrypted,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::InMemory => "in_memory",
            BackendKind::DiskBacked => "disk_backed",
            BackendKind::Encrypted => "encrypted",
        }
    }

    /// Human-readable label used in reports
    pub fn display_label(&self) -> &'static str {
        match self {
            BackendKind::InMemory => "FAISS (RAM)",
            BackendKind::DiskBacked => "Chroma (Disk)",
            BackendKind::Encrypted => "CyborgDB (Encrypted)",
        }
    }

    /// Fixed order of backend kinds in report charts
    pub fn chart_order() -> [BackendKind; 3] {
        [
            BackendKind::InMemory,
            BackendKind::Encrypted,
            BackendKind::DiskBacked,
        ]
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a backend can serve queries for the rest of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendAvailability {
    Available,
    Unavailable,
}

impl BackendAvailability {
    pub fn is_available(&self) -> bool {
        matches!(self, BackendAvailability::Available)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendAvailability::Available => "available",
            BackendAvailability::Unavailable => "unavailable",
        }
    }
}

/// Name and kind of a configured backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendDescriptor {
    pub name: String,
    pub kind: BackendKind,
}

impl BackendDescriptor {
    pub fn new(name: impl Into<String>, kind: BackendKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_order_is_memory_encrypted_disk() {
        let labels: Vec<_> = BackendKind::chart_order()
            .iter()
            .map(|k| k.display_label())
            .collect();
        assert_eq!(
            labels,
            vec!["FAISS (RAM)", "CyborgDB (Encrypted)", "Chroma (Disk)"]
        );
    }

    #[test]
    fn test_kind_serde_snake_case() {
        let json = serde_json::to_string(&BackendKind::DiskBacked).unwrap();
        assert_eq!(json, "\"disk_backed\"");
        let kind: BackendKind = serde_json::from_str("\"in_memory\"").unwrap();
        assert_eq!(kind, BackendKind::InMemory);
    }

    #[test]
    fn test_availability() {
        assert!(BackendAvailability::Available.is_available());
        assert!(!BackendAvailability::Unavailable.is_available());
    }
}
