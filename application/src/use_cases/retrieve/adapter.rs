//! Backend adapter
//!
//! Uniform, fail-silent wrapper around one [`VectorBackend`].

use crate::ports::vector_backend::{BackendError, VectorBackend};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use vault_domain::{BackendAvailability, BackendDescriptor, BackendKind, RankedItem};

/// Result of one adapter call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdapterOutcome {
    pub items: Vec<RankedItem>,
    /// Wall-clock seconds spent inside the backend call; 0 if skipped
    pub elapsed_secs: f64,
    /// False when no call was made
    pub measured: bool,
}

impl AdapterOutcome {
    fn skipped() -> Self {
        Self::default()
    }
}

/// One configured backend, available or permanently unavailable
///
/// An adapter whose backend failed to construct never attempts a call:
/// every [`query`](Self::query) returns an empty, zero-time outcome.
#[derive(Clone)]
pub struct BackendAdapter {
    name: String,
    kind: BackendKind,
    backend: Option<Arc<dyn VectorBackend>>,
}

impl BackendAdapter {
    /// Wrap a constructed backend
    pub fn new(name: impl Into<String>, backend: Arc<dyn VectorBackend>) -> Self {
        Self {
            name: name.into(),
            kind: backend.kind(),
            backend: Some(backend),
        }
    }

    /// Wrap the result of constructing a backend.
    ///
    /// A construction failure is logged once here and the adapter stays
    /// unavailable for the rest of the session.
    pub fn connect(
        name: impl Into<String>,
        kind: BackendKind,
        backend: Result<Arc<dyn VectorBackend>, BackendError>,
    ) -> Self {
        let name = name.into();
        match backend {
            Ok(backend) => Self {
                name,
                kind,
                backend: Some(backend),
            },
            Err(e) => {
                warn!("Backend '{}' unavailable for this session: {}", name, e);
                Self {
                    name,
                    kind,
                    backend: None,
                }
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    pub fn descriptor(&self) -> BackendDescriptor {
        BackendDescriptor::new(self.name.clone(), self.kind)
    }

    pub fn availability(&self) -> BackendAvailability {
        if self.backend.is_some() {
            BackendAvailability::Available
        } else {
            BackendAvailability::Unavailable
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Query the backend, timing only its own call
    pub async fn query(&self, text: &str, top_k: usize) -> Result<AdapterOutcome, BackendError> {
        let Some(backend) = &self.backend else {
            return Ok(AdapterOutcome::skipped());
        };

        debug!("Querying backend '{}'", self.name);
        let start = Instant::now();
        let items = backend.similarity_search(text, top_k).await?;
        let elapsed_secs = start.elapsed().as_secs_f64();
        debug!(
            "Backend '{}' returned {} items in {:.4}s",
            self.name,
            items.len(),
            elapsed_secs
        );

        Ok(AdapterOutcome {
            items,
            elapsed_secs,
            measured: true,
        })
    }
}

impl std::fmt::Debug for BackendAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendAdapter")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("availability", &self.availability())
            .finish()
    }
}
