//! # Step identity.
//!
//! [`SagaTask`] names the saga step a policy is working on. Policies only use
//! it for diagnostics (log fields, event payloads, error messages).

use std::{fmt, sync::Arc};

/// Identity of a saga step.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SagaTask {
    id: Arc<str>,
    name: Arc<str>,
}

impl SagaTask {
    pub fn new(id: impl Into<Arc<str>>, name: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Stable identifier of the step within its saga.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable step name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn id_arc(&self) -> Arc<str> {
        Arc::clone(&self.id)
    }
}

impl fmt::Display for SagaTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.id)
    }
}
