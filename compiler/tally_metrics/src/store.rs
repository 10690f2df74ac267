//! The shared metric store.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, info};

use crate::MetricKind;

/// Dimension keys of a metric (the `by` clause). Almost always short.
pub type Keys = SmallVec<[String; 4]>;

/// A metric definition as written in a program.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricDef {
    pub name: String,
    /// Name of the program that declared the metric.
    pub program: String,
    pub kind: MetricKind,
    pub keys: Keys,
    /// Hidden metrics are usable by programs but never exported.
    pub hidden: bool,
    /// Name used on export, when it differs from `name` (`as "..."`).
    pub exported_name: Option<String>,
    /// Histogram bucket boundaries.
    pub buckets: Vec<f64>,
}

impl MetricDef {
    /// A dimensionless, visible metric with no program attribution.
    pub fn new(name: impl Into<String>, kind: MetricKind) -> Self {
        MetricDef {
            name: name.into(),
            program: String::new(),
            kind,
            keys: Keys::new(),
            hidden: false,
            exported_name: None,
            buckets: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    #[must_use]
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    #[must_use]
    pub fn with_exported_name(mut self, name: impl Into<String>) -> Self {
        self.exported_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_buckets(mut self, buckets: Vec<f64>) -> Self {
        self.buckets = buckets;
        self
    }

    /// Number of dimension keys.
    pub fn dimensionality(&self) -> usize {
        self.keys.len()
    }

    /// Two definitions are compatible when they agree on kind and keys.
    ///
    /// Presentation details (hidden, export name, buckets) do not take part.
    pub fn is_compatible(&self, other: &MetricDef) -> bool {
        self.kind == other.kind && self.keys == other.keys
    }

    /// Short human-readable signature, e.g. `counter by (host, code)`.
    pub fn signature(&self) -> String {
        if self.keys.is_empty() {
            self.kind.to_string()
        } else {
            format!("{} by ({})", self.kind, self.keys.join(", "))
        }
    }
}

/// Shared reference to a registered metric.
///
/// Handles stay valid for as long as anything holds them, independent of the
/// store.
#[derive(Clone, Debug)]
pub struct MetricHandle(Arc<MetricDef>);

impl MetricHandle {
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn kind(&self) -> MetricKind {
        self.0.kind
    }

    pub fn keys(&self) -> &[String] {
        &self.0.keys
    }

    pub fn dimensionality(&self) -> usize {
        self.0.dimensionality()
    }

    pub fn def(&self) -> &MetricDef {
        &self.0
    }
}

/// Errors returned by [`MetricStore::register`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The name is taken by an incompatible definition.
    #[error(
        "metric '{name}' already declared as {existing} in '{existing_program}', cannot redeclare as {requested}"
    )]
    Conflict {
        name: String,
        existing: String,
        existing_program: String,
        requested: String,
    },
    #[error("metric name must not be empty")]
    EmptyName,
}

/// Process-wide catalog of exported metrics.
///
/// Cheap to clone; all clones share the same catalog.
///
/// # Thread Safety
/// Uses `Arc<RwLock<_>>` internally. Lookups take the read lock,
/// registration takes the write lock for the whole check-and-insert.
#[derive(Clone, Default)]
pub struct MetricStore(Arc<RwLock<FxHashMap<String, MetricHandle>>>);

impl MetricStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a registered metric by name.
    pub fn lookup(&self, name: &str) -> Option<MetricHandle> {
        self.0.read().get(name).cloned()
    }

    /// Register a metric, or return the existing compatible registration.
    pub fn register(&self, def: MetricDef) -> Result<MetricHandle, RegistryError> {
        if def.name.is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let mut metrics = self.0.write();
        if let Some(existing) = metrics.get(&def.name) {
            if existing.def().is_compatible(&def) {
                debug!(name = %def.name, program = %def.program, "metric already registered");
                return Ok(existing.clone());
            }
            return Err(RegistryError::Conflict {
                name: def.name.clone(),
                existing: existing.def().signature(),
                existing_program: existing.def().program.clone(),
                requested: def.signature(),
            });
        }

        info!(
            name = %def.name,
            kind = %def.kind,
            dims = def.dimensionality(),
            program = %def.program,
            "registered metric"
        );
        let handle = MetricHandle(Arc::new(def));
        metrics.insert(handle.name().to_owned(), handle.clone());
        Ok(handle)
    }

    /// Number of registered metrics.
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Snapshot of all registered metrics, sorted by name.
    pub fn metrics(&self) -> Vec<MetricHandle> {
        let mut all: Vec<MetricHandle> = self.0.read().values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }
}

impl fmt::Debug for MetricStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.metrics().iter().map(|m| m.name().to_owned()).collect();
        f.debug_tuple("MetricStore").field(&names).finish()
    }
}
