//! Lazy, load-once bundle loaders.
//!
//! A [`BundleLoader`] imports its module on first use and keeps the result
//! (success or failure) for the lifetime of the loader. Concurrent callers
//! share one in-flight import; the module is never imported twice.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use paint_common::strings::{clean_label, clean_string};
use paint_common::{BundleError, ModuleValue, PaintError, UiBundle};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::define::define_bundle;
use crate::manifest::import_manifest;
use crate::parse::coerce_ui_bundle;

pub type ImportError = Box<dyn std::error::Error + Send + Sync>;
pub type ImportFuture = BoxFuture<'static, Result<ModuleValue, ImportError>>;
pub type ImporterFn = Arc<dyn Fn() -> ImportFuture + Send + Sync>;

/// Where a bundle module comes from.
#[derive(Clone)]
pub enum BundleImporter {
    /// Path or `file:` URL of a bundle manifest.
    Specifier(String),
    /// Zero-argument async function returning the module value.
    Function(ImporterFn),
    /// An already-built loader, reused as-is.
    Loader(BundleLoader),
}

impl BundleImporter {
    pub fn specifier(spec: impl Into<String>) -> Self {
        Self::Specifier(spec.into())
    }

    pub fn function<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ModuleValue, ImportError>> + Send + 'static,
    {
        Self::Function(Arc::new(move || -> ImportFuture { Box::pin(f()) }))
    }

    /// Importer that yields an in-process bundle.
    pub fn bundle(bundle: UiBundle) -> Self {
        let module = define_bundle(&bundle);
        Self::function(move || {
            let module = module.clone();
            async move { Ok(module) }
        })
    }
}

impl fmt::Debug for BundleImporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Specifier(spec) => f.debug_tuple("Specifier").field(spec).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
            Self::Loader(loader) => f.debug_tuple("Loader").field(loader).finish(),
        }
    }
}

enum Import {
    Specifier(String),
    Function(ImporterFn),
}

struct LoaderInner {
    display_name: String,
    import: Import,
    cell: OnceCell<Result<Arc<UiBundle>, BundleError>>,
}

impl LoaderInner {
    async fn import_once(&self) -> Result<Arc<UiBundle>, BundleError> {
        debug!(bundle = %self.display_name, "importing bundle");
        let module = match &self.import {
            Import::Specifier(spec) => import_manifest(spec).await,
            Import::Function(f) => f().await.map_err(|e| e.to_string()),
        };

        let result = module
            .and_then(|m| coerce_ui_bundle(&m, &self.display_name))
            .map(Arc::new)
            .map_err(|message| BundleError::new(&self.display_name, message));

        if let Err(e) = &result {
            warn!(bundle = %self.display_name, error = %e, "bundle failed to load");
        }
        result
    }
}

/// A memoized bundle loader with an optional display label.
#[derive(Clone)]
pub struct BundleLoader {
    label: Option<String>,
    inner: Arc<LoaderInner>,
}

impl BundleLoader {
    /// Load the bundle, importing it on the first call only.
    pub async fn load(&self) -> Result<Arc<UiBundle>, BundleError> {
        self.inner
            .cell
            .get_or_init(|| self.inner.import_once())
            .await
            .clone()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Name used in error messages.
    pub fn display_name(&self) -> &str {
        &self.inner.display_name
    }

    /// Whether an import has completed (successfully or not).
    pub fn is_loaded(&self) -> bool {
        self.inner.cell.initialized()
    }

    /// Same underlying load, different label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl fmt::Debug for BundleLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BundleLoader")
            .field("label", &self.label)
            .field("display_name", &self.inner.display_name)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// Wrap an importer in a load-once loader.
///
/// `debug_name` becomes the loader's label and is used in error messages.
/// An empty specifier is rejected immediately.
pub fn module_bundle(
    src: BundleImporter,
    debug_name: Option<&str>,
) -> Result<BundleLoader, PaintError> {
    let label = clean_label(debug_name);

    let (display_name, import) = match src {
        BundleImporter::Loader(loader) => {
            return Ok(match label {
                Some(l) => loader.with_label(l),
                None => loader,
            });
        }
        BundleImporter::Specifier(spec) => {
            let cleaned = clean_string(&spec).map(str::to_string);
            let display = label
                .clone()
                .or_else(|| cleaned.clone())
                .unwrap_or_else(|| "<empty specifier>".to_string());
            let Some(spec) = cleaned else {
                return Err(PaintError::InvalidInput(format!(
                    "Bundle \"{display}\": empty import specifier."
                )));
            };
            (display, Import::Specifier(spec))
        }
        BundleImporter::Function(f) => (
            label.clone().unwrap_or_else(|| "<bundle importer>".to_string()),
            Import::Function(f),
        ),
    };

    Ok(BundleLoader {
        label,
        inner: Arc::new(LoaderInner {
            display_name,
            import,
            cell: OnceCell::new(),
        }),
    })
}
