//! Runtime registry mapping provider types to their factories.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::error::{ProviderError, ProviderResult};
use crate::ProviderType;

/// Boxed error returned by [`GenericProvider::close`].
pub type CloseError = Box<dyn std::error::Error + Send + Sync>;

/// Factory producing provider instances on demand.
///
/// A factory may hand out a shared singleton or build a fresh value on
/// every call; the registry makes no assumption either way.
pub type ProviderFactory<P> = Arc<dyn Fn() -> P + Send + Sync>;

/// Lifecycle hook implemented by every provider.
pub trait GenericProvider: Send + Sync {
    /// Releases resources held by the provider.
    ///
    /// # Errors
    ///
    /// Returns the backend failure if the provider could not shut down cleanly.
    fn close(&self) -> Result<(), CloseError> {
        Ok(())
    }
}

impl<T> GenericProvider for Arc<T>
where
    T: GenericProvider + ?Sized,
{
    fn close(&self) -> Result<(), CloseError> {
        (**self).close()
    }
}

/// Immutable description of a provider: who it is, which slot it fills,
/// and how to materialize it.
pub struct ProviderConfig<P> {
    id: String,
    provider_type: ProviderType,
    factory: ProviderFactory<P>,
}

impl<P> ProviderConfig<P> {
    /// Creates a config from its parts.
    #[must_use]
    pub fn new<F>(id: impl Into<String>, provider_type: ProviderType, factory: F) -> Self
    where
        F: Fn() -> P + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            provider_type,
            factory: Arc::new(factory),
        }
    }

    /// Returns the diagnostic identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the slot this config fills.
    #[must_use]
    pub const fn provider_type(&self) -> ProviderType {
        self.provider_type
    }

    /// Invokes the factory.
    #[must_use]
    pub fn instance(&self) -> P {
        (self.factory)()
    }
}

impl<P> Clone for ProviderConfig<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            provider_type: self.provider_type,
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<P> fmt::Debug for ProviderConfig<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("id", &self.id)
            .field("provider_type", &self.provider_type)
            .finish_non_exhaustive()
    }
}

/// Returns a populated [`ProviderConfig`].
#[must_use]
pub fn with_provider<P, F>(
    id: impl Into<String>,
    provider_type: ProviderType,
    factory: F,
) -> ProviderConfig<P>
where
    F: Fn() -> P + Send + Sync + 'static,
{
    ProviderConfig::new(id, provider_type, factory)
}

/// Registry holding at most one provider config per [`ProviderType`].
pub struct ProviderRegistry<P> {
    inner: RwLock<HashMap<ProviderType, ProviderConfig<P>>>,
}

impl<P> Default for ProviderRegistry<P> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<P> fmt::Debug for ProviderRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.read();
        let mut registered: Vec<_> = inner
            .values()
            .map(|config| (config.provider_type, config.id.clone()))
            .collect();
        registered.sort();
        f.debug_struct("ProviderRegistry")
            .field("registered", &registered)
            .finish()
    }
}

impl<P> ProviderRegistry<P> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry and registers `configs` without overwriting.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Duplicate`] if two configs share a type.
    pub fn with_providers<I>(configs: I) -> ProviderResult<Self>
    where
        I: IntoIterator<Item = ProviderConfig<P>>,
    {
        let registry = Self::new();
        registry.register(false, configs)?;
        Ok(registry)
    }

    /// Registers one or more provider configs.
    ///
    /// An existing entry is overwritten when `ignore_existing` is true.
    /// Otherwise a type that is already registered, or that appears twice
    /// in `configs`, rejects the whole batch and leaves the registry
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Duplicate`] naming the first conflicting config.
    pub fn register<I>(&self, ignore_existing: bool, configs: I) -> ProviderResult<()>
    where
        I: IntoIterator<Item = ProviderConfig<P>>,
    {
        let configs: Vec<_> = configs.into_iter().collect();
        let mut inner = self.write();

        if !ignore_existing {
            let mut seen = HashSet::with_capacity(configs.len());
            for config in &configs {
                if inner.contains_key(&config.provider_type) || !seen.insert(config.provider_type)
                {
                    return Err(ProviderError::Duplicate {
                        id: config.id.clone(),
                        provider_type: config.provider_type,
                    });
                }
            }
        }

        for config in configs {
            let id = config.id.clone();
            if let Some(previous) = inner.insert(config.provider_type, config) {
                debug!(
                    provider_type = %previous.provider_type,
                    previous = %previous.id,
                    current = %id,
                    "provider overwritten"
                );
            }
        }

        Ok(())
    }

    /// Materializes the provider registered for `provider_type`.
    ///
    /// The factory runs outside the registry lock.
    #[must_use]
    pub fn find(&self, provider_type: ProviderType) -> Option<P> {
        let config = self.read().get(&provider_type).cloned()?;
        Some(config.instance())
    }

    /// Returns `true` if a provider is registered for `provider_type`.
    #[must_use]
    pub fn contains(&self, provider_type: ProviderType) -> bool {
        self.read().contains_key(&provider_type)
    }

    /// Returns the identifier registered for `provider_type`.
    #[must_use]
    pub fn id_of(&self, provider_type: ProviderType) -> Option<String> {
        self.read().get(&provider_type).map(|config| config.id.clone())
    }

    /// Returns the number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn snapshot(&self) -> Vec<ProviderConfig<P>> {
        let mut configs: Vec<_> = self.read().values().cloned().collect();
        configs.sort_by_key(|config| config.provider_type);
        configs
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<ProviderType, ProviderConfig<P>>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ProviderType, ProviderConfig<P>>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P> ProviderRegistry<P>
where
    P: GenericProvider,
{
    /// Asks every registered provider to close.
    ///
    /// All providers are visited even if some fail.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Close`] listing the ids whose `close` failed.
    pub fn close(&self) -> ProviderResult<()> {
        let mut failed = Vec::new();
        for config in self.snapshot() {
            if let Err(err) = config.instance().close() {
                warn!(id = %config.id, provider_type = %config.provider_type, %err, "provider close failed");
                failed.push(config.id);
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(ProviderError::Close { failed })
        }
    }
}
