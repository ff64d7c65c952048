use super::wizard::DEFAULT_TIMEOUT;
use crate::domain::catalog::CatalogEntity;
use crate::domain::envelope::{ErrorBody, ErrorCode};
use crate::domain::ports::ServiceBox;
use crate::domain::vertical::Vertical;
use crate::error::MarketError;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState<E> {
    Idle,
    Ready(Vec<E>),
    /// The fetch failed; nothing is fetched again until [`CatalogLoader::retry`].
    Failed(ErrorBody),
}

/// Fetches a vertical's catalog once and keeps the outcome.
pub struct CatalogLoader<V: Vertical> {
    service: ServiceBox<V>,
    filter: Option<String>,
    state: CatalogState<V::Entity>,
    timeout: Duration,
}

impl<V: Vertical> CatalogLoader<V> {
    pub fn new(service: ServiceBox<V>) -> Self {
        Self {
            service,
            filter: None,
            state: CatalogState::Idle,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn state(&self) -> &CatalogState<V::Entity> {
        &self.state
    }

    /// Fetches the catalog if nothing was fetched yet. A failed fetch is not
    /// repeated.
    pub async fn load(&mut self) -> &CatalogState<V::Entity> {
        if matches!(self.state, CatalogState::Idle) {
            self.fetch().await;
        }
        &self.state
    }

    /// Fetches the catalog again, whatever the current state.
    pub async fn retry(&mut self) -> &CatalogState<V::Entity> {
        self.fetch().await;
        &self.state
    }

    async fn fetch(&mut self) {
        let call = self.service.fetch_catalog(self.filter.as_deref());
        let outcome = match tokio::time::timeout(self.timeout, call).await {
            Ok(response) => response.into_result(),
            Err(_) => Err(ErrorBody::new(
                ErrorCode::Timeout,
                MarketError::Timeout(self.timeout).to_string(),
            )),
        };
        self.state = match outcome {
            Ok(entities) => CatalogState::Ready(entities),
            Err(body) => {
                tracing::warn!(vertical = V::NAME, code = ?body.code, message = %body.message, "Catalog fetch failed");
                CatalogState::Failed(body)
            }
        };
    }

    /// Loaded entities; empty unless the catalog is ready.
    pub fn entities(&self) -> &[V::Entity] {
        match &self.state {
            CatalogState::Ready(entities) => entities,
            _ => &[],
        }
    }

    pub fn find(&self, id: &str) -> Option<&V::Entity> {
        self.entities().iter().find(|e| e.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::RetailBrand;
    use crate::domain::envelope::Response;
    use crate::domain::ports::VerticalService;
    use crate::domain::purchase::{VoucherReceipt, VoucherRequest};
    use crate::domain::vertical::Vouchers;
    use crate::infrastructure::mock::data;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails the first `failures` fetches, then serves the brand table.
    struct Flaky {
        failures: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl VerticalService<Vouchers> for Flaky {
        async fn fetch_catalog(&self, _filter: Option<&str>) -> Response<Vec<RetailBrand>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Response::err(ErrorCode::NetworkError, "connection reset")
            } else {
                Response::ok(data::brands())
            }
        }

        async fn purchase(&self, _request: VoucherRequest) -> Response<VoucherReceipt> {
            Response::err(ErrorCode::InternalError, "not used")
        }
    }

    fn flaky(failures: usize) -> Arc<Flaky> {
        Arc::new(Flaky {
            failures,
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_failed_fetch_waits_for_retry() {
        let service = flaky(1);
        let mut loader = CatalogLoader::<Vouchers>::new(service.clone());
        assert_eq!(loader.state(), &CatalogState::Idle);

        assert!(matches!(loader.load().await, CatalogState::Failed(_)));
        assert!(matches!(loader.load().await, CatalogState::Failed(_)));
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert!(loader.entities().is_empty());

        assert!(matches!(loader.retry().await, CatalogState::Ready(_)));
        assert_eq!(loader.find("ikea").map(|b| b.name.as_str()), Some("IKEA"));
    }

    #[tokio::test]
    async fn test_ready_catalog_is_cached() {
        let service = flaky(0);
        let mut loader = CatalogLoader::<Vouchers>::new(service.clone());
        loader.load().await;
        loader.load().await;
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(loader.entities().len(), data::brands().len());
    }
}
