use tracing::{debug, info, instrument, warn};
use crate::actor_framework::{Filter, ResourceClient};
use crate::domain::{Product, ProductPayload};
use crate::product_actor::ProductError;

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

impl ProductClient {
    #[instrument(skip(self), fields(name = %payload.name))]
    pub async fn create_product(&self, payload: ProductPayload) -> Result<Product, ProductError> {
        debug!("Sending request");
        payload.validate().map_err(ProductError::ValidationError)?;
        let product = self.inner.create(payload).await?;
        info!(product_id = product.id, "Product created");
        Ok(product)
    }

    /// Overwrites name, type, price and stock flag of an existing product.
    ///
    /// The stored version is read first and the write is conditional on it,
    /// so a write that lands in between surfaces as [`ProductError::Conflict`].
    #[instrument(skip(self, payload))]
    pub async fn update_product(&self, id: i32, payload: ProductPayload) -> Result<Product, ProductError> {
        debug!("Sending request");
        payload.validate().map_err(ProductError::ValidationError)?;

        let current = self
            .inner
            .get(id)
            .await?
            .ok_or_else(|| ProductError::missing_id(id))?;

        match self.inner.update(id, payload, Some(current.version)).await {
            Ok(product) => {
                info!(version = current.version + 1, "Product updated");
                Ok(product)
            }
            Err(e) => {
                warn!(error = %e, "Product update failed");
                Err(e.into())
            }
        }
    }

    /// Products whose type equals `kind` exactly.
    #[instrument(skip(self))]
    pub async fn find_by_type(&self, kind: String) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let wanted = kind.clone();
        let products = self
            .inner
            .list(Some(Filter::new(move |p: &Product| p.kind == wanted)))
            .await?;
        if products.is_empty() {
            return Err(ProductError::NotFound(format!("No products of type: {kind}")));
        }
        Ok(products)
    }

    /// Products whose name contains `fragment` (case-sensitive).
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, fragment: String) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let wanted = fragment.clone();
        let products = self
            .inner
            .list(Some(Filter::new(move |p: &Product| p.name.contains(wanted.as_str()))))
            .await?;
        if products.is_empty() {
            return Err(ProductError::NotFound(format!("No products with a name containing: {fragment}")));
        }
        Ok(products)
    }
}
