use crate::actor_framework::Entity;
use crate::domain::{Product, ProductPayload};

impl Entity for Product {
    type Id = i32;
    type CreatePayload = ProductPayload;
    type Patch = ProductPayload;

    fn id(&self) -> &i32 { &self.id }

    /// Creates a new Product from a validated payload.
    ///
    /// # Arguments
    /// * `id` - Identity assigned by the store
    /// * `payload` - Name, type, price and stock flag
    fn from_create(id: i32, payload: ProductPayload) -> Result<Self, String> {
        payload.validate()?;
        Ok(Self {
            id,
            name: payload.name,
            kind: payload.kind,
            price: payload.price,
            in_stock: payload.in_stock,
        })
    }

    /// Overwrites every mutable field. The id is never touched.
    fn on_update(&mut self, patch: ProductPayload) -> Result<(), String> {
        patch.validate()?;
        self.name = patch.name;
        self.kind = patch.kind;
        self.price = patch.price;
        self.in_stock = patch.in_stock;
        Ok(())
    }
}
