use serde::Serialize;

use shopkeep_core::{Entity, Money, ProductId, StoreError, StoreResult};

/// Result of an accepted quantity change.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum QuantityChange {
    /// The full amount was added or removed.
    Applied { before: u64, after: u64 },
    /// A decrease asked for more than was in stock; stock is now zero.
    ClampedToZero { requested: u64, removed: u64 },
}

impl QuantityChange {
    pub fn quantity_after(self) -> u64 {
        match self {
            QuantityChange::Applied { after, .. } => after,
            QuantityChange::ClampedToZero { .. } => 0,
        }
    }
}

/// Entity: Product.
///
/// Price and quantity are non-negative by construction (`Money` and `u64`);
/// the mutators below are the only way to change them after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    price: Money,
    quantity: u64,
}

impl Product {
    /// Create a product with an initial stock level.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        quantity: u64,
    ) -> StoreResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StoreError::validation("name cannot be empty"));
        }

        Ok(Self {
            id: id.into(),
            name,
            description: description.into(),
            price,
            quantity,
        })
    }

    /// Create a product with no stock yet (the usual input to `order_product`).
    pub fn unstocked(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
    ) -> StoreResult<Self> {
        Self::new(id, name, description, price, 0)
    }

    /// Create a product from unchecked numeric input.
    ///
    /// Applies the same rules as the mutators: the price must be a finite,
    /// non-negative number (rounded to cents) and the quantity must not be
    /// negative.
    pub fn from_raw(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> StoreResult<Self> {
        let price = Money::from_decimal(price)?;
        let quantity = u64::try_from(quantity)
            .map_err(|_| StoreError::validation("quantity cannot be negative"))?;
        Self::new(id, name, description, price, quantity)
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Add `amount` units to stock.
    pub fn increase_quantity(&mut self, amount: i64) -> StoreResult<QuantityChange> {
        let amount = self.positive_amount(amount)?;
        let before = self.quantity;
        let after = before.checked_add(amount).ok_or_else(|| {
            StoreError::overflow(format!("quantity of {} exceeds u64", self.id))
        })?;

        self.quantity = after;
        tracing::debug!(product_id = %self.id, before, after, "stock increased");
        Ok(QuantityChange::Applied { before, after })
    }

    /// Remove `amount` units from stock.
    ///
    /// Removing more than is in stock empties it instead of failing; the
    /// caller is told through [`QuantityChange::ClampedToZero`].
    pub fn decrease_quantity(&mut self, amount: i64) -> StoreResult<QuantityChange> {
        let amount = self.positive_amount(amount)?;
        let before = self.quantity;

        if amount > before {
            tracing::warn!(
                product_id = %self.id,
                requested = amount,
                remaining = before,
                "cannot remove {amount}; the remaining {before} in stock is removed"
            );
            self.quantity = 0;
            return Ok(QuantityChange::ClampedToZero {
                requested: amount,
                removed: before,
            });
        }

        let after = before - amount;
        self.quantity = after;
        tracing::debug!(product_id = %self.id, before, after, "stock decreased");
        Ok(QuantityChange::Applied { before, after })
    }

    /// Replace the price, rounded to 2 decimals (see [`Money::from_decimal`]).
    ///
    /// Negative or non-finite prices leave the current price in place.
    pub fn set_price(&mut self, price: f64) -> StoreResult<Money> {
        match Money::from_decimal(price) {
            Ok(price) => {
                self.set_price_money(price);
                Ok(price)
            }
            Err(err) => {
                tracing::debug!(product_id = %self.id, price, "price update ignored");
                Err(err)
            }
        }
    }

    pub fn set_price_money(&mut self, price: Money) {
        tracing::debug!(product_id = %self.id, old = %self.price, new = %price, "price set");
        self.price = price;
    }

    fn positive_amount(&self, amount: i64) -> StoreResult<u64> {
        if amount <= 0 {
            tracing::warn!(product_id = %self.id, amount, "amount must be greater than zero");
            return Err(StoreError::NonPositiveAmount(amount));
        }
        Ok(amount.unsigned_abs())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Product: {}", self.name)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Quantity: {}", self.quantity)?;
        write!(f, "Price: ${} each.", self.price)
    }
}
