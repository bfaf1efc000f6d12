use serde::Serialize;

use shopkeep_core::{Entity, Money, ProductId, StoreError, StoreResult};
use shopkeep_products::Product;

const STOCK_DELIMITER: &str = "===========";

/// Result of an accepted `order_product`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Restock {
    /// The product was new to the store and has been appended to the catalogue.
    Listed { product_id: ProductId, quantity: u64 },
    /// The product was already tracked; only its stock grew.
    Replenished {
        product_id: ProductId,
        before: u64,
        after: u64,
    },
}

/// Result of an accepted `sell_product`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleOutcome {
    Sold {
        product_id: ProductId,
        quantity: u64,
        total: Money,
        remaining: u64,
    },
    /// The product exists but has no stock; nothing happened.
    NothingInStock { product_id: ProductId },
}

/// Per-product result of `markup_prices`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupReport {
    pub repriced: Vec<(ProductId, Money)>,
    /// Products whose computed price was negative, not finite or too large (price unchanged).
    pub rejected: Vec<ProductId>,
}

/// A store: name, money balance and products in insertion order.
///
/// Product ids are unique within the catalogue. Every operation either
/// applies fully or returns an error with the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Store {
    name: String,
    money: Money,
    products: Vec<Product>,
}

impl Store {
    pub fn new(name: impl Into<String>, money: Money) -> Self {
        Self {
            name: name.into(),
            money,
            products: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn money(&self) -> Money {
        self.money
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// First product whose id equals `id`.
    pub fn find_product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id() == id)
    }

    fn position(&self, id: &ProductId) -> StoreResult<usize> {
        self.products
            .iter()
            .position(|product| product.id() == id)
            .ok_or_else(|| {
                tracing::warn!(product_id = %id, "product not found");
                StoreError::not_found(id)
            })
    }

    /// Restock `quantity` units of `product`.
    ///
    /// If the store already tracks the product's id, the existing entry grows
    /// and the incoming value is dropped. Otherwise the incoming product, with
    /// `quantity` added to its own stock, is appended. Money is not debited.
    pub fn order_product(&mut self, mut product: Product, quantity: i64) -> StoreResult<Restock> {
        if let Some(existing) = self
            .products
            .iter_mut()
            .find(|existing| existing.same_identity(&product))
        {
            let before = existing.quantity();
            let after = existing.increase_quantity(quantity)?.quantity_after();
            tracing::info!(product_id = %existing.id(), before, after, "product restocked");
            return Ok(Restock::Replenished {
                product_id: existing.id().clone(),
                before,
                after,
            });
        }

        let quantity = product.increase_quantity(quantity)?.quantity_after();
        let product_id = product.id().clone();
        tracing::info!(product_id = %product_id, quantity, "product listed");
        self.products.push(product);
        Ok(Restock::Listed {
            product_id,
            quantity,
        })
    }

    /// Sell `amount` units of the product with `id`.
    ///
    /// The sale is all-or-nothing: asking for more than is in stock fails
    /// with [`StoreError::InsufficientStock`] and nothing is sold. A product
    /// with no stock at all is a silent no-op.
    pub fn sell_product(&mut self, id: &ProductId, amount: i64) -> StoreResult<SaleOutcome> {
        let index = self.position(id)?;
        if amount <= 0 {
            tracing::warn!(product_id = %id, amount, "amount must be greater than zero");
            return Err(StoreError::NonPositiveAmount(amount));
        }

        let product = &self.products[index];
        let available = product.quantity();
        if available == 0 {
            return Ok(SaleOutcome::NothingInStock {
                product_id: id.clone(),
            });
        }

        let requested = amount.unsigned_abs();
        if requested > available {
            tracing::warn!(
                product_id = %id,
                requested,
                available,
                "this quantity ({requested}) cannot be sold as there are only ({available}) {}(s) remaining in stock; the item is sold out",
                product.name()
            );
            return Err(StoreError::InsufficientStock {
                name: product.name().to_string(),
                requested,
                available,
            });
        }

        let total = product.price().checked_mul(requested)?;
        let money = self.money.checked_add(total)?;

        let remaining = self.products[index]
            .decrease_quantity(amount)?
            .quantity_after();
        self.money = money;
        tracing::info!(product_id = %id, quantity = requested, total = %total, "product sold");

        Ok(SaleOutcome::Sold {
            product_id: id.clone(),
            quantity: requested,
            total,
            remaining,
        })
    }

    /// Multiply every product's price by `multiplier`, rounding to 2 decimals.
    ///
    /// The product is taken in cents (see [`Money::scale`]). The multiplier
    /// itself is not validated: prices whose computed value is negative, not
    /// finite or too large are rejected and stay unchanged.
    pub fn markup_prices(&mut self, multiplier: f64) -> MarkupReport {
        let mut report = MarkupReport::default();

        for product in &mut self.products {
            match product.price().scale(multiplier) {
                Ok(price) => {
                    product.set_price_money(price);
                    report.repriced.push((product.id().clone(), price));
                }
                Err(err) => {
                    tracing::debug!(product_id = %product.id(), error = %err, "markup ignored");
                    report.rejected.push(product.id().clone());
                }
            }
        }

        tracing::info!(
            multiplier,
            repriced = report.repriced.len(),
            rejected = report.rejected.len(),
            "prices marked up"
        );
        report
    }

    /// Set the price of a single product (see [`Product::set_price`]).
    pub fn set_product_price(&mut self, id: &ProductId, price: f64) -> StoreResult<Money> {
        let index = self.position(id)?;
        self.products[index].set_price(price)
    }

    /// Stop tracking the product with `id`, returning it.
    ///
    /// Zero stock never removes a product; this is the only way out of the
    /// catalogue.
    pub fn remove_product(&mut self, id: &ProductId) -> StoreResult<Product> {
        let index = self.position(id)?;
        let product = self.products.remove(index);
        tracing::info!(product_id = %id, "product removed");
        Ok(product)
    }
}

impl core::fmt::Display for Store {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{}", self.name.to_uppercase())?;

        // Whole amounts keep a single decimal ("$100.0").
        if self.money.is_whole_units() {
            writeln!(f, "Current Holdings: ${}.0", self.money.whole_units())?;
        } else {
            writeln!(f, "Current Holdings: ${}", self.money)?;
        }

        if self.products.is_empty() {
            return write!(f, "This store is out of stock... of everything. *shrug*");
        }

        writeln!(f, "Current Stock:")?;
        for product in &self.products {
            writeln!(f, "{STOCK_DELIMITER}")?;
            writeln!(f, "{product}")?;
            writeln!(f, "{STOCK_DELIMITER}")?;
        }
        Ok(())
    }
}
