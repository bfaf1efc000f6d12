//! A session drives one store through a command script.

use shopkeep_core::StoreError;
use shopkeep_products::Product;
use shopkeep_store::{Restock, SaleOutcome, Store};

use crate::command::{Command, CommandError};
use crate::config::StoreConfig;

#[derive(Debug)]
pub struct Session {
    store: Store,
}

impl Session {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(Store::new(config.store_name.clone(), config.starting_money))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Run a single command, returning the text to show (possibly empty).
    pub fn execute(&mut self, command: &Command) -> Result<String, CommandError> {
        let output = match command {
            Command::Order {
                id,
                name,
                description,
                price,
                quantity,
            } => {
                let product = Product::unstocked(id.clone(), name.as_str(), description.as_str(), *price)?;
                describe_restock(self.store.order_product(product, *quantity)?)
            }
            Command::Restock { id, quantity } => {
                let product = self
                    .store
                    .find_product(id)
                    .cloned()
                    .ok_or_else(|| StoreError::not_found(id))?;
                describe_restock(self.store.order_product(product, *quantity)?)
            }
            Command::Sell { id, amount } => match self.store.sell_product(id, *amount)? {
                SaleOutcome::Sold {
                    product_id,
                    quantity,
                    total,
                    remaining,
                } => format!("sold {quantity} x {product_id} for ${total} ({remaining} left)"),
                SaleOutcome::NothingInStock { .. } => String::new(),
            },
            Command::Price { id, price } => {
                let price = self.store.set_product_price(id, *price)?;
                format!("price of {id} set to ${price}")
            }
            Command::Markup { multiplier } => {
                let report = self.store.markup_prices(*multiplier);
                format!(
                    "repriced {} product(s), {} unchanged",
                    report.repriced.len(),
                    report.rejected.len()
                )
            }
            Command::Remove { id } => {
                let product = self.store.remove_product(id)?;
                format!("removed {} ({})", product.id(), product.name())
            }
            Command::Find { id } => match self.store.find_product(id) {
                Some(product) => product.to_string(),
                None => format!("product with id {id} not found"),
            },
            Command::Show => self.store.to_string(),
            Command::Json => serde_json::to_string_pretty(&self.store)
                .map_err(|e| CommandError::Snapshot(e.to_string()))?,
        };
        Ok(output)
    }

    /// Run every line of `script`, collecting output.
    ///
    /// A failing line is reported as `error: line <n>: <reason>` and the
    /// script carries on with the next line.
    pub fn run_script(&mut self, script: &str) -> String {
        let mut output = Vec::new();

        for (index, line) in script.lines().enumerate() {
            let line_no = index + 1;
            let result = Command::parse(line).and_then(|command| match command {
                Some(command) => self.execute(&command),
                None => Ok(String::new()),
            });

            match result {
                Ok(text) if text.is_empty() => {}
                Ok(text) => output.push(text),
                Err(err) => {
                    tracing::warn!(line = line_no, error = %err, "command failed");
                    output.push(format!("error: line {line_no}: {err}"));
                }
            }
        }

        output.join("\n")
    }
}

fn describe_restock(restock: Restock) -> String {
    match restock {
        Restock::Listed {
            product_id,
            quantity,
        } => format!("listed {product_id} with {quantity} in stock"),
        Restock::Replenished {
            product_id,
            before,
            after,
        } => format!("restocked {product_id}: {before} -> {after}"),
    }
}
