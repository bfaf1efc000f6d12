//! Line-oriented command script.
//!
//! One command per line. Arguments are separated by whitespace; wrap an
//! argument in double quotes to keep spaces in it. Blank lines and lines
//! starting with `#` are skipped.
//!
//! ```text
//! order 1 "Sushi Roll" "Fresh salmon nigiri" 45.99 200
//! sell 1 50
//! markup 1.2
//! show
//! ```

use thiserror::Error;

use shopkeep_core::{Money, ProductId, StoreError, parse_amount};

/// Why a script line could not be run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unterminated quote")]
    UnterminatedQuote,

    #[error("invalid multiplier {0:?}: expected a number")]
    InvalidMultiplier(String),

    #[error("failed to render snapshot: {0}")]
    Snapshot(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Order {
        id: ProductId,
        name: String,
        description: String,
        price: Money,
        quantity: i64,
    },
    Restock { id: ProductId, quantity: i64 },
    Sell { id: ProductId, amount: i64 },
    Price { id: ProductId, price: f64 },
    Markup { multiplier: f64 },
    Remove { id: ProductId },
    Find { id: ProductId },
    Show,
    Json,
}

const ORDER_USAGE: &str = "order <id> <name> <description> <price> <quantity>";
const RESTOCK_USAGE: &str = "restock <id> <quantity>";
const SELL_USAGE: &str = "sell <id> <amount>";
const PRICE_USAGE: &str = "price <id> <price>";
const MARKUP_USAGE: &str = "markup <multiplier>";
const REMOVE_USAGE: &str = "remove <id>";
const FIND_USAGE: &str = "find <id>";

impl Command {
    /// Parse one script line. Returns `Ok(None)` for blank and comment lines.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let tokens = tokenize(line)?;
        let Some((verb, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = match (verb.to_ascii_lowercase().as_str(), args) {
            ("order", [id, name, description, price, quantity]) => Command::Order {
                id: id.parse()?,
                name: name.clone(),
                description: description.clone(),
                price: Money::parse(price)?,
                quantity: parse_amount(quantity)?,
            },
            ("order", _) => return Err(CommandError::Usage(ORDER_USAGE)),

            ("restock", [id, quantity]) => Command::Restock {
                id: id.parse()?,
                quantity: parse_amount(quantity)?,
            },
            ("restock", _) => return Err(CommandError::Usage(RESTOCK_USAGE)),

            ("sell", [id, amount]) => Command::Sell {
                id: id.parse()?,
                amount: parse_amount(amount)?,
            },
            ("sell", _) => return Err(CommandError::Usage(SELL_USAGE)),

            ("price", [id, price]) => Command::Price {
                id: id.parse()?,
                price: price
                    .trim()
                    .parse()
                    .map_err(|_| StoreError::invalid_price(price))?,
            },
            ("price", _) => return Err(CommandError::Usage(PRICE_USAGE)),

            ("markup", [multiplier]) => Command::Markup {
                multiplier: multiplier
                    .trim()
                    .parse()
                    .map_err(|_| CommandError::InvalidMultiplier(multiplier.clone()))?,
            },
            ("markup", _) => return Err(CommandError::Usage(MARKUP_USAGE)),

            ("remove", [id]) => Command::Remove { id: id.parse()? },
            ("remove", _) => return Err(CommandError::Usage(REMOVE_USAGE)),

            ("find", [id]) => Command::Find { id: id.parse()? },
            ("find", _) => return Err(CommandError::Usage(FIND_USAGE)),

            ("show", []) => Command::Show,
            ("show", _) => return Err(CommandError::Usage("show")),

            ("json", []) => Command::Json,
            ("json", _) => return Err(CommandError::Usage("json")),

            (other, _) => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    // Distinguishes `""` (an empty argument) from no argument at all.
    let mut pending = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                pending = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if pending {
                    tokens.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }

    if in_quotes {
        return Err(CommandError::UnterminatedQuote);
    }
    if pending {
        tokens.push(current);
    }
    Ok(tokens)
}
