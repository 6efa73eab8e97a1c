//! # Shell
//!
//! Line-oriented front end: one command per input line, one JSON document
//! per output line.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin                 parse()              execute()         stdout    │
//! │  ─────                 ───────              ─────────         ──────    │
//! │  "add 4 2"  ────────►  Command::Add  ────►  cart::add_to_cart ──► {...} │
//! │  "   "      ────────►  None (skipped)                                   │
//! │  "frobnicate" ──────►  ParseError  ────────────────────────────► {...}  │
//! │  "quit"     ────────►  Command::Quit ────► loop ends                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Successful replies look like `{"ok":true,"data":...}`, failures like
//! `{"ok":false,"error":{"code":...,"message":...}}`.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::commands;
use crate::error::ApiError;
use crate::state::{CatalogState, ConfigState, OrderBookState, SessionState};
use shopfront_core::CheckoutRequest;

/// Usage lines, also returned by `help`.
pub const USAGE: &[&str] = &[
    "home",
    "products [category|all] [default|price-low|price-high|name]",
    "search <query>",
    "product <id>",
    "categories",
    "cart",
    "add <id> [qty]",
    "qty <id> <n>",
    "remove <id>",
    "clear",
    "toggle",
    "wishlist",
    "wish <id>",
    "unwish <id>",
    "summary",
    "checkout <json>",
    "track <order> <email>",
    "orders <email>",
    "config",
    "help",
    "quit",
];

// =============================================================================
// Parsing
// =============================================================================

#[derive(Debug, Clone)]
pub enum Command {
    Home,
    Products {
        category: Option<String>,
        sort: Option<String>,
    },
    Search(String),
    Product(String),
    Categories,
    Cart,
    Add {
        product_id: String,
        quantity: Option<i64>,
    },
    Quantity {
        product_id: String,
        quantity: i64,
    },
    Remove(String),
    Clear,
    Toggle,
    Wishlist,
    Wish(String),
    Unwish(String),
    Summary,
    Checkout(Box<CheckoutRequest>),
    Track {
        order_number: String,
        email: String,
    },
    Orders(String),
    Config,
    Help,
    Quit,
}

impl Command {
    /// The verb, for logs. Arguments can carry customer data.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Home => "home",
            Command::Products { .. } => "products",
            Command::Search(_) => "search",
            Command::Product(_) => "product",
            Command::Categories => "categories",
            Command::Cart => "cart",
            Command::Add { .. } => "add",
            Command::Quantity { .. } => "qty",
            Command::Remove(_) => "remove",
            Command::Clear => "clear",
            Command::Toggle => "toggle",
            Command::Wishlist => "wishlist",
            Command::Wish(_) => "wish",
            Command::Unwish(_) => "unwish",
            Command::Summary => "summary",
            Command::Checkout(_) => "checkout",
            Command::Track { .. } => "track",
            Command::Orders(_) => "orders",
            Command::Config => "config",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unknown command: {0} (try 'help')")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("{field} must be a whole number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid checkout request: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl From<ParseError> for ApiError {
    fn from(err: ParseError) -> Self {
        ApiError::validation(err.to_string())
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<i64, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("home", []) => Command::Home,
        ("products", args) if args.len() <= 2 => Command::Products {
            category: args
                .first()
                .filter(|c| !c.eq_ignore_ascii_case("all"))
                .map(|c| c.to_string()),
            sort: args.get(1).map(|s| s.to_string()),
        },
        ("products", _) => return Err(ParseError::Usage(USAGE[1])),
        ("search", _) => Command::Search(rest.to_string()),
        ("product", [id]) => Command::Product(id.to_string()),
        ("product", _) => return Err(ParseError::Usage(USAGE[3])),
        ("categories", []) => Command::Categories,
        ("cart", []) => Command::Cart,
        ("add", [id]) => Command::Add {
            product_id: id.to_string(),
            quantity: None,
        },
        ("add", [id, qty]) => Command::Add {
            product_id: id.to_string(),
            quantity: Some(parse_number("qty", qty)?),
        },
        ("add", _) => return Err(ParseError::Usage(USAGE[6])),
        ("qty", [id, n]) => Command::Quantity {
            product_id: id.to_string(),
            quantity: parse_number("n", n)?,
        },
        ("qty", _) => return Err(ParseError::Usage(USAGE[7])),
        ("remove", [id]) => Command::Remove(id.to_string()),
        ("remove", _) => return Err(ParseError::Usage(USAGE[8])),
        ("clear", []) => Command::Clear,
        ("toggle", []) => Command::Toggle,
        ("wishlist", []) => Command::Wishlist,
        ("wish", [id]) => Command::Wish(id.to_string()),
        ("wish", _) => return Err(ParseError::Usage(USAGE[12])),
        ("unwish", [id]) => Command::Unwish(id.to_string()),
        ("unwish", _) => return Err(ParseError::Usage(USAGE[13])),
        ("summary", []) => Command::Summary,
        ("checkout", _) if !rest.is_empty() => {
            Command::Checkout(Box::new(serde_json::from_str(rest)?))
        }
        ("checkout", _) => return Err(ParseError::Usage(USAGE[15])),
        ("track", [order_number, email]) => Command::Track {
            order_number: order_number.to_string(),
            email: email.to_string(),
        },
        ("track", _) => return Err(ParseError::Usage(USAGE[16])),
        ("orders", [email]) => Command::Orders(email.to_string()),
        ("orders", _) => return Err(ParseError::Usage(USAGE[17])),
        ("config", []) => Command::Config,
        ("help", _) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        _ => return Err(ParseError::UnknownCommand(line.to_string())),
    };

    Ok(Some(command))
}

// =============================================================================
// Replies
// =============================================================================

#[derive(Debug, Serialize)]
pub struct Reply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl From<Result<Value, ApiError>> for Reply {
    fn from(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(data) => Reply {
                ok: true,
                data: Some(data),
                error: None,
            },
            Err(error) => Reply {
                ok: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::internal(format!("Failed to serialize response: {}", e)))
}

// =============================================================================
// Shell
// =============================================================================

/// Owns one of each state type and routes commands to their handlers.
#[derive(Debug, Clone)]
pub struct Shell {
    session: SessionState,
    catalog: CatalogState,
    orders: OrderBookState,
    config: ConfigState,
}

impl Shell {
    /// A fresh session over the demo catalog and order book.
    pub fn new(config: ConfigState) -> Self {
        Shell {
            session: SessionState::new(),
            catalog: CatalogState::demo(),
            orders: OrderBookState::demo(),
            config,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub async fn execute(&self, command: Command) -> Result<Value, ApiError> {
        let session = &self.session;
        let catalog = &self.catalog;

        match command {
            Command::Home => to_json(commands::catalog::get_home(catalog)),
            Command::Products { category, sort } => to_json(commands::catalog::list_products(
                catalog,
                category.as_deref(),
                sort.as_deref(),
            )?),
            Command::Search(query) => to_json(commands::catalog::search_products(catalog, &query)?),
            Command::Product(id) => {
                to_json(commands::catalog::get_product(catalog, session, &id)?)
            }
            Command::Categories => to_json(commands::catalog::get_categories(catalog)),
            Command::Cart => to_json(commands::cart::get_cart(session)),
            Command::Add {
                product_id,
                quantity,
            } => to_json(commands::cart::add_to_cart(
                catalog,
                session,
                &product_id,
                quantity,
            )?),
            Command::Quantity {
                product_id,
                quantity,
            } => to_json(commands::cart::update_cart_item(session, &product_id, quantity)?),
            Command::Remove(id) => to_json(commands::cart::remove_from_cart(session, &id)),
            Command::Clear => to_json(commands::cart::clear_cart(session)),
            Command::Toggle => to_json(commands::cart::toggle_cart(session)),
            Command::Wishlist => to_json(commands::wishlist::get_wishlist(session)),
            Command::Wish(id) => {
                to_json(commands::wishlist::add_to_wishlist(catalog, session, &id)?)
            }
            Command::Unwish(id) => to_json(commands::wishlist::remove_from_wishlist(session, &id)),
            Command::Summary => {
                to_json(commands::checkout::get_order_summary(session, &self.config))
            }
            Command::Checkout(request) => to_json(commands::checkout::checkout(
                session,
                &self.orders,
                &self.config,
                &request,
            )?),
            Command::Track {
                order_number,
                email,
            } => to_json(
                commands::tracking::track_order(&self.orders, &self.config, &order_number, &email)
                    .await?,
            ),
            Command::Orders(email) => {
                to_json(commands::tracking::list_orders(&self.orders, &email))
            }
            Command::Config => to_json(commands::config::get_config(&self.config)),
            Command::Help => to_json(USAGE),
            Command::Quit => Ok(Value::Null),
        }
    }

    /// Reads commands until `quit` or end of input, writing one reply per
    /// non-blank line.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(store = %self.config.store_name, "Shell ready");

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let result = match parse(&line) {
                Ok(None) => continue,
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => {
                    debug!(command = command.name(), "Dispatching");
                    self.execute(command).await
                }
                Err(e) => Err(ApiError::from(e)),
            };

            if let Err(e) = &result {
                warn!(code = ?e.code, message = %e.message, "Command failed");
            }

            let mut out = serde_json::to_string(&Reply::from(result))?;
            out.push('\n');
            writer.write_all(out.as_bytes()).await?;
            writer.flush().await?;
        }

        info!("Shell finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    async fn run_script(shell: &Shell, script: &str) -> Vec<Value> {
        let mut out = Vec::new();
        shell.run(script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn quiet_config() -> ConfigState {
        ConfigState {
            tracking_delay_ms: 0,
            ..ConfigState::default()
        }
    }

    #[test]
    fn test_parse_commands() {
        assert!(parse("   ").unwrap().is_none());
        assert!(matches!(
            parse("add 4").unwrap(),
            Some(Command::Add { ref product_id, quantity: None }) if product_id == "4"
        ));
        assert!(matches!(
            parse("ADD 4 3").unwrap(),
            Some(Command::Add { quantity: Some(3), .. })
        ));
        assert!(matches!(
            parse("qty 4 -5").unwrap(),
            Some(Command::Quantity { quantity: -5, .. })
        ));
        assert!(matches!(
            parse("products all price-high").unwrap(),
            Some(Command::Products { category: None, sort: Some(_) })
        ));
        assert!(matches!(
            parse("search led string").unwrap(),
            Some(Command::Search(ref q)) if q == "led string"
        ));
        assert!(matches!(parse("exit").unwrap(), Some(Command::Quit)));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse("frobnicate"), Err(ParseError::UnknownCommand(_))));
        assert!(matches!(parse("add"), Err(ParseError::Usage(_))));
        assert!(matches!(
            parse("add 4 lots"),
            Err(ParseError::InvalidNumber { field: "qty", .. })
        ));
        assert!(matches!(parse("checkout {not json"), Err(ParseError::InvalidJson(_))));
        assert!(matches!(parse("track ORD-001"), Err(ParseError::Usage(_))));
    }

    #[test]
    fn test_parse_checkout_json() {
        let line = r#"checkout {"shipping":{"firstName":"Ada","zipCode":"N1"},"paymentMethod":"paypal"}"#;
        let Some(Command::Checkout(request)) = parse(line).unwrap() else {
            panic!("expected checkout command");
        };
        assert_eq!(request.shipping.first_name, "Ada");
        assert_eq!(request.shipping.zip_code, "N1");
        assert!(request.card.is_none());
    }

    #[tokio::test]
    async fn test_shopping_session_script() {
        let shell = Shell::new(quiet_config());
        let replies = run_script(
            &shell,
            "add 1\nadd 1\nadd 6\ntoggle\nqty 6 0\nwish 3\nwish 3\ncart\n",
        )
        .await;

        assert_eq!(replies.len(), 8);
        assert!(replies.iter().all(|r| r["ok"] == true));

        let cart = &replies[7]["data"];
        assert_eq!(cart["items"].as_array().map(Vec::len), Some(1));
        assert_eq!(cart["totals"]["itemCount"], 2);
        assert_eq!(cart["totals"]["total"], 25_998);
        assert_eq!(cart["isOpen"], false);

        assert_eq!(replies[6]["data"]["count"], 1);
        assert_eq!(replies[6]["data"]["notice"]["level"], "info");
    }

    #[tokio::test]
    async fn test_errors_are_replies_not_failures() {
        let shell = Shell::new(quiet_config());
        let replies = run_script(&shell, "add 99\nbogus\ncheckout {\"shipping\":{}}\ncart\n").await;

        assert_eq!(replies.len(), 4);
        assert_eq!(replies[0]["ok"], false);
        assert_eq!(replies[0]["error"]["code"], "NOT_FOUND");
        assert_eq!(replies[1]["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(replies[2]["error"]["code"], "CART_ERROR");
        assert_eq!(replies[3]["ok"], true);
    }

    #[tokio::test]
    async fn test_oversized_quantities_get_error_replies() {
        let shell = Shell::new(quiet_config());
        let replies = run_script(
            &shell,
            "add 1\nqty 1 9223372036854775\nadd 1 9000000000000000000\nqty 1 99999999999999999999\nadd 1\ncart\n",
        )
        .await;

        assert_eq!(replies.len(), 6);
        assert_eq!(replies[1]["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(replies[2]["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(replies[3]["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(replies[4]["ok"], true);

        let cart = &replies[5]["data"];
        assert_eq!(cart["totals"]["itemCount"], 2);
        assert_eq!(cart["totals"]["total"], 25_998);
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let shell = Shell::new(quiet_config());
        let replies = run_script(&shell, "add 4\nquit\nadd 4\n").await;

        assert_eq!(replies.len(), 1);
        assert_eq!(shell.session().with_session(|s| s.cart_item_count()), 1);
    }

    #[tokio::test]
    async fn test_checkout_then_track() {
        let shell = Shell::new(quiet_config());
        shell
            .execute(Command::Add {
                product_id: "5".to_string(),
                quantity: Some(2),
            })
            .await
            .unwrap();

        let request = serde_json::from_value(serde_json::json!({
            "shipping": {
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "phone": "555-0100",
                "address": "12 Analytical Row",
                "city": "London",
                "zipCode": "N1 9GU"
            },
            "paymentMethod": "cash_on_delivery"
        }))
        .unwrap();

        let placed = shell
            .execute(Command::Checkout(Box::new(request)))
            .await
            .unwrap();
        assert_eq!(placed["order"]["summary"]["subtotal"], 9_998);
        assert_eq!(placed["order"]["summary"]["tax"], 1_000);
        assert_eq!(placed["order"]["summary"]["total"], 10_998);

        let order_number = placed["order"]["orderNumber"].as_str().unwrap().to_string();
        let tracked = shell
            .execute(Command::Track {
                order_number,
                email: "Ada@Example.com".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(tracked["order"]["status"], "processing");

        let err = shell
            .execute(Command::Track {
                order_number: "ORD-001".to_string(),
                email: "ada@example.com".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }
}
