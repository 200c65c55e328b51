//! # Commands Module
//!
//! All operations the kiosk UI can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (Command enum + dispatch)
//! ├── catalog.rs     ◄─── Menu and store info
//! ├── cart.rs        ◄─── Presets, custom waffles, removal
//! ├── discount.rs    ◄─── Order summary, student code
//! ├── wordle.rs      ◄─── Word game
//! ├── checkout.rs    ◄─── Place order, reset
//! └── navigation.rs  ◄─── Page tracking
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  stdin line                                                             │
//! │  {"command":"add_preset","name":"Milo Meal"}                            │
//! │         │                                                               │
//! │         │ serde_json (tag = "command")                                  │
//! │         ▼                                                               │
//! │  Command::AddPreset { name }                                            │
//! │         │                                                               │
//! │         │ dispatch(&AppState, command)                                  │
//! │         ▼                                                               │
//! │  cart::add_preset(&state.session, &state.catalog, &name)                │
//! │      -> Result<CartResponse, ApiError>                                  │
//! │         │                                                               │
//! │         │ serde_json                                                    │
//! │         ▼                                                               │
//! │  stdout line                                                            │
//! │  {"ok":true,"data":{"items":[...],"subtotal":400,...}}                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each handler takes only the state it needs.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod discount;
pub mod navigation;
pub mod wordle;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use waffle_core::pricing::CustomWaffleOrder;
use waffle_core::Page;

use crate::error::ApiError;
use crate::state::AppState;

/// One request from the UI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    GetCatalog,
    GetConfig,
    AddPreset { name: String },
    AddCustomWaffle(CustomWaffleOrder),
    RemoveCartItem { index: usize },
    GetCart,
    GetCartSubtotal,
    GetOrderSummary,
    ApplyStudentCode { code: String },
    SubmitWordleGuess { guess: String },
    GetWordle,
    CompleteCheckout,
    ResetAll,
    Navigate { page: Page },
    GetPage,
}

impl Command {
    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::GetCatalog => "get_catalog",
            Command::GetConfig => "get_config",
            Command::AddPreset { .. } => "add_preset",
            Command::AddCustomWaffle(_) => "add_custom_waffle",
            Command::RemoveCartItem { .. } => "remove_cart_item",
            Command::GetCart => "get_cart",
            Command::GetCartSubtotal => "get_cart_subtotal",
            Command::GetOrderSummary => "get_order_summary",
            Command::ApplyStudentCode { .. } => "apply_student_code",
            Command::SubmitWordleGuess { .. } => "submit_wordle_guess",
            Command::GetWordle => "get_wordle",
            Command::CompleteCheckout => "complete_checkout",
            Command::ResetAll => "reset_all",
            Command::Navigate { .. } => "navigate",
            Command::GetPage => "get_page",
        }
    }
}

/// One reply to the UI.
///
/// ```json
/// {"ok":true,"data":{...}}
/// {"ok":false,"error":{"code":"NOT_FOUND","message":"..."}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl From<Result<Value, ApiError>> for Response {
    fn from(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(data) => Response {
                ok: true,
                data: Some(data),
                error: None,
            },
            Err(error) => Response {
                ok: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

fn to_data<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(format!("Failed to encode response: {}", e)))
}

/// Runs a command against the kiosk state.
pub fn dispatch(state: &AppState, command: Command) -> Result<Value, ApiError> {
    let session = &state.session;

    match command {
        Command::GetCatalog => to_data(catalog::get_catalog(&state.catalog)),
        Command::GetConfig => to_data(catalog::get_config(&state.config)),
        Command::AddPreset { name } => to_data(cart::add_preset(session, &state.catalog, &name)?),
        Command::AddCustomWaffle(order) => {
            to_data(cart::add_custom_waffle(session, &state.catalog, &order)?)
        }
        Command::RemoveCartItem { index } => to_data(cart::remove_cart_item(session, index)?),
        Command::GetCart => to_data(cart::get_cart(session)),
        Command::GetCartSubtotal => to_data(cart::get_cart_subtotal(session, &state.config)),
        Command::GetOrderSummary => to_data(discount::get_order_summary(session)),
        Command::ApplyStudentCode { code } => to_data(discount::apply_student_code(session, &code)),
        Command::SubmitWordleGuess { guess } => {
            to_data(wordle::submit_wordle_guess(session, &guess)?)
        }
        Command::GetWordle => to_data(wordle::get_wordle(session)),
        Command::CompleteCheckout => to_data(checkout::complete_checkout(session, &state.config)?),
        Command::ResetAll => to_data(checkout::reset_all(session)),
        Command::Navigate { page } => to_data(navigation::navigate(session, page)),
        Command::GetPage => to_data(navigation::get_page(session)),
    }
}

/// Parses and runs one JSON line.
///
/// Malformed input becomes a `VALIDATION_ERROR` response; this never fails.
pub fn handle_line(state: &AppState, line: &str) -> Response {
    let result = serde_json::from_str::<Command>(line)
        .map_err(|e| ApiError::validation(format!("Invalid command: {}", e)))
        .and_then(|command| {
            tracing::debug!(command = command.name(), "Dispatching command");
            dispatch(state, command)
        });

    if let Err(e) = &result {
        tracing::debug!(code = ?e.code, message = %e.message, "Command failed");
    }

    Response::from(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_commands() {
        let cmd: Command = serde_json::from_str(r#"{"command":"add_preset","name":"Milo Meal"}"#).unwrap();
        assert_eq!(
            cmd,
            Command::AddPreset {
                name: "Milo Meal".to_string()
            }
        );

        let cmd: Command = serde_json::from_str(
            r#"{"command":"add_custom_waffle","quantity":2,"toppings":["Banana"],"drink":"Milo"}"#,
        )
        .unwrap();
        match cmd {
            Command::AddCustomWaffle(order) => {
                assert_eq!(order.quantity, 2);
                assert!(order.syrups.is_empty());
                assert_eq!(order.drink, "Milo");
            }
            other => panic!("unexpected command {:?}", other),
        }

        let cmd: Command = serde_json::from_str(r#"{"command":"navigate","page":"wordle"}"#).unwrap();
        assert_eq!(cmd, Command::Navigate { page: Page::Wordle });
    }

    #[test]
    fn test_handle_line_success_shape() {
        let state = AppState::default();
        let resp = handle_line(&state, r#"{"command":"get_page"}"#);

        assert!(resp.ok);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["data"]["page"], "home");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_handle_line_bad_json() {
        let state = AppState::default();
        let resp = handle_line(&state, "not json");

        assert!(!resp.ok);
        assert_eq!(resp.error.unwrap().code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_handle_line_unknown_command() {
        let state = AppState::default();
        let resp = handle_line(&state, r#"{"command":"fly_to_moon"}"#);
        assert!(!resp.ok);
    }
}
