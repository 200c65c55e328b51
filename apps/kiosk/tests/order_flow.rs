//! End-to-end command flows through the JSON-lines front end.

use std::io::{Cursor, Write};
use std::process::{Command, Stdio};

use serde_json::Value;
use waffle_kiosk::serve;
use waffle_kiosk::state::{AppState, KioskConfig};

/// Feeds `commands` through `serve` and returns the parsed responses.
fn run_lines(state: &AppState, commands: &[&str]) -> Vec<Value> {
    let input = commands.join("\n");
    let mut output = Vec::new();
    serve(state, Cursor::new(input), &mut output).unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn seeded_state() -> AppState {
    let mut config = KioskConfig::default();
    config.wordle.seed = Some(42);
    config.wordle.words = Some(vec!["MAPLE".to_string()]);
    AppState::new(config)
}

#[test]
fn test_preset_order_and_checkout() {
    let state = seeded_state();
    let responses = run_lines(
        &state,
        &[
            r#"{"command":"navigate","page":"order"}"#,
            r#"{"command":"add_preset","name":"Milo Meal"}"#,
            r#"{"command":"get_order_summary"}"#,
            r#"{"command":"navigate","page":"checkout"}"#,
            r#"{"command":"complete_checkout"}"#,
            r#"{"command":"get_cart"}"#,
            r#"{"command":"get_page"}"#,
        ],
    );

    assert_eq!(responses.len(), 7);
    assert!(responses.iter().all(|r| r["ok"] == true));

    let summary = &responses[2]["data"];
    assert_eq!(summary["subtotal"], 400);
    assert_eq!(summary["finalTotal"], 400);
    assert_eq!(summary["discountPercent"], 0);

    let receipt = &responses[4]["data"];
    assert_eq!(receipt["finalTotal"], 400);
    assert_eq!(receipt["formattedTotal"], "$4.00");
    assert_eq!(receipt["clearsCartAndDiscounts"], true);
    assert_eq!(receipt["lines"].as_array().unwrap().len(), 1);

    assert_eq!(responses[5]["data"]["itemCount"], 0);
    assert_eq!(responses[6]["data"]["page"], "checkout");
}

#[test]
fn test_custom_waffles_stack_and_save() {
    let state = seeded_state();
    let responses = run_lines(
        &state,
        &[
            r#"{"command":"add_custom_waffle","quantity":3,"toppings":["Banana","Oreo"],"syrups":["Maple"],"drink":"Milo"}"#,
            r#"{"command":"add_custom_waffle","quantity":2}"#,
            r#"{"command":"get_order_summary"}"#,
            r#"{"command":"remove_cart_item","index":0}"#,
            r#"{"command":"get_order_summary"}"#,
        ],
    );

    // 3 waffles: 200 + 180 + 160 = 540, + 100 + 200 + 50 + 200 = 1090, unit 363
    let first_line = &responses[0]["data"]["items"][0];
    assert_eq!(first_line["quotedTotal"], 1090);
    assert_eq!(first_line["unitPrice"], 363);
    assert_eq!(first_line["lineTotal"], 1089);
    assert_eq!(
        first_line["details"],
        "3x waffle with Banana, Oreo, Maple, Drink: Milo"
    );

    // five waffles: 15%
    let summary = &responses[2]["data"];
    assert_eq!(summary["discountPercent"], 15);
    assert_eq!(summary["activeDiscounts"][0]["kind"], "stack_n_save");

    // two left: 5%
    assert_eq!(responses[4]["data"]["discountPercent"], 5);
}

#[test]
fn test_wordle_win_discounts_order() {
    let state = seeded_state();
    let responses = run_lines(
        &state,
        &[
            r#"{"command":"add_preset","name":"Berry Blast"}"#,
            r#"{"command":"submit_wordle_guess","guess":"PIE"}"#,
            r#"{"command":"submit_wordle_guess","guess":"syrup"}"#,
            r#"{"command":"submit_wordle_guess","guess":"maple"}"#,
            r#"{"command":"submit_wordle_guess","guess":"maple"}"#,
            r#"{"command":"apply_student_code","code":"1012345"}"#,
        ],
    );

    assert_eq!(responses[1]["ok"], false);
    assert_eq!(responses[1]["error"]["code"], "WORDLE_NOTICE");
    assert_eq!(responses[1]["error"]["message"], "Enter a 5-letter word.");

    assert_eq!(responses[2]["data"]["won"], false);
    assert_eq!(responses[2]["data"]["attemptsRemaining"], 4);

    assert_eq!(responses[3]["data"]["won"], true);
    assert_eq!(responses[3]["data"]["history"].as_array().unwrap().len(), 2);

    assert_eq!(responses[4]["error"]["code"], "WORDLE_NOTICE");

    // 450 less 15%: the 67.5 discount rounds up to 68
    let summary = &responses[5]["data"]["summary"];
    assert_eq!(responses[5]["data"]["applied"], true);
    assert_eq!(summary["discountPercent"], 15);
    assert_eq!(summary["finalTotal"], 382);
}

#[test]
fn test_errors_do_not_end_the_session() {
    let state = seeded_state();
    let responses = run_lines(
        &state,
        &[
            "{ broken",
            r#"{"command":"add_preset","name":"Pancake Stack"}"#,
            r#"{"command":"remove_cart_item","index":4}"#,
            r#"{"command":"complete_checkout"}"#,
            "",
            r#"{"command":"get_cart"}"#,
        ],
    );

    // the blank line gets no response
    assert_eq!(responses.len(), 5);
    assert_eq!(responses[0]["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(responses[1]["error"]["code"], "NOT_FOUND");
    assert_eq!(responses[2]["error"]["code"], "CART_ERROR");
    assert_eq!(responses[3]["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(responses[4]["ok"], true);
}

#[test]
fn test_reset_all_returns_home() {
    let state = seeded_state();
    let responses = run_lines(
        &state,
        &[
            r#"{"command":"navigate","page":"wordle"}"#,
            r#"{"command":"add_preset","name":"Chocolate Heaven"}"#,
            r#"{"command":"apply_student_code","code":"1000001"}"#,
            r#"{"command":"reset_all"}"#,
            r#"{"command":"get_order_summary"}"#,
        ],
    );

    assert_eq!(responses[3]["data"]["page"], "home");
    assert_eq!(responses[4]["data"]["subtotal"], 0);
    assert!(responses[4]["data"]["activeDiscounts"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[test]
fn test_binary_speaks_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("kiosk.toml");
    std::fs::write(&config_path, "[store]\nname = \"Test Waffles\"\n").unwrap();

    let mut child = Command::new(env!("CARGO_BIN_EXE_waffle-kiosk"))
        .arg(&config_path)
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start waffle-kiosk");

    {
        let stdin = child.stdin.as_mut().unwrap();
        writeln!(stdin, r#"{{"command":"get_config"}}"#).unwrap();
        writeln!(stdin, r#"{{"command":"add_preset","name":"Milo Meal"}}"#).unwrap();
    }

    let output = child.wait_with_output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let lines: Vec<Value> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["data"]["storeName"], "Test Waffles");
    assert_eq!(lines[1]["data"]["subtotal"], 400);
}
