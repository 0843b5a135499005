use serde_json::json;

use super::{step, TestResult};
use crate::KeyValueStore;

const CATEGORY: &str = "read";

pub(super) fn run_read_tests<S, F>(factory: &F) -> Vec<TestResult>
where
    S: KeyValueStore,
    F: Fn() -> S,
{
    vec![
        TestResult::from_result(
            CATEGORY,
            "unwritten_key_is_absent",
            unwritten_key_is_absent(&factory()),
        ),
        TestResult::from_result(
            CATEGORY,
            "typed_get_returns_default_for_unwritten_key",
            typed_get_returns_default(&factory()),
        ),
        TestResult::from_result(
            CATEGORY,
            "typed_get_ignores_default_once_written",
            typed_get_ignores_default_once_written(&factory()),
        ),
        TestResult::from_result(
            CATEGORY,
            "reads_do_not_create_keys",
            reads_do_not_create_keys(&factory()),
        ),
    ]
}

fn unwritten_key_is_absent<S: KeyValueStore>(store: &S) -> Result<(), String> {
    match step("get_raw", store.get_raw("blueprints"))? {
        None => Ok(()),
        Some(v) => Err(format!("expected no value, got {v}")),
    }
}

fn typed_get_returns_default<S: KeyValueStore>(store: &S) -> Result<(), String> {
    let got: Vec<String> = step("get", store.get("contracts", vec!["fallback".to_string()]))?;
    if got != ["fallback"] {
        return Err(format!("expected the default, got {got:?}"));
    }
    Ok(())
}

fn typed_get_ignores_default_once_written<S: KeyValueStore>(store: &S) -> Result<(), String> {
    step("set", store.set("contracts", &Vec::<String>::new()))?;
    let got: Vec<String> = step("get", store.get("contracts", vec!["fallback".to_string()]))?;
    if !got.is_empty() {
        return Err(format!("expected the stored empty list, got {got:?}"));
    }
    Ok(())
}

fn reads_do_not_create_keys<S: KeyValueStore>(store: &S) -> Result<(), String> {
    let _: serde_json::Value = step("get", store.get("blueprints", json!([])))?;
    match step("get_raw", store.get_raw("blueprints"))? {
        None => Ok(()),
        Some(v) => Err(format!("a read persisted {v}")),
    }
}
