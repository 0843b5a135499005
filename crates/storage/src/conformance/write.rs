use serde_json::json;

use super::{step, TestResult};
use crate::KeyValueStore;

const CATEGORY: &str = "write";

pub(super) fn run_write_tests<S, F>(factory: &F) -> Vec<TestResult>
where
    S: KeyValueStore,
    F: Fn() -> S,
{
    vec![
        TestResult::from_result(
            CATEGORY,
            "written_value_is_read_back",
            written_value_is_read_back(&factory()),
        ),
        TestResult::from_result(
            CATEGORY,
            "second_write_replaces_first",
            second_write_replaces_first(&factory()),
        ),
        TestResult::from_result(
            CATEGORY,
            "keys_are_independent",
            keys_are_independent(&factory()),
        ),
        TestResult::from_result(
            CATEGORY,
            "array_order_is_preserved",
            array_order_is_preserved(&factory()),
        ),
        TestResult::from_result(
            CATEGORY,
            "writes_through_shared_reference_are_visible",
            writes_through_shared_reference_are_visible(&factory()),
        ),
    ]
}

fn written_value_is_read_back<S: KeyValueStore>(store: &S) -> Result<(), String> {
    let doc = json!([{
        "id": "b1",
        "name": "NDA",
        "fields": [{"id": "f1", "type": "TEXT", "label": "Party Name", "position": {"x": 1, "y": 2}}],
        "createdAt": "2025-01-01T00:00:00Z"
    }]);
    step("set_raw", store.set_raw("blueprints", doc.clone()))?;
    let got = step("get_raw", store.get_raw("blueprints"))?;
    if got.as_ref() != Some(&doc) {
        return Err(format!("expected {doc}, got {got:?}"));
    }
    Ok(())
}

fn second_write_replaces_first<S: KeyValueStore>(store: &S) -> Result<(), String> {
    step("set_raw", store.set_raw("contracts", json!([1, 2, 3])))?;
    step("set_raw", store.set_raw("contracts", json!([4])))?;
    let got = step("get_raw", store.get_raw("contracts"))?;
    if got != Some(json!([4])) {
        return Err(format!("expected [4], got {got:?}"));
    }
    Ok(())
}

fn keys_are_independent<S: KeyValueStore>(store: &S) -> Result<(), String> {
    step("set_raw", store.set_raw("blueprints", json!(["bp"])))?;
    step("set_raw", store.set_raw("contracts", json!(["c"])))?;
    step("set_raw", store.set_raw("contracts", json!([])))?;
    let got = step("get_raw", store.get_raw("blueprints"))?;
    if got != Some(json!(["bp"])) {
        return Err(format!("writing 'contracts' changed 'blueprints' to {got:?}"));
    }
    Ok(())
}

fn array_order_is_preserved<S: KeyValueStore>(store: &S) -> Result<(), String> {
    let ids: Vec<String> = (0..50).rev().map(|i| format!("id-{i}")).collect();
    step("set", store.set("contracts", &ids))?;
    let got: Vec<String> = step("get", store.get("contracts", Vec::new()))?;
    if got != ids {
        return Err("stored array came back reordered".to_string());
    }
    Ok(())
}

fn writes_through_shared_reference_are_visible<S: KeyValueStore>(store: &S) -> Result<(), String> {
    let writer = &store;
    step("set_raw", writer.set_raw("blueprints", json!(["shared"])))?;
    let got = step("get_raw", store.get_raw("blueprints"))?;
    if got != Some(json!(["shared"])) {
        return Err(format!("reader saw {got:?}"));
    }
    Ok(())
}
