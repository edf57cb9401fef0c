use std::time::Duration;

use rstest::rstest;
use serde_json::json;

use super::round_trip;
use crate::Value;

fn native(json: serde_json::Value) -> Value {
    serde_json::from_value(json).expect("json fixture is a plain value")
}

#[rstest]
// primitives
#[case::string(json!("foo"))]
#[case::empty_string(json!(""))]
#[case::string_with_spaces(json!("hello world"))]
#[case::longer_string(json!("the quick brown fox jumps over the lazy dog"))]
#[case::number(json!(5))]
#[case::zero(json!(0))]
#[case::negative_integer(json!(-42))]
#[case::int32_max(json!(2_147_483_647))]
#[case::int32_min(json!(-2_147_483_648))]
#[case::half(json!(0.5))]
#[case::one_and_a_half(json!(1.5))]
#[case::negative_quarter(json!(-0.25))]
#[case::null(json!(null))]
#[case::boolean_true(json!(true))]
#[case::boolean_false(json!(false))]
// strings with emoji
#[case::single_emoji(json!("😀"))]
#[case::emoji_and_text(json!("hello 🌍"))]
#[case::multiple_emoji(json!("🎉🎊🎈"))]
#[case::emoji_and_accents(json!("café ☕"))]
#[case::array_of_emoji(json!(["😀", "🌍", "🎉"]))]
#[case::object_of_emoji(json!({"mood": "😀", "place": "🌍"}))]
// arrays
#[case::empty_array(json!([]))]
#[case::array_of_integers(json!([1, 2, 3]))]
#[case::array_of_negative_integers(json!([-1, -2, -3]))]
#[case::array_of_strings(json!(["foo", "bar", "baz"]))]
#[case::array_of_nulls(json!([null, null, null]))]
#[case::array_of_booleans(json!([true, false, true]))]
#[case::mixed_array(json!([1, "hello", null, 99]))]
#[case::nested_array_2(json!([[1, 2], [3, 4], [5, 6]]))]
#[case::nested_array_3(json!([[[1, 2], [3]], [[4, 5]]]))]
#[case::array_of_empty_arrays(json!([[], [], []]))]
// objects
#[case::empty_object(json!({}))]
#[case::object_of_integers(json!({"x": 1, "y": 2, "z": 3}))]
#[case::object_of_strings(json!({"name": "Alice", "city": "Paris"}))]
#[case::object_of_nulls(json!({"a": null, "b": null}))]
#[case::object_of_booleans(json!({"on": true, "off": false}))]
#[case::object_mixed(json!({"id": 42, "label": "item", "score": null}))]
#[case::nested_object_2(json!({"outer": {"inner": 99}}))]
#[case::nested_object_3(json!({"a": {"b": {"c": 7}}}))]
#[case::object_with_array(json!({"items": [10, 20, 30], "label": "numbers"}))]
#[case::object_with_arrays(json!({"evens": [2, 4, 6], "odds": [1, 3, 5]}))]
#[case::array_of_objects(json!([{"id": 1, "name": "foo"}, {"id": 2, "name": "bar"}]))]
#[case::array_of_empty_objects(json!([{}, {}, {}]))]
#[case::empty_key(json!({"": "blank"}))]
// deep nesting
#[case::nested_object_4(json!({
    "level1": {"level2": {"level3": {"value": 99, "items": [10, 20, 30]}}}
}))]
#[case::nested_mixed(json!({
    "users": [
        {"id": 1, "name": "Alice", "scores": [100, 95, 88]},
        {"id": 2, "name": "Bob", "scores": [70, 80, 90]}
    ],
    "meta": {"count": 2, "page": 1}
}))]
#[case::matrix(json!({"matrix": [[1, 2, 3], [4, 5, 6], [7, 8, 9]], "label": "grid"}))]
#[case::arrays_of_objects(json!([[{"val": 1}, {"val": 2}], [{"val": 3}, {"val": 4}]]))]
#[case::config_like(json!({
    "config": {"host": "localhost", "port": 8080, "tags": ["primary", "read-only"]},
    "records": [
        {"id": 1, "payload": {"x": 10, "y": 20}},
        {"id": 2, "payload": {"x": 30, "y": 40}}
    ],
    "count": 2
}))]
#[timeout(Duration::from_millis(1_000))]
fn round_trips_unchanged(#[case] input: serde_json::Value) {
    let input = native(input);
    let output = round_trip(&input);
    assert_eq!(output, input);
    assert_eq!(output.to_string(), input.to_string(), "key order changed");
}

#[rstest]
#[case::small(42)]
#[case::negative_beyond_f64(-9_007_199_254_740_993)]
#[case::max(i64::MAX)]
#[case::min(i64::MIN)]
fn big_integers_round_trip(#[case] n: i64) {
    let input = Value::from(n);
    assert_eq!(round_trip(&input), Value::BigInt(i128::from(n)));
}

#[test]
fn key_order_follows_insertion() {
    let input = native(json!({"k3": 3, "k1": 1, "k2": 2}));
    let Value::Object(out) = round_trip(&input) else {
        panic!("expected an object");
    };
    assert_eq!(out.keys().collect::<Vec<_>>(), ["k3", "k1", "k2"]);
}

#[test]
fn lossy_inputs_collapse_predictably() {
    let input = Value::Array(vec![
        Value::Undefined,
        Value::Function,
        Value::Opaque("Date".into()),
        Value::Symbol("s".into()),
        Value::Number(0.1),
        Value::Number(3_000_000_000.0),
    ]);
    let expected = Value::Array(vec![
        Value::Null,
        Value::Null,
        Value::Null,
        Value::from("Symbol(s)"),
        Value::from(0.1_f32),
        Value::Number(-1_294_967_296.0),
    ]);
    assert_eq!(round_trip(&input), expected);
}
