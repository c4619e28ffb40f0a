use super::*;

#[test]
fn conversions_pick_the_widest_variant() {
    assert_eq!(Value::from(7i32), Value::Int(7));
    assert_eq!(Value::from(7u8), Value::Uint(7));
    assert_eq!(Value::from(1.5f32), Value::Float(1.5));
    assert_eq!(Value::from("ice"), Value::Text("ice".to_string()));
    assert_eq!(Value::from(&[1u8, 2][..]), Value::Blob(vec![1, 2]));
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some(3i64)), Value::Int(3));
}

#[test]
fn compare_is_kind_local() {
    assert_eq!(Value::Int(1).compare(&Value::Int(2)), Some(Ordering::Less));
    assert_eq!(
        Value::Text("b".into()).compare(&Value::Text("a".into())),
        Some(Ordering::Greater)
    );
    assert_eq!(Value::Int(1).compare(&Value::Uint(1)), None);
    assert_eq!(Value::Null.compare(&Value::Null), None);
}

#[test]
fn display_quotes_text_and_hex_encodes_blobs() {
    assert_eq!(Value::Text("x".into()).to_string(), "'x'");
    assert_eq!(Value::Blob(vec![0xab, 0x01]).to_string(), "0xab01");
    assert_eq!(Value::Int(-4).to_string(), "-4");
}
