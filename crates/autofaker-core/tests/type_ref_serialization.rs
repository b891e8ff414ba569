use autofaker_core::{Instance, PrimitiveKind, TypeRef, Value};

#[test]
fn serializes_type_refs_deterministically() {
    let ty = TypeRef::map(
        TypeRef::primitive(PrimitiveKind::Uuid),
        TypeRef::named("TestStruct"),
    );

    let json = serde_json::to_string(&ty).expect("serialize type ref");
    assert_eq!(
        json,
        concat!(
            r#"{"kind":"map","of":["#,
            r#"{"kind":"primitive","of":"uuid"},{"kind":"named","of":"TestStruct"}]}"#
        )
    );

    let parsed: TypeRef = serde_json::from_str(&json).expect("parse type ref");
    assert_eq!(parsed, ty);
}

#[test]
fn serializes_instances_with_sorted_fields() {
    let mut item = Instance::new("OrderItem");
    item.set("quantity", Value::Int(2));
    let mut order = Instance::new("Order");
    order.set("items", Value::List(vec![Value::Object(item)]));
    order.set("code", Value::Text("A-1".to_string()));
    order.set("status", Value::Enum("Shipped".to_string()));

    let json = serde_json::to_string(&Value::Object(order)).expect("serialize instance");
    assert_eq!(
        json,
        concat!(
            r#"{"type":"Order","fields":{"code":"A-1","#,
            r#""items":[{"type":"OrderItem","fields":{"quantity":2}}],"#,
            r#""status":"Shipped"}}"#
        )
    );
}

#[test]
fn type_ref_schema_is_emitted() {
    let schema = schemars::schema_for!(TypeRef);
    let json = serde_json::to_value(&schema).expect("schema json");
    assert_eq!(
        json.get("title").and_then(|value| value.as_str()),
        Some("TypeRef")
    );
}
