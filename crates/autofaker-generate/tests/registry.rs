mod support;

use autofaker_core::{PrimitiveKind, TypeRef, Value};
use autofaker_generate::{
    ConfigBuilder, FnGenerator, GeneratorFamily, GeneratorRegistry, generate_one,
};

use support::object;

#[test]
fn generator_ids_are_sorted_and_unique() {
    let registry = GeneratorRegistry::new();
    let ids = registry.generator_ids();
    assert!(!ids.is_empty());

    let mut sorted = ids.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(ids, sorted);

    for kind in PrimitiveKind::ALL {
        let id = format!("primitive.{}", kind.as_str());
        assert!(registry.generator(&id).is_some(), "missing {id}");
    }
    for family in GeneratorFamily::PRIORITY {
        let id = format!("family.{}", family.as_str());
        assert!(registry.generator(&id).is_some(), "missing {id}");
    }
}

#[test]
fn empty_registry_generates_nothing() {
    let config = ConfigBuilder::new(support::catalog())
        .with_registry(GeneratorRegistry::empty())
        .build()
        .expect("config");

    assert_eq!(generate_one(&TypeRef::string(), &config).expect("generate"), None);
    assert_eq!(
        generate_one(&TypeRef::list(TypeRef::string()), &config).expect("generate"),
        None
    );

    let item = generate_one(&TypeRef::named("TestRecursiveSub"), &config).expect("generate");
    let item = object(item);
    assert_eq!(item.value("value"), &Value::Int(0));
}

#[test]
fn exact_generator_replaces_builtin_for_its_type() {
    let config = ConfigBuilder::new(support::catalog())
        .with_generator(Box::new(FnGenerator::new(
            "custom.string",
            TypeRef::string(),
            |_| Ok(Some(Value::Text("fixed".to_string()))),
        )))
        .build()
        .expect("config");

    let ids = config.registry().generator_ids();
    assert!(ids.contains(&"custom.string"));
    assert!(!ids.contains(&"primitive.string"));

    let order = object(generate_one(&TypeRef::named("Order"), &config).expect("generate"));
    assert_eq!(order.value("code").as_str(), Some("fixed"));
    assert_eq!(order.value("contact_email").as_str(), Some("fixed"));
}

#[test]
fn exact_generator_for_composite_wins_over_construction() {
    let config = ConfigBuilder::new(support::catalog())
        .with_generator(Box::new(FnGenerator::new(
            "custom.order_item",
            TypeRef::named("OrderItem"),
            |ctx| {
                let quantity = ctx.generate(&TypeRef::primitive(PrimitiveKind::I32))?;
                let mut item = autofaker_core::Instance::new("OrderItem");
                item.set("quantity", quantity.unwrap_or(Value::Null));
                Ok(Some(Value::Object(item)))
            },
        )))
        .build()
        .expect("config");

    let order = object(generate_one(&TypeRef::named("Order"), &config).expect("generate"));
    for item in order.value("items").as_list().expect("items") {
        let item = item.as_object().expect("item");
        assert!(item.value("product_id").is_null());
        assert!(item.value("quantity").as_i64().is_some());
    }
}

#[test]
fn repeat_count_controls_collection_sizes() {
    let config = ConfigBuilder::new(support::catalog())
        .with_repeat_count(5)
        .build()
        .expect("config");
    let order = object(generate_one(&TypeRef::named("Order"), &config).expect("generate"));
    assert_eq!(order.value("items").as_list().map(<[Value]>::len), Some(5));

    let config = ConfigBuilder::new(support::catalog())
        .with_repeat_count(0)
        .build()
        .expect("config");
    let order = object(generate_one(&TypeRef::named("Order"), &config).expect("generate"));
    assert_eq!(order.value("items").as_list().map(<[Value]>::len), Some(0));
    assert_eq!(order.value("lookup").as_map().map(<[(Value, Value)]>::len), Some(0));
}

#[test]
fn arrays_and_sets_use_repeat_count() {
    let config = ConfigBuilder::new(support::catalog()).build().expect("config");
    let array = generate_one(
        &TypeRef::array(TypeRef::primitive(PrimitiveKind::Uuid)),
        &config,
    )
    .expect("generate")
    .expect("array");
    assert_eq!(array.as_list().map(<[Value]>::len), Some(3));

    let set = generate_one(&TypeRef::set(TypeRef::named("Status")), &config)
        .expect("generate")
        .expect("set");
    let values = set.as_list().expect("set values");
    assert!(!values.is_empty() && values.len() <= 3);
    for (index, value) in values.iter().enumerate() {
        assert!(!values[index + 1..].contains(value));
    }
}
