mod support;

use autofaker_core::{TypeRef, Value};
use autofaker_generate::{ConfigBuilder, GenerationContext, GenerationEngine, GenerationError};

use support::{chain_len, children_per_level, object};

fn recursive() -> TypeRef {
    TypeRef::named("TestRecursiveClass")
}

#[test]
fn default_depth_bounds_self_references() {
    let config = ConfigBuilder::new(support::catalog()).build().expect("config");
    let engine = GenerationEngine::new(config);

    let root = object(engine.generate_one(&recursive()).expect("generate"));
    assert_eq!(chain_len(&root, "child"), 2);
    assert_eq!(chain_len(&root, "sub"), 2);
    assert_eq!(children_per_level(&root), vec![3, 9]);
}

#[test]
fn configured_depth_gives_chain_and_collection_levels() {
    let config = ConfigBuilder::new(support::catalog())
        .with_recursive_depth(3)
        .build()
        .expect("config");
    let engine = GenerationEngine::new(config);

    let root = object(engine.generate_one(&recursive()).expect("generate"));
    assert_eq!(chain_len(&root, "child"), 3);
    assert_eq!(chain_len(&root, "sub"), 3);
    assert_eq!(children_per_level(&root), vec![3, 9, 27]);

    let mut deepest = &root;
    for _ in 0..3 {
        deepest = deepest.object("child").expect("link present");
    }
    assert!(deepest.value("child").is_null());
    assert_eq!(deepest.value("children").as_list().map(<[Value]>::len), Some(0));
    assert_eq!(chain_len(deepest, "sub"), 3);
}

#[test]
fn zero_depth_still_generates_the_root() {
    let config = ConfigBuilder::new(support::catalog())
        .with_recursive_depth(0)
        .build()
        .expect("config");
    let engine = GenerationEngine::new(config);

    let root = object(engine.generate_one(&recursive()).expect("generate"));
    assert!(root.value("child").is_null());
    assert_eq!(root.value("children").as_list().map(<[Value]>::len), Some(0));
    assert!(root.value("sub").is_null());
    assert!(root.value("value").as_i64().is_some_and(|value| value > 0));
}

#[test]
fn per_type_depth_overrides_default() {
    let config = ConfigBuilder::new(support::catalog())
        .with_recursive_depth(3)
        .with_type_depth("TestRecursiveClass", 1)
        .build()
        .expect("config");
    let engine = GenerationEngine::new(config);

    let root = object(engine.generate_one(&recursive()).expect("generate"));
    assert_eq!(chain_len(&root, "child"), 1);
    assert_eq!(chain_len(&root, "sub"), 3);
}

#[test]
fn tree_depth_limits_nesting_of_any_type() {
    let config = ConfigBuilder::new(support::catalog())
        .with_recursive_depth(10)
        .with_tree_depth(1)
        .build()
        .expect("config");
    let engine = GenerationEngine::new(config);

    let root = object(engine.generate_one(&recursive()).expect("generate"));
    assert_eq!(chain_len(&root, "child"), 1);
    assert_eq!(chain_len(&root, "sub"), 1);

    let report = engine
        .generate_with_report(&recursive())
        .expect("generate")
        .report;
    assert!(report.depth_refusals.contains_key("TestRecursiveClass"));
}

#[test]
fn skip_applies_at_every_depth() {
    let config = ConfigBuilder::new(support::catalog())
        .with_recursive_depth(3)
        .with_skip("TestRecursiveClass", "child")
        .build()
        .expect("config");
    let engine = GenerationEngine::new(config);

    let root = object(engine.generate_one(&recursive()).expect("generate"));
    assert!(root.value("child").is_null());

    let mut frontier = vec![&root];
    while let Some(node) = frontier.pop() {
        assert!(node.value("child").is_null());
        frontier.extend(
            node.value("children")
                .as_list()
                .unwrap_or(&[])
                .iter()
                .filter_map(Value::as_object),
        );
    }
    assert_eq!(children_per_level(&root), vec![3, 9, 27]);
}

#[test]
fn construction_failure_propagates_and_unwinds_the_path() {
    let config = ConfigBuilder::new(support::catalog()).build().expect("config");
    let mut ctx = GenerationContext::new(&config, 7);

    let err = ctx
        .generate(&TypeRef::named("Holder"))
        .expect_err("constructor body fails");
    match err {
        GenerationError::Construction { ty, path, message } => {
            assert_eq!(ty, "Fragile");
            assert_eq!(path, "Holder -> Fragile");
            assert_eq!(message, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(ctx.parents().is_empty());
    assert_eq!(ctx.depth("Fragile"), 0);

    let order = ctx
        .generate(&TypeRef::named("Order"))
        .expect("context stays usable");
    assert!(order.is_some());
}
