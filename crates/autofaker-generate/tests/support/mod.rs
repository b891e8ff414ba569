#![allow(dead_code)]

use autofaker_core::{
    ConstructorDescriptor, Instance, ParamDescriptor, PrimitiveKind, TypeCatalog, TypeDescriptor,
    TypeRef, Value,
};

pub fn uuid() -> TypeRef {
    TypeRef::primitive(PrimitiveKind::Uuid)
}

pub fn int() -> TypeRef {
    TypeRef::primitive(PrimitiveKind::I32)
}

/// Orders, a self-referencing class, a nullable self-referencing struct, types
/// with competing constructors and a few types that cannot be generated
/// without help.
pub fn catalog() -> TypeCatalog {
    TypeCatalog::from_descriptors([
        TypeDescriptor::enumeration("Status", ["Pending", "Active", "Closed"]),
        TypeDescriptor::interface("ICalculator"),
        TypeDescriptor::abstract_type("Shape").member("label", TypeRef::string()),
        TypeDescriptor::composite("Circle")
            .extends("Shape")
            .member("radius", TypeRef::primitive(PrimitiveKind::F64)),
        TypeDescriptor::composite("Order")
            .readonly_member("id", uuid())
            .readonly_member("calculator", TypeRef::named("ICalculator"))
            .member("code", TypeRef::string())
            .member("contact_email", TypeRef::string())
            .member("status", TypeRef::named("Status"))
            .member("items", TypeRef::list(TypeRef::named("OrderItem")))
            .member("lookup", TypeRef::map(uuid(), int()))
            .member("shape", TypeRef::named("Shape"))
            .member("notes", TypeRef::nullable(TypeRef::string()))
            .constructor(ConstructorDescriptor::new(Vec::new()))
            .constructor(ConstructorDescriptor::new(vec![ParamDescriptor::new(
                "id",
                uuid(),
            )])),
        TypeDescriptor::composite("OrderItem")
            .readonly_member("product_id", uuid())
            .member("quantity", int())
            .constructor(ConstructorDescriptor::new(vec![
                ParamDescriptor::new("product_id", uuid()),
                ParamDescriptor::new("quantity", int()),
            ])),
        TypeDescriptor::composite("TestRecursiveClass")
            .member("child", TypeRef::named("TestRecursiveClass"))
            .member("children", TypeRef::list(TypeRef::named("TestRecursiveClass")))
            .member("sub", TypeRef::nullable(TypeRef::named("TestRecursiveSub")))
            .member("value", int()),
        TypeDescriptor::composite("TestRecursiveSub")
            .member("sub", TypeRef::nullable(TypeRef::named("TestRecursiveSub")))
            .member("value", int()),
        TypeDescriptor::composite("Fragile").constructor(ConstructorDescriptor::with_body(
            vec![ParamDescriptor::new("seed", int())],
            |_| Err("boom".to_string()),
        )),
        TypeDescriptor::composite("Holder").member("fragile", TypeRef::named("Fragile")),
        TypeDescriptor::composite("Node")
            .readonly_member("parent", TypeRef::named("Node"))
            .constructor(ConstructorDescriptor::new(Vec::new()))
            .constructor(ConstructorDescriptor::new(vec![ParamDescriptor::new(
                "parent",
                TypeRef::named("Node"),
            )])),
        TypeDescriptor::composite("Drawing")
            .readonly_member("shape", TypeRef::named("Shape"))
            .member("title", TypeRef::string())
            .constructor(ConstructorDescriptor::new(vec![ParamDescriptor::new(
                "shape",
                TypeRef::named("Shape"),
            )]))
            .constructor(ConstructorDescriptor::new(Vec::new())),
    ])
    .expect("fixture catalog is valid")
}

pub fn object(value: Option<Value>) -> Instance {
    value
        .and_then(Value::into_object)
        .expect("expected a generated object")
}

/// Number of consecutive object links reachable through `member`.
pub fn chain_len(root: &Instance, member: &str) -> usize {
    let mut len = 0;
    let mut current = root;
    while let Some(next) = current.object(member) {
        len += 1;
        current = next;
    }
    len
}

/// Number of `TestRecursiveClass` values at each `children` level below `root`.
pub fn children_per_level(root: &Instance) -> Vec<usize> {
    let mut levels = Vec::new();
    let mut frontier = vec![root];
    loop {
        let next: Vec<&Instance> = frontier
            .iter()
            .flat_map(|node| {
                node.value("children")
                    .as_list()
                    .unwrap_or(&[])
                    .iter()
                    .filter_map(Value::as_object)
            })
            .collect();
        if next.is_empty() {
            return levels;
        }
        levels.push(next.len());
        frontier = next;
    }
}
