use std::env;

use autofaker_core::{
    ConstructorDescriptor, ParamDescriptor, PrimitiveKind, TypeCatalog, TypeDescriptor, TypeRef,
};
use autofaker_generate::{ConfigBuilder, GenerationEngine, GenerationSettings};
use tracing_subscriber::EnvFilter;

fn catalog() -> autofaker_core::Result<TypeCatalog> {
    TypeCatalog::from_descriptors([
        TypeDescriptor::enumeration("Status", ["Pending", "Shipped", "Delivered"]),
        TypeDescriptor::composite("Customer")
            .member("first_name", TypeRef::string())
            .member("last_name", TypeRef::string())
            .member("email", TypeRef::string())
            .member("city", TypeRef::string())
            .member("referred_by", TypeRef::nullable(TypeRef::named("Customer"))),
        TypeDescriptor::composite("Order")
            .readonly_member("id", TypeRef::primitive(PrimitiveKind::Uuid))
            .member("placed_at", TypeRef::primitive(PrimitiveKind::DateTime))
            .member("status", TypeRef::named("Status"))
            .member("customer", TypeRef::named("Customer"))
            .member("items", TypeRef::list(TypeRef::named("OrderItem")))
            .constructor(ConstructorDescriptor::new(vec![ParamDescriptor::new(
                "id",
                TypeRef::primitive(PrimitiveKind::Uuid),
            )])),
        TypeDescriptor::composite("OrderItem")
            .member("sku", TypeRef::string())
            .member("quantity", TypeRef::primitive(PrimitiveKind::U16))
            .member("unit_price", TypeRef::primitive(PrimitiveKind::F64)),
    ])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut settings = GenerationSettings::default();
    let mut count = 1_usize;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => {
                let path = args.next().ok_or("missing --settings path")?;
                settings = GenerationSettings::from_json_str(&std::fs::read_to_string(path)?)?;
            }
            "--count" => {
                count = args.next().ok_or("missing --count value")?.parse()?;
            }
            _ => return Err(format!("unexpected argument '{arg}'").into()),
        }
    }

    let config = ConfigBuilder::new(catalog()?)
        .with_settings(settings)
        .build()?;
    let engine = GenerationEngine::new(config);

    let values = engine.generate_many(&TypeRef::named("Order"), count)?;
    println!("{}", serde_json::to_string_pretty(&values)?);
    Ok(())
}
