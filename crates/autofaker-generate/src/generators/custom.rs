use std::sync::Arc;

use autofaker_core::{TypeRef, Value};

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::generators::{Generator, GeneratorTarget};

type GenerateFn = Arc<
    dyn Fn(&mut GenerationContext<'_>) -> Result<Option<Value>, GenerationError> + Send + Sync,
>;

/// Closure-backed generator registered for one exact type.
pub struct FnGenerator {
    id: String,
    target: TypeRef,
    func: GenerateFn,
}

impl FnGenerator {
    pub fn new(
        id: impl Into<String>,
        target: TypeRef,
        func: impl Fn(&mut GenerationContext<'_>) -> Result<Option<Value>, GenerationError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            target,
            func: Arc::new(func),
        }
    }
}

impl Generator for FnGenerator {
    fn id(&self) -> &str {
        &self.id
    }

    fn target(&self) -> GeneratorTarget {
        GeneratorTarget::Exact(self.target.clone())
    }

    fn generate(
        &self,
        _ty: &TypeRef,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Option<Value>, GenerationError> {
        (self.func)(ctx)
    }
}

/// Resolves an interface or abstract type to a concrete implementation.
pub struct ImplementationGenerator {
    id: String,
    abstract_type: String,
    concrete: TypeRef,
}

impl ImplementationGenerator {
    pub fn new(abstract_type: impl Into<String>, concrete: TypeRef) -> Self {
        let abstract_type = abstract_type.into();
        Self {
            id: format!("implementation.{abstract_type}"),
            abstract_type,
            concrete,
        }
    }

    pub fn concrete(&self) -> &TypeRef {
        &self.concrete
    }
}

impl Generator for ImplementationGenerator {
    fn id(&self) -> &str {
        &self.id
    }

    fn target(&self) -> GeneratorTarget {
        GeneratorTarget::Exact(TypeRef::Named(self.abstract_type.clone()))
    }

    fn generate(
        &self,
        _ty: &TypeRef,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Option<Value>, GenerationError> {
        ctx.generate(&self.concrete)
    }
}
