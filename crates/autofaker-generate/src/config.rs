use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use autofaker_core::{
    MemberDescriptor, TypeGraphReport, TypeIntrospector, TypeKind, TypeRef, Value,
    build_type_graph_report,
};
use tracing::debug;

use crate::binder::{AutoBinder, Binder, ConstructionOverride};
use crate::errors::ConfigError;
use crate::faker_rs::{FakeRsAdapter, LocaleKey, PrimitiveProvider};
use crate::generators::{Generator, GeneratorRegistry, ImplementationGenerator};
use crate::model::GenerationSettings;
use crate::rules::{MemberRule, MemberRules};
use crate::tracker::DepthLimits;

/// Members and member types excluded from automatic population.
#[derive(Debug, Clone, Default)]
pub struct SkipSet {
    members: BTreeMap<String, BTreeSet<String>>,
    types: BTreeSet<TypeRef>,
}

impl SkipSet {
    pub fn skip_member(&mut self, ty: impl Into<String>, member: impl Into<String>) {
        self.members.entry(ty.into()).or_default().insert(member.into());
    }

    pub fn skip_type(&mut self, ty: TypeRef) {
        self.types.insert(ty);
    }

    pub fn contains_member(&self, ty: &str, member: &str) -> bool {
        self.members
            .get(ty)
            .is_some_and(|members| members.contains(member))
    }

    pub fn contains_type(&self, ty: &TypeRef) -> bool {
        self.types.contains(ty)
    }

    /// A member is skipped when registered on the type declaring it, on the
    /// concrete type being populated, or when its type is skipped.
    pub fn is_skipped(
        &self,
        declaring_type: &str,
        concrete_type: &str,
        member: &MemberDescriptor,
    ) -> bool {
        self.contains_member(declaring_type, &member.name)
            || self.contains_member(concrete_type, &member.name)
            || self.contains_type(&member.ty)
    }
}

/// Immutable configuration snapshot shared by every root request.
///
/// Built and validated once by [`ConfigBuilder`]; safe to share across
/// threads behind an `Arc`.
#[derive(Clone)]
pub struct GenerationConfig {
    settings: GenerationSettings,
    locale: LocaleKey,
    catalog: Arc<dyn TypeIntrospector>,
    registry: GeneratorRegistry,
    limits: DepthLimits,
    graph: TypeGraphReport,
    skip: SkipSet,
    rules: MemberRules,
    instantiators: BTreeMap<String, ConstructionOverride>,
    binder: Arc<dyn Binder>,
    primitives: Arc<dyn PrimitiveProvider>,
}

impl GenerationConfig {
    pub fn builder(catalog: impl TypeIntrospector + 'static) -> ConfigBuilder {
        ConfigBuilder::new(catalog)
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn locale(&self) -> LocaleKey {
        self.locale
    }

    pub fn catalog(&self) -> &dyn TypeIntrospector {
        self.catalog.as_ref()
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    pub fn limits(&self) -> &DepthLimits {
        &self.limits
    }

    /// Type reference graph, with implementation edges included.
    pub fn graph(&self) -> &TypeGraphReport {
        &self.graph
    }

    pub fn skip(&self) -> &SkipSet {
        &self.skip
    }

    pub fn rules(&self) -> &MemberRules {
        &self.rules
    }

    pub fn instantiator(&self, ty: &str) -> Option<&ConstructionOverride> {
        self.instantiators.get(ty)
    }

    pub fn binder(&self) -> &dyn Binder {
        self.binder.as_ref()
    }

    pub fn primitives(&self) -> &dyn PrimitiveProvider {
        self.primitives.as_ref()
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("settings", &self.settings)
            .field("registry", &self.registry)
            .field("limits", &self.limits)
            .field("skip", &self.skip)
            .field("rules", &self.rules)
            .field(
                "instantiators",
                &self.instantiators.keys().collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

/// Collects configuration and validates it into a [`GenerationConfig`].
pub struct ConfigBuilder {
    catalog: Arc<dyn TypeIntrospector>,
    settings: GenerationSettings,
    registry: GeneratorRegistry,
    skip_members: Vec<(String, String)>,
    skip_types: Vec<TypeRef>,
    rules: Vec<(String, String, MemberRule)>,
    instantiators: Vec<(String, ConstructionOverride)>,
    implementations: Vec<(String, TypeRef)>,
    binder: Arc<dyn Binder>,
    primitives: Arc<dyn PrimitiveProvider>,
}

impl ConfigBuilder {
    pub fn new(catalog: impl TypeIntrospector + 'static) -> Self {
        Self::from_shared(Arc::new(catalog))
    }

    pub fn from_shared(catalog: Arc<dyn TypeIntrospector>) -> Self {
        Self {
            catalog,
            settings: GenerationSettings::default(),
            registry: GeneratorRegistry::new(),
            skip_members: Vec::new(),
            skip_types: Vec::new(),
            rules: Vec::new(),
            instantiators: Vec::new(),
            implementations: Vec::new(),
            binder: Arc::new(AutoBinder),
            primitives: Arc::new(FakeRsAdapter),
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.settings.seed = seed;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.settings.locale = locale.into();
        self
    }

    pub fn with_repeat_count(mut self, count: usize) -> Self {
        self.settings.repeat_count = count;
        self
    }

    pub fn with_recursive_depth(mut self, depth: usize) -> Self {
        self.settings.recursive_depth = depth;
        self
    }

    pub fn with_tree_depth(mut self, depth: usize) -> Self {
        self.settings.tree_depth = Some(depth);
        self
    }

    pub fn with_type_depth(mut self, ty: impl Into<String>, depth: usize) -> Self {
        self.settings.type_depths.insert(ty.into(), depth);
        self
    }

    pub fn with_skip(mut self, ty: impl Into<String>, member: impl Into<String>) -> Self {
        self.skip_members.push((ty.into(), member.into()));
        self
    }

    /// Skip every member whose declared type is exactly `ty`.
    pub fn with_skip_type(mut self, ty: TypeRef) -> Self {
        self.skip_types.push(ty);
        self
    }

    pub fn with_rule(
        mut self,
        ty: impl Into<String>,
        member: impl Into<String>,
        rule: MemberRule,
    ) -> Self {
        self.rules.push((ty.into(), member.into(), rule));
        self
    }

    pub fn with_rule_value(
        self,
        ty: impl Into<String>,
        member: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.with_rule(ty, member, MemberRule::value(value))
    }

    pub fn with_instantiator(
        mut self,
        ty: impl Into<String>,
        instantiator: ConstructionOverride,
    ) -> Self {
        self.instantiators.push((ty.into(), instantiator));
        self
    }

    /// Resolve an interface or abstract type to `concrete`.
    pub fn with_implementation(
        mut self,
        abstract_type: impl Into<String>,
        concrete: TypeRef,
    ) -> Self {
        self.implementations.push((abstract_type.into(), concrete));
        self
    }

    pub fn with_generator(mut self, generator: Box<dyn Generator>) -> Self {
        self.registry.register_generator(generator);
        self
    }

    /// Replace the whole registry, built-in generators included.
    pub fn with_registry(mut self, registry: GeneratorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_binder(mut self, binder: Arc<dyn Binder>) -> Self {
        self.binder = binder;
        self
    }

    pub fn with_primitives(mut self, primitives: Arc<dyn PrimitiveProvider>) -> Self {
        self.primitives = primitives;
        self
    }

    pub fn build(self) -> Result<GenerationConfig, ConfigError> {
        let catalog = self.catalog;
        let locale = LocaleKey::parse(&self.settings.locale).ok_or_else(|| {
            ConfigError::InvalidSettings(format!(
                "unsupported locale '{}' (expected one of: {})",
                self.settings.locale,
                LocaleKey::SUPPORTED
                    .iter()
                    .map(|locale| locale.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })?;

        for ty in self.settings.type_depths.keys() {
            require_type(catalog.as_ref(), ty)?;
        }

        let mut skip = SkipSet::default();
        for (ty, member) in self.skip_members {
            require_member(catalog.as_ref(), &ty, &member)?;
            skip.skip_member(ty, member);
        }
        for ty in self.skip_types {
            for name in ty.named_refs() {
                require_type(catalog.as_ref(), name)?;
            }
            skip.skip_type(ty);
        }

        let mut rules = MemberRules::default();
        for (ty, member, rule) in self.rules {
            let declared = require_member(catalog.as_ref(), &ty, &member)?;
            if !declared.member.writable {
                return Err(ConfigError::Conflict(format!(
                    "rule targets read-only member '{ty}.{member}'"
                )));
            }
            if skip.is_skipped(declared.declaring_type, &ty, declared.member) {
                return Err(ConfigError::Conflict(format!(
                    "member '{ty}.{member}' is both skipped and overridden by a rule"
                )));
            }
            if !rules.insert(ty.clone(), member.clone(), rule) {
                return Err(ConfigError::Conflict(format!(
                    "duplicate rule for '{ty}.{member}'"
                )));
            }
        }

        let mut instantiators = BTreeMap::new();
        for (ty, instantiator) in self.instantiators {
            let descriptor = require_type(catalog.as_ref(), &ty)?;
            if matches!(descriptor.kind, TypeKind::Enum(_)) {
                return Err(ConfigError::Conflict(format!(
                    "construction override registered for enum '{ty}'"
                )));
            }
            if instantiators.insert(ty.clone(), instantiator).is_some() {
                return Err(ConfigError::Conflict(format!(
                    "duplicate construction override for '{ty}'"
                )));
            }
        }

        let mut registry = self.registry;
        let mut implemented = BTreeSet::new();
        let mut extra_edges = Vec::new();
        for (abstract_type, concrete) in self.implementations {
            let descriptor = require_type(catalog.as_ref(), &abstract_type)?;
            if !matches!(descriptor.kind, TypeKind::Abstract | TypeKind::Interface) {
                return Err(ConfigError::Conflict(format!(
                    "implementation registered for '{abstract_type}', \
                     which is not abstract or an interface"
                )));
            }
            if instantiators.contains_key(&abstract_type) {
                return Err(ConfigError::Conflict(format!(
                    "'{abstract_type}' has both an implementation and a construction override"
                )));
            }
            if !implemented.insert(abstract_type.clone()) {
                return Err(ConfigError::Conflict(format!(
                    "duplicate implementation for '{abstract_type}'"
                )));
            }
            for name in concrete.named_refs() {
                let target = require_type(catalog.as_ref(), name)?;
                if matches!(target.kind, TypeKind::Abstract | TypeKind::Interface)
                    && !instantiators.contains_key(name)
                {
                    return Err(ConfigError::Conflict(format!(
                        "implementation of '{abstract_type}' resolves to non-concrete type '{name}'"
                    )));
                }
                extra_edges.push((abstract_type.clone(), name.to_string()));
            }
            registry.register_generator(Box::new(ImplementationGenerator::new(
                abstract_type,
                concrete,
            )));
        }

        let graph = build_type_graph_report(catalog.as_ref(), &extra_edges);
        let limits = DepthLimits::new(
            self.settings.recursive_depth,
            self.settings.type_depths.clone(),
            graph.recursive_types.iter().cloned(),
        );

        debug!(
            types = graph.summary.nodes,
            edges = graph.summary.edges,
            recursive = ?graph.recursive_types,
            generators = registry.generator_ids().len(),
            "generation config built"
        );

        Ok(GenerationConfig {
            settings: self.settings,
            locale,
            catalog,
            registry,
            limits,
            graph,
            skip,
            rules,
            instantiators,
            binder: self.binder,
            primitives: self.primitives,
        })
    }
}

fn require_type<'c>(
    catalog: &'c dyn TypeIntrospector,
    ty: &str,
) -> Result<&'c autofaker_core::TypeDescriptor, ConfigError> {
    catalog
        .descriptor(ty)
        .ok_or_else(|| ConfigError::UnknownType(ty.to_string()))
}

fn require_member<'c>(
    catalog: &'c dyn TypeIntrospector,
    ty: &str,
    member: &str,
) -> Result<autofaker_core::DeclaredMember<'c>, ConfigError> {
    require_type(catalog, ty)?;
    catalog
        .member(ty, member)
        .ok_or_else(|| ConfigError::UnknownMember {
            ty: ty.to_string(),
            member: member.to_string(),
        })
}
