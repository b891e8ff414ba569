use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use autofaker_core::{Instance, Value};
use rand::RngCore;

use crate::context::GenerationContext;
use crate::errors::GenerationError;

pub type RuleFn = Arc<dyn Fn(&mut RuleContext<'_>) -> Value + Send + Sync>;

/// What a rule function sees: the instance after construction and any rules
/// applied before it.
pub struct RuleContext<'r> {
    pub type_name: &'r str,
    pub member: &'r str,
    pub instance: &'r Instance,
    pub rng: &'r mut dyn RngCore,
}

/// Value source for one member that replaces automatic population.
#[derive(Clone)]
pub enum MemberRule {
    Value(Value),
    Generate(RuleFn),
}

impl MemberRule {
    pub fn value(value: impl Into<Value>) -> Self {
        MemberRule::Value(value.into())
    }

    pub fn generate(func: impl Fn(&mut RuleContext<'_>) -> Value + Send + Sync + 'static) -> Self {
        MemberRule::Generate(Arc::new(func))
    }
}

impl fmt::Debug for MemberRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberRule::Value(value) => f.debug_tuple("Value").field(value).finish(),
            MemberRule::Generate(_) => f.write_str("Generate(..)"),
        }
    }
}

/// Rules keyed by concrete type, kept in registration order per type.
#[derive(Debug, Clone, Default)]
pub struct MemberRules {
    rules: BTreeMap<String, Vec<(String, MemberRule)>>,
}

impl MemberRules {
    /// Returns `false` when the member already has a rule.
    pub fn insert(
        &mut self,
        ty: impl Into<String>,
        member: impl Into<String>,
        rule: MemberRule,
    ) -> bool {
        let member = member.into();
        let entries = self.rules.entry(ty.into()).or_default();
        if entries.iter().any(|(existing, _)| *existing == member) {
            return false;
        }
        entries.push((member, rule));
        true
    }

    pub fn for_type(&self, ty: &str) -> &[(String, MemberRule)] {
        self.rules.get(ty).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, ty: &str, member: &str) -> bool {
        self.for_type(ty).iter().any(|(existing, _)| existing == member)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().flat_map(|(ty, entries)| {
            entries
                .iter()
                .map(move |(member, _)| (ty.as_str(), member.as_str()))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Apply every rule registered for `type_name` to `instance`.
pub(crate) fn apply_rules(
    instance: &mut Instance,
    type_name: &str,
    ctx: &mut GenerationContext<'_>,
) -> Result<(), GenerationError> {
    let config = ctx.config();
    for (member, rule) in config.rules().for_type(type_name) {
        let value = match rule {
            MemberRule::Value(value) => value.clone(),
            MemberRule::Generate(func) => {
                let mut rule_ctx = RuleContext {
                    type_name,
                    member,
                    instance: &*instance,
                    rng: ctx.rng(),
                };
                func(&mut rule_ctx)
            }
        };
        config.catalog().set_member(instance, member, value)?;
        ctx.report_mut().record_overridden();
    }
    Ok(())
}
