use autofaker_core::Instance;
use tracing::debug;

use crate::context::GenerationContext;
use crate::errors::GenerationError;

/// Fill every writable member of `instance` that is neither skipped nor
/// covered by a rule. Members come base-first in declaration order.
///
/// A member whose value is not generated keeps whatever it already holds.
pub fn populate_members(
    instance: &mut Instance,
    type_name: &str,
    ctx: &mut GenerationContext<'_>,
) -> Result<(), GenerationError> {
    let config = ctx.config();
    let catalog = config.catalog();
    for declared in catalog.declared_members(type_name)? {
        let member = declared.member;
        if !member.writable {
            continue;
        }
        if config
            .skip()
            .is_skipped(declared.declaring_type, type_name, member)
        {
            debug!(ty = type_name, member = %member.name, "member skipped");
            ctx.report_mut().record_skipped();
            continue;
        }
        if config.rules().contains(type_name, &member.name) {
            continue;
        }
        if let Some(value) = ctx.generate_for_member(&member.ty, &member.name)? {
            catalog.set_member(instance, &member.name, value)?;
            ctx.report_mut().record_populated();
        }
    }
    Ok(())
}
