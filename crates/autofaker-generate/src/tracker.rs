use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Per-type recursion bounds resolved from settings and the type graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepthLimits {
    default: usize,
    per_type: BTreeMap<String, usize>,
    recursive: BTreeSet<String>,
}

impl DepthLimits {
    pub fn new(
        default: usize,
        per_type: BTreeMap<String, usize>,
        recursive: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            default,
            per_type,
            recursive: recursive.into_iter().collect(),
        }
    }

    /// Bound for `ty`: an explicit per-type value, else the default for
    /// reference-cycle types, else unlimited.
    pub fn limit_for(&self, ty: &str) -> Option<usize> {
        self.per_type
            .get(ty)
            .copied()
            .or_else(|| self.recursive.contains(ty).then_some(self.default))
    }

    pub fn is_recursive(&self, ty: &str) -> bool {
        self.recursive.contains(ty)
    }
}

/// Counts how many times each type is currently entered on the active path.
#[derive(Debug)]
pub struct RecursionTracker<'a> {
    limits: &'a DepthLimits,
    depths: HashMap<String, usize>,
}

impl<'a> RecursionTracker<'a> {
    pub fn new(limits: &'a DepthLimits) -> Self {
        Self {
            limits,
            depths: HashMap::new(),
        }
    }

    /// Returns `true` and increments the depth when `ty` may be entered.
    pub fn enter(&mut self, ty: &str) -> bool {
        let current = self.depth(ty);
        if let Some(limit) = self.limits.limit_for(ty)
            && current >= limit
        {
            return false;
        }
        self.depths.insert(ty.to_string(), current + 1);
        true
    }

    pub fn leave(&mut self, ty: &str) {
        if let Some(depth) = self.depths.get_mut(ty) {
            *depth = depth.saturating_sub(1);
            if *depth == 0 {
                self.depths.remove(ty);
            }
        }
    }

    pub fn depth(&self, ty: &str) -> usize {
        self.depths.get(ty).copied().unwrap_or(0)
    }

    /// True when no type is currently entered.
    pub fn is_idle(&self) -> bool {
        self.depths.is_empty()
    }
}
