use indexmap::IndexMap;

use crate::foundation::core::PixelSize;
use crate::frame::borders::EnabledBorders;
use crate::frame::variant::FrameVariant;
use crate::source::ElementSource;

/// Prefix-keyed variants plus the active prefix.
///
/// The default (empty) prefix exists from construction and is never evicted. Stored prefixes
/// are normalized: either `""` or a theme name followed by `-`.
#[derive(Debug)]
pub(crate) struct VariantStore {
    variants: IndexMap<String, FrameVariant>,
    active: String,
}

impl VariantStore {
    pub(crate) fn new(source: &dyn ElementSource) -> Self {
        let mut variants = IndexMap::new();
        variants.insert(
            String::new(),
            FrameVariant::new(source, "", EnabledBorders::default(), PixelSize::ZERO),
        );
        Self {
            variants,
            active: String::new(),
        }
    }

    pub(crate) fn active_prefix(&self) -> &str {
        &self.active
    }

    pub(crate) fn active(&self) -> Option<&FrameVariant> {
        self.variants.get(&self.active)
    }

    pub(crate) fn active_mut(&mut self) -> &mut FrameVariant {
        self.variants.entry(self.active.clone()).or_default()
    }

    pub(crate) fn get(&self, prefix: &str) -> Option<&FrameVariant> {
        self.variants.get(prefix)
    }

    pub(crate) fn get_mut(&mut self, prefix: &str) -> Option<&mut FrameVariant> {
        self.variants.get_mut(prefix)
    }

    pub(crate) fn contains(&self, prefix: &str) -> bool {
        self.variants.contains_key(prefix)
    }

    pub(crate) fn len(&self) -> usize {
        self.variants.len()
    }

    pub(crate) fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    /// Make `raw` the active theme variant and return the normalized prefix actually used.
    ///
    /// Falls back to the default prefix when `raw` is empty or the theme has no
    /// `raw-center`. A newly seen prefix inherits borders and size from the previously active
    /// variant. Without `cache_all`, the previously active variant is evicted.
    pub(crate) fn select_prefix(
        &mut self,
        raw: &str,
        source: &dyn ElementSource,
        cache_all: bool,
    ) -> &str {
        let prefix = if !raw.is_empty() && source.has_element(&format!("{raw}-center")) {
            format!("{raw}-")
        } else {
            if !raw.is_empty() {
                tracing::debug!(prefix = raw, "theme lacks prefix, using default elements");
            }
            String::new()
        };

        if prefix == self.active && self.variants.contains_key(&prefix) {
            return &self.active;
        }

        if !self.variants.contains_key(&prefix) {
            let variant = match self.variants.get(&self.active) {
                Some(old) => old.derive(source, &prefix),
                None => {
                    FrameVariant::new(source, &prefix, EnabledBorders::default(), PixelSize::ZERO)
                }
            };
            self.variants.insert(prefix.clone(), variant);
        }

        let old = std::mem::replace(&mut self.active, prefix);
        if !cache_all && !old.is_empty() && old != self.active {
            self.variants.shift_remove(&old);
        }
        &self.active
    }

    /// Insert a variant for `prefix` derived from `from` unless one already exists.
    pub(crate) fn ensure_derived(&mut self, prefix: &str, from: &str, source: &dyn ElementSource) {
        if self.variants.contains_key(prefix) {
            return;
        }
        let variant = match self.variants.get(from) {
            Some(base) => base.derive(source, prefix),
            None => FrameVariant::new(source, prefix, EnabledBorders::default(), PixelSize::ZERO),
        };
        self.variants.insert(prefix.to_string(), variant);
    }

    /// Evict a non-active, non-default variant; returns `true` if one was removed.
    pub(crate) fn remove(&mut self, prefix: &str) -> bool {
        if prefix.is_empty() || prefix == self.active {
            return false;
        }
        self.variants.shift_remove(prefix).is_some()
    }

    /// Drop every variant except the active one and the default prefix.
    ///
    /// The default variant survives for the never-evicted guarantee but loses its buffers when
    /// it is not the active one.
    pub(crate) fn retain_active(&mut self) {
        let active = self.active.clone();
        self.variants
            .retain(|prefix, _| prefix.is_empty() || *prefix == active);
        if !active.is_empty()
            && let Some(default) = self.variants.get_mut("")
        {
            default.invalidate();
        }
    }

    /// Invalidate all variants and resolve their metrics against `source` again.
    pub(crate) fn refresh_all(&mut self, source: &dyn ElementSource) {
        for (prefix, variant) in self.variants.iter_mut() {
            variant.refresh(source, prefix);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/store.rs"]
mod tests;
