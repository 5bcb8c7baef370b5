use foldhost_types::{NumericType, PromotionChain};

use crate::{HostRegistry, HostRepresentation};

/// Outcome of resolving a descriptor to the smallest kind the host can hold.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Promotion {
    pub requested: NumericType,
    /// Descriptor the evaluator should compute in; `requested` when trivial.
    pub chosen: NumericType,
    pub representation: HostRepresentation,
}

impl Promotion {
    /// True when no widening was needed.
    pub fn is_trivial(&self) -> bool {
        self.requested == self.chosen
    }
}

impl HostRegistry {
    /// Finds the nearest kind at or above `ty` that has a native representation.
    ///
    /// Kinds are tried in promotion chain order, so the first hit is the
    /// smallest sufficient one. Categories without a chain only resolve to
    /// themselves.
    pub fn bigger_or_same(&self, ty: NumericType) -> Option<Promotion> {
        if let Some(representation) = self.lookup(ty) {
            return Some(Promotion {
                requested: ty,
                chosen: ty,
                representation,
            });
        }
        let chain = PromotionChain::for_category(ty.category())?;
        let promotion = chain.walk(ty.kind()).find_map(|kind| {
            let chosen = ty.with_kind(kind);
            self.lookup(chosen).map(|representation| Promotion {
                requested: ty,
                chosen,
                representation,
            })
        });
        match &promotion {
            Some(promotion) => tracing::debug!(
                requested = %ty,
                chosen = %promotion.chosen,
                host_type = %promotion.representation.host_type(),
                "promoted to a wider native kind"
            ),
            None => tracing::debug!(requested = %ty, "no native kind at or above"),
        }
        promotion
    }

    /// Whether every descriptor resolves to some native kind.
    pub fn bigger_or_same_all(&self, types: &[NumericType]) -> bool {
        types.iter().all(|ty| self.bigger_or_same(*ty).is_some())
    }
}
