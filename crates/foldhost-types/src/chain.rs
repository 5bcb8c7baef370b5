use crate::TypeCategory;

/// `(kind, next bigger kind)` pairs shared by the real and complex chains.
///
/// Both 16-bit formats widen into kind 4: binary16 and bfloat16 are not
/// comparable with each other, but binary32 holds every value of either.
const FLOATING_STEPS: &[(u8, u8)] = &[(2, 4), (3, 4), (4, 8), (8, 10), (10, 16)];

/// Ordered widening steps of one category.
///
/// Following `next_bigger` from any kind yields kinds of strictly increasing
/// precision, each able to hold every value of the kinds before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PromotionChain {
    category: TypeCategory,
    steps: &'static [(u8, u8)],
}

impl PromotionChain {
    /// Chain of a category, or `None` when the category never widens.
    pub const fn for_category(category: TypeCategory) -> Option<PromotionChain> {
        if !category.is_floating() {
            return None;
        }
        Some(PromotionChain {
            category,
            steps: FLOATING_STEPS,
        })
    }

    pub const fn category(&self) -> TypeCategory {
        self.category
    }

    pub const fn steps(&self) -> &'static [(u8, u8)] {
        self.steps
    }

    pub fn next_bigger(&self, kind: u8) -> Option<u8> {
        self.steps
            .iter()
            .find(|(from, _)| *from == kind)
            .map(|(_, to)| *to)
    }

    /// Kinds strictly bigger than `kind`, nearest first.
    pub fn walk(&self, kind: u8) -> ChainWalk {
        ChainWalk {
            chain: *self,
            current: kind,
        }
    }
}

/// Iterator returned by [`PromotionChain::walk`].
#[derive(Clone, Debug)]
pub struct ChainWalk {
    chain: PromotionChain,
    current: u8,
}

impl Iterator for ChainWalk {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let next = self.chain.next_bigger(self.current)?;
        self.current = next;
        Some(next)
    }
}
