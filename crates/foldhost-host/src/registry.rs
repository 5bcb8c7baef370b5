use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use foldhost_types::{NumericType, TypeCategory};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::{CompliancePredicate, HostRealType, HostRepresentation, HostTarget, HostType};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Native correspondence of one descriptor.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Correspondence {
    Native(HostRepresentation),
    /// No native type exactly represents the descriptor on this target.
    Absent,
}

impl Correspondence {
    pub const fn as_native(&self) -> Option<HostRepresentation> {
        match self {
            Correspondence::Native(representation) => Some(*representation),
            Correspondence::Absent => None,
        }
    }

    pub const fn is_native(&self) -> bool {
        matches!(self, Correspondence::Native(_))
    }
}

static HOST: LazyLock<HostRegistry> =
    LazyLock::new(|| HostRegistry::for_target(HostTarget::current()));

/// Read-only table from intrinsic types to their native representations.
///
/// The table is computed once per target and never changes afterwards, so a
/// registry can be shared freely between threads. Descriptors outside the
/// intrinsic set are classified on demand with the same rules.
///
/// # Usage
///
/// ```
/// use foldhost_host::HostRegistry;
/// use foldhost_types::NumericType;
///
/// let host = HostRegistry::host();
/// assert!(host.exists_all(&[NumericType::integer(4), NumericType::real(8)]));
/// assert!(!host.exists(NumericType::real(2)));
/// ```
#[derive(Clone, Debug)]
pub struct HostRegistry {
    target: HostTarget,
    entries: FxIndexMap<NumericType, Correspondence>,
}

impl HostRegistry {
    /// The registry of the machine this crate was compiled for.
    pub fn host() -> &'static HostRegistry {
        &HOST
    }

    pub fn for_target(target: HostTarget) -> Self {
        let mut entries = FxIndexMap::default();
        for ty in NumericType::INTRINSIC {
            let correspondence = classify(&target, ty);
            tracing::trace!(%ty, ?correspondence, "classified registry slot");
            entries.insert(ty, correspondence);
        }
        let native = entries.values().filter(|c| c.is_native()).count();
        tracing::debug!(
            native,
            absent = entries.len() - native,
            ?target,
            "built host registry"
        );
        HostRegistry { target, entries }
    }

    pub fn target(&self) -> &HostTarget {
        &self.target
    }

    /// The intrinsic table, in category then kind order.
    pub fn entries(&self) -> impl Iterator<Item = (NumericType, Correspondence)> + '_ {
        self.entries.iter().map(|(ty, c)| (*ty, *c))
    }

    pub fn correspondence(&self, ty: NumericType) -> Correspondence {
        match self.entries.get(&ty) {
            Some(correspondence) => *correspondence,
            None => classify(&self.target, ty),
        }
    }

    pub fn exists(&self, ty: NumericType) -> bool {
        self.correspondence(ty).is_native()
    }

    /// Whether every descriptor has a native representation.
    pub fn exists_all(&self, types: &[NumericType]) -> bool {
        types.iter().all(|ty| self.exists(*ty))
    }

    pub fn lookup(&self, ty: NumericType) -> Option<HostRepresentation> {
        self.correspondence(ty).as_native()
    }

    /// Native representation of a descriptor already known to exist.
    ///
    /// # Panics
    ///
    /// Panics if `ty` has no native representation on this registry's target.
    pub fn native_representation_of(&self, ty: NumericType) -> HostRepresentation {
        match self.lookup(ty) {
            Some(representation) => representation,
            None => panic!("{ty} has no native representation on this target"),
        }
    }

    /// The first intrinsic descriptor whose native type is `host_type`.
    ///
    /// Several descriptors may share a native type (all logical kinds share
    /// the tag byte); the earliest in table order wins.
    pub fn descriptor_of_native(&self, host_type: HostType) -> Option<NumericType> {
        if let HostType::Character { kind } = host_type {
            return NumericType::try_new(TypeCategory::Character, kind).ok();
        }
        self.entries.iter().find_map(|(ty, correspondence)| {
            correspondence
                .as_native()
                .filter(|representation| representation.host_type() == host_type)
                .map(|_| *ty)
        })
    }
}

impl Display for HostRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (ty, correspondence) in self.entries() {
            let name = ty.to_string();
            match correspondence {
                Correspondence::Native(representation) => {
                    write!(f, "{name:<14}{}", representation.host_type())?;
                    if representation.padding_bytes() > 0 {
                        write!(f, " (+{} padding)", representation.padding_bytes())?;
                    }
                    writeln!(f)?;
                }
                Correspondence::Absent => writeln!(f, "{name:<14}-")?,
            }
        }
        Ok(())
    }
}

const NO_REQUIREMENTS: &[CompliancePredicate] = &[];
const INT128: &[CompliancePredicate] = &[CompliancePredicate::Int128Available];
const BINARY32: &[CompliancePredicate] = &[CompliancePredicate::FloatIsBinary32];
const BINARY64: &[CompliancePredicate] = &[CompliancePredicate::DoubleIsBinary64];
const X87_EXTENDED: &[CompliancePredicate] = &[CompliancePredicate::LongDoubleIsX87Extended];
const BINARY128: &[CompliancePredicate] = &[CompliancePredicate::LongDoubleIsBinary128];

/// Candidate native type of a non-complex descriptor and the facts it needs.
fn native_slot(
    target: &HostTarget,
    ty: NumericType,
) -> Option<(HostType, &'static [CompliancePredicate])> {
    let kind = ty.kind();
    match ty.category() {
        TypeCategory::Integer => match kind {
            1 => Some((HostType::I8, NO_REQUIREMENTS)),
            2 => Some((HostType::I16, NO_REQUIREMENTS)),
            4 => Some((HostType::I32, NO_REQUIREMENTS)),
            8 => Some((HostType::I64, NO_REQUIREMENTS)),
            16 => Some((HostType::I128, INT128)),
            _ => None,
        },
        TypeCategory::Real => match kind {
            4 => Some((HostType::Real(HostRealType::F32), BINARY32)),
            8 => Some((HostType::Real(HostRealType::F64), BINARY64)),
            10 => {
                let storage_bytes = target
                    .long_double
                    .map_or(16, |model| model.storage_bytes.min(16));
                Some((
                    HostType::Real(HostRealType::Extended {
                        storage_bytes: storage_bytes as u8,
                    }),
                    X87_EXTENDED,
                ))
            }
            16 => Some((HostType::Real(HostRealType::Quad), BINARY128)),
            _ => None,
        },
        TypeCategory::Logical if kind <= 8 => Some((HostType::LogicalTag, NO_REQUIREMENTS)),
        TypeCategory::Logical => None,
        TypeCategory::Character => Some((HostType::Character { kind }, NO_REQUIREMENTS)),
        TypeCategory::Complex => None,
    }
}

fn classify(target: &HostTarget, ty: NumericType) -> Correspondence {
    if let Some(part) = ty.part() {
        return match classify(target, part).as_native() {
            Some(real) => real
                .as_complex_pair()
                .map_or(Correspondence::Absent, Correspondence::Native),
            None => Correspondence::Absent,
        };
    }
    match native_slot(target, ty) {
        Some((host_type, compliance)) if compliance.iter().all(|p| p.holds(target)) => {
            Correspondence::Native(HostRepresentation::new(host_type, compliance))
        }
        _ => Correspondence::Absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FloatModel;

    fn ieee_only() -> HostRegistry {
        HostRegistry::for_target(
            HostTarget::builder()
                .float(FloatModel::FLOAT)
                .double(FloatModel::DOUBLE)
                .build(),
        )
    }

    fn x87_padded_16() -> HostRegistry {
        HostRegistry::for_target(
            HostTarget::builder()
                .float(FloatModel::FLOAT)
                .double(FloatModel::DOUBLE)
                .long_double(FloatModel::X87_PADDED_16)
                .build(),
        )
    }

    #[test]
    fn test_integer_slots() {
        let registry = ieee_only();
        for kind in [1, 2, 4, 8, 16] {
            assert!(registry.exists(NumericType::integer(kind)), "integer({kind})");
        }
        assert!(!registry.exists(NumericType::integer(3)));

        let narrow = HostRegistry::for_target(HostTarget::builder().int128(false).build());
        assert!(narrow.exists(NumericType::integer(8)));
        assert!(!narrow.exists(NumericType::integer(16)));
    }

    #[test]
    fn test_half_precision_is_never_native() {
        for registry in [ieee_only(), x87_padded_16(), HostRegistry::host().clone()] {
            assert!(!registry.exists(NumericType::real(2)));
            assert!(!registry.exists(NumericType::real(3)));
            assert!(!registry.exists(NumericType::complex(2)));
        }
    }

    #[test]
    fn test_extended_slot_keeps_storage_size() {
        let registry = x87_padded_16();
        let representation = registry.native_representation_of(NumericType::real(10));
        assert_eq!(
            representation.host_type(),
            HostType::Real(HostRealType::Extended { storage_bytes: 16 })
        );
        assert_eq!(representation.significant_bytes(), 10);
        assert_eq!(representation.padding_bytes(), 6);
        assert_eq!(
            representation.compliance(),
            &[CompliancePredicate::LongDoubleIsX87Extended]
        );
        assert!(!registry.exists(NumericType::real(16)));
    }

    #[test]
    fn test_logical_and_character_policy() {
        let registry = ieee_only();
        for kind in [1, 2, 4, 8] {
            assert_eq!(
                registry.lookup(NumericType::logical(kind)).map(|r| r.host_type()),
                Some(HostType::LogicalTag)
            );
        }
        assert!(!registry.exists(NumericType::logical(16)));
        assert!(registry.exists(NumericType::character(7)));
        assert_eq!(
            registry.lookup(NumericType::character(2)).map(|r| r.host_type()),
            Some(HostType::Character { kind: 2 })
        );
    }

    #[test]
    fn test_exists_all_is_a_conjunction() {
        let registry = ieee_only();
        assert!(registry.exists_all(&[]));
        assert!(registry.exists_all(&[NumericType::real(4), NumericType::complex(8)]));
        assert!(!registry.exists_all(&[NumericType::real(4), NumericType::real(10)]));
    }

    #[test]
    #[should_panic(expected = "real(10) has no native representation")]
    fn test_native_representation_of_absent_kind_panics() {
        ieee_only().native_representation_of(NumericType::real(10));
    }

    #[test]
    fn test_descriptor_of_native() {
        let registry = x87_padded_16();
        assert_eq!(
            registry.descriptor_of_native(HostType::Real(HostRealType::F64)),
            Some(NumericType::real(8))
        );
        assert_eq!(
            registry.descriptor_of_native(HostType::Complex(HostRealType::Extended {
                storage_bytes: 16
            })),
            Some(NumericType::complex(10))
        );
        assert_eq!(
            registry.descriptor_of_native(HostType::LogicalTag),
            Some(NumericType::logical(1))
        );
        assert_eq!(
            registry.descriptor_of_native(HostType::Character { kind: 4 }),
            Some(NumericType::character(4))
        );
        assert_eq!(
            ieee_only().descriptor_of_native(HostType::Real(HostRealType::Extended {
                storage_bytes: 16
            })),
            None
        );
        assert_eq!(
            registry.descriptor_of_native(HostType::Real(HostRealType::Quad)),
            None
        );
    }

    #[test]
    fn test_entries_cover_intrinsic_types_in_order() {
        let registry = x87_padded_16();
        let types: Vec<_> = registry.entries().map(|(ty, _)| ty).collect();
        assert_eq!(types, NumericType::INTRINSIC);
        for (ty, correspondence) in registry.entries() {
            assert_eq!(correspondence, registry.correspondence(ty));
            assert_eq!(correspondence.is_native(), registry.exists(ty));
        }
    }

    #[test]
    fn test_registry_keeps_its_target() {
        assert_eq!(
            x87_padded_16().target().long_double,
            Some(FloatModel::X87_PADDED_16)
        );
        assert_eq!(ieee_only().target().long_double, None);
    }

    #[test]
    fn test_table_rendering() {
        insta::assert_snapshot!(x87_padded_16().to_string(), @r"
        integer(1)    i8
        integer(2)    i16
        integer(4)    i32
        integer(8)    i64
        integer(16)   i128
        real(2)       -
        real(3)       -
        real(4)       f32
        real(8)       f64
        real(10)      ExtendedSlot (+6 padding)
        real(16)      -
        complex(2)    -
        complex(3)    -
        complex(4)    HostComplex<f32>
        complex(8)    HostComplex<f64>
        complex(10)   HostComplex<ExtendedSlot> (+12 padding)
        complex(16)   -
        character(1)  Scalar
        character(2)  Scalar
        character(4)  Scalar
        logical(1)    u8
        logical(2)    u8
        logical(4)    u8
        logical(8)    u8
        ");
    }
}
