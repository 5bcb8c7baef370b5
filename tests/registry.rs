use foldhost::prelude::*;
use foldhost::host::{CompliancePredicate, HostRealType};
use foldhost_test_utils::{all_profiles, ieee_only, no_int128, x87_padded};

#[test]
fn test_ieee_only_scenario() {
    let registry = ieee_only();
    assert!(registry.exists(NumericType::real(4)));
    assert!(registry.exists(NumericType::real(8)));
    assert!(!registry.exists(NumericType::real(2)));
    assert!(!registry.exists(NumericType::real(10)));
    assert!(!registry.exists(NumericType::real(16)));
    assert!(registry.exists_all(&[NumericType::integer(16), NumericType::complex(8)]));
    assert!(!registry.exists_all(&[NumericType::real(4), NumericType::complex(10)]));
}

#[test]
fn test_complex_follows_real_on_every_profile() {
    for (name, registry) in all_profiles() {
        for kind in [2, 3, 4, 8, 10, 16] {
            assert_eq!(
                registry.exists(NumericType::complex(kind)),
                registry.exists(NumericType::real(kind)),
                "{name}: kind {kind}"
            );
        }
    }
}

#[test]
fn test_half_precision_is_never_native() {
    for (name, registry) in all_profiles() {
        assert_eq!(registry.lookup(NumericType::real(2)), None, "{name}");
        assert_eq!(registry.lookup(NumericType::real(3)), None, "{name}");
    }
}

#[test]
fn test_logical_kinds_share_a_tag() {
    let registry = ieee_only();
    for kind in [1, 2, 4, 8] {
        let representation = registry.lookup(NumericType::logical(kind)).unwrap();
        assert_eq!(representation.host_type(), HostType::LogicalTag);
        assert_eq!(representation.storage_bytes(), 1);
    }
    assert_eq!(registry.correspondence(NumericType::logical(16)), Correspondence::Absent);
    assert_eq!(
        registry.descriptor_of_native(HostType::LogicalTag),
        Some(NumericType::logical(1))
    );
}

#[test]
fn test_reverse_lookup() {
    let registry = x87_padded(12);
    let extended = HostType::Real(HostRealType::Extended { storage_bytes: 12 });
    assert_eq!(registry.descriptor_of_native(extended), Some(NumericType::real(10)));
    assert_eq!(
        registry.descriptor_of_native(HostType::Complex(HostRealType::F64)),
        Some(NumericType::complex(8))
    );
    assert_eq!(
        registry.descriptor_of_native(HostType::Character { kind: 4 }),
        Some(NumericType::character(4))
    );
    assert_eq!(ieee_only().descriptor_of_native(extended), None);
}

#[test]
fn test_compliance_is_recorded() {
    let registry = x87_padded(16);
    let representation = registry.lookup(NumericType::complex(10)).unwrap();
    assert_eq!(
        representation.compliance(),
        &[CompliancePredicate::LongDoubleIsX87Extended]
    );
    assert_eq!(representation.padding_bytes(), 12);

    assert!(!no_int128().exists(NumericType::integer(16)));
    assert!(no_int128().exists(NumericType::integer(8)));
}

#[test]
fn test_notation_resolves_against_registry() {
    let registry = ieee_only();
    let ty: NumericType = "complex(kind=8)".parse().unwrap();
    assert_eq!(
        registry.lookup(ty).map(|r| r.host_type()),
        Some(HostType::Complex(HostRealType::F64))
    );
    assert!(matches!(
        "real(0)".parse::<NumericType>(),
        Err(TypeError::Parse { .. })
    ));
}

#[test]
fn test_registry_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HostRegistry>();

    let host = HostRegistry::host();
    let found = std::thread::spawn(|| HostRegistry::host().exists(NumericType::real(8)))
        .join()
        .unwrap();
    assert_eq!(found, host.exists(NumericType::real(8)));
}
