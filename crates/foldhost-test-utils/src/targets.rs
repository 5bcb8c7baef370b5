use foldhost_host::{FloatModel, HostRegistry, HostTarget};

/// IEEE `float` and `double`, no `long double` wider than `double`.
pub fn ieee_only() -> HostRegistry {
    HostRegistry::for_target(
        HostTarget::builder()
            .float(FloatModel::FLOAT)
            .double(FloatModel::DOUBLE)
            .long_double(FloatModel::DOUBLE)
            .build(),
    )
}

/// x87 `long double` in a slot of `storage_bytes`, as on i386 (12) or
/// x86_64 (16).
pub fn x87_padded(storage_bytes: usize) -> HostRegistry {
    HostRegistry::for_target(
        HostTarget::builder()
            .float(FloatModel::FLOAT)
            .double(FloatModel::DOUBLE)
            .long_double(FloatModel {
                storage_bytes,
                ..FloatModel::X87_PADDED_16
            })
            .build(),
    )
}

/// binary128 `long double`, as on aarch64 Linux.
pub fn quad_long_double() -> HostRegistry {
    HostRegistry::for_target(
        HostTarget::builder()
            .float(FloatModel::FLOAT)
            .double(FloatModel::DOUBLE)
            .long_double(FloatModel::BINARY128)
            .build(),
    )
}

pub fn no_int128() -> HostRegistry {
    HostRegistry::for_target(
        HostTarget::builder()
            .float(FloatModel::FLOAT)
            .double(FloatModel::DOUBLE)
            .long_double(FloatModel::X87_PADDED_16)
            .int128(false)
            .build(),
    )
}

/// Every named profile plus the registry of the running host.
pub fn all_profiles() -> Vec<(&'static str, HostRegistry)> {
    vec![
        ("ieee-only", ieee_only()),
        ("x87-12", x87_padded(12)),
        ("x87-16", x87_padded(16)),
        ("quad", quad_long_double()),
        ("no-int128", no_int128()),
        ("host", HostRegistry::host().clone()),
    ]
}
