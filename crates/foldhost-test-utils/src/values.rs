use foldhost_types::{NumericType, RealFormat, Scalar, TypeCategory, width_mask};

/// Representative values of `ty` that sit on the edges of its layout: zeros
/// of both signs, extremes, infinities, a NaN and the smallest subnormal.
///
/// Returns an empty set for types with no known layout.
pub fn boundary_values(ty: NumericType) -> Vec<Scalar> {
    let kind = ty.kind();
    match ty.category() {
        TypeCategory::Integer => integer_boundaries(ty),
        TypeCategory::Real => real_boundaries(kind)
            .into_iter()
            .map(|bits| Scalar::Real { kind, bits })
            .collect(),
        TypeCategory::Complex => {
            let parts = real_boundaries(kind);
            parts
                .iter()
                .zip(parts.iter().rev())
                .map(|(re, im)| Scalar::Complex {
                    kind,
                    re: *re,
                    im: *im,
                })
                .collect()
        }
        TypeCategory::Logical => vec![
            Scalar::Logical { kind, value: false },
            Scalar::Logical { kind, value: true },
        ],
        TypeCategory::Character => {
            let widest = width_mask(8 * u32::from(kind).min(4)).min(0x10_FFFF) as u32;
            vec![
                Scalar::Character {
                    kind,
                    units: Vec::new(),
                },
                Scalar::Character {
                    kind,
                    units: vec![0x41, 0, widest],
                },
            ]
        }
    }
}

fn integer_boundaries(ty: NumericType) -> Vec<Scalar> {
    let Some(bytes) = ty.significant_bytes() else {
        return Vec::new();
    };
    let bits = 8 * bytes as u32;
    let mask = width_mask(bits);
    let sign = 1_u128 << (bits - 1);
    [0, 1, mask, sign, sign - 1]
        .into_iter()
        .map(|bits| Scalar::Integer {
            kind: ty.kind(),
            bits,
        })
        .collect()
}

fn real_boundaries(kind: u8) -> Vec<u128> {
    let Some(format) = RealFormat::for_kind(kind) else {
        return Vec::new();
    };
    vec![
        format.zero(false),
        format.zero(true),
        format.one(),
        format.infinity(false),
        format.infinity(true),
        format.quiet_nan(),
        format.largest_finite(false),
        format.largest_finite(true),
        format.smallest_subnormal(false),
        format.smallest_subnormal(true),
    ]
}
