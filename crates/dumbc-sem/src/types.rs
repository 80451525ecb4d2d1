//! Builtin type conversion and promotion rules (§4.4): the arithmetic
//! every binary expression, assignment, call argument, `var` initializer
//! and `return` value is checked and (if needed) coerced against.

use dumbc_par::Type;

/// The common type two operands of a binary expression convert to before
/// evaluation, or `None` if they're incompatible. Symmetric by
/// construction: `conversion(l, r) == conversion(r, l)`.
pub fn builtin_type_conversion(l: Type, r: Type) -> Option<Type> {
    if l == Type::Str || r == Type::Str || l == Type::Void || r == Type::Void {
        return None;
    }

    if l == Type::Bool || r == Type::Bool {
        return if l == Type::Bool && r == Type::Bool { Some(Type::Bool) } else { None };
    }

    // Both numeric from here on.
    if l == Type::F64 || r == Type::F64 {
        return Some(Type::F64);
    }
    if l == Type::F32 || r == Type::F32 {
        return Some(Type::F32);
    }

    // Both integers.
    let lb = l.int_bits()?;
    let rb = r.int_bits()?;
    let nbits = lb.max(rb);

    let kind = match (l.is_unsigned_int(), r.is_unsigned_int()) {
        (true, true) => 'u',
        (false, false) => 'i',
        // Mixed signedness: the wider of the two wins unless the unsigned
        // side is at least as wide, in which case unsigned wins.
        (true, false) => if lb >= rb { 'u' } else { 'i' },
        (false, true) => if rb >= lb { 'u' } else { 'i' },
    };

    int_type(kind, nbits)
}

/// `T` if `from` may be implicitly widened to `to`, else `None`. Never
/// self-promoting: `promotion(T, T) == None` for every `T`.
pub fn builtin_type_promotion(from: Type, to: Type) -> Option<Type> {
    if from == to {
        return None;
    }

    if to == Type::F64 {
        return if from.is_numerical() { Some(Type::F64) } else { None };
    }
    if to == Type::F32 {
        return if from.is_numerical() && from != Type::F64 { Some(Type::F32) } else { None };
    }

    if !from.is_integer() || !to.is_integer() {
        return None;
    }

    let (fb, tb) = (from.int_bits().unwrap(), to.int_bits().unwrap());

    match (from.is_unsigned_int(), to.is_unsigned_int()) {
        // Same signedness: widening only.
        (true, true) | (false, false) => {
            if fb <= tb {
                Some(to)
            } else {
                None
            }
        }
        // Unsigned source can widen into a strictly wider signed target.
        (true, false) => {
            if tb > fb {
                Some(to)
            } else {
                None
            }
        }
        // Signed source can widen into an unsigned target at least as wide.
        (false, true) => {
            if fb <= tb {
                Some(to)
            } else {
                None
            }
        }
    }
}

fn int_type(kind: char, nbits: u32) -> Option<Type> {
    match (kind, nbits) {
        ('i', 8) => Some(Type::I8),
        ('i', 32) => Some(Type::I32),
        ('i', 64) => Some(Type::I64),
        ('u', 8) => Some(Type::U8),
        ('u', 32) => Some(Type::U32),
        ('u', 64) => Some(Type::U64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUILTINS: &[Type] = &[
        Type::I8,
        Type::I32,
        Type::I64,
        Type::U8,
        Type::U32,
        Type::U64,
        Type::F32,
        Type::F64,
        Type::Bool,
        Type::Str,
        Type::Void,
    ];

    #[test]
    fn conversion_is_symmetric_over_every_builtin_pair() {
        for &l in BUILTINS {
            for &r in BUILTINS {
                assert_eq!(
                    builtin_type_conversion(l, r),
                    builtin_type_conversion(r, l),
                    "conversion({l:?}, {r:?}) not symmetric"
                );
            }
        }
    }

    #[test]
    fn str_and_void_never_convert() {
        assert_eq!(builtin_type_conversion(Type::Str, Type::I32), None);
        assert_eq!(builtin_type_conversion(Type::Void, Type::Bool), None);
    }

    #[test]
    fn bool_only_converts_with_bool() {
        assert_eq!(builtin_type_conversion(Type::Bool, Type::Bool), Some(Type::Bool));
        assert_eq!(builtin_type_conversion(Type::Bool, Type::I32), None);
    }

    #[test]
    fn float_dominates_integer() {
        assert_eq!(builtin_type_conversion(Type::F64, Type::I8), Some(Type::F64));
        assert_eq!(builtin_type_conversion(Type::F32, Type::I64), Some(Type::F32));
    }

    #[test]
    fn mixed_width_integers_take_the_wider_kind() {
        assert_eq!(builtin_type_conversion(Type::I32, Type::U8), Some(Type::I32));
        assert_eq!(builtin_type_conversion(Type::U32, Type::I8), Some(Type::U32));
    }

    #[test]
    fn promotion_never_self_promotes() {
        for &t in BUILTINS {
            assert_eq!(builtin_type_promotion(t, t), None);
        }
    }

    #[test]
    fn integer_narrowing_never_promotes() {
        assert_eq!(builtin_type_promotion(Type::I64, Type::I32), None);
        assert_eq!(builtin_type_promotion(Type::U64, Type::U8), None);
    }

    #[test]
    fn integer_widening_within_same_kind_promotes() {
        assert_eq!(builtin_type_promotion(Type::I8, Type::I32), Some(Type::I32));
        assert_eq!(builtin_type_promotion(Type::U8, Type::U64), Some(Type::U64));
    }

    #[test]
    fn anything_numeric_promotes_to_f64() {
        assert_eq!(builtin_type_promotion(Type::I32, Type::F64), Some(Type::F64));
        assert_eq!(builtin_type_promotion(Type::F32, Type::F64), Some(Type::F64));
    }

    #[test]
    fn signed_widens_into_unsigned_at_least_as_wide() {
        assert_eq!(builtin_type_promotion(Type::I8, Type::U8), Some(Type::U8));
        assert_eq!(builtin_type_promotion(Type::I8, Type::U32), Some(Type::U32));
        assert_eq!(builtin_type_promotion(Type::I32, Type::U8), None);
    }
}
