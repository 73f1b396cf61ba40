use sovran_variant::{CastError, Convertible, Variant, VariantType, WideString};

macro_rules! assert_converts {
    ($value:expr => $t:ty, $expected:expr) => {
        assert_eq!(
            Variant::from($value).convert_cast::<$t>()?,
            $expected,
            "{:?} as {}",
            $value,
            stringify!($t)
        );
    };
}

macro_rules! assert_fails {
    ($value:expr => $t:ty) => {
        match Variant::from($value).convert_cast::<$t>() {
            Ok(v) => panic!("{:?} should not convert to {}, got {:?}", $value, stringify!($t), v),
            Err(err) => assert!(err.to_type().is::<$t>()),
        }
    };
}

#[test]
fn test_exact_type_is_returned_unchanged() -> Result<(), CastError> {
    assert_converts!(12i32 => i32, 12);
    assert_converts!("text" => String, "text");
    assert_converts!(f64::MAX => f64, f64::MAX);
    Ok(())
}

#[test]
fn test_numeric_widening() -> Result<(), CastError> {
    assert_converts!(i8::MIN => i64, -128);
    assert_converts!(u32::MAX => u64, 4_294_967_295);
    assert_converts!(u64::MAX => u128, u64::MAX as u128);
    assert_converts!(i64::MIN => i128, i64::MIN as i128);
    assert_converts!(255u8 => f32, 255.0);
    assert_converts!(1.5f32 => f64, 1.5);
    assert_converts!(-3isize => i16, -3);
    assert_converts!(9usize => u8, 9);
    Ok(())
}

#[test]
fn test_numeric_narrowing_in_range() -> Result<(), CastError> {
    assert_converts!(127i64 => i8, 127);
    assert_converts!(-128i64 => i8, -128);
    assert_converts!(65_535u64 => u16, 65_535);
    assert_converts!(0i32 => u8, 0);
    assert_converts!(1e10f64 => u64, 10_000_000_000);
    assert_converts!(0.1f64 => f32, 0.1f32);
    Ok(())
}

#[test]
fn test_numeric_narrowing_out_of_range_fails() {
    assert_fails!(128i64 => i8);
    assert_fails!(-129i64 => i8);
    assert_fails!(-1i32 => u8);
    assert_fails!(-1i64 => u64);
    assert_fails!(u64::MAX => i64);
    assert_fails!(i128::MIN => i64);
    assert_fails!(u128::MAX => i128);
    assert_fails!(256.0f64 => u8);
    assert_fails!(f64::MAX => i128);
    assert_fails!(1e39f64 => f32);
}

#[test]
fn test_float_to_integer_truncates_toward_zero() -> Result<(), CastError> {
    assert_converts!(2.999f64 => i32, 2);
    assert_converts!(-2.999f64 => i32, -2);
    assert_converts!(-0.999f64 => u8, 0);
    assert_converts!(127.9f32 => i8, 127);
    Ok(())
}

#[test]
fn test_non_finite_floats_fail_integer_conversion() {
    assert_fails!(f64::NAN => i32);
    assert_fails!(f64::INFINITY => u64);
    assert_fails!(f32::NEG_INFINITY => i8);
}

#[test]
fn test_text_to_number_is_strict() -> Result<(), CastError> {
    assert_converts!("42" => i32, 42);
    assert_converts!("-42" => i64, -42);
    assert_converts!("255" => u8, 255);
    assert_converts!("3.5" => f64, 3.5);
    assert_converts!("1e3" => f32, 1000.0);

    assert_fails!("" => i32);
    assert_fails!("42abc" => i32);
    assert_fails!("abc42" => i32);
    assert_fails!(" 42" => i32);
    assert_fails!("42 " => i32);
    assert_fails!("4.2" => i32);
    assert_fails!("256" => u8);
    assert_fails!("-1" => u32);
    assert_fails!("1e999" => f64);
    Ok(())
}

#[test]
fn test_number_to_text() -> Result<(), CastError> {
    assert_converts!(42i32 => String, "42");
    assert_converts!(-7i8 => String, "-7");
    assert_converts!(u128::MAX => String, u128::MAX.to_string());
    assert_converts!(2.5f64 => String, "2.5");
    assert_converts!(true => String, "true");
    assert_converts!(false => String, "false");
    assert_converts!(12u16 => WideString, WideString::from("12"));
    Ok(())
}

#[test]
fn test_number_text_round_trip() -> Result<(), CastError> {
    fn round_trip<T>(value: T) -> Result<T, CastError>
    where
        T: Convertible + PartialOrd + Send + Sync,
    {
        let text = Variant::new(value).convert_cast::<String>()?;
        Variant::from(text).convert_cast::<T>()
    }

    assert_eq!(round_trip(i8::MIN)?, i8::MIN);
    assert_eq!(round_trip(i64::MAX)?, i64::MAX);
    assert_eq!(round_trip(u128::MAX)?, u128::MAX);
    assert_eq!(round_trip(usize::MAX)?, usize::MAX);
    assert_eq!(round_trip(0.1f64)?, 0.1f64);
    assert_eq!(round_trip(f64::MIN_POSITIVE)?, f64::MIN_POSITIVE);
    assert_eq!(round_trip(1.0e-7f32)?, 1.0e-7f32);
    assert_eq!(round_trip(f32::MAX)?, f32::MAX);
    Ok(())
}

#[test]
fn test_boolean_coercion() -> Result<(), CastError> {
    assert_converts!(0i32 => bool, false);
    assert_converts!(1i32 => bool, true);
    assert_converts!(-42i64 => bool, true);
    assert_converts!(0.0f64 => bool, false);
    assert_converts!("true" => bool, true);
    assert_converts!("TRUE" => bool, true);
    assert_converts!("False" => bool, false);
    assert_converts!("1" => bool, true);
    assert_converts!("0" => bool, false);

    assert_fails!("garbage" => bool);
    assert_fails!("" => bool);
    assert_fails!("yes" => bool);
    Ok(())
}

#[test]
fn test_unsupported_pairs_fail_with_both_types() {
    #[derive(Debug, Clone, PartialEq, PartialOrd)]
    struct Opaque;

    let err = Variant::new(Opaque).convert_cast::<i32>().unwrap_err();
    assert!(err.from_type().is::<Opaque>());
    assert_eq!(err.to_type(), VariantType::of::<i32>());

    let err = Variant::new(Opaque).convert_cast::<String>().unwrap_err();
    assert!(err.from_type().is::<Opaque>());
    assert!(err.to_type().is::<String>());

    let err = Variant::default().convert_cast::<f64>().unwrap_err();
    assert_eq!(err.from_type(), VariantType::empty());
}

#[test]
fn test_can_be_type_preflight() {
    let number = Variant::from(300i32);
    assert!(number.can_be_type::<i32>());
    assert!(number.can_be_type::<i16>());
    assert!(!number.can_be_type::<u8>());
    assert!(number.can_be_type::<String>());
    assert!(number.can_be_type::<bool>());

    let wide = Variant::from(WideString::from("wide"));
    assert!(wide.can_be_type::<WideString>());
    assert!(!wide.can_be_type::<u32>());
}

#[test]
fn test_variant_target_is_identity() -> Result<(), CastError> {
    let value = Variant::from(5u8).convert_cast::<Variant>()?;
    assert_eq!(value.cast::<u8>()?, 5);
    Ok(())
}
