use sovran_variant::{CastError, Null, Variant, WideString};

// Example type: a caller-defined payload without an ordering
#[derive(Debug, Clone)]
struct Session {
    user: String,
    visits: u32,
}

fn describe(value: &Variant) -> String {
    if value.is_empty() {
        "empty".to_string()
    } else if value.is_null() {
        "null".to_string()
    } else {
        format!("{} ({})", value.convert_cast::<String>().unwrap_or_default(), value.get_type())
    }
}

fn main() -> Result<(), CastError> {
    // Values arriving from a dynamically-typed caller
    let arguments = vec![
        Variant::from("42"),
        Variant::from(3.75f64),
        Variant::from(true),
        Variant::from(Null),
        Variant::default(),
        Variant::from(WideString::from("wide text")),
    ];

    for argument in &arguments {
        println!("Argument: {}", describe(argument));
    }

    // Convert to what the native side needs
    let count = arguments[0].convert_cast::<u32>()?;
    let ratio = arguments[1].convert_cast::<f32>()?;
    let truncated = arguments[1].convert_cast::<i64>()?;
    let flag = arguments[2].convert_cast::<bool>()?;
    let optional = arguments[3].convert_cast::<Option<i32>>()?;
    println!("count={} ratio={} truncated={} flag={} optional={:?}", count, ratio, truncated, flag, optional);

    // Failures name both types
    match arguments[0].convert_cast::<u8>() {
        Ok(v) => println!("Fits in u8: {}", v),
        Err(e) => println!("Conversion failed: {}", e),
    }
    match Variant::from("forty-two").convert_cast::<i32>() {
        Ok(v) => println!("Parsed: {}", v),
        Err(e) => println!("Conversion failed: {}", e),
    }

    // Store a payload of our own and read it back
    let mut session = Variant::new_unordered(Session {
        user: "alice".to_string(),
        visits: 1,
    });
    let visits = session.with(|s: &Session| s.visits)?;
    println!("Visits: {}", visits);

    if let Err(e) = session.cast::<String>() {
        println!("Exact cast refused: {}", e);
    }

    let user = session.with(|s: &Session| s.user.clone())?;
    session.assign(user);
    println!("Replaced session with: {}", describe(&session));

    session.reset();
    println!("After reset: {}", describe(&session));

    Ok(())
}
