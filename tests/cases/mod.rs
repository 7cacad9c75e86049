// Helper macro to distinguish between patterns and expressions
#[macro_export]
macro_rules! assert_case {
    // Guard patterns - patterns with if conditions
    ($result:expr, { $pattern:pat if $guard:expr }) => {
        match $result {
            $pattern if $guard => {},
            other => panic!("Expected {} if {} but got {:?}", stringify!($pattern), stringify!($guard), other),
        }
    };

    // Pattern matching cases - detect common pattern forms
    ($result:expr, { Ok($($pattern:tt)*) }) => {
        match $result {
            Ok($($pattern)*) => {},
            other => panic!("Expected Ok({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    ($result:expr, { Err($($pattern:tt)*) }) => {
        match $result {
            Err($($pattern)*) => {},
            other => panic!("Expected Err({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    // Default case - treat as expression for equality comparison
    ($result:expr, { $expected:expr }) => {
        match $result {
            Ok(actual) => {
                pretty_assertions::assert_eq!($expected, actual, "Expected {:#?} but got {:#?}\n\n< expected / got >", $expected, actual);
            },
            other => panic!("Expected Ok(...) but got {:?}", other),
        }
    };
}

// Helper macro to generate test functions based on field names
#[macro_export]
macro_rules! handle_case {
    // With attributes (including empty attribute list)
    ([$($attrs:meta)*] ast, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_ast() {
            let result = formula::validate(input(), functions()).map(|f| f.ast().clone());
            assert_case!(result, $expected);
        }
    };

    ([$($attrs:meta)*] display, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_display() {
            let rendered = formula::validate(input(), functions()).map(|f| f.to_string());
            let result = rendered.as_ref().map(|s| s.as_str());
            assert_case!(result, $expected);

            // The rendering must parse back to the same tree.
            if let Ok(text) = result {
                let original = formula::validate(input(), functions()).unwrap();
                let reparsed = formula::validate(text, functions()).unwrap();
                pretty_assertions::assert_eq!(original.ast(), reparsed.ast());
            }
        }
    };

    ([$($attrs:meta)*] free_variables, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_free_variables() {
            let result = formula::validate(input(), functions())
                .map(|f| f.free_variables().iter().cloned().collect::<Vec<String>>());
            assert_case!(result, $expected);
        }
    };

    // Scalar evaluation: `{ name = value, ... => expected }`
    ([$($attrs:meta)*] value, { $($name:ident = $val:expr),* => $($expected:tt)+ }) => {
        $(#[$attrs])*
        #[test]
        fn validate_value() {
            let variables: std::collections::HashMap<&str, f64> =
                std::collections::HashMap::from([$((stringify!($name), $val)),*]);
            let result: Result<f64, formula::Error> = formula::evaluate(input(), &variables);
            assert_case!(result, { $($expected)+ });
        }
    };

    ([$($attrs:meta)*] error, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_error() {
            let err = match formula::validate(input(), functions()) {
                Err(e) => e,
                Ok(_) => panic!("Expected validation error, but validation succeeded"),
            };
            let err_string = err.to_string();

            let result: Result<&str, ()> = Ok(err_string.as_str());
            assert_case!(result, $expected);
        }
    };

    ([$($attrs:meta)*] rendered, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_rendered() {
            let err = match formula::validate(input(), functions()) {
                Err(e) => e,
                Ok(_) => panic!("Expected validation error, but validation succeeded"),
            };
            let mut buf = Vec::new();
            let config = formula::RenderConfig { color: false, ..Default::default() };
            formula::render_error_to(&err, input(), &mut buf, &config).unwrap();
            let err_string = String::from_utf8_lossy(&buf).into_owned();

            // Only the report header is stable across ariadne layouts.
            let header = err_string.lines().next().unwrap_or_default().trim_end();
            let result: Result<&str, ()> = Ok(header);
            assert_case!(result, $expected);
        }
    };

    // Generic case for unknown field names
    ([$($attrs:meta)*] $field_name:ident, $expected:tt) => {
        compile_error!(concat!("Unknown test case field: ", stringify!($field_name)));
    };
}

// Helper macro to recursively parse assertion fields (now correctly capturing braces)
#[macro_export]
macro_rules! parse_assertions {
    // Base case: no more fields to parse
    (@parse [$($test_functions:tt)*]) => {
        $($test_functions)*
    };

    // Parse assertion field with potential attributes (handles both cases)
    (@parse [$($test_functions:tt)*] $(#[$attr:meta])* $field_name:ident: $field_value:tt, $($rest:tt)*) => {
        parse_assertions! {@parse [
            $($test_functions)*
            handle_case! {[$($attr)*] $field_name, $field_value}
        ] $($rest)*}
    };
}

// Main macro - name first, input second, then any order for assertions
#[macro_export]
macro_rules! test_case {
    (
        name: $name:ident,
        input: $input:expr,
        $($assertion_fields:tt)*
    ) => {
        mod $name {
            #![allow(unused_imports, dead_code)]

            use super::*;
            use once_cell::sync::OnceCell;

            // Make `$input` available to all test functions
            fn input() -> &'static str {
                static INPUT_CELL: OnceCell<&'static str> = OnceCell::new();
                INPUT_CELL.get_or_init(|| $input)
            }

            // Function whitelist used by every validation field
            fn functions() -> [&'static str; 2] {
                ["norm", "max"]
            }

            // Generate all test functions
            parse_assertions! {@parse [] $($assertion_fields)*}
        }
    };
}
