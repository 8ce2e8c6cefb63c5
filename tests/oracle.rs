//! Cross-checks the parser against `serde_json` on documents both accept.
use jsondescent::{ParseError, Value, parse};

/// Parse `input` with both parsers and compare the trees.
fn assert_agrees(input: &str) {
    let ours = parse(input).unwrap_or_else(|e| panic!("{input}: {e}"));
    let theirs: serde_json::Value =
        serde_json::from_str(input).expect("oracle rejected input");
    assert_eq!(ours, Value::from(theirs), "input {input}");
}

#[test]
fn scalars() {
    for input in ["null", "true", "false", "0", "-0", "42", "-12.5", "3.25"] {
        assert_agrees(input);
    }
}

#[test]
fn strings_with_escapes() {
    for input in [
        r#""""#,
        r#""plain""#,
        r#""quote \" backslash \\ slash \/""#,
        r#""controls \b\f\n\r\t""#,
        r#""unicode \u00e9 \u4e2d \ud83d\ude00""#,
        r#""raw multibyte: héllo 日本 🎉""#,
    ] {
        assert_agrees(input);
    }
}

#[test]
fn nested_documents() {
    for input in [
        "{}",
        "[]",
        "[[], {}, [[]], {\"a\": {}}]",
        r#"{"a":1,"b":[true,false,null]}"#,
        r#"
        {
            "name": "Alice",
            "age": 30,
            "isStudent": false,
            "grades": [95, 88, 92],
            "address": {
                "city": "Wonderland",
                "zipcode": null
            }
        }
        "#,
        "\t[ 1 ,\r\n 2 ]\n",
    ] {
        assert_agrees(input);
    }
}

#[test]
fn rejected_by_both() {
    for input in [
        r#"{"a":1,}"#,
        "[1,]",
        "[1 2]",
        r#"{"a" 1}"#,
        r#"{1: 2}"#,
        "\"abc",
        "1.",
        "tru",
        "nul",
        "[",
        "",
        "123 456",
    ] {
        assert!(parse(input).is_err(), "accepted {input:?}");
        assert!(
            serde_json::from_str::<serde_json::Value>(input).is_err(),
            "oracle accepted {input:?}"
        );
    }
}

#[test]
fn deep_nesting_is_bounded() {
    let input = format!("{}{}", "[".repeat(10_000), "]".repeat(10_000));
    assert!(matches!(
        parse(&input),
        Err(ParseError::MaxNestingExceeded { .. })
    ));
}
