use argkit::prelude::*;
use argkit::{
    ConfigError, Parameter, ParameterType, ParseError, ParseOutcome, Parser, QueryError, Value,
};
use rstest::rstest;

#[macro_use]
extern crate assert_matches;

fn parser() -> Parser {
    let mut parser = Parser::new();
    parser
        .add_parameter("h", "help", "Show this help message", ParameterType::None, false, "")
        .unwrap()
        .add_parameter("f", "file", "Input file path", ParameterType::String, false, "input.txt")
        .unwrap()
        .add_parameter("v", "verbose", "Enable verbose output", ParameterType::None, false, "")
        .unwrap()
        .add_parameter("n", "number", "A number parameter", ParameterType::Integer, false, "42")
        .unwrap();
    parser
}

#[test]
fn builder_compiles() {
    Parser::new();
}

#[test]
fn file_default_verbose_set() {
    let mut parser = parser();
    assert_eq!(parser.parse_tokens(&["prog", "-v"]).unwrap(), ParseOutcome::Success);

    let mut file = String::default();
    assert!(parser.get_parameter_value_to("file", &mut file).unwrap());
    assert_eq!(file, "input.txt");

    let mut verbose = false;
    assert!(parser.get_parameter_value_to("verbose", &mut verbose).unwrap());
    assert!(verbose);
}

#[test]
fn number_override() {
    let mut parser = parser();
    parser.parse_tokens(&["prog", "--number", "7"]).unwrap();
    assert_eq!(parser.value::<i64>("number").unwrap(), Some(7));
}

#[test]
fn missing_value_at_end() {
    let mut parser = Parser::new();
    parser
        .add_parameter("x", "", "", ParameterType::String, false, "")
        .unwrap();
    assert_matches!(
        parser.parse_tokens(&["prog", "-x"]),
        Err(ParseError::MissingValue { .. })
    );
}

#[test]
fn program_basename() {
    let mut parser = parser();
    parser.parse_tokens(&["/usr/bin/tool"]).unwrap();
    assert!(parser
        .get_help_message()
        .unwrap()
        .starts_with("Usage: tool [options]\n"));
}

#[rstest]
#[case("n")]
#[case("-n")]
#[case("number")]
#[case("--number")]
fn four_spellings(#[case] name: &str) {
    let mut parser = parser();
    parser.parse_tokens(&["prog", "-n", "99"]).unwrap();
    let mut number = 0i64;
    assert!(parser.get_parameter_value_to(name, &mut number).unwrap());
    assert_eq!(number, 99);
}

#[test]
fn repeated_flags_keep_last() {
    let mut parser = parser();
    parser
        .parse_tokens(&["prog", "-f", "a", "--file", "b", "-n", "1", "--number", "2", "-f", "c"])
        .unwrap();
    assert_eq!(parser.value::<String>("f").unwrap(), Some("c".to_string()));
    assert_eq!(parser.value::<i64>("n").unwrap(), Some(2));
}

#[rstest]
#[case(vec!["prog", "-v", "--unknown"])]
#[case(vec!["prog", "-v", "-n"])]
#[case(vec!["prog", "-v", "-n", "-f"])]
#[case(vec!["prog", "-v", "-n", "x"])]
#[case(vec!["prog", "-v", "stray"])]
fn failure_changes_nothing(#[case] args: Vec<&str>) {
    let mut parser = parser();
    parser.parse_tokens(&["prog", "-f", "before.txt"]).unwrap();

    parser.parse_tokens(&args).unwrap_err();

    assert_eq!(parser.value::<String>("file").unwrap(), Some("before.txt".to_string()));
    assert_eq!(parser.value::<bool>("verbose").unwrap(), Some(false));
    assert_eq!(parser.value::<i64>("number").unwrap(), Some(42));
}

#[test]
fn help_requested() {
    let mut parser = parser();
    assert_eq!(
        parser.parse_tokens(&["prog", "--help"]).unwrap(),
        ParseOutcome::HelpRequested
    );
    assert_eq!(
        parser.get_help_message().unwrap(),
        "Usage: prog [options]\n\
         -h, --help\tShow this help message\n\
         -f, --file\tInput file path\n\
         -v, --verbose\tEnable verbose output\n\
         -n, --number\tA number parameter"
    );
}

#[test]
fn fluent_parameters() {
    let mut parser = Parser::new();
    parser
        .add(
            Parameter::new("m", "mask", "Permission mask", ParameterType::Integer)
                .base(8)
                .unsigned()
                .default_value("644"),
        )
        .unwrap()
        .add(Parameter::new("o", "output", "Output file", ParameterType::String).required(true))
        .unwrap()
        .add_bool("d", "dry-run", "Only print", false, false)
        .unwrap();

    assert_eq!(
        parser.parse_tokens(&["prog", "-m", "755"]).unwrap_err(),
        ParseError::MissingRequired {
            flag: "--output".to_string()
        }
    );
    assert_eq!(parser.value::<i64>("mask").unwrap(), Some(0o644));

    parser
        .parse_tokens(&["prog", "-m", "755", "-o", "out", "--dry-run", "YES"])
        .unwrap();
    assert_eq!(parser.value::<i64>("mask").unwrap(), Some(0o755));
    assert_eq!(parser.value::<String>("output").unwrap(), Some("out".to_string()));
    assert_eq!(parser.get("dry-run").unwrap().value(), &Value::Bool(true));
}

#[test]
fn config_errors() {
    let mut parser = parser();
    assert_eq!(
        parser
            .add_parameter("x", "file", "", ParameterType::String, false, "")
            .unwrap_err(),
        ConfigError::DuplicateName {
            name: "--file".to_string()
        }
    );
    assert_matches!(
        parser.add(Parameter::new("b", "", "", ParameterType::Integer).base(37)),
        Err(ConfigError::InvalidBase { base: 37 })
    );
    assert_matches!(
        parser.add_parameter_typed("t", "", "", "decimal", false, ""),
        Err(ConfigError::UnsupportedType { .. })
    );
    assert_eq!(parser.parameters().count(), 4);
}

#[test]
fn query_errors() {
    let parser = parser();
    let mut number = 0.0f64;
    assert_matches!(
        parser.get_parameter_value_to("number", &mut number),
        Err(QueryError::TypeMismatch { .. })
    );
    assert_eq!(number, 0.0);
    assert!(!parser.get_parameter_value_to("missing", &mut number).unwrap());
}

#[test]
fn custom_accessor() {
    #[derive(Debug, PartialEq)]
    struct Port(u16);

    impl FromValue for Port {
        fn expected() -> ParameterType {
            ParameterType::Integer
        }

        fn from_value(value: &Value) -> Option<Self> {
            match value {
                Value::Integer(i) => u16::try_from(*i).ok().map(Port),
                _ => None,
            }
        }
    }

    let mut parser = Parser::new();
    parser
        .add_parameter("p", "port", "", ParameterType::Integer, false, "8080")
        .unwrap();
    assert_eq!(parser.value::<Port>("port").unwrap(), Some(Port(8080)));
}

#[test]
fn manual_outcome_handling() {
    let mut parser = Parser::new();
    parser
        .add_parameter("h", "help", "Prints this help message", ParameterType::None, false, "")
        .unwrap();

    assert_matches!(parser.parse_tokens(&["example", "stray"]), Err(ParseError::MalformedInput { .. }));
    assert_eq!(parser.parse_tokens(&["example"]).unwrap(), ParseOutcome::Success);
    assert_eq!(
        parser.parse_tokens(&["example", "-h"]).unwrap(),
        ParseOutcome::HelpRequested
    );
    assert_eq!(
        parser.get_help_message().unwrap(),
        "Usage: example [options]\n-h, --help\tPrints this help message"
    );
}

#[test]
fn required_satisfied_by_default() {
    let mut parser = parser();
    parser
        .add_parameter("o", "output", "Output file", ParameterType::String, true, "out.txt")
        .unwrap();
    assert_eq!(parser.parse_tokens(&["prog"]).unwrap(), ParseOutcome::Success);
    assert_eq!(parser.value::<String>("output").unwrap(), Some("out.txt".to_string()));
}
