use argkit::{ConfigError, ParameterType, ParseOutcome, Parser};

fn main() -> Result<(), ConfigError> {
    let mut parser = Parser::new();
    parser.set_auto_help(false);
    parser
        .add_parameter("h", "help", "Show this help message", ParameterType::None, false, "")?
        .add_parameter(
            "f",
            "file",
            "Input file path",
            ParameterType::String,
            false,
            "input.txt",
        )?
        .add_parameter("v", "verbose", "Enable verbose output", ParameterType::None, false, "")?;

    match parser.parse() {
        Ok(ParseOutcome::HelpRequested) => {
            println!("{}", parser.get_help_message()?);
            return Ok(());
        }
        Ok(ParseOutcome::Success) => {}
        Err(error) => {
            eprintln!("{error}");
            println!("{}", parser.get_help_message()?);
            std::process::exit(1);
        }
    }

    println!("Arguments parsed successfully!");

    let mut file = String::default();
    if parser.get_parameter_value_to("file", &mut file).unwrap_or(false) {
        println!("File: {file}");
    }

    if let Ok(Some(true)) = parser.value::<bool>("verbose") {
        println!("Verbose mode enabled");
    }

    Ok(())
}
