use argkit::{ConfigError, ParameterType, ParseOutcome, Parser};

fn main() -> Result<(), ConfigError> {
    let mut parser = Parser::new();
    parser.add_parameter(
        "h",
        "help",
        "Prints this help message",
        ParameterType::None,
        false,
        "",
    )?;

    match parser.parse() {
        Ok(ParseOutcome::HelpRequested) => {
            println!("{}", parser.get_help_message()?);
        }
        Ok(ParseOutcome::Success) => {}
        Err(error) => {
            eprintln!("{error}");
            println!("{}", parser.get_help_message()?);
            std::process::exit(1);
        }
    }

    Ok(())
}
