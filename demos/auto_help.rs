use argkit::{ConfigError, HelpLayout, HelpMode, ParameterType, Parser};

fn main() -> Result<(), ConfigError> {
    let mut parser = Parser::new();
    parser
        .set_help_mode(HelpMode::AutoExit)
        .set_help_layout(HelpLayout::Columns);
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
        .add_parameter("v", "verbose", "Enable verbose output", ParameterType::None, false, "")?
        .add_parameter(
            "n",
            "number",
            "A number parameter",
            ParameterType::Integer,
            false,
            "42",
        )?;

    // Help requests and parse failures print and exit from within.
    if parser.parse().is_err() {
        unreachable!("auto-exit parsing returns only on success");
    }

    println!("Arguments parsed successfully!");

    if let Ok(Some(file)) = parser.value::<String>("file") {
        println!("File: {file}");
    }

    if let Ok(Some(true)) = parser.value::<bool>("verbose") {
        println!("Verbose mode enabled");
    }

    if let Ok(Some(number)) = parser.value::<i64>("number") {
        println!("Number: {number}");
    }

    Ok(())
}
