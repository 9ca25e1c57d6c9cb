use colored::Colorize;
use dicebag_lib::roll::result;
use dicebag_lib::roller::Roller;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use rustyline::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        println!("Usage: dicebag [roll-arg...]");
        println!("No roll args given, starting interactive mode");
        return interactive();
    }
    roll(&Roller::new(args));
    Ok(())
}

fn roll(roller: &Roller) {
    let (results, errors) = roller.perform();
    for error in &errors {
        eprintln!("{}", error.to_string().bold().red());
    }
    for result in results.iter().filter(|result| !result.is_empty()) {
        println!("{result}");
    }
    println!("{} {}", "Total sum:".bold(), result::results_sum(&results));
}

fn interactive() -> Result<()> {
    let mut rline = DefaultEditor::new()?;
    loop {
        match rline.readline("dicebag> ") {
            Ok(line) => {
                rline.add_history_entry(line.as_str())?;
                let tokens: Vec<&str> = line.split_whitespace().collect();
                if !tokens.is_empty() {
                    roll(&Roller::new(tokens));
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(error) => {
                eprintln!("{}", format!("error: `{error:?}`").bold().red());
                break;
            }
        }
    }
    Ok(())
}
