use lox_expr::{
    parse_expression,
    printer,
    Reporter,
    WriteReporter,
};
use std::{
    env,
    io::{self, Write},
    process,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let result = match args.len() {
        1 => run_prompt(),
        2 => run_file(args[1].as_str()),
        _ => {
            println!("Usage: lox-expr [script]");
            process::exit(64);
        },
    };

    match result {
        Ok(0) => {},
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(74);
        },
    }
}

fn run_file(path: &str) -> io::Result<i32> {
    let contents = std::fs::read_to_string(path)?;
    let mut stdout = io::stdout();
    let mut reporter = WriteReporter::new(io::stderr());

    run(contents.as_str(), &mut stdout, &mut reporter)?;

    Ok(if reporter.had_error() { 65 } else { 0 })
}

fn run_prompt() -> io::Result<i32> {
    let mut buffer = String::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut reporter = WriteReporter::new(io::stderr());

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        buffer.clear();

        let num_bytes = stdin.read_line(&mut buffer)?;
        if num_bytes == 0 { break };
        if buffer.trim().is_empty() { continue };

        run(buffer.as_str(), &mut stdout, &mut reporter)?;
        reporter.reset();
    }

    Ok(0)
}

fn run<W: Write, R: Reporter>(source: &str, out: &mut W, reporter: R) -> io::Result<()> {
    if let Some(e) = parse_expression(source, reporter) {
        writeln!(out, "{}", printer::print(&e))?;
    }
    Ok(())
}
