// wstty: Time-Travel Whitespace Interpreter with Stack and Heap Visualization

use std::fs;
use std::io::{self, BufRead, BufReader, Read};
use std::process;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use wstty::interpreter::engine::Interpreter;
use wstty::interpreter::errors::RuntimeError;
use wstty::parser::instruction::Program;
use wstty::parser::parse_program;
use wstty::ui::App;

const DEFAULT_HISTORY_LIMIT: usize = 256 * 1024 * 1024;

/// Parsed command-line options
struct Options {
    /// Program source path; `None` reads stdin
    file: Option<String>,
    list: bool,
    tui: bool,
    input: Option<String>,
    history_limit: usize,
    verbose: bool,
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] [FILE]", program_name);
    eprintln!();
    eprintln!("Runs a Whitespace program. FILE or '-' reads the program from stdin.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --list                 Print the lexed instruction listing and exit");
    eprintln!("  --tui                  Record execution and open the time-travel viewer");
    eprintln!("  --input FILE           Read program input from FILE instead of stdin");
    eprintln!(
        "  --history-limit BYTES  Snapshot memory limit for --tui (default {})",
        DEFAULT_HISTORY_LIMIT
    );
    eprintln!("  --verbose              Print progress diagnostics");
    eprintln!("  -h, --help             Show this help");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} hello.ws", program_name);
    eprintln!("  {} --tui demos/count.ws", program_name);
}

/// Exit with status 2 after a usage problem
fn usage_error(program_name: &str, message: &str) -> ! {
    eprintln!("Error: {}", message);
    eprintln!();
    print_usage(program_name);
    process::exit(2);
}

fn parse_args(args: &[String]) -> Options {
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("wstty");
    let mut options = Options {
        file: None,
        list: false,
        tui: false,
        input: None,
        history_limit: DEFAULT_HISTORY_LIMIT,
        verbose: false,
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage(program_name);
                process::exit(0);
            }
            "--list" => options.list = true,
            "--tui" => options.tui = true,
            "--verbose" => options.verbose = true,
            "--input" => match iter.next() {
                Some(path) => options.input = Some(path.clone()),
                None => usage_error(program_name, "--input requires a file"),
            },
            "--history-limit" => match iter.next().map(|v| v.parse::<usize>()) {
                Some(Ok(limit)) => options.history_limit = limit,
                _ => usage_error(program_name, "--history-limit requires a byte count"),
            },
            "-" => options.file = None,
            flag if flag.starts_with('-') => {
                usage_error(program_name, &format!("Unknown option '{}'", flag))
            }
            path => {
                if options.file.is_some() {
                    usage_error(program_name, "Only one program file may be given");
                }
                options.file = Some(path.to_string());
            }
        }
    }

    if options.tui && options.file.is_none() {
        usage_error(program_name, "--tui needs a program FILE (stdin is the terminal)");
    }
    options
}

fn read_source(file: Option<&str>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

/// Program input: `--input FILE`, otherwise stdin unless stdin held the
/// program or belongs to the viewer
fn open_input(options: &Options) -> io::Result<Box<dyn BufRead>> {
    match &options.input {
        Some(path) => Ok(Box::new(BufReader::new(fs::File::open(path)?))),
        None if options.tui || options.file.is_none() => Ok(Box::new(io::empty())),
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn print_listing(program: &Program) {
    for (index, instruction) in program.instructions.iter().enumerate() {
        println!(
            "{:5}  {:>9}  {}",
            index,
            instruction.location.to_string(),
            instruction
        );
    }
}

/// Record the run, then browse it; returns the runtime error that ended the
/// recording, if any
fn run_tui(
    interpreter: Interpreter,
    options: &Options,
) -> Result<Option<RuntimeError>, Box<dyn std::error::Error>> {
    let mut interpreter = interpreter.with_history(options.history_limit);

    // Run execution to build history
    if options.verbose {
        eprintln!("Executing program...");
    }
    let error = match interpreter.run() {
        Ok(_) => {
            if options.verbose {
                eprintln!("Execution completed successfully.");
                eprintln!("Total snapshots: {}", interpreter.total_snapshots());
            }
            None
        }
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            eprintln!("Entering TUI with partial execution history...");
            Some(e)
        }
    };

    // Rewind to the beginning for TUI
    if let Err(e) = interpreter.rewind_to_start() {
        eprintln!("Warning: Failed to rewind to start: {}", e);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(interpreter, error.as_ref());
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    Ok(error)
}

/// Runtime errors fail the process even though the viewer ran to completion
fn tui_exit_code<E>(outcome: &Result<Option<RuntimeError>, E>) -> i32 {
    match outcome {
        Ok(None) => 0,
        Ok(Some(_)) | Err(_) => 1,
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);
    let source_name = options.file.as_deref().unwrap_or("<stdin>");

    let source = match read_source(options.file.as_deref()) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: Cannot read '{}': {}", source_name, e);
            process::exit(1);
        }
    };

    if options.verbose {
        eprintln!("Parsing {}...", source_name);
    }
    let program = match parse_program(&source) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    if options.verbose {
        eprintln!(
            "Parsed successfully. Found {} instructions.",
            program.len()
        );
    }

    if options.list {
        print_listing(&program);
        return;
    }

    let input = match open_input(&options) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: Cannot open program input: {}", e);
            process::exit(1);
        }
    };

    let interpreter = Interpreter::new(program);
    if options.tui {
        let interpreter = interpreter.with_io(input, Box::new(io::sink()));
        let outcome = run_tui(interpreter, &options);
        match &outcome {
            Ok(Some(e)) => eprintln!("Runtime error: {}", e),
            Err(e) => eprintln!("Error: {}", e),
            Ok(None) => {}
        }
        process::exit(tui_exit_code(&outcome));
    }

    let mut interpreter = interpreter.with_io(input, Box::new(io::stdout()));
    if let Err(e) = interpreter.run() {
        eprintln!();
        eprintln!("Runtime error: {}", e);
        process::exit(1);
    }
}
