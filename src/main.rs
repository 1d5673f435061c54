// vim: set ai et ts=4 sts=4 sw=4:
mod util;
mod error;
mod cell;
mod board;
mod clue;
mod line;
mod grid;
mod puzzle;

use std::fs;
use std::io;
use std::process;
use clap::{crate_version, App, Arg, ArgMatches};
use yaml_rust::YamlLoader;
use log::{debug, error};

use self::line::Line;
use self::puzzle::Puzzle;
use self::util::is_a_tty;

// note: column numbers are listed top to bottom
static DEMO_PUZZLE: &str = "
rows:
    - 1
    - 3
    - 5
    - 1
    - 1
cols:
    - 1
    - 2
    - 5
    - 2
    - 1
";

fn parse_args<'a>() -> ArgMatches<'a> {
    App::new("griddler")
        .version(crate_version!())
        .about("Solves nonogram puzzles by line-by-line deduction")
        .arg(Arg::with_name("FILE")
                 .help("YAML puzzle file to solve; solves a built-in demo puzzle if absent")
                 .index(1))
        .arg(Arg::with_name("line")
                 .long("line")
                 .value_name("LINE")
                 .takes_value(true)
                 .conflicts_with("FILE")
                 .help("Solve a single line given in I-format, e.g. 'I? #??I 2'"))
        .arg(Arg::with_name("verbose")
                 .short("v")
                 .multiple(true)
                 .help("Increase verbosity; repeat for more detail"))
        .arg(Arg::with_name("no-color")
                 .long("no-color")
                 .help("Never emit ANSI color codes"))
        .arg(Arg::with_name("groups")
                 .long("groups")
                 .value_name("N")
                 .takes_value(true)
                 .help("Draw a separator line every N rows and columns; 0 disables [default: 5]"))
        .get_matches()
}

fn setup_logger(verbosity: u64) -> Result<(), log::SetLoggerError> {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
}

fn main() {
    let matches = parse_args();
    if let Err(e) = setup_logger(matches.occurrences_of("verbose")) {
        eprintln!("failed to initialize logging: {}", e);
        process::exit(2);
    }
    if let Err(message) = run(&matches) {
        error!("{}", message);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), String> {
    if let Some(line_str) = matches.value_of("line") {
        return solve_single_line(line_str);
    }

    let emit_color = !matches.is_present("no-color") && is_a_tty(io::stdout());
    let subdivision = match matches.value_of("groups") {
        Some(s) => {
            let n = s.parse::<usize>()
                     .map_err(|_| format!("invalid --groups value: {}", s))?;
            if n == 0 { None } else { Some(n) }
        }
        None => Some(5),
    };
    let verbosity = matches.occurrences_of("verbose");

    let source = match matches.value_of("FILE") {
        Some(path) => fs::read_to_string(path)
                         .map_err(|e| format!("cannot read {}: {}", path, e))?,
        None => String::from(DEMO_PUZZLE),
    };
    let docs = YamlLoader::load_from_str(&source)
                          .map_err(|e| format!("invalid puzzle yaml: {}", e))?;
    let doc = docs.get(0).ok_or_else(|| String::from("empty puzzle document"))?;
    let mut puzzle = Puzzle::from_yaml(doc).map_err(|e| e.to_string())?;

    println!("{}", puzzle.render(emit_color, subdivision));

    let mut rounds = 0;
    loop {
        match puzzle.grid.solve_step() {
            Ok(true) => {
                rounds += 1;
                debug!("round {}: {} unknown cell(s) left", rounds, puzzle.grid.unknown_count());
                if verbosity >= 2 {
                    println!("after round {}:", rounds);
                    println!("{}", puzzle.render(emit_color, subdivision));
                }
            }
            Ok(false) => break,
            Err(e) => return Err(e.to_string()),
        }
    }

    println!("{}", puzzle.render(emit_color, subdivision));
    if puzzle.grid.is_solved() {
        println!("solved in {} round(s).", rounds);
    } else {
        println!("stalled after {} round(s) with {} unknown cell(s) left.",
                 rounds, puzzle.grid.unknown_count());
    }
    Ok(())
}

fn solve_single_line(line_str: &str) -> Result<(), String> {
    let mut line = Line::parse(line_str).map_err(|e| e.to_string())?;
    println!("{}", line);

    let mut rounds = 0;
    loop {
        line.solve_step().map_err(|e| e.to_string())?;
        if !line.is_updated() {
            break;
        }
        rounds += 1;
        println!("{}", line);
    }

    if line.is_finished() {
        println!("line solved in {} round(s).", rounds);
    } else {
        let left = line.statuses().iter().filter(|s| s.is_unknown()).count();
        println!("line stalled after {} round(s) with {} unknown cell(s) left.", rounds, left);
    }
    Ok(())
}
