extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;

pub mod assembler;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use assembler::{Options, Program};

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    let ifile = args.value_of("INPUT").unwrap_or_default();
    let ipath = Path::new(ifile);
    let opath = match args.value_of("output") {
        Some(filename) => PathBuf::from(filename),
        None => ipath.with_extension("hack"),
    };
    let options = Options {
        late_variables: args.is_present("late-variables"),
    };

    debug!("Arguments:\n\tVerbosity: {}\n\tLate variables: {}\n\tOutfile: {}\n\tInfile: {}",
        verbosity_filter(args.occurrences_of("verbose")),
        options.late_variables,
        opath.display(),
        ipath.display()
    );

    let ifile = match File::open(&ipath) {
        Err(err) => {
            error!("fatal: unable to open input file `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(file) => file,
    };

    let start = Instant::now();

    let program = match assembler::assemble(BufReader::new(ifile), options) {
        Ok(program) => program,
        Err(err) => fail(&ipath, err),
    };

    // Encode everything up front so a bad mnemonic never leaves a partial file behind.
    let words = match program.assemble() {
        Ok(words) => words,
        Err(err) => fail(&ipath, err),
    };

    if args.is_present("print-debug") {
        print_listing(&program, &words);
    }

    let ofile = match File::create(&opath) {
        Err(err) => {
            error!("fatal: unable to open output file `{}`: {}", opath.display(), err);
            std::process::exit(1);
        },
        Ok(file) => file,
    };

    let mut writer = BufWriter::new(ofile);
    for word in words.iter() {
        if let Err(err) = writeln!(writer, "{}", word) {
            error!("fatal: unable to write to output file `{}`: {}", opath.display(), err);
            std::process::exit(1);
        }
    }
    if let Err(err) = writer.flush() {
        error!("fatal: unable to write to output file `{}`: {}", opath.display(), err);
        std::process::exit(1);
    }

    info!("Read {} source lines from `{}`", program.source_lines(), ipath.display());
    info!("Wrote {} words to `{}` in {} ms",
        words.len(),
        opath.display(),
        start.elapsed().as_millis()
    );
}

fn fail(ipath: &Path, err: assembler::Error) -> ! {
    if err.is_internal() {
        error!("internal error: {}: {}", ipath.display(), err);
    } else {
        error!("fatal: {}: {}", ipath.display(), err);
    }

    // Echo the offending line when the source can still be read back.
    let line = err.line();
    let text = std::fs::read_to_string(ipath)
        .ok()
        .and_then(|source| line.checked_sub(1).and_then(|idx| source.lines().nth(idx).map(str::to_owned)));
    if let Some(text) = text {
        error!("  --> {}:{}", ipath.display(), line);
        error!("{:>5} | {}", line, text.trim_end());
    }
    std::process::exit(1);
}

fn print_listing(program: &Program, words: &[assembler::ast::Word]) {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for (idx, (entry, word)) in program.entries().iter().zip(words.iter()).enumerate() {
        grid.add(Cell::from(format!("{:5}:", idx)));
        grid.add(Cell::from(entry.source.clone()));
        grid.add(Cell::from(format!("{}", entry)));
        grid.add(Cell::from("=>".to_string()));
        grid.add(Cell::from(format!("{}", word)));
    }

    println!("{}", grid.fit_into_columns(5));

    let symbols = program.symbols().user_symbols();
    if !symbols.is_empty() {
        let mut grid = Grid::new(GridOptions {
            filling:     Filling::Spaces(1),
            direction:   Direction::LeftToRight,
        });
        for (name, address) in symbols {
            grid.add(Cell::from(name.to_string()));
            grid.add(Cell::from(format!("{}", address)));
        }
        println!("{}", grid.fit_into_columns(2));
    }
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("write output to an outfile (defaults to INPUT with a .hack extension)"))
        .arg(Arg::with_name("late-variables")
            .short("l")
            .long("late-variables")
            .takes_value(false)
            .help("treat uppercase names with no label definition as variables"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .takes_value(false)
            .help("prints the debug information alongside the assembly to STDOUT"))
        .get_matches()
}

fn verbosity_filter(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(verbosity_filter(verbosity))
        .chain(std::io::stdout())
        .apply().ok();
}
