use std::io;
use std::path::{Path, PathBuf};
use colored::*;
use rustyline::{error::ReadlineError, DefaultEditor};
use ec::{exec, stdio, Io, State, actions::VERSION};

const HELPMSG: &str = r#"ec - engineering calculator
RPN calculator for numbers with SI scale factors, units and integer radixes.
Use "help" inside the calculator for the list of operations, "?topic" for details.

Usage: ec [OPTIONS] [SCRIPT|EXPR]...

Each argument that names an existing file is run as a script (comments
start with #), any other argument is evaluated as an expression.
~/.ecrc and ./.ecrc run first if they exist, then the stack is cleared.
Without arguments, or with -i, an interactive session follows.

--interactive|-i
	Enter interactive mode after the scripts and expressions are done.
	Errors there restore the stack instead of ending the session.

--startup|-s FILE
	Run FILE after the rc files, before clearing the stack.

--nocolor|-c
	Plain error messages.

--verbose|-v
	Print every evaluated line of a script with its result.

--version|-V
	Print the version and exit.

--help|-h
	Ignores all other options and prints this help message."#;

///options from the command line
#[derive(Default)]
struct Opts {
	inter: bool,
	verbose: bool,
	startup: Option<String>,
	names: Vec<String>
}

fn main() {
	let mut o = Opts::default();
	let (mut nocolor, mut version, mut help) = (false, false, false);

	let mut args = std::env::args().skip(1);	//skip name of binary
	let mut want_startup = false;	//previous option was -s
	while let Some(arg) = args.next() {
		if want_startup {
			o.startup = Some(arg);
			want_startup = false;
			continue;
		}
		if let Some(flag) = arg.strip_prefix("--") {	//long option
			match flag {
				"interactive" => {o.inter = true;}
				"startup" => {want_startup = true;}
				"nocolor" => {nocolor = true;}
				"verbose" => {o.verbose = true;}
				"version" => {version = true;}
				"help" => {help = true;}
				_ => {
					eprintln!("! Unrecognized option: --{flag}, use -h for help");
					std::process::exit(1);
				}
			}
			continue;
		}
		//short options, several at once possible; anything else starting with - is an expression
		if arg.len() > 1 && arg.starts_with('-') && arg[1..].chars().all(|c| "iscvVh".contains(c)) {
			for flag in arg[1..].chars() {
				match flag {
					'i' => {o.inter = true;}
					's' => {want_startup = true;}
					'c' => {nocolor = true;}
					'v' => {o.verbose = true;}
					'V' => {version = true;}
					_ => {help = true;}
				}
			}
			continue;
		}
		o.names.push(arg);
	}

	if help {	//always exits
		println!("{HELPMSG}");
		std::process::exit(0);
	}
	if version {
		println!("ec {VERSION}");
		std::process::exit(0);
	}
	if want_startup {
		eprintln!("! Option --startup needs a file name");
		std::process::exit(1);
	}
	if nocolor {
		colored::control::set_override(false);
	}
	if o.names.is_empty() {o.inter = true;}	//default to interactive

	let mut st = State::default().rollback(o.inter);
	startup_mode(&mut st, &o);
	let prompt = script_mode(&mut st, &o);
	if o.inter {
		interactive_mode(&mut st, prompt);
	}
	else {
		println!("{prompt}");
	}
}

///print an error, fatal unless the session is interactive
fn report(e: &ec::EcError, inter: bool) {
	eprintln!("{}", format!("! {e}").red());
	if !inter {std::process::exit(1);}
}

///evaluate one line, returns the new prompt value
fn eval_line(st: &mut State, io: &mut Io, line: &str, inter: bool) -> String {
	match exec(st, io, line) {
		Ok(x) => st.format(&x),
		Err(e) => {
			report(&e, inter);
			st.format(&st.x())
		}
	}
}

///run each line of a file with comments removed, `None` if it can't be read
fn run_file(st: &mut State, io: &mut Io, path: &Path, o: &Opts) -> Option<String> {
	let script = match std::fs::read_to_string(path) {
		Ok(s) => s,
		Err(_) => {return None;}
	};
	let mut prompt = st.format(&st.x());
	for (n, line) in script.lines().enumerate() {
		let code = line.split_once('#').unwrap_or((line, "")).0.trim();	//remove comment
		if code.is_empty() {continue;}
		prompt = eval_line(st, io, code, o.inter);
		if o.verbose {
			println!("{} {}: {code} ==> {prompt}", path.display(), n + 1);
		}
		if st.quit_requested() {std::process::exit(0);}
	}
	Some(prompt)
}

///rc files and the startup file, then a clean stack
fn startup_mode(st: &mut State, o: &Opts) {
	let mut io = Io {output: &mut io::stdout(), error: &mut io::sink()};
	let rc: Vec<PathBuf> = dirs::home_dir().map(|h| h.join(".ecrc")).into_iter()
		.chain([PathBuf::from(".ecrc")])
		.collect();
	for path in rc {
		run_file(st, &mut io, &path, o);
	}
	if let Some(file) = &o.startup {
		if run_file(st, &mut io, Path::new(file), o).is_none() {
			eprintln!("{}", format!("! Unable to read file \"{file}\"").red());
			std::process::exit(1);
		}
	}
	st.clear();
}

///scripts and expressions from the command line, returns the prompt value
fn script_mode(st: &mut State, o: &Opts) -> String {
	let mut io = Io {output: &mut io::stdout(), error: &mut io::sink()};
	let mut prompt = st.format(&st.x());
	for name in &o.names {
		let path = Path::new(name);
		prompt = if path.is_file() {
			run_file(st, &mut io, path, o).unwrap_or_else(|| {
				eprintln!("{}", format!("! Unable to read file \"{name}\"").red());
				std::process::exit(1);
			})
		}
		else {
			let p = eval_line(st, &mut io, name, o.inter);
			if st.quit_requested() {std::process::exit(0);}
			p
		};
	}
	prompt
}

///prompt-eval loop until quit, ^D or ^C
fn interactive_mode(st: &mut State, mut prompt: String) {
	let mut rl = match DefaultEditor::new() {
		Ok(rl) => rl,
		Err(e) => {
			eprintln!("{}", format!("! Unable to open line editor: {e}").red());
			std::process::exit(1);
		}
	};
	let mut io = stdio!();
	loop {
		match rl.readline(&format!("{prompt}: ")) {
			Ok(line) => {
				let _ = rl.add_history_entry(line.as_str());
				prompt = eval_line(st, &mut io, &line, true);
				if st.quit_requested() {break;}
			},
			Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
				println!();
				break;
			},
			Err(e) => {
				eprintln!("{}", format!("! {e}").red());
				break;
			}
		}
	}
}
