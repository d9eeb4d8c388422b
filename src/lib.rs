use std::io::Write;
use std::collections::BTreeMap;
use rand::{RngCore, SeedableRng, rngs::{OsRng, StdRng}};
use regex::{Regex, Captures};

#[macro_use]
extern crate lazy_static;

pub mod num;
pub mod engfmt;
pub mod display;
pub mod heap;
pub mod registry;
pub mod actions;
pub mod convert;

use num::{Num, Value};
use display::{Display, Mode};
use heap::{Stack, Heap};
use registry::{Registry, Kind};
use convert::{UnitConverter, ConversionTable};

///Everything that can go wrong, `Display` is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum EcError {
	#[error("{0}: unrecognized.")]
	UnrecognizedToken(String),
	#[error("{0}: reserved, cannot be used as variable name.")]
	ReservedNameCollision(String),
	#[error("{0}: variable does not exist.")]
	VariableNotFound(String),
	//numeric domain errors
	#[error("division by zero.")]
	DivisionByZero,
	#[error("math domain error.")]
	Domain,
	#[error("math range error.")]
	Range,
	#[error("Function does not support a complex argument.")]
	NotReal,
	///only ever reported as a warning
	#[error("{0}: currency and units both given, units ignored.")]
	MalformedNumberLiteral(String),
	#[error("cannot convert from '{0}' to '{1}'.")]
	UnknownConversion(String, String),
	///inconsistent action catalog
	#[error("{0}")]
	Catalog(String),
	#[error(transparent)]
	Io(#[from] std::io::Error)
}

///Bundle of output streams, for brevity.
pub struct Io<'a> {
	pub output: &'a mut dyn Write,
	pub error: &'a mut dyn Write
}
#[macro_export]
///Default IO bundle using stdout, stderr
macro_rules! stdio {
	() => {
		::ec::Io {
			output: &mut ::std::io::stdout(),
			error: &mut ::std::io::stderr()
		}
	}
}

#[inline(always)]
///report a non-fatal problem
pub(crate) fn warn(io: &mut Io, msg: impl std::fmt::Display) -> Result<(), EcError> {
	writeln!(io.error, "warning: {msg}")?;
	Ok(())
}

///capture groups of a match without the whole match, unmatched ones empty
pub(crate) fn groups(caps: &Captures) -> Vec<String> {
	caps.iter().skip(1).map(|m| m.map_or(String::new(), |m| m.as_str().to_string())).collect()
}

lazy_static! {
	///units strings and print strings, kept whole
	static ref STRINGS: Regex = Regex::new(r#"(?:"[^"]*"|`[^`]*`)+"#).unwrap();
	///operator directly after a number or name, followed by whitespace or end
	static ref ABUTTED: Regex = Regex::new(r"([a-zA-Z0-9])(\*\*|\|\||//|[-+*/%!])(\s|\z)").unwrap();
	///references inside print strings
	static ref PRINT_ARGS: Regex = Regex::new(r"\$\{(\w+|\$)\}|\$(\w+|\$)").unwrap();
}

///plain text between strings: pad parens, detach operators, split on whitespace
fn split_plain(s: &str, tokens: &mut Vec<String>) {
	let s = s.replace('(', "( ").replace(')', " )");
	let s = ABUTTED.replace_all(&s, "${1} ${2}${3}");
	tokens.extend(s.split_whitespace().map(String::from));
}

///Splits a line into tokens. Quoted strings stay whole, operators abutted to
///their operand are split off (`2 3*`), and parens get detached from what they
///enclose, so `(1.6*)toKm` becomes `(`, `1.6`, `*`, `)toKm`.
pub fn tokenize(line: &str) -> Vec<String> {
	let mut tokens = Vec::new();
	let mut last = 0;
	for m in STRINGS.find_iter(line) {
		split_plain(&line[last..m.start()], &mut tokens);
		tokens.push(m.as_str().to_string());
		last = m.end();
	}
	split_plain(&line[last..], &mut tokens);
	tokens
}

///angle mode of the trig functions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trig {
	Degs,
	Rads
}

///Bundled state of one calculator session
pub struct State {
	///register stack
	stk: Stack,
	///named variables
	heap: Heap,
	///resolvable actions
	reg: Registry,
	///format state
	disp: Display,
	trig: Trig,
	///random number generator
	rng: StdRng,
	///unit conversions for `>units`
	conv: Box<dyn UnitConverter>,
	///restore the stack if a line fails
	rollback: bool,
	///quit was requested
	quit: bool
}
impl Default for State {
	///Initial values one might want to change:
	///- RNG: seeded with 256 bits of OS randomness
	///- Format: eng with 4 digits, space between number and units
	///- Angles in degrees, no rollback, variables may override built-ins
	///- Predefined variable Rref = 50 Ohms, used by the dBm conversions
	fn default() -> Self {
		let reg = Registry::new(actions::catalog()).expect("built-in catalog is consistent");
		let heap = Heap::new(default_vars(), reg.names().map(String::from), true);
		Self {
			stk: Stack::default(),
			heap,
			reg,
			disp: Display::default(),
			trig: Trig::Degs,
			rng: {
				//seed RNG with 256 bits of OS randomness
				let mut seed = [0_u8; 32];
				OsRng.fill_bytes(&mut seed);
				StdRng::from_seed(seed)
			},
			conv: Box::new(ConversionTable),
			rollback: false,
			quit: false
		}
	}
}

#[inline(always)]
fn default_vars() -> BTreeMap<String, Value> {
	BTreeMap::from([("Rref".to_string(), Value::new(50.0, "Ohms"))])
}

impl State {
	///replace RNG with custom one
	pub fn custom_rng(mut self, r: StdRng) -> Self {
		self.rng = r;
		self
	}
	///custom default display mode and digits, also what `clear` returns to
	pub fn custom_format(mut self, mode: Mode, digits: usize) -> Self {
		self.disp = Display::new(mode, digits, self.disp.spacer());
		self
	}
	///text between number and units
	pub fn custom_spacer(mut self, spacer: &str) -> Self {
		self.disp.set_spacer(spacer);
		self
	}
	///custom predefined variables, replacing Rref
	pub fn custom_vars(mut self, vars: BTreeMap<String, Value>) -> Self {
		self.heap.set_initial(vars);
		self
	}
	///replace the unit conversion table
	pub fn custom_converter(mut self, conv: Box<dyn UnitConverter>) -> Self {
		self.conv = conv;
		self
	}
	///restore the stack when a line fails
	pub fn rollback(mut self, on: bool) -> Self {
		self.rollback = on;
		self
	}
	///let variables take over built-in names
	pub fn allow_override(mut self, allow: bool) -> Self {
		self.heap.set_allow_override(allow);
		self
	}

	pub fn stack(&self) -> &Stack {&self.stk}
	pub fn heap(&self) -> &Heap {&self.heap}
	pub fn display(&self) -> &Display {&self.disp}
	pub fn registry(&self) -> &Registry {&self.reg}
	pub fn trig(&self) -> Trig {self.trig}
	///current x register
	pub fn x(&self) -> Value {self.stk.peek(0)}
	pub fn quit_requested(&self) -> bool {self.quit}

	///render a value in the current format
	pub fn format(&self, v: &Value) -> String {
		self.disp.format(v)
	}

	///empty stack, initial variables, default format, degrees
	pub fn clear(&mut self) {
		self.stk.clear();
		self.heap.clear();
		self.disp.reset();
		self.trig = Trig::Degs;
	}

	#[inline(always)]
	pub fn to_radians(&self, x: f64) -> f64 {
		match self.trig {
			Trig::Degs => x.to_radians(),
			Trig::Rads => x
		}
	}
	#[inline(always)]
	pub fn from_radians(&self, x: f64) -> f64 {
		match self.trig {
			Trig::Degs => x.to_degrees(),
			Trig::Rads => x
		}
	}
	#[inline(always)]
	///units of angles in the current mode
	pub fn angle_units(&self) -> &'static str {
		match self.trig {
			Trig::Degs => "degs",
			Trig::Rads => "rads"
		}
	}

	#[inline(always)]
	fn push(&mut self, num: Num, units: String) {
		self.stk.push(Value {num, units});
	}

	///resolve and run one token
	fn step(&mut self, io: &mut Io, token: &str) -> Result<(), EcError> {
		let (act, g) = self.reg.resolve(token)?;
		match act.kind {
			Kind::Command(f) => f(self, io)?,
			Kind::Constant(f) => {
				let n = f(self);
				let u = act.units.resolve(self, &[]);
				self.push(n, u);
			},
			Kind::UnaryOp(f) => {
				let x = self.stk.pop();
				let n = f(self, x.num)?;
				let u = act.units.resolve(self, &[&x.units]);
				self.push(n, u);
			},
			Kind::BinaryOp(f) => {
				let x = self.stk.pop();
				let y = self.stk.pop();
				let n = f(self, y.num, x.num)?;
				let u = act.units.resolve(self, &[&x.units, &y.units]);
				self.push(n, u);
			},
			Kind::BinaryIoOp(f, yunits) => {
				let x = self.stk.pop();
				let y = self.stk.pop();
				let (nx, ny) = f(self, y.num, x.num)?;
				let ops = [x.units.as_str(), y.units.as_str()];
				let (ux, uy) = (act.units.resolve(self, &ops), yunits.resolve(self, &ops));
				self.push(ny, uy);
				self.push(nx, ux);
			},
			Kind::Dup(f) => {
				let x = self.stk.peek(0);
				match f {
					Some(f) => {
						let n = f(self, x.num)?;
						let u = act.units.resolve(self, &[&x.units]);
						self.push(n, u);
					},
					None => self.stk.push(x)
				}
			},
			Kind::Number(_, conv) => {
				let p = conv(&g).ok_or_else(|| EcError::UnrecognizedToken(token.into()))?;
				if let Some(w) = p.warning {warn(io, w)?;}
				self.push(p.num, p.units);
			},
			Kind::SetFormat(_, mode) => {
				self.disp.set_mode(mode, g.first().and_then(|d| d.parse().ok()));
			},
			Kind::Store(_) => {
				let name = &g[0];
				if self.heap.store(name, self.stk.peek(0))? {
					self.reg.remove(name);
					warn(io, format!("{name}: variable has overridden built-in."))?;
				}
			},
			Kind::Recall(_) => {
				let v = self.heap.recall(&g[0])?;
				self.stk.push(v);
			},
			Kind::SetUnits(_) => {
				let x = self.stk.pop();
				self.push(x.num, g[0].clone());
			},
			Kind::Convert(_) => {
				let x = self.stk.peek(0);
				let to = &g[0];
				let n = self.conv.convert(x.num.real()?, &x.units, to)
					.ok_or_else(|| EcError::UnknownConversion(x.units.clone(), to.clone()))?;
				self.stk.pop();
				self.push(Num::Real(n), to.clone());
			},
			Kind::Print(_) => {
				let text = self.interpolate(io, &g[0])?;
				writeln!(io.output, "{text}")?;
			},
			Kind::Help(_) => actions::topic_help(self, io, &g[0])?,
			Kind::Category => {return Err(EcError::UnrecognizedToken(token.into()));}
		}
		Ok(())
	}

	///Expands a print string: `$N`/`${N}` is register N, `$name`/`${name}` a
	///variable, `$$` a dollar sign. Empty text prints x.
	fn interpolate(&self, io: &mut Io, text: &str) -> Result<String, EcError> {
		if text.is_empty() {return Ok(self.format(&self.x()));}
		let text = text.replace(r"\n", "\n").replace(r"\t", "\t");
		let mut out = String::new();
		let mut last = 0;
		for c in PRINT_ARGS.captures_iter(&text) {
			let (Some(all), Some(arg)) = (c.get(0), c.get(1).or_else(|| c.get(2))) else {continue};
			out.push_str(&text[last..all.start()]);
			let arg = arg.as_str();
			let v = match arg.parse::<usize>() {
				Ok(n) => self.stk.get(n),
				Err(_) => self.heap.get(arg)
			};
			match v {
				Some(v) => out.push_str(&self.format(v)),
				None if arg == "$" => out.push('$'),
				None => {
					warn(io, format!("${arg}: unknown."))?;
					out.push_str(&format!("$?{arg}?"));
				}
			}
			last = all.end();
		}
		out.push_str(&text[last..]);
		Ok(out)
	}
}

///Evaluates a token sequence on given state, writing printed text and warnings to `io`.
///
///Returns the resulting x register. On error the remaining tokens are skipped;
///if rollback is on, the stack is restored to what it was before the call, while
///variables and format changes made before the failure are kept.
///
///After a `quit` token the rest is skipped and `State::quit_requested` is set.
pub fn evaluate(st: &mut State, io: &mut Io, tokens: &[String]) -> Result<Value, EcError> {
	let backup = st.rollback.then(|| st.stk.clone());
	for t in tokens {
		if let Err(e) = st.step(io, t) {
			if let Some(b) = backup {st.stk = b;}
			return Err(e);
		}
		if st.quit {break;}
	}
	Ok(st.x())
}

///Tokenizes and evaluates one line, see `evaluate`.
pub fn exec(st: &mut State, io: &mut Io, line: &str) -> Result<Value, EcError> {
	evaluate(st, io, &tokenize(line))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn toks(s: &str) -> Vec<String> {tokenize(s)}

	#[test]
	fn operators_split_off() {
		assert_eq!(toks("2 3*"), ["2", "3", "*"]);
		assert_eq!(toks("2 3** 4//"), ["2", "3", "**", "4", "//"]);
		assert_eq!(toks("1k 2k||"), ["1k", "2k", "||"]);
		assert_eq!(toks("5!"), ["5", "!"]);
		//not followed by whitespace: part of the token
		assert_eq!(toks("1e-3 a-b"), ["1e-3", "a-b"]);
	}

	#[test]
	fn parens_detached() {
		assert_eq!(toks("(1.6*)toKm"), ["(", "1.6", "*", ")toKm"]);
	}

	#[test]
	fn strings_kept_whole() {
		assert_eq!(toks(r#"25MHz 2pi * "rads/s""#), ["25MHz", "2pi", "*", "\"rads/s\""]);
		assert_eq!(toks("`x = $0 *` 3"), ["`x = $0 *`", "3"]);
		assert!(toks("   ").is_empty());
	}

	#[test]
	fn rollback_keeps_heap() {
		let mut st = State::default().rollback(true);
		let (mut out, mut err) = (Vec::new(), Vec::new());
		let mut io = Io {output: &mut out, error: &mut err};
		exec(&mut st, &mut io, "7").unwrap();
		let before = st.stack().clone();
		assert!(matches!(exec(&mut st, &mut io, "5 =r 1 0 /"), Err(EcError::DivisionByZero)));
		assert_eq!(st.stack(), &before);
		assert_eq!(st.heap().get("r"), Some(&Value::new(5.0, "")));
	}

	#[test]
	fn no_rollback_keeps_partial_stack() {
		let mut st = State::default();
		let (mut out, mut err) = (Vec::new(), Vec::new());
		let mut io = Io {output: &mut out, error: &mut err};
		assert!(exec(&mut st, &mut io, "1 2 bogus").is_err());
		assert_eq!(st.stack().len(), 2);
	}

	#[test]
	fn interpolation() {
		let mut st = State::default();
		let (mut out, mut err) = (Vec::new(), Vec::new());
		let mut io = Io {output: &mut out, error: &mut err};
		exec(&mut st, &mut io, "1kHz 2V =v `f=$1 v=${v} $$ $nope`").unwrap();
		drop(io);
		assert_eq!(String::from_utf8(out).unwrap(), "f=1 kHz v=2 V $ $?nope?\n");
		assert_eq!(String::from_utf8(err).unwrap(), "warning: $nope: unknown.\n");
	}

	#[test]
	fn braces_only_in_pairs() {
		let mut st = State::default();
		let (mut out, mut err) = (Vec::new(), Vec::new());
		let mut io = Io {output: &mut out, error: &mut err};
		exec(&mut st, &mut io, "2 `a $0} b ${0}c`").unwrap();
		drop(io);
		assert_eq!(String::from_utf8(out).unwrap(), "a 2} b 2c\n");
	}
}
