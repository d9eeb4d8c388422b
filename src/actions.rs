//! Built-in actions.

use std::f64::consts::{PI, TAU, SQRT_2};
use num_complex::Complex64;
use rand::Rng;
use crate::{State, Io, EcError, Trig, warn};
use crate::num::{self, Num, Num::*};
use crate::display::Mode;
use crate::engfmt::{self, Converter};
use crate::registry::{Action, Kind, UnaryFn, BinaryFn};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//units rules, operands are [x, y]

///units of x and y if they agree
fn same_units(_: &State, u: &[&str]) -> String {
	match u {
		[x, y, ..] if x == y => x.to_string(),
		_ => String::new()
	}
}
///units of x
fn x_units(_: &State, u: &[&str]) -> String {
	u.first().map(|s| s.to_string()).unwrap_or_default()
}
///degs or rads
fn angle_units(st: &State, _: &[&str]) -> String {
	st.angle_units().to_string()
}

//shorthands for catalog entries

fn command(name: &'static str, f: fn(&mut State, &mut Io) -> Result<(), EcError>) -> Action {
	Action::new(name, Kind::Command(f))
}
fn constant(name: &'static str, f: fn(&mut State) -> Num) -> Action {
	Action::new(name, Kind::Constant(f))
}
fn unary(name: &'static str, f: UnaryFn) -> Action {
	Action::new(name, Kind::UnaryOp(f))
}
fn binary(name: &'static str, f: BinaryFn) -> Action {
	Action::new(name, Kind::BinaryOp(f))
}
fn number(name: &'static str, pattern: &'static str, conv: Converter) -> Action {
	Action::new(name, Kind::Number(pattern, conv))
}
fn format(name: &'static str, pattern: &'static str, mode: Mode) -> Action {
	Action::new(name, Kind::SetFormat(pattern, mode))
}

#[inline(always)]
///real function of a real argument, checked for overflow
fn real(x: Num, f: fn(f64) -> f64) -> Result<Num, EcError> {
	let x = x.real()?;
	num::finite(x, f(x))
}

#[inline(always)]
///reference resistance for the dBm conversions
fn rref(st: &State) -> Result<f64, EcError> {
	st.heap.recall("Rref")?.num.real()
}

///10^(x/div), inverse of the decibel functions
fn undb(x: Num, div: f64) -> Result<Num, EcError> {
	num::pow(Real(10.0), x.div(Real(div))?)
}

///the complete built-in catalog, in help order
pub fn catalog() -> Vec<Action> {
	vec![
		Action::category("Arithmetic Operators"),
		binary("+", |_, y, x| Ok(y.add(x))).units_rule(same_units)
			.describe("+: addition", "x, y, ... => x+y, ..."),
		binary("-", |_, y, x| Ok(y.sub(x))).units_rule(same_units)
			.describe("-: subtraction", "x, y, ... => y-x, ..."),
		binary("*", |_, y, x| Ok(y.mul(x)))
			.describe("*: multiplication", "x, y, ... => x*y, ..."),
		binary("/", |_, y, x| y.div(x))
			.describe("/: true division", "x, y, ... => y/x, ..."),
		binary("//", |_, y, x| num::floordiv(y, x))
			.describe("//: floor division", "x, y, ... => y//x, ..."),
		binary("%", |_, y, x| num::modulo(y, x))
			.describe("%: modulus", "x, y, ... => y%x, ..."),
		unary("chs", |_, x| Ok(x.neg())).units_rule(x_units)
			.describe("chs: change sign", "x, ... => -x, ..."),
		unary("recip", |_, x| Real(1.0).div(x))
			.describe("recip: reciprocal", "x, ... => 1/x, ..."),
		unary("ceil", |_, x| real(x, f64::ceil)).units_rule(x_units)
			.describe("ceil: round towards positive infinity", "x, ... => ceil(x), ..."),
		unary("floor", |_, x| real(x, f64::floor)).units_rule(x_units)
			.describe("floor: round towards negative infinity", "x, ... => floor(x), ..."),
		unary("!", |_, x| num::factorial(x))
			.describe("!: factorial", "x, ... => x!, ..."),
		binary("%chg", |_, y, x| Real(100.0).mul(x.sub(y)).div(y))
			.describe("%chg: percent change", "x, y, ... => 100*(x-y)/y, ..."),
		binary("||", |_, y, x| x.div(x.add(y)).map(|r| r.mul(y))).units_rule(same_units)
			.describe("||: parallel combination", "x, y, ... => 1/(1/x+1/y), ..."),

		Action::category("Powers, Roots, Exponentials and Logarithms"),
		binary("**", |_, y, x| num::pow(y, x)).aliases(&["pow", "ytox"])
			.describe("**: raise y to the power of x", "x, y, ... => y**x, ..."),
		unary("exp", |_, x| num::exp(x)).aliases(&["powe"])
			.describe("exp: natural exponential", "x, ... => exp(x), ..."),
		unary("ln", |_, x| num::ln(x)).aliases(&["loge"])
			.describe("ln: natural logarithm", "x, ... => ln(x), ..."),
		unary("pow10", |_, x| num::pow(Real(10.0), x)).aliases(&["10tox"])
			.describe("pow10: raise 10 to the power of x", "x, ... => 10**x, ..."),
		unary("log", |_, x| num::log(x, 10.0)).aliases(&["log10", "lg"])
			.describe("log: base 10 logarithm", "x, ... => log(x), ..."),
		unary("pow2", |_, x| num::pow(Real(2.0), x)).aliases(&["2tox"])
			.describe("pow2: raise 2 to the power of x", "x, ... => 2**x, ..."),
		unary("log2", |_, x| num::log(x, 2.0)).aliases(&["lb"])
			.describe("log2: base 2 logarithm", "x, ... => log2(x), ..."),
		unary("sqr", |_, x| Ok(x.mul(x)))
			.describe("sqr: square", "x, ... => x**2, ..."),
		unary("sqrt", |_, x| Ok(num::sqrt(x))).aliases(&["rt"])
			.describe("sqrt: square root", "x, ... => sqrt(x), ..."),
		unary("cbrt", |_, x| real(x, f64::cbrt))
			.describe("cbrt: cube root", "x, ... => cbrt(x), ..."),

		Action::category("Trigonometric Functions"),
		unary("sin", |st, x| Ok(Real(st.to_radians(x.real()?).sin())))
			.describe("sin: trigonometric sine", "x, ... => sin(x), ..."),
		unary("cos", |st, x| Ok(Real(st.to_radians(x.real()?).cos())))
			.describe("cos: trigonometric cosine", "x, ... => cos(x), ..."),
		unary("tan", |st, x| Ok(Real(st.to_radians(x.real()?).tan())))
			.describe("tan: trigonometric tangent", "x, ... => tan(x), ..."),
		unary("asin", |st, x| arc(st, x, f64::asin)).units_rule(angle_units)
			.describe("asin: trigonometric arc sine", "x, ... => asin(x), ..."),
		unary("acos", |st, x| arc(st, x, f64::acos)).units_rule(angle_units)
			.describe("acos: trigonometric arc cosine", "x, ... => acos(x), ..."),
		unary("atan", |st, x| arc(st, x, f64::atan)).units_rule(angle_units)
			.describe("atan: trigonometric arc tangent", "x, ... => atan(x), ..."),
		command("rads", |st, _| {st.trig = Trig::Rads; Ok(())})
			.describe("rads: use radians", ""),
		command("degs", |st, _| {st.trig = Trig::Degs; Ok(())})
			.describe("degs: use degrees", ""),

		Action::category("Complex and Vector Functions"),
		Action::new("abs", Kind::Dup(Some(|_, x| Ok(Real(x.abs()))))).units_rule(x_units).aliases(&["mag"])
			.describe("abs: magnitude", "x, ... => abs(x), x, ..."),
		Action::new("arg", Kind::Dup(Some(|st, x| Ok(Real(st.from_radians(x.arg())))))).units_rule(angle_units).aliases(&["ph"])
			.describe("arg: phase", "x, ... => arg(x), x, ..."),
		binary("hypot", |_, y, x| Ok(Real(y.real()?.hypot(x.real()?)))).units_rule(same_units).aliases(&["len"])
			.describe("hypot: hypotenuse", "x, y, ... => sqrt(x**2+y**2), ..."),
		binary("atan2", |st, y, x| Ok(Real(st.from_radians(y.real()?.atan2(x.real()?))))).units_rule(angle_units).aliases(&["angle"])
			.describe("atan2: two-argument arc tangent", "x, y, ... => atan2(y,x), ..."),
		Action::new("rtop", Kind::BinaryIoOp(|st, y, x| {
			let (y, x) = (y.real()?, x.real()?);
			Ok((Real(y.hypot(x)), Real(st.from_radians(y.atan2(x)))))
		}, crate::registry::Units::Rule(angle_units))).units_rule(same_units)
			.describe("rtop: convert rectangular to polar coordinates", "x, y, ... => sqrt(x**2+y**2), atan2(y,x), ..."),
		Action::new("ptor", Kind::BinaryIoOp(|st, ph, mag| {
			let (ph, mag) = (st.to_radians(ph.real()?), mag.real()?);
			Ok((Real(mag * ph.cos()), Real(mag * ph.sin())))
		}, crate::registry::Units::Rule(x_units))).units_rule(x_units)
			.describe("ptor: convert polar to rectangular coordinates", "x, y, ... => x*cos(y), x*sin(y), ..."),

		Action::category("Hyperbolic Functions"),
		unary("sinh", |_, x| real(x, f64::sinh))
			.describe("sinh: hyperbolic sine", "x, ... => sinh(x), ..."),
		unary("cosh", |_, x| real(x, f64::cosh))
			.describe("cosh: hyperbolic cosine", "x, ... => cosh(x), ..."),
		unary("tanh", |_, x| real(x, f64::tanh))
			.describe("tanh: hyperbolic tangent", "x, ... => tanh(x), ..."),
		unary("asinh", |_, x| real(x, f64::asinh))
			.describe("asinh: hyperbolic arc sine", "x, ... => asinh(x), ..."),
		unary("acosh", |_, x| {
			if x.real()? < 1.0 {return Err(EcError::Domain);}
			real(x, f64::acosh)
		})
			.describe("acosh: hyperbolic arc cosine", "x, ... => acosh(x), ..."),
		unary("atanh", |_, x| {
			if x.real()?.abs() >= 1.0 {return Err(EcError::Domain);}
			real(x, f64::atanh)
		})
			.describe("atanh: hyperbolic arc tangent", "x, ... => atanh(x), ..."),

		Action::category("Decibel Functions"),
		unary("db", |_, x| Ok(Real(20.0).mul(num::log(x, 10.0)?))).aliases(&["db20", "v2db", "i2db"])
			.describe("db: convert voltage or current to dB", "x, ... => 20*log(x), ..."),
		unary("adb", |_, x| undb(x, 20.0)).aliases(&["db2v", "db2i"])
			.describe("adb: convert dB to voltage or current", "x, ... => 10**(x/20), ..."),
		unary("db10", |_, x| Ok(Real(10.0).mul(num::log(x, 10.0)?))).aliases(&["p2db"])
			.describe("db10: convert power to dB", "x, ... => 10*log(x), ..."),
		unary("adb10", |_, x| undb(x, 10.0)).aliases(&["db2p"])
			.describe("adb10: convert dB to power", "x, ... => 10**(x/10), ..."),
		unary("vdbm", |st, x| {
			let v = x.real()?;
			Ok(Real(30.0).add(Real(10.0).mul(num::log(Real(v * v / rref(st)? / 2.0), 10.0)?)))
		}).aliases(&["v2dbm"])
			.describe("vdbm: convert peak voltage to dBm", "x, ... => 30+10*log10((x**2)/(2*Rref)), ..."),
		unary("dbmv", |st, x| Ok(num::sqrt(Real(2.0 * 10_f64.powf((x.real()? - 30.0) / 10.0) * rref(st)?)))).units("V").aliases(&["dbm2v"])
			.describe("dbmv: dBm to peak voltage", "x, ... => sqrt(2*10**((x-30)/10)*Rref), ..."),
		unary("idbm", |st, x| {
			let i = x.real()?;
			Ok(Real(30.0).add(Real(10.0).mul(num::log(Real(i * i * rref(st)? / 2.0), 10.0)?)))
		}).aliases(&["i2dbm"])
			.describe("idbm: peak current to dBm", "x, ... => 30+10*log10((x**2)*Rref/2), ..."),
		unary("dbmi", |st, x| Ok(num::sqrt(Real(2.0 * 10_f64.powf((x.real()? - 30.0) / 10.0) / rref(st)?)))).units("A").aliases(&["dbm2i"])
			.describe("dbmi: dBm to peak current", "x, ... => sqrt(2*10**((x-30)/10)/Rref), ..."),

		Action::category("Constants"),
		constant("pi", |_| Real(PI)).units("rads")
			.describe("pi: the ratio of a circle's circumference to its diameter", "... => pi, ..."),
		constant("2pi", |_| Real(TAU)).units("rads")
			.describe("2pi: the ratio of a circle's circumference to its radius", "... => 2*pi, ..."),
		constant("rt2", |_| Real(SQRT_2))
			.describe("rt2: square root of two", "... => sqrt(2), ..."),
		constant("0C", |_| Real(273.15)).units("K")
			.describe("0C: 0 Celsius in Kelvin", "... => 0C, ..."),
		constant("j", |_| Cplx(Complex64::new(0.0, 1.0)))
			.describe("j: imaginary unit (square root of -1)", "... => j, ..."),
		constant("j2pi", |_| Cplx(Complex64::new(0.0, TAU))).units("rads")
			.describe("j2pi: j*2*pi", "... => j*2*pi, ..."),
		constant("h", |_| Real(6.62606957e-34)).units("J-s")
			.describe("h: Planck constant", "... => h, ..."),
		constant("hbar", |_| Real(1.054571726e-34)).units("J-s")
			.describe("hbar: Reduced Planck constant", "... => h/(2*pi), ..."),
		constant("lP", |_| Real(1.616199e-35)).units("m")
			.describe("lP: Planck length", "... => lP, ..."),
		constant("mP", |_| Real(2.17651e-5)).units("g")
			.describe("mP: Planck mass", "... => mP, ..."),
		constant("mPr", |_| Real(4.34e-6)).units("g")
			.describe("mPr: Reduced Planck mass", "... => mPr, ..."),
		constant("TP", |_| Real(1.416833e32)).units("K")
			.describe("TP: Planck temperature", "... => TP, ..."),
		constant("tP", |_| Real(5.39106e-44)).units("s")
			.describe("tP: Planck time", "... => tP, ..."),
		constant("k", |_| Real(1.3806488e-23)).units("J/K")
			.describe("k: Boltzmann constant", "... => k, ..."),
		constant("q", |_| Real(1.602176565e-19)).units("C")
			.describe("q: elementary charge (the charge of an electron)", "... => q, ..."),
		constant("me", |_| Real(9.10938291e-28)).units("g")
			.describe("me: mass of an electron", "... => me, ..."),
		constant("mp", |_| Real(1.672621777e-24)).units("g")
			.describe("mp: mass of a proton", "... => mp, ..."),
		constant("c", |_| Real(2.99792458e8)).units("m/s")
			.describe("c: speed of light in a vacuum", "... => c, ..."),
		constant("G", |_| Real(6.6746e-11)).units("m^3/(kg-s^2)")
			.describe("G: universal gravitational constant", "... => G, ..."),
		constant("g", |_| Real(9.80665)).units("m/s^2")
			.describe("g: standard acceleration of gravity", "... => g, ..."),
		constant("NA", |_| Real(6.02214129e23)).units("/mol")
			.describe("NA: Avogadro number", "... => NA, ..."),
		constant("R", |_| Real(8.3144621)).units("J/(mol-K)")
			.describe("R: molar gas constant", "... => R, ..."),
		constant("eps0", |_| Real(8.854187817e-12)).units("F/m")
			.describe("eps0: permittivity of free space", "... => eps0, ..."),
		constant("mu0", |_| Real(4e-7 * PI)).units("N/A^2")
			.describe("mu0: permeability of free space", "... => mu0, ..."),
		constant("Z0", |_| Real(376.730313461)).units("Ohms")
			.describe("Z0: characteristic impedance of free space", "... => Z0, ..."),

		Action::category("Numbers"),
		number("engnum", engfmt::ENG_NUM, engfmt::from_eng)
			.describe("<N>[.<M>][<S>[<U>]]: a real number", "... => num, ..."),
		number("scinum", engfmt::SCI_NUM, engfmt::from_sci)
			.describe("<N>[.<M>]e<E>[<U>]: a real number in scientific notation", "... => num, ..."),
		number("hexnum", engfmt::HEX_NUM, engfmt::from_hex)
			.describe("0x<N>: a hexadecimal number", "... => num, ..."),
		number("octnum", engfmt::OCT_NUM, engfmt::from_oct)
			.describe("0o<N>: a number in octal", "... => num, ..."),
		number("binnum", engfmt::BIN_NUM, engfmt::from_bin)
			.describe("0b<N>: a number in binary", "... => num, ..."),
		number("vhexnum", engfmt::VHEX_NUM, engfmt::from_hex)
			.describe("'h<N>: a number in Verilog hexadecimal notation", "... => num, ..."),
		number("vdecnum", engfmt::VDEC_NUM, engfmt::from_dec)
			.describe("'d<N>: a number in Verilog decimal", "... => num, ..."),
		number("voctnum", engfmt::VOCT_NUM, engfmt::from_oct)
			.describe("'o<N>: a number in Verilog octal", "... => num, ..."),
		number("vbinnum", engfmt::VBIN_NUM, engfmt::from_bin)
			.describe("'b<N>: a number in Verilog binary", "... => num, ..."),
		number("specialnum", engfmt::SPECIAL_NUM, engfmt::from_special)
			.describe("inf|nan[ <U>]: infinity or not-a-number", "... => num, ..."),

		Action::category("Number Formats"),
		format("eng", r"\Aeng(\d{1,2})?\z", Mode::Eng).describe("eng[<N>]: use engineering notation", ""),
		format("sci", r"\Asci(\d{1,2})?\z", Mode::Sci).describe("sci[<N>]: use scientific notation", ""),
		format("fix", r"\Afix(\d{1,2})?\z", Mode::Fix).describe("fix[<N>]: use fixed notation", ""),
		format("hex", r"\Ahex(\d{1,2})?\z", Mode::Hex).describe("hex[<N>]: use hexadecimal notation", ""),
		format("oct", r"\Aoct(\d{1,2})?\z", Mode::Oct).describe("oct[<N>]: use octal notation", ""),
		format("bin", r"\Abin(\d{1,2})?\z", Mode::Bin).describe("bin[<N>]: use binary notation", ""),
		format("vhex", r"\Avhex(\d{1,2})?\z", Mode::VHex).describe("vhex[<N>]: use Verilog hexadecimal notation", ""),
		format("vdec", r"\Avdec(\d{1,2})?\z", Mode::VDec).describe("vdec[<N>]: use Verilog decimal notation", ""),
		format("voct", r"\Avoct(\d{1,2})?\z", Mode::VOct).describe("voct[<N>]: use Verilog octal notation", ""),
		format("vbin", r"\Avbin(\d{1,2})?\z", Mode::VBin).describe("vbin[<N>]: use Verilog binary notation", ""),

		Action::category("Variable Commands"),
		Action::new("store", Kind::Store(r"\A=([a-zA-Z]\w*)\z"))
			.describe("=<name>: store value into a variable", "x, ... => x, ..."),
		command("vars", print_vars)
			.describe("vars: print variables", ""),

		Action::category("Stack Commands"),
		command("swap", |st, _| {
			let x = st.stk.pop();
			let y = st.stk.pop();
			st.stk.push(x);
			st.stk.push(y);
			Ok(())
		})
			.describe("swap: swap x and y", "x, y, ... => y, x, ..."),
		Action::new("dup", Kind::Dup(None)).aliases(&["enter"])
			.describe("dup: duplicate x", "x, ... => x, x, ..."),
		command("pop", |st, _| {st.stk.pop(); Ok(())}).aliases(&["clrx"])
			.describe("pop: discard x", "x, ... => ..."),
		command("stack", print_stack)
			.describe("stack: print stack", ""),
		command("clstack", |st, _| {st.stk.clear(); Ok(())})
			.describe("clstack: clear stack", "... =>"),

		Action::category("Miscellaneous Commands"),
		constant("rand", |st| Real(st.rng.gen()))
			.describe("rand: random number between 0 and 1", "... => rand, ..."),
		Action::new("print", Kind::Print(r"\A`(.*)`\z"))
			.describe("`<text>`: print text", ""),
		Action::new("units", Kind::SetUnits(r#"\A"(.*)"\z"#))
			.describe("\"<units>\": set the units of the x register", "x, ... => x \"units\", ..."),
		Action::new("convert", Kind::Convert(r"\A>(.+)\z"))
			.describe("><units>: convert x to the given units", "x, ... => x in units, ..."),
		command("about", |_, io| {
			writeln!(io.output, "ec: engineering calculator\nversion {VERSION}")?;
			Ok(())
		})
			.describe("about: print information about this calculator", ""),
		command("quit", |st, _| {st.quit = true; Ok(())}).aliases(&[":q"])
			.describe("quit: quit (:q or ^D also works)", ""),
		command("help", print_help)
			.describe("help: print a summary of the available features", ""),
		Action::new("?", Kind::Help(r"\A\?(\S*)\z"))
			.describe("?[<topic>]: detailed help on a particular topic", ""),

		//last, any other identifier is a variable
		Action::new("recall", Kind::Recall(r"\A([a-zA-Z]\w*)\z"))
			.describe("<name>: recall value of a variable", "... => name, ..."),
	]
}

#[inline(always)]
///inverse trig function with its result in the current angle units
fn arc(st: &State, x: Num, f: fn(f64) -> f64) -> Result<Num, EcError> {
	let r = f(x.real()?);
	if r.is_nan() {return Err(EcError::Domain);}
	Ok(Real(st.from_radians(r)))
}

///registers from the deepest up, x and y labelled
fn print_stack(st: &mut State, io: &mut Io) -> Result<(), EcError> {
	let n = st.stk.len();
	for (i, v) in st.stk.iter().enumerate() {
		let label = match n - 1 - i {
			0 => "x:",
			1 => "y:",
			_ => "  "
		};
		writeln!(io.output, "  {label} {}", st.format(v))?;
	}
	Ok(())
}

///variables sorted by name
fn print_vars(st: &mut State, io: &mut Io) -> Result<(), EcError> {
	for (name, v) in st.heap.iter() {
		writeln!(io.output, "  {name}: {}", st.format(v))?;
	}
	Ok(())
}

#[inline(always)]
fn alias_note(a: &Action) -> String {
	match a.aliases {
		[] => String::new(),
		[one] => format!("alias: {one}"),
		many => format!("aliases: {}", many.join(","))
	}
}

///one line per action, grouped under the category headers
fn print_help(st: &mut State, io: &mut Io) -> Result<(), EcError> {
	for a in st.reg.actions() {
		if matches!(a.kind, Kind::Category) {
			writeln!(io.output, "\n{}", a.description)?;
			continue;
		}
		let aliases = alias_note(a);
		if aliases.is_empty() {writeln!(io.output, "    {}", a.description)?;}
		else {writeln!(io.output, "    {} ({aliases})", a.description)?;}
	}
	Ok(())
}

///`?topic`: description, stack effect and aliases of one action, or the topic list
pub(crate) fn topic_help(st: &State, io: &mut Io, topic: &str) -> Result<(), EcError> {
	if !topic.is_empty() {
		if let Some(a) = st.reg.topic(topic) {
			writeln!(io.output, "{}", a.description)?;
			if !a.synopsis.is_empty() {writeln!(io.output, "stack: {}", a.synopsis)?;}
			let aliases = alias_note(a);
			if !aliases.is_empty() {writeln!(io.output, "{aliases}")?;}
			return Ok(());
		}
		warn(io, format!("{topic}: not found."))?;
	}

	let mut topics: Vec<&str> = st.reg.actions().iter().map(|a| a.name).filter(|n| !n.is_empty()).collect();
	topics.sort_unstable();
	let width = topics.iter().map(|t| t.len()).max().unwrap_or(0) + 3;
	let cols = (78 / width).max(1);
	writeln!(io.output, "For summary of all topics, use 'help'.")?;
	writeln!(io.output, "For help on a particular topic, use '?topic'.\n")?;
	writeln!(io.output, "Available topics:")?;
	for row in topics.chunks(cols) {
		let line: String = row.iter().map(|t| format!("{t:width$}")).collect();
		writeln!(io.output, "{}", line.trim_end())?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::registry::Registry;

	#[test]
	fn catalog_is_consistent() {
		let r = Registry::new(catalog()).unwrap();
		for name in ["+", "ytox", "lg", "mag", "enter", ":q", "db2p", "2pi"] {
			assert!(r.names().any(|n| n == name), "{name}");
		}
	}

	#[test]
	fn units_rules() {
		let st = State::default();
		assert_eq!(same_units(&st, &["V", "V"]), "V");
		assert_eq!(same_units(&st, &["V", "A"]), "");
		assert_eq!(x_units(&st, &["Hz"]), "Hz");
		assert_eq!(angle_units(&st, &[]), "degs");
	}

	#[test]
	fn topic_lookup() {
		let st = State::default();
		let (mut out, mut err) = (Vec::new(), Vec::new());
		let mut io = Io {output: &mut out, error: &mut err};
		topic_help(&st, &mut io, "lg").unwrap();
		drop(io);
		let text = String::from_utf8(out).unwrap();
		assert!(text.starts_with("log: base 10 logarithm\nstack: x, ... => log(x), ...\n"));
		assert!(text.contains("aliases: log10,lg"));
		assert!(err.is_empty());
	}
}
