//! Engineering notation codec: numbers with SI scale factors, scientific and radix forms.
//!
//! Rendering takes a real number, its units and a precision (digits after the
//! first significant one). Parsing recognizes the literal grammars below and
//! splits them into a value and a units label.

use std::f64::{INFINITY, NEG_INFINITY};
use num_complex::Complex64;
use regex::Regex;
use phf::phf_map;
use crate::num::{Num, Num::*};
use crate::EcError;

///SI scale factor glyphs and their decimal exponents
pub static SCALE_FACTORS: phf::Map<char, i32> = phf_map! {
	'Y' => 24,
	'Z' => 21,
	'E' => 18,
	'P' => 15,
	'T' => 12,
	'G' => 9,
	'M' => 6,
	'K' => 3,
	'k' => 3,
	'_' => 0,
	'm' => -3,
	'u' => -6,
	'n' => -9,
	'p' => -12,
	'f' => -15,
	'a' => -18,
	'z' => -21,
	'y' => -24,
};

///rendered glyphs for positive groups, k=1e3 first
const BIG: [&str; 8] = ["k", "M", "G", "T", "P", "E", "Z", "Y"];
///rendered glyphs for negative groups, m=1e-3 first
const SMALL: [&str; 8] = ["m", "u", "n", "p", "f", "a", "z", "y"];

///units that are placed before the number
pub const CURRENCIES: &str = "$€£¥₩₿Ƀ";

//literal grammars, the capture layout is what the from_* converters expect
///[sign, currency, j, mantissa, scale factor, units after it, units without a scale factor]
pub const ENG_NUM: &str = r"\A([-+]?)([$€£¥₩₿Ƀ]?)(j?)((?:[0-9][0-9,]*)?\.?[0-9]+)(?:([YZEPTGMKk_munpfazy])([a-zA-Z_°ÅΩ℧]*)|([b-eghijloqrstvwABCDFHIJLNOQRSUVWX°ÅΩ℧][a-zA-Z_°ÅΩ℧]*))?\z";
///[sign, currency, j, mantissa with exponent, units]
pub const SCI_NUM: &str = r"\A([-+]?)([$€£¥₩₿Ƀ]?)(j?)((?:[0-9][0-9,]*)?\.?[0-9]+[eE][-+]?[0-9]+)([a-zA-Z_°ÅΩ℧]*)\z";
///[sign, currency, inf|nan, units]
pub const SPECIAL_NUM: &str = r"(?i)\A([-+]?)([$€£¥₩₿Ƀ]?)(inf|nan)(?: ([a-z_°ÅΩ℧]+))?\z";
///[sign, j, digits] for all radix literals
pub const HEX_NUM: &str = r"\A([-+]?)(j?)0[xX]([0-9a-fA-F]+)\z";
pub const OCT_NUM: &str = r"\A([-+]?)(j?)0[oO]([0-7]+)\z";
pub const BIN_NUM: &str = r"\A([-+]?)(j?)0[bB]([01]+)\z";
pub const VHEX_NUM: &str = r"\A([-+]?)(j?)'[hH]([0-9a-fA-F_]*[0-9a-fA-F])\z";
pub const VDEC_NUM: &str = r"\A([-+]?)(j?)'[dD]([0-9_]*[0-9])\z";
pub const VOCT_NUM: &str = r"\A([-+]?)(j?)'[oO]([0-7_]*[0-7])\z";
pub const VBIN_NUM: &str = r"\A([-+]?)(j?)'[bB]([01_]*[01])\z";

///converter from captured groups to a parsed literal
pub type Converter = fn(&[String]) -> Option<Parsed>;

lazy_static! {
	///every grammar with its converter, in recognition order
	static ref GRAMMARS: Vec<(Regex, Converter)> = {
		let table: [(&str, Converter); 10] = [
		(ENG_NUM, from_eng),
		(SCI_NUM, from_sci),
		(HEX_NUM, from_hex),
		(OCT_NUM, from_oct),
		(BIN_NUM, from_bin),
		(VHEX_NUM, from_hex),
		(VDEC_NUM, from_dec),
		(VOCT_NUM, from_oct),
		(VBIN_NUM, from_bin),
		(SPECIAL_NUM, from_special),
		];
		table.into_iter().map(|(p, c)| (Regex::new(p).unwrap(), c)).collect()
	};
}

///result of parsing a literal
#[derive(Debug)]
pub struct Parsed {
	pub num: Num,
	pub units: String,
	///inconsistent but recoverable literal
	pub warning: Option<EcError>
}

///radix of an integer rendering
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Radix {
	Hex,
	Dec,
	Oct,
	Bin
}
impl Radix {
	#[inline(always)]
	fn letter(self) -> char {
		match self {
			Radix::Hex => 'h',
			Radix::Dec => 'd',
			Radix::Oct => 'o',
			Radix::Bin => 'b'
		}
	}
	#[inline(always)]
	///letter after the leading 0 in C-style literals
	fn prefix(self) -> char {
		match self {
			Radix::Hex => 'x',
			r => r.letter()
		}
	}
	#[inline(always)]
	fn base(self) -> u32 {
		match self {
			Radix::Hex => 16,
			Radix::Dec => 10,
			Radix::Oct => 8,
			Radix::Bin => 2
		}
	}
}

#[inline(always)]
///single currency glyph
pub fn is_currency(units: &str) -> bool {
	let mut c = units.chars();
	matches!((c.next(), c.next()), (Some(g), None) if CURRENCIES.contains(g))
}

///attach units: currency leads, others trail after the scale factor
fn place_units(mant: &str, sf: &str, units: &str, spacer: &str) -> String {
	if is_currency(units) {
		match mant.strip_prefix('-') {	//sign leads the currency
			Some(m) => format!("-{units}{m}{sf}"),
			None => format!("{units}{mant}{sf}")
		}
	}
	else if units.is_empty() {format!("{mant}{sf}")}
	else if sf.chars().count() <= 1 {format!("{mant}{spacer}{sf}{units}")}
	else {format!("{mant}{sf}{spacer}{units}")}
}

///inf and nan never go through scale factor logic
fn special(num: f64, units: &str) -> Option<String> {
	let word = if num.is_nan() {"nan"}
		else if num == INFINITY {"inf"}
		else if num == NEG_INFINITY {"-inf"}
		else {return None};
	Some(
		if units.is_empty() {word.to_string()}
		else if is_currency(units) {place_units(word, "", units, "")}
		else {format!("{word} {units}")}	//space even if spacer is empty, keeps it readable
	)
}

#[inline(always)]
///split a rust `{:e}` rendering into mantissa and exponent
fn split_exp(s: &str) -> (&str, i32) {
	match s.split_once('e') {
		Some((m, e)) => (m, e.parse().unwrap_or(0)),
		None => (s, 0)
	}
}

#[inline(always)]
///remove trailing zeros and a dangling decimal point
fn trim_zeros(s: &str) -> &str {
	if s.contains('.') {s.trim_end_matches('0').trim_end_matches('.')}
	else {s}
}

///engineering notation with an SI scale factor where one exists
pub fn to_eng_fmt(num: f64, units: &str, prec: usize, spacer: &str) -> String {
	if let Some(s) = special(num, units) {return s;}
	let num = if num == 0.0 {0.0} else {num};	//no negative zero

	let sci = format!("{:.*e}", prec, num);
	let (smant, exp) = split_exp(&sci);
	let (index, shift) = (exp.div_euclid(3), exp.rem_euclid(3));

	let sf = match index {
		0 => String::new(),
		i if i > 0 && i as usize <= BIG.len() => BIG[i as usize - 1].to_string(),
		i if i < 0 && (-i) as usize <= SMALL.len() => SMALL[(-i) as usize - 1].to_string(),
		_ => format!("e{}", exp - shift)
	};

	let mant = smant.parse::<f64>().unwrap_or(0.0) * 10_f64.powi(shift);
	let smant = format!("{:.*}", prec.saturating_sub(shift as usize), mant);

	place_units(trim_zeros(&smant), &sf, units, spacer)
}

///scientific notation with a signed two-digit exponent
pub fn to_sci_fmt(num: f64, units: &str, prec: usize, spacer: &str) -> String {
	if let Some(s) = special(num, units) {return s;}
	let sci = format!("{:.*e}", prec, num);
	let (m, e) = split_exp(&sci);
	place_units(&format!("{m}e{e:+03}"), "", units, spacer)
}

///fixed point with a given count of fractional digits
pub fn to_fix_fmt(num: f64, units: &str, prec: usize, spacer: &str) -> String {
	if let Some(s) = special(num, units) {return s;}
	place_units(&format!("{:.*}", prec, num), "", units, spacer)
}

///integer in a given radix, zero padded to `digits`, units are dropped
pub fn to_radix_fmt(num: f64, radix: Radix, digits: usize, verilog: bool) -> String {
	if let Some(s) = special(num, "") {return s;}
	let n = num.round_ties_even();
	let sign = if n < 0.0 {"-"} else {""};
	let mag = n.abs() as u128;	//saturates
	let body = match radix {
		Radix::Hex => format!("{mag:x}"),
		Radix::Dec => format!("{mag}"),
		Radix::Oct => format!("{mag:o}"),
		Radix::Bin => format!("{mag:b}")
	};
	let width = digits.saturating_sub(sign.len());
	if verilog {format!("'{}{sign}{body:0>width$}", radix.letter())}
	else {format!("{sign}0{}{body:0>width$}", radix.prefix())}
}

#[inline(always)]
///apply the imaginary marker
fn imaginary(x: f64, j: &str) -> Num {
	if j.is_empty() {Real(x)} else {Cplx(Complex64::new(0.0, x))}
}

///currency and trailing units both given: keep the currency, warn
fn pick_units(literal: &str, currency: &str, units: &str) -> (String, Option<EcError>) {
	match (currency.is_empty(), units.is_empty()) {
		(true, _) => (units.to_string(), None),
		(false, true) => (currency.to_string(), None),
		(false, false) => (currency.to_string(), Some(EcError::MalformedNumberLiteral(literal.to_string())))
	}
}

///mantissa with optional scale factor and units
pub fn from_eng(g: &[String]) -> Option<Parsed> {
	let [sign, cur, j, mant, sf, units, bare] = g else {return None};
	let units = if units.is_empty() {bare} else {units};
	let exp = match sf.chars().next() {
		Some(c) => *SCALE_FACTORS.get(&c)?,
		None => 0
	};
	//scale through the decimal exponent, not a multiplication, so 1m is exactly 1e-3
	let x: f64 = format!("{sign}{}e{exp}", mant.replace(',', "")).parse().ok()?;
	let (units, warning) = pick_units(&g.concat(), cur, units);
	Some(Parsed {num: imaginary(x, j), units, warning})
}

///mantissa with exponent and optional units
pub fn from_sci(g: &[String]) -> Option<Parsed> {
	let [sign, cur, j, mant, units] = g else {return None};
	let x: f64 = format!("{sign}{}", mant.replace(',', "")).parse().ok()?;
	let (units, warning) = pick_units(&g.concat(), cur, units);
	Some(Parsed {num: imaginary(x, j), units, warning})
}

///infinity or not-a-number
pub fn from_special(g: &[String]) -> Option<Parsed> {
	let [sign, cur, word, units] = g else {return None};
	let x = if word.eq_ignore_ascii_case("nan") {f64::NAN}
		else if sign == "-" {NEG_INFINITY}
		else {INFINITY};
	let literal = format!("{sign}{cur}{word} {units}");
	let (units, warning) = pick_units(literal.trim_end(), cur, units);
	Some(Parsed {num: Real(x), units, warning})
}

///accumulate digits, underscores are separators
fn radix(g: &[String], base: u32) -> Option<Parsed> {
	let [sign, j, digits] = g else {return None};
	let mut x = 0.0;
	for c in digits.chars().filter(|c| *c != '_') {
		x = x * base as f64 + c.to_digit(base)? as f64;
	}
	if sign == "-" {x = -x;}
	Some(Parsed {num: imaginary(x, j), units: String::new(), warning: None})
}
pub fn from_hex(g: &[String]) -> Option<Parsed> {radix(g, Radix::Hex.base())}
pub fn from_dec(g: &[String]) -> Option<Parsed> {radix(g, Radix::Dec.base())}
pub fn from_oct(g: &[String]) -> Option<Parsed> {radix(g, Radix::Oct.base())}
pub fn from_bin(g: &[String]) -> Option<Parsed> {radix(g, Radix::Bin.base())}

///recognize any literal form, `None` if the text is not a number
pub fn to_number(s: &str) -> Option<Parsed> {
	GRAMMARS.iter().find_map(|(re, conv)| re.captures(s).and_then(|c| conv(&crate::groups(&c))))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn eng(x: f64) -> String {to_eng_fmt(x, "", 4, " ")}

	fn real(s: &str) -> (f64, String) {
		let p = to_number(s).unwrap();
		(p.num.re(), p.units)
	}

	#[test]
	fn group_boundaries() {
		assert_eq!(eng(1e-3), "1m");
		assert_eq!(eng(999e-6), "999u");
		assert_eq!(eng(1e-24), "1y");
		assert_eq!(eng(1e-27), "1e-27");
		assert_eq!(eng(1e27), "1e27");
		assert_eq!(eng(1e24), "1Y");
		assert_eq!(eng(1000.0), "1k");
		assert_eq!(eng(999.9), "999.9");
		assert_eq!(eng(0.0), "0");
		assert_eq!(eng(-0.0), "0");
	}

	#[test]
	fn rounding_crosses_group() {
		//rounds to 1.0000e6 before grouping
		assert_eq!(eng(999999.0), "1M");
		assert_eq!(eng(1234.5678), "1.2346k");
		assert_eq!(eng(-0.00012345), "-123.45u");
	}

	#[test]
	fn unit_placement() {
		assert_eq!(to_eng_fmt(0.125, "V", 4, " "), "125 mV");
		assert_eq!(to_eng_fmt(0.125, "V", 4, ""), "125mV");
		assert_eq!(to_eng_fmt(5.0, "Hz", 4, " "), "5 Hz");
		assert_eq!(to_eng_fmt(1e30, "Hz", 4, " "), "1e30 Hz");
		assert_eq!(to_eng_fmt(1e6, "$", 4, " "), "$1M");
		assert_eq!(to_eng_fmt(f64::INFINITY, "V", 4, ""), "inf V");
		assert_eq!(to_eng_fmt(f64::NEG_INFINITY, "$", 4, ""), "-$inf");
		assert_eq!(to_eng_fmt(-2e7, "$", 4, " "), "-$20M");
		assert_eq!(to_eng_fmt(f64::NAN, "", 4, ""), "nan");
	}

	#[test]
	fn other_modes() {
		assert_eq!(to_sci_fmt(1234.0, "", 4, " "), "1.2340e+03");
		assert_eq!(to_sci_fmt(0.00012, "V", 2, " "), "1.20e-04 V");
		assert_eq!(to_fix_fmt(3.14159, "", 2, " "), "3.14");
		assert_eq!(to_radix_fmt(255.0, Radix::Hex, 4, false), "0x00ff");
		assert_eq!(to_radix_fmt(-255.0, Radix::Hex, 4, false), "-0x0ff");
		assert_eq!(to_radix_fmt(5.0, Radix::Bin, 4, true), "'b0101");
		assert_eq!(to_radix_fmt(2.5, Radix::Dec, 0, true), "'d2");
		assert_eq!(to_radix_fmt(8.0, Radix::Oct, 0, false), "0o10");
	}

	#[test]
	fn parse_forms() {
		assert_eq!(real("100mV"), (0.1, "V".into()));
		assert_eq!(real("1,000"), (1000.0, "".into()));
		assert_eq!(real("$1,000,000"), (1e6, "$".into()));
		assert_eq!(real("$2k"), (2000.0, "$".into()));
		assert_eq!(real("1e-3s"), (1e-3, "s".into()));
		assert_eq!(real("10_Ohms"), (10.0, "Ohms".into()));
		assert_eq!(real("0x1f"), (31.0, "".into()));
		assert_eq!(real("'hdead_beef"), (3735928559.0, "".into()));
		assert_eq!(real("'d1_000"), (1000.0, "".into()));
		assert_eq!(real("-0b101"), (-5.0, "".into()));
		assert_eq!(real("-inf Hz"), (f64::NEG_INFINITY, "Hz".into()));
		assert_eq!(real("1V"), (1.0, "V".into()));
		assert_eq!(real("50Ω"), (50.0, "Ω".into()));
		assert_eq!(real("1eV"), (1.0, "eV".into()));
		assert_eq!(real("2.5kOhms"), (2500.0, "Ohms".into()));
		assert_eq!(real("-$20M"), (-2e7, "$".into()));
		assert_eq!(real("+$1000"), (1000.0, "$".into()));
		assert!(to_number("nan").unwrap().num.re().is_nan());
		let j = to_number("j2").unwrap();
		assert_eq!(j.num, Cplx(Complex64::new(0.0, 2.0)));
	}

	#[test]
	fn not_numbers() {
		for s in ["", "abc", "1.2.3", "0x", "'h", "infHz", "--1", "1e-", "$-5", "1xyz"] {
			assert!(to_number(s).is_none(), "{s}");
		}
	}

	#[test]
	fn currency_with_units_warns() {
		let p = to_number("$10V").unwrap();
		assert_eq!(p.units, "$");
		assert!(matches!(p.warning, Some(EcError::MalformedNumberLiteral(_))));
	}

	#[test]
	fn round_trip_every_group() {
		for exp in -24..=24 {
			for mant in [1.0, 2.5, 47.0, 999.0] {
				let x = mant * 10_f64.powi(exp);
				let (y, _) = real(&to_eng_fmt(x, "", 4, ""));
				assert!(((y - x) / x).abs() < 1e-4, "{x} -> {y}");
			}
		}
	}
}
