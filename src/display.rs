//! Display mode and rendering of register values.

use crate::engfmt::{self, Radix};
use crate::num::{Value, Num::*};

///rendering mode of the prompt and of printed values
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
	Fix,
	Sci,
	Eng,
	Hex,
	Oct,
	Bin,
	VHex,
	VDec,
	VOct,
	VBin
}

///current format state plus the defaults it resets to
#[derive(Clone, Debug)]
pub struct Display {
	mode: Mode,
	digits: usize,
	spacer: String,
	default: (Mode, usize)
}
impl Default for Display {
	///engineering notation, 4 digits, space between number and units
	fn default() -> Self {
		Self::new(Mode::Eng, 4, " ")
	}
}
impl Display {
	pub fn new(mode: Mode, digits: usize, spacer: &str) -> Self {
		Self {mode, digits, spacer: spacer.to_string(), default: (mode, digits)}
	}

	///switch mode, keeping the digit count unless a new one is given
	pub fn set_mode(&mut self, mode: Mode, digits: Option<usize>) {
		self.mode = mode;
		if let Some(d) = digits {self.digits = d;}
	}
	pub fn set_spacer(&mut self, spacer: &str) {
		self.spacer = spacer.to_string();
	}
	///back to the configured defaults
	pub fn reset(&mut self) {
		(self.mode, self.digits) = self.default;
	}

	pub fn mode(&self) -> Mode {self.mode}
	pub fn digits(&self) -> usize {self.digits}
	pub fn spacer(&self) -> &str {&self.spacer}

	///render one real component
	pub fn format_real(&self, num: f64, units: &str) -> String {
		let num = if num == 0.0 {0.0} else {num};
		let (d, s) = (self.digits, self.spacer.as_str());
		match self.mode {
			Mode::Fix => engfmt::to_fix_fmt(num, units, d, s),
			Mode::Sci => engfmt::to_sci_fmt(num, units, d, s),
			Mode::Eng => engfmt::to_eng_fmt(num, units, d, s),
			Mode::Hex => engfmt::to_radix_fmt(num, Radix::Hex, d, false),
			Mode::Oct => engfmt::to_radix_fmt(num, Radix::Oct, d, false),
			Mode::Bin => engfmt::to_radix_fmt(num, Radix::Bin, d, false),
			Mode::VHex => engfmt::to_radix_fmt(num, Radix::Hex, d, true),
			Mode::VDec => engfmt::to_radix_fmt(num, Radix::Dec, d, true),
			Mode::VOct => engfmt::to_radix_fmt(num, Radix::Oct, d, true),
			Mode::VBin => engfmt::to_radix_fmt(num, Radix::Bin, d, true)
		}
	}

	///render a value, complex ones as `re ± jim`
	pub fn format(&self, v: &Value) -> String {
		let z = match v.num {
			Real(x) => {return self.format_real(x, &v.units);},
			Cplx(z) => z
		};
		let u = v.units.as_str();
		let real = self.format_real(z.re, u);
		let zero = self.format_real(0.0, u);
		let one = self.format_real(1.0, u);

		let sign = if z.im < 0.0 {'-'} else {'+'};
		let mag = self.format_real(z.im.abs(), u);
		if mag == zero {return real;}
		let mag = if mag != one {mag}	//unit magnitude collapses to j
			else if u.is_empty() || engfmt::is_currency(u) {u.to_string()}
			else {format!("{}{u}", self.spacer)};

		if real == zero {
			if sign == '-' {format!("-j{mag}")} else {format!("j{mag}")}
		}
		else {format!("{real} {sign} j{mag}")}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use num_complex::Complex64;

	fn cplx(re: f64, im: f64, units: &str) -> Value {Value::new(Complex64::new(re, im), units)}

	#[test]
	fn complex_composition() {
		let d = Display::default();
		assert_eq!(d.format(&cplx(1.0, 1.0, "")), "1 + j");
		assert_eq!(d.format(&cplx(1.0, -1.0, "")), "1 - j");
		assert_eq!(d.format(&cplx(0.0, -1.0, "")), "-j");
		assert_eq!(d.format(&cplx(0.0, 2.0, "")), "j2");
		assert_eq!(d.format(&cplx(3.0, 0.0, "")), "3");
		assert_eq!(d.format(&cplx(3.0, 1e-9, "")), "3 + j1n");
		assert_eq!(d.format(&cplx(0.0, 1.0, "V")), "j V");
		assert_eq!(d.format(&cplx(1e3, 2e3, "Ohm")), "1 kOhm + j2 kOhm");
		assert_eq!(d.format(&cplx(1.0, -2.0, "$")), "$1 - j$2");
		assert_eq!(d.format(&cplx(-1.0, -1.0, "$")), "-$1 - j$");
	}

	#[test]
	fn modes_and_reset() {
		let mut d = Display::default();
		d.set_mode(Mode::Fix, Some(2));
		assert_eq!(d.format(&Value::new(3.14159, "")), "3.14");
		d.set_mode(Mode::Hex, None);
		assert_eq!(d.digits(), 2);
		assert_eq!(d.format(&Value::new(255.0, "V")), "0xff");
		d.set_mode(Mode::VBin, Some(8));
		assert_eq!(d.format(&Value::new(5.0, "")), "'b00000101");
		d.reset();
		assert_eq!((d.mode(), d.digits()), (Mode::Eng, 4));
		assert_eq!(d.format(&Value::new(-0.0, "")), "0");
	}
}
