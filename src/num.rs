//! Real/complex value algebra with checked domains.

use num_complex::Complex64;
use crate::EcError;

///stack/heap number: reals stay real until an operation needs the complex plane
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Num {
	Real(f64),
	Cplx(Complex64)
}
pub use Num::*;

impl Default for Num {
	fn default() -> Self {Real(0.0)}
}

impl From<f64> for Num {
	fn from(x: f64) -> Self {Real(x)}
}

impl From<Complex64> for Num {
	fn from(z: Complex64) -> Self {Cplx(z)}
}

impl Num {
	#[inline(always)]
	pub fn to_complex(self) -> Complex64 {
		match self {
			Real(x) => Complex64::new(x, 0.0),
			Cplx(z) => z
		}
	}
	#[inline(always)]
	///real part
	pub fn re(self) -> f64 {self.to_complex().re}
	#[inline(always)]
	///imaginary part
	pub fn im(self) -> f64 {self.to_complex().im}
	#[inline(always)]
	pub fn is_zero(self) -> bool {self.re() == 0.0 && self.im() == 0.0}

	#[inline(always)]
	///real value or complaint about a complex argument
	pub fn real(self) -> Result<f64, EcError> {
		match self {
			Real(x) => Ok(x),
			Cplx(_) => Err(EcError::NotReal)
		}
	}

	pub fn add(self, rhs: Num) -> Num {
		match (self, rhs) {
			(Real(a), Real(b)) => Real(a + b),
			(a, b) => Cplx(a.to_complex() + b.to_complex())
		}
	}
	pub fn sub(self, rhs: Num) -> Num {
		match (self, rhs) {
			(Real(a), Real(b)) => Real(a - b),
			(a, b) => Cplx(a.to_complex() - b.to_complex())
		}
	}
	pub fn mul(self, rhs: Num) -> Num {
		match (self, rhs) {
			(Real(a), Real(b)) => Real(a * b),
			(a, b) => Cplx(a.to_complex() * b.to_complex())
		}
	}
	pub fn div(self, rhs: Num) -> Result<Num, EcError> {
		if rhs.is_zero() {return Err(EcError::DivisionByZero);}
		Ok(match (self, rhs) {
			(Real(a), Real(b)) => Real(a / b),
			(a, b) => Cplx(a.to_complex() / b.to_complex())
		})
	}
	pub fn neg(self) -> Num {
		match self {
			Real(x) => Real(-x),
			Cplx(z) => Cplx(-z)
		}
	}
	///magnitude
	pub fn abs(self) -> f64 {
		match self {
			Real(x) => x.abs(),
			Cplx(z) => z.norm()
		}
	}
	///phase in radians
	pub fn arg(self) -> f64 {
		self.im().atan2(self.re())
	}
}

///register contents: a number and its units label
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Value {
	pub num: Num,
	pub units: String
}
impl Value {
	pub fn new(num: impl Into<Num>, units: impl Into<String>) -> Self {
		Self {num: num.into(), units: units.into()}
	}
}

///wrap a real result, infinities out of finite input overflowed
pub fn finite(x: f64, r: f64) -> Result<Num, EcError> {
	if r.is_infinite() && x.is_finite() {Err(EcError::Range)}
	else if r.is_nan() && !x.is_nan() {Err(EcError::Domain)}
	else {Ok(Real(r))}
}

///truncated quotient, rounded toward negative infinity
pub fn floordiv(y: Num, x: Num) -> Result<Num, EcError> {
	let (y, x) = (y.real()?, x.real()?);
	if x == 0.0 {return Err(EcError::DivisionByZero);}
	Ok(Real((y / x).floor()))
}

///remainder with the sign of the divisor
pub fn modulo(y: Num, x: Num) -> Result<Num, EcError> {
	let (y, x) = (y.real()?, x.real()?);
	if x == 0.0 {return Err(EcError::DivisionByZero);}
	let r = y - x * (y / x).floor();
	Ok(Real(if r == 0.0 {0.0} else {r}))
}

///y raised to x, negative bases with fractional exponents go complex
pub fn pow(y: Num, x: Num) -> Result<Num, EcError> {
	match (y, x) {
		(Real(b), Real(e)) => {
			if b == 0.0 && e < 0.0 {return Err(EcError::DivisionByZero);}
			if b < 0.0 && e.fract() != 0.0 {
				return Ok(Cplx(Complex64::new(b, 0.0).powc(Complex64::new(e, 0.0))));
			}
			let r = b.powf(e);
			if r.is_infinite() && b.is_finite() && e.is_finite() {Err(EcError::Range)}
			else {Ok(Real(r))}
		},
		(b, e) => {
			if b.is_zero() {
				return if e.im() == 0.0 && e.re() > 0.0 {Ok(Cplx(Complex64::new(0.0, 0.0)))}
				else {Err(EcError::DivisionByZero)};
			}
			Ok(Cplx(b.to_complex().powc(e.to_complex())))
		}
	}
}

///natural exponential
pub fn exp(x: Num) -> Result<Num, EcError> {
	match x {
		Real(x) => finite(x, x.exp()),
		Cplx(z) => Ok(Cplx(z.exp()))
	}
}

///natural logarithm, negative reals go complex
pub fn ln(x: Num) -> Result<Num, EcError> {
	if x.is_zero() {return Err(EcError::Domain);}
	match x {
		Real(x) if x > 0.0 => Ok(Real(x.ln())),
		x => Ok(Cplx(x.to_complex().ln()))
	}
}

///square root, negative reals go complex
pub fn sqrt(x: Num) -> Num {
	match x {
		Real(x) if x >= 0.0 => Real(x.sqrt()),
		x => Cplx(x.to_complex().sqrt())
	}
}

///logarithm of a positive real to a fixed base
pub fn log(x: Num, base: f64) -> Result<Num, EcError> {
	let x = x.real()?;
	if x <= 0.0 {return Err(EcError::Domain);}
	Ok(Real(x.log(base)))
}

///factorial of the rounded argument
pub fn factorial(x: Num) -> Result<Num, EcError> {
	let n = x.real()?.round();
	if n < 0.0 || n.is_nan() {return Err(EcError::Domain);}
	if n > 170.0 {return Err(EcError::Range);}
	Ok(Real((1..=n as u32).fold(1.0, |acc, k| acc * k as f64)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn real_stays_real() {
		assert_eq!(Real(2.0).add(Real(3.0)), Real(5.0));
		assert_eq!(Real(7.0).div(Real(2.0)).unwrap(), Real(3.5));
	}

	#[test]
	fn zero_divisors() {
		assert!(matches!(Real(1.0).div(Real(0.0)), Err(EcError::DivisionByZero)));
		assert!(matches!(floordiv(Real(1.0), Real(0.0)), Err(EcError::DivisionByZero)));
		assert!(matches!(modulo(Real(1.0), Real(0.0)), Err(EcError::DivisionByZero)));
		assert!(matches!(pow(Real(0.0), Real(-1.0)), Err(EcError::DivisionByZero)));
	}

	#[test]
	fn floor_semantics() {
		assert_eq!(floordiv(Real(-7.0), Real(2.0)).unwrap(), Real(-4.0));
		assert_eq!(modulo(Real(-7.0), Real(2.0)).unwrap(), Real(1.0));
		assert_eq!(modulo(Real(7.0), Real(-2.0)).unwrap(), Real(-1.0));
	}

	#[test]
	fn into_complex_plane() {
		assert_eq!(sqrt(Real(-4.0)), Cplx(Complex64::new(0.0, 2.0)));
		let l = ln(Real(-1.0)).unwrap();
		assert!((l.im() - std::f64::consts::PI).abs() < 1e-12);
		let r = pow(Real(-8.0), Real(1.0/3.0)).unwrap();
		assert!((r.re() - 1.0).abs() < 1e-9 && (r.im() - 3f64.sqrt()).abs() < 1e-9);
	}

	#[test]
	fn domains() {
		assert!(matches!(ln(Real(0.0)), Err(EcError::Domain)));
		assert!(matches!(log(Real(-1.0), 10.0), Err(EcError::Domain)));
		assert!(matches!(log(Cplx(Complex64::new(1.0, 1.0)), 10.0), Err(EcError::NotReal)));
		assert!(matches!(exp(Real(1000.0)), Err(EcError::Range)));
		assert!(matches!(factorial(Real(171.0)), Err(EcError::Range)));
		assert_eq!(factorial(Real(5.0)).unwrap(), Real(120.0));
	}
}
