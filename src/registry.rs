//! Action model and name/pattern dispatch.

use std::collections::HashMap;
use regex::Regex;
use crate::{State, Io, EcError};
use crate::num::Num;
use crate::display::Mode;
use crate::engfmt::Converter;

///units rule evaluated on the operand units `[x, y, ...]` before they were popped
pub type UnitsRule = fn(&State, &[&str]) -> String;

///units attached to an action's results
#[derive(Clone, Copy)]
pub enum Units {
	Fixed(&'static str),
	Rule(UnitsRule)
}
impl Units {
	#[inline(always)]
	pub fn resolve(&self, st: &State, operands: &[&str]) -> String {
		match self {
			Units::Fixed(u) => u.to_string(),
			Units::Rule(f) => f(st, operands)
		}
	}
}

pub type CommandFn = fn(&mut State, &mut Io) -> Result<(), EcError>;
pub type ConstantFn = fn(&mut State) -> Num;
pub type UnaryFn = fn(&State, Num) -> Result<Num, EcError>;
///called with (y, x)
pub type BinaryFn = fn(&State, Num, Num) -> Result<Num, EcError>;
///called with (y, x), returns (new x, new y)
pub type BinaryIoFn = fn(&State, Num, Num) -> Result<(Num, Num), EcError>;

///shape of an action: what it pops and pushes, and how it is triggered
#[derive(Clone, Copy)]
pub enum Kind {
	///pops nothing, pushes nothing
	Command(CommandFn),
	///pushes one
	Constant(ConstantFn),
	///pops x, pushes one
	UnaryOp(UnaryFn),
	///pops x and y, pushes one
	BinaryOp(BinaryFn),
	///pops x and y, pushes y then x, with a units rule for the new y
	BinaryIoOp(BinaryIoFn, Units),
	///peeks x, pushes it or a function of it
	Dup(Option<UnaryFn>),
	//the rest are triggered by a pattern and receive its capture groups
	///numeric literal
	Number(&'static str, Converter),
	///display mode, optional digit count in the first group
	SetFormat(&'static str, Mode),
	///bind x to a name without popping
	Store(&'static str),
	///push a bound variable
	Recall(&'static str),
	///replace the units of x
	SetUnits(&'static str),
	///convert x to other units
	Convert(&'static str),
	///interpolate and print text
	Print(&'static str),
	///help on a topic
	Help(&'static str),
	///documentation group header, never resolved
	Category
}
impl Kind {
	#[inline(always)]
	///pattern of a pattern-triggered action
	pub fn pattern(&self) -> Option<&'static str> {
		match *self {
			Kind::Number(p, _) | Kind::SetFormat(p, _) | Kind::Store(p) | Kind::Recall(p)
			| Kind::SetUnits(p) | Kind::Convert(p) | Kind::Print(p) | Kind::Help(p) => Some(p),
			_ => None
		}
	}
}

///one resolvable operation with its documentation
#[derive(Clone, Copy)]
pub struct Action {
	pub name: &'static str,
	pub aliases: &'static [&'static str],
	pub kind: Kind,
	pub units: Units,
	///half-line summary for `help`
	pub description: &'static str,
	///stack effect for `?name`
	pub synopsis: &'static str
}
impl Action {
	pub fn new(name: &'static str, kind: Kind) -> Self {
		Self {name, aliases: &[], kind, units: Units::Fixed(""), description: "", synopsis: ""}
	}
	///header grouping the actions that follow it
	pub fn category(title: &'static str) -> Self {
		Self {description: title, ..Self::new("", Kind::Category)}
	}
	pub fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
		self.aliases = aliases;
		self
	}
	pub fn units(mut self, units: &'static str) -> Self {
		self.units = Units::Fixed(units);
		self
	}
	pub fn units_rule(mut self, rule: UnitsRule) -> Self {
		self.units = Units::Rule(rule);
		self
	}
	pub fn describe(mut self, description: &'static str, synopsis: &'static str) -> Self {
		self.description = description;
		self.synopsis = synopsis;
		self
	}
	#[inline(always)]
	///name or alias of this action
	pub fn answers_to(&self, name: &str) -> bool {
		!self.name.is_empty() && (self.name == name || self.aliases.contains(&name))
	}
}

///catalog partitioned into exact names and ordered patterns
pub struct Registry {
	actions: Vec<Action>,
	exact: HashMap<&'static str, usize>,
	patterns: Vec<(Regex, usize)>
}
impl Registry {
	///index a catalog, rejecting duplicate names and bad patterns
	pub fn new(actions: Vec<Action>) -> Result<Self, EcError> {
		let mut exact = HashMap::new();
		let mut patterns = Vec::new();
		let mut pattern_names = Vec::new();
		for (i, a) in actions.iter().enumerate() {
			if let Some(p) = a.kind.pattern() {
				let re = Regex::new(p).map_err(|e| EcError::Catalog(format!("{}: {e}", a.name)))?;
				patterns.push((re, i));
				pattern_names.push(a.name);
			}
			else if !matches!(a.kind, Kind::Category) {
				for n in std::iter::once(&a.name).chain(a.aliases) {
					if exact.insert(*n, i).is_some() {
						return Err(EcError::Catalog(format!("{n}: duplicate name.")));
					}
				}
			}
		}
		for (k, n) in pattern_names.iter().enumerate() {
			if exact.contains_key(n) || pattern_names[..k].contains(n) {
				return Err(EcError::Catalog(format!("{n}: duplicate name.")));
			}
		}
		Ok(Self {actions, exact, patterns})
	}

	///find the action for a token: exact names first, then patterns in order
	pub fn resolve(&self, token: &str) -> Result<(Action, Vec<String>), EcError> {
		if let Some(&i) = self.exact.get(token) {
			return Ok((self.actions[i], Vec::new()));
		}
		self.patterns.iter()
			.find_map(|(re, i)| re.captures(token).map(|c| (self.actions[*i], crate::groups(&c))))
			.ok_or_else(|| EcError::UnrecognizedToken(token.into()))
	}

	///withdraw one exact name, other aliases of the action stay
	pub fn remove(&mut self, name: &str) -> bool {
		self.exact.remove(name).is_some()
	}

	///all names and aliases currently resolvable by exact match
	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.exact.keys().copied()
	}

	///catalog in registration order, categories included
	pub fn actions(&self) -> &[Action] {
		&self.actions
	}

	///action documented under a name or alias
	pub fn topic(&self, name: &str) -> Option<&Action> {
		self.actions.iter().find(|a| a.answers_to(name))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::num::Num::Real;

	fn catalog() -> Vec<Action> {
		vec![
			Action::category("Test"),
			Action::new("one", Kind::Constant(|_| Real(1.0))).aliases(&["uno"]),
			Action::new("e1", Kind::Constant(|_| Real(10.0))),
			Action::new("engnum", Kind::Number(crate::engfmt::ENG_NUM, crate::engfmt::from_eng)),
			Action::new("recall", Kind::Recall(r"\A([a-zA-Z]\w*)\z")),
		]
	}

	#[test]
	fn exact_beats_pattern() {
		let r = Registry::new(catalog()).unwrap();
		let (a, g) = r.resolve("uno").unwrap();
		assert_eq!(a.name, "one");
		assert!(g.is_empty());
		//"e1" is also a valid name for the recall pattern
		assert_eq!(r.resolve("e1").unwrap().0.name, "e1");
	}

	#[test]
	fn patterns_in_order() {
		let r = Registry::new(catalog()).unwrap();
		let (a, g) = r.resolve("10mV").unwrap();
		assert_eq!(a.name, "engnum");
		assert_eq!(g[3], "10");
		assert_eq!(g[5], "V");
		let (a, g) = r.resolve("foo").unwrap();
		assert_eq!(a.name, "recall");
		assert_eq!(g, ["foo"]);
		assert!(matches!(r.resolve("$$"), Err(EcError::UnrecognizedToken(_))));
	}

	#[test]
	fn duplicates_rejected() {
		let mut c = catalog();
		c.push(Action::new("uno", Kind::Constant(|_| Real(1.0))));
		assert!(matches!(Registry::new(c), Err(EcError::Catalog(_))));
		let mut c = catalog();
		c.push(Action::new("one", Kind::Store(r"\A=(\w+)\z")));
		assert!(matches!(Registry::new(c), Err(EcError::Catalog(_))));
	}

	#[test]
	fn remove_one_name() {
		let mut r = Registry::new(catalog()).unwrap();
		assert!(r.remove("one"));
		assert_eq!(r.resolve("one").unwrap().0.name, "recall");
		assert_eq!(r.resolve("uno").unwrap().0.name, "one");
		assert!(r.names().all(|n| n != "one"));
	}
}
