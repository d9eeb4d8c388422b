//! Register stack and named variable store.

use std::collections::{BTreeMap, HashSet};
use crate::num::Value;
use crate::EcError;

///register file, x is the last element
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stack(Vec<Value>);
impl Stack {
	#[inline(always)]
	pub fn push(&mut self, v: Value) {
		self.0.push(v);
	}
	#[inline(always)]
	///remove x, zero if empty
	pub fn pop(&mut self) -> Value {
		self.0.pop().unwrap_or_default()
	}
	#[inline(always)]
	///copy of register `reg` (0 is x), zero if past the end
	pub fn peek(&self, reg: usize) -> Value {
		self.get(reg).cloned().unwrap_or_default()
	}
	#[inline(always)]
	pub fn get(&self, reg: usize) -> Option<&Value> {
		self.0.len().checked_sub(reg + 1).map(|i| &self.0[i])
	}
	pub fn clear(&mut self) {
		self.0.clear();
	}
	pub fn len(&self) -> usize {self.0.len()}
	pub fn is_empty(&self) -> bool {self.0.is_empty()}
	///registers from the deepest up to x
	pub fn iter(&self) -> impl Iterator<Item = &Value> {
		self.0.iter()
	}
}

///named variables, guarded against built-in names
#[derive(Clone, Debug)]
pub struct Heap {
	vars: BTreeMap<String, Value>,
	///variables a cleared heap starts with
	initial: BTreeMap<String, Value>,
	///names still claimed by built-in actions
	reserved: HashSet<String>,
	allow_override: bool
}
impl Heap {
	pub fn new(initial: BTreeMap<String, Value>, reserved: impl IntoIterator<Item = String>, allow_override: bool) -> Self {
		Self {
			vars: initial.clone(),
			initial,
			reserved: reserved.into_iter().collect(),
			allow_override
		}
	}

	///bind a name, `Ok(true)` if this took the name away from a built-in
	pub fn store(&mut self, name: &str, v: Value) -> Result<bool, EcError> {
		let overrode = if self.reserved.contains(name) {
			if !self.allow_override {return Err(EcError::ReservedNameCollision(name.into()));}
			self.reserved.remove(name);
			true
		}
		else {false};
		self.vars.insert(name.to_string(), v);
		Ok(overrode)
	}

	pub fn recall(&self, name: &str) -> Result<Value, EcError> {
		self.vars.get(name).cloned().ok_or_else(|| EcError::VariableNotFound(name.into()))
	}
	#[inline(always)]
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.vars.get(name)
	}

	///back to the initial variables, overridden built-ins stay gone
	pub fn clear(&mut self) {
		self.vars = self.initial.clone();
	}
	pub fn set_initial(&mut self, initial: BTreeMap<String, Value>) {
		self.vars = initial.clone();
		self.initial = initial;
	}
	pub fn set_allow_override(&mut self, allow: bool) {
		self.allow_override = allow;
	}

	///variables sorted by name
	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.vars.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stack_defaults_past_end() {
		let mut s = Stack::default();
		s.push(Value::new(1.0, "V"));
		s.push(Value::new(2.0, ""));
		assert_eq!(s.peek(1), Value::new(1.0, "V"));
		assert_eq!(s.peek(5), Value::default());
		assert_eq!(s.pop(), Value::new(2.0, ""));
		s.pop();
		assert_eq!(s.pop(), Value::new(0.0, ""));
		assert!(s.is_empty());
	}

	#[test]
	fn reserved_names() {
		let mut h = Heap::new(BTreeMap::new(), ["pi".to_string()], false);
		assert!(matches!(h.store("pi", Value::default()), Err(EcError::ReservedNameCollision(_))));
		h.set_allow_override(true);
		assert!(h.store("pi", Value::new(3.0, "")).unwrap());
		assert!(!h.store("pi", Value::new(4.0, "")).unwrap());	//only once
		assert_eq!(h.recall("pi").unwrap(), Value::new(4.0, ""));
	}

	#[test]
	fn clear_restores_initial() {
		let mut init = BTreeMap::new();
		init.insert("Rref".to_string(), Value::new(50.0, "Ohms"));
		let mut h = Heap::new(init, Vec::new(), true);
		h.store("x1", Value::new(1.0, "")).unwrap();
		h.clear();
		assert!(matches!(h.recall("x1"), Err(EcError::VariableNotFound(_))));
		assert_eq!(h.get("Rref").unwrap().units, "Ohms");
	}
}
