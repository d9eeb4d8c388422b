//! Unit conversions for `>units`.

use phf::phf_map;

///Source of unit conversions, swap in a custom one with `State::custom_converter`.
pub trait UnitConverter {
	///`value` in `from` units expressed in `to` units, `None` if not convertible
	fn convert(&self, value: f64, from: &str, to: &str) -> Option<f64>;
}

///family, scale and offset: base = value*scale + offset
type Entry = (&'static str, f64, f64);

static UNITS: phf::Map<&'static str, Entry> = phf_map! {
	//length, base m
	"m" => ("length", 1.0, 0.0),
	"km" => ("length", 1e3, 0.0),
	"cm" => ("length", 1e-2, 0.0),
	"mm" => ("length", 1e-3, 0.0),
	"um" => ("length", 1e-6, 0.0),
	"in" => ("length", 0.0254, 0.0),
	"ft" => ("length", 0.3048, 0.0),
	"yd" => ("length", 0.9144, 0.0),
	"mi" => ("length", 1609.344, 0.0),
	"nmi" => ("length", 1852.0, 0.0),
	"Å" => ("length", 1e-10, 0.0),
	//mass, base g
	"g" => ("mass", 1.0, 0.0),
	"kg" => ("mass", 1e3, 0.0),
	"lb" => ("mass", 453.59237, 0.0),
	"oz" => ("mass", 28.349523125, 0.0),
	//time, base s
	"s" => ("time", 1.0, 0.0),
	"min" => ("time", 60.0, 0.0),
	"h" => ("time", 3600.0, 0.0),
	"day" => ("time", 86400.0, 0.0),
	//temperature, base K
	"K" => ("temperature", 1.0, 0.0),
	"C" => ("temperature", 1.0, 273.15),
	"°C" => ("temperature", 1.0, 273.15),
	"F" => ("temperature", 0.5555555555555556, 255.3722222222222),
	"°F" => ("temperature", 0.5555555555555556, 255.3722222222222),
};

///Built-in affine conversions within the length, mass, time and temperature families.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConversionTable;
impl UnitConverter for ConversionTable {
	fn convert(&self, value: f64, from: &str, to: &str) -> Option<f64> {
		let (ff, fs, fo) = UNITS.get(from)?;
		let (tf, ts, to) = UNITS.get(to)?;
		(ff == tf).then(|| (value * fs + fo - to) / ts)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: f64, b: f64) -> bool {(a - b).abs() <= 1e-9 * b.abs().max(1.0)}

	#[test]
	fn within_family() {
		let t = ConversionTable;
		assert!(close(t.convert(1.0, "mi", "km").unwrap(), 1.609344));
		assert!(close(t.convert(100.0, "C", "F").unwrap(), 212.0));
		assert!(close(t.convert(32.0, "°F", "K").unwrap(), 273.15));
		assert!(close(t.convert(2.0, "h", "min").unwrap(), 120.0));
	}

	#[test]
	fn across_families() {
		assert_eq!(ConversionTable.convert(1.0, "m", "s"), None);
		assert_eq!(ConversionTable.convert(1.0, "parsec", "m"), None);
	}
}
