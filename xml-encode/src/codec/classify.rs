use crate::{
	codec::{
		Codec,
		StrategyFn,
	},
	context::Context,
	errors,
	value::Value,
	Result,
};
use std::{
	fmt,
	sync::Arc,
};

/// Encoding behaviour chosen for a value
#[derive(Clone)]
pub enum Strategy {
	/// Encode as mapping container
	Mapping,
	/// Encode as sequence container
	Sequence,
	/// Encode as record container
	Record,
	/// Encode as leaf text (or attribute)
	Primitive,
	/// Contribute nothing
	Skip,
	/// Caller-supplied strategy
	Custom(Arc<StrategyFn>),
}

impl fmt::Debug for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Mapping => f.write_str("Mapping"),
			Self::Sequence => f.write_str("Sequence"),
			Self::Record => f.write_str("Record"),
			Self::Primitive => f.write_str("Primitive"),
			Self::Skip => f.write_str("Skip"),
			Self::Custom(_) => f.write_str("Custom"),
		}
	}
}

impl Codec {
	/// Choose the strategy for a value; uses the `classify_with` override if present
	pub fn classify(&self, value: &Value, context: &Context<'_>) -> Result<Strategy> {
		match &self.classify {
			Some(classify) => classify(self, value, context),
			None => self.default_classify(value, context),
		}
	}

	/// Default classification
	///
	/// Strategies registered for the concrete type of the value win; after that the shape of the
	/// value decides.  `Value::None` is skipped, opaque values without registration are rejected.
	pub fn default_classify(&self, value: &Value, _context: &Context<'_>) -> Result<Strategy> {
		if let Some(strategy) = value.type_id().and_then(|id| self.type_strategies.get(&id)) {
			return Ok(Strategy::Custom(strategy.clone()));
		}
		Ok(match value {
			Value::None => Strategy::Skip,
			Value::Mapping(_) => Strategy::Mapping,
			Value::Sequence(_) => Strategy::Sequence,
			Value::Record(_) => Strategy::Record,
			Value::Bool(_) | Value::Int(_) | Value::UInt(_) | Value::Float(_) | Value::Str(_) => {
				Strategy::Primitive
			},
			Value::Opaque(_) => return Err(errors::unsupported_type(value.type_name())),
		})
	}
}
