/// A single weighted candidate parsed from a random definition.
///
/// Items with equal values stay distinct entries; repeating a value in the
/// definition raises its aggregate draw probability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub value: String,
    /// Relative likelihood of selection. Non-negative, defaults to 1.
    pub weight: i64,
}

impl Item {
    pub fn new(value: impl Into<String>, weight: i64) -> Self {
        Self {
            value: value.into(),
            weight,
        }
    }
}
