#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid weight '{text}': weights are whole numbers from 0 to {max}", max = i64::MAX)]
    InvalidWeight { text: String },

    #[error("invalid count '{text}'")]
    InvalidCount { text: String },

    #[error("a random definition is required")]
    EmptyDefinition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    #[error("the sum of the weights cannot be more than {max}", max = i64::MAX)]
    WeightOverflow,

    #[error("nothing is selectable: the total weight is zero")]
    Unselectable,
}
