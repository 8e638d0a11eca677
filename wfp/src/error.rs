use crate::filter_engine::layer::Layer;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid string argument: {0}")]
    InvalidString(String),
    #[error("filter is missing required field: {0}")]
    MissingField(&'static str),
    #[error("condition {condition} is not valid at layer {layer}")]
    InvalidCondition {
        condition: &'static str,
        layer: Layer,
    },
    #[error("filter rejected: {name}")]
    Rejected { name: String },
    #[error("filter engine: 0x{0:08X}")]
    Engine(u32),
    #[error("network interface not found: {0}")]
    InterfaceNotFound(String),
    #[error("filter engine is not open")]
    InvalidState,
}
