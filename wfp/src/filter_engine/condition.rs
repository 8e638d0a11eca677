use core::fmt;

use crate::{error::Error, filter_engine::layer::Layer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
}

/// A predicate evaluated by the engine when traffic reaches a filter's layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Condition {
    /// Compares the interface the traffic passes through.
    InterfaceIndex { op: CompareOp, index: u32 },
    /// Matches frames that carry layer-2 flag metadata.
    L2Flags,
}

impl Condition {
    pub fn interface_index(index: u32, op: CompareOp) -> Self {
        Condition::InterfaceIndex { op, index }
    }

    pub fn l2_flags() -> Self {
        Condition::L2Flags
    }

    pub fn is_valid_at(&self, layer: Layer) -> bool {
        match self {
            Condition::InterfaceIndex { .. } => layer.is_ale_auth() || layer.is_mac_frame(),
            Condition::L2Flags => layer.is_mac_frame(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Condition::InterfaceIndex { .. } => "FWPM_CONDITION_INTERFACE_INDEX",
            Condition::L2Flags => "FWPM_CONDITION_L2_FLAGS",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::InterfaceIndex { op, index } => {
                let op = match op {
                    CompareOp::Eq => "==",
                    CompareOp::Neq => "!=",
                };
                write!(f, "{} {} {}", self.kind(), op, index)
            }
            Condition::L2Flags => f.write_str(self.kind()),
        }
    }
}

/// Conditions for one filter, AND-combined by the engine.
///
/// A builder is bound to a layer and refuses conditions the layer does not
/// support. The null builder has no layer and no conditions; an empty set
/// matches all traffic at the filter's layer. Duplicates are kept as given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConditionBuilder {
    layer: Option<Layer>,
    conditions: Vec<Condition>,
}

impl ConditionBuilder {
    pub fn new(layer: Layer) -> Self {
        Self {
            layer: Some(layer),
            conditions: Vec::new(),
        }
    }

    pub fn null() -> Self {
        Self {
            layer: None,
            conditions: Vec::new(),
        }
    }

    pub fn add_condition(&mut self, condition: Condition) -> Result<&mut Self, Error> {
        let Some(layer) = self.layer else {
            return Err(Error::MissingField("layer"));
        };
        if !condition.is_valid_at(layer) {
            return Err(Error::InvalidCondition {
                condition: condition.kind(),
                layer,
            });
        }

        self.conditions.push(condition);
        Ok(self)
    }

    /// Conditions bound to one layer cannot be attached to a filter at another.
    /// The null builder fits every layer.
    pub fn check_layer(&self, layer: Layer) -> Result<(), Error> {
        match self.layer {
            Some(own) if own != layer => Err(Error::InvalidCondition {
                condition: self.conditions.first().map_or("none", Condition::kind),
                layer,
            }),
            _ => Ok(()),
        }
    }

    pub fn layer(&self) -> Option<Layer> {
        self.layer
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
