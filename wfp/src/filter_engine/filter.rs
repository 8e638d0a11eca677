use crate::{error::Error, filter_engine::layer::Layer, Guid};

/// Coarse precedence of a filter inside its sublayer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WeightClass {
    Min,
    Medium,
    Max,
}

impl WeightClass {
    /// Value of the `FWP_UINT8` weight handed to the engine.
    pub fn value(&self) -> u8 {
        match self {
            WeightClass::Min => 0,
            WeightClass::Medium => 8,
            WeightClass::Max => 15,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Block,
    Permit,
}

/// A complete filter description, detached from the builder that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    pub key: Guid,
    pub name: String,
    pub description: Option<String>,
    pub provider: Guid,
    pub layer: Layer,
    pub sublayer: Guid,
    pub weight: WeightClass,
    pub action: Action,
}

/// Builds [`Filter`] values. Setters overwrite in place, so a builder can be
/// reused for a series of filters that only differ in a few fields.
#[derive(Clone, Debug, Default)]
pub struct FilterBuilder {
    key: Option<Guid>,
    name: Option<String>,
    description: Option<String>,
    provider: Option<Guid>,
    layer: Option<Layer>,
    sublayer: Option<Guid>,
    weight: Option<WeightClass>,
    action: Option<Action>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(&mut self, key: Guid) -> &mut Self {
        self.key = Some(key);
        self
    }

    pub fn name(&mut self, name: &str) -> &mut Self {
        self.name = Some(name.to_owned());
        self
    }

    pub fn description(&mut self, description: &str) -> &mut Self {
        self.description = Some(description.to_owned());
        self
    }

    pub fn provider(&mut self, provider: Guid) -> &mut Self {
        self.provider = Some(provider);
        self
    }

    pub fn layer(&mut self, layer: Layer) -> &mut Self {
        self.layer = Some(layer);
        self
    }

    pub fn sublayer(&mut self, sublayer: Guid) -> &mut Self {
        self.sublayer = Some(sublayer);
        self
    }

    pub fn weight(&mut self, weight: WeightClass) -> &mut Self {
        self.weight = Some(weight);
        self
    }

    pub fn block(&mut self) -> &mut Self {
        self.action = Some(Action::Block);
        self
    }

    pub fn permit(&mut self) -> &mut Self {
        self.action = Some(Action::Permit);
        self
    }

    /// Snapshots the current state. Everything except the description is required.
    pub fn build(&self) -> Result<Filter, Error> {
        let Some(key) = self.key else {
            return Err(Error::MissingField("key"));
        };
        let Some(name) = &self.name else {
            return Err(Error::MissingField("name"));
        };
        let Some(provider) = self.provider else {
            return Err(Error::MissingField("provider"));
        };
        let Some(layer) = self.layer else {
            return Err(Error::MissingField("layer"));
        };
        let Some(sublayer) = self.sublayer else {
            return Err(Error::MissingField("sublayer"));
        };
        let Some(weight) = self.weight else {
            return Err(Error::MissingField("weight"));
        };
        let Some(action) = self.action else {
            return Err(Error::MissingField("action"));
        };

        return Ok(Filter {
            key,
            name: name.clone(),
            description: self.description.clone(),
            provider,
            layer,
            sublayer,
            weight,
            action,
        });
    }
}
