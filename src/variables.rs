//! Expansion of a scheme into the flat variable set templates render against.
//!
//! Every palette slot `K` yields eleven variables: `K-hex`, `K-hex-bgr`,
//! `K-hex-{r,g,b}`, `K-rgb-{r,g,b}` and `K-dec-{r,g,b}`.

use std::collections::BTreeMap;
use std::fmt;

use crate::color::parse_hex_color;
use crate::error::SchemeError;
use crate::scheme::Scheme;

/// Number of variables generated for each palette slot.
pub const VARS_PER_SLOT: usize = 11;

/// One template variable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f32),
    Bool(bool),
}

impl Value {
    /// Section truthiness: `true`, non-empty strings and non-zero numbers.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Str(s) => !s.is_empty(),
            Self::Int(n) => *n != 0,
            Self::Float(x) => *x != 0.0,
            Self::Bool(b) => *b,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Name-to-scalar resolution consumed by the template renderer.
pub trait VariableLookup {
    fn resolve(&self, name: &str) -> Option<&Value>;
}

/// Immutable variable set built from one scheme.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableSet {
    vars: BTreeMap<String, Value>,
}

impl VariableSet {
    /// Expand `scheme` into its full variable set.
    ///
    /// Fails on the first missing required slot or malformed color; no
    /// partial set is ever returned.
    pub fn from_scheme(scheme: &Scheme) -> Result<Self, SchemeError> {
        if let Some(slot) = scheme.missing_slot() {
            return Err(SchemeError::InvalidScheme(format!(
                "palette is missing required slot `{slot}`"
            )));
        }

        let mut builder = VariableSetBuilder::default();
        builder
            .str("scheme-name", &scheme.name)
            .str("scheme-author", &scheme.author)
            .str("scheme-description", &scheme.description)
            .str("scheme-system", &scheme.system)
            .str("scheme-variant", &scheme.variant);

        let slug = scheme.effective_slug();
        builder
            .str("scheme-slug-underscored", &slug.replace('-', "_"))
            .str("scheme-slug", &slug);

        if !scheme.variant.is_empty() {
            builder.flag(&format!("scheme-is-{}-variant", scheme.variant), true);
        }

        for (slot, raw) in &scheme.palette {
            let color = parse_hex_color(raw).map_err(|source| SchemeError::Color {
                slot: slot.clone(),
                source,
            })?;
            builder
                .str(&format!("{slot}-hex"), &color.to_hex())
                .str(&format!("{slot}-hex-bgr"), &color.to_hex_bgr());
            for (suffix, channel) in [("r", color.r), ("g", color.g), ("b", color.b)] {
                builder
                    .str(&format!("{slot}-hex-{suffix}"), &format!("{channel:02x}"))
                    .int(&format!("{slot}-rgb-{suffix}"), i64::from(channel))
                    .float(&format!("{slot}-dec-{suffix}"), f32::from(channel) / 255.0);
            }
        }

        Ok(builder.build())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl VariableLookup for VariableSet {
    fn resolve(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }
}

/// Typed builder for [`VariableSet`].
#[derive(Debug, Default)]
pub struct VariableSetBuilder {
    vars: BTreeMap<String, Value>,
}

impl VariableSetBuilder {
    pub fn str(&mut self, name: &str, value: &str) -> &mut Self {
        self.vars
            .insert(name.to_string(), Value::Str(value.to_string()));
        self
    }

    pub fn int(&mut self, name: &str, value: i64) -> &mut Self {
        self.vars.insert(name.to_string(), Value::Int(value));
        self
    }

    pub fn float(&mut self, name: &str, value: f32) -> &mut Self {
        self.vars.insert(name.to_string(), Value::Float(value));
        self
    }

    pub fn flag(&mut self, name: &str, value: bool) -> &mut Self {
        self.vars.insert(name.to_string(), Value::Bool(value));
        self
    }

    pub fn build(self) -> VariableSet {
        VariableSet { vars: self.vars }
    }
}
