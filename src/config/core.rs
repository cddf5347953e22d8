use serde::{Deserialize, Serialize};

use crate::discovery::DEFAULT_FACTORIES;
use crate::extraction::{ExtractionOptions, RefCheck, RefPolicy};
use crate::oracle::source::DEFAULT_INT32_NAMES;
use crate::output::OutputFormat;

/// Root configuration structure, read from `.command-shapes.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ShapesConfig {
    /// Type name configuration
    #[serde(default)]
    pub types: Option<TypesConfig>,

    /// Ref parameter check configuration
    #[serde(default)]
    pub ref_check: Option<RefCheckConfig>,

    /// Command factory discovery configuration
    #[serde(default)]
    pub discovery: Option<DiscoveryConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypesConfig {
    /// Type names treated as the codegen `Int32`
    #[serde(default = "default_int32_names")]
    pub int32: Vec<String>,

    /// Ref wrapper names accepted by the `string-literal` ref check
    #[serde(default = "default_ref_wrappers")]
    pub ref_wrappers: Vec<String>,
}

impl Default for TypesConfig {
    fn default() -> Self {
        Self {
            int32: default_int32_names(),
            ref_wrappers: default_ref_wrappers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RefCheckConfig {
    #[serde(default)]
    pub mode: RefCheck,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Function names whose calls declare supported commands
    #[serde(default = "default_factories")]
    pub factories: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            factories: default_factories(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

fn default_int32_names() -> Vec<String> {
    DEFAULT_INT32_NAMES.iter().map(|s| s.to_string()).collect()
}

fn default_ref_wrappers() -> Vec<String> {
    RefPolicy::default().wrappers
}

fn default_factories() -> Vec<String> {
    DEFAULT_FACTORIES.iter().map(|s| s.to_string()).collect()
}

impl ShapesConfig {
    pub fn int32_names(&self) -> Vec<String> {
        self.types.clone().unwrap_or_default().int32
    }

    pub fn ref_policy(&self) -> RefPolicy {
        RefPolicy {
            check: self.ref_check.clone().unwrap_or_default().mode,
            wrappers: self.types.clone().unwrap_or_default().ref_wrappers,
        }
    }

    pub fn factories(&self) -> Vec<String> {
        self.discovery.clone().unwrap_or_default().factories
    }

    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output.as_ref().and_then(|output| output.format)
    }

    pub fn extraction_options(&self) -> ExtractionOptions {
        ExtractionOptions {
            ref_policy: self.ref_policy(),
        }
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.int32_names().is_empty() {
            return Err("[types] int32 must name at least one type".into());
        }
        let policy = self.ref_policy();
        if policy.check == RefCheck::StringLiteral && policy.wrappers.is_empty() {
            return Err(
                "[types] ref_wrappers must not be empty when [ref_check] mode is \"string-literal\""
                    .into(),
            );
        }
        if self.factories().is_empty() {
            return Err("[discovery] factories must name at least one function".into());
        }
        Ok(())
    }
}
