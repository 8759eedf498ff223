use serde::Deserialize;

/// The part of a job's config.xml that declares build parameters.
///
/// Works for any job kind (`project`, `flow-definition`, ..) since only
/// `properties` is read.
#[derive(Debug, Deserialize)]
pub struct JobDefinition {
    #[serde(default)]
    properties: Option<JobProperties>,
}

#[derive(Debug, Deserialize)]
struct JobProperties {
    #[serde(rename = "hudson.model.ParametersDefinitionProperty")]
    parameters_definition_property: Option<ParameterDefinitions>,
}

#[derive(Debug, Deserialize)]
struct ParameterDefinitions {
    #[serde(rename = "parameterDefinitions")]
    wrapper: ParameterDefinitionsWrapper,
}

#[derive(Debug, Deserialize)]
struct ParameterDefinitionsWrapper {
    #[serde(rename = "$value", default)]
    parameters: Vec<ParameterDefinition>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ChoiceList {
    #[serde(default)]
    pub string: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Choices {
    pub a: ChoiceList,
}

/// Unknown parameter kinds fail deserialization.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub enum ParameterDefinition {
    #[serde(rename = "hudson.model.StringParameterDefinition")]
    StringParam {
        name: String,
        description: Option<String>,
        #[serde(rename = "defaultValue")]
        default_value: Option<String>,
        trim: Option<bool>,
    },
    #[serde(rename = "hudson.model.TextParameterDefinition")]
    TextParam {
        name: String,
        description: Option<String>,
        #[serde(rename = "defaultValue")]
        default_value: Option<String>,
    },
    #[serde(rename = "hudson.model.BooleanParameterDefinition")]
    BoolParam {
        name: String,
        description: Option<String>,
        #[serde(rename = "defaultValue")]
        default_value: Option<bool>,
    },
    #[serde(rename = "hudson.model.ChoiceParameterDefinition")]
    ChoiceParam {
        name: String,
        description: Option<String>,
        choices: Option<Choices>,
    },
    #[serde(rename = "hudson.model.PasswordParameterDefinition")]
    PasswordParam {
        name: String,
        description: Option<String>,
    },
}

impl ParameterDefinition {
    pub fn name(&self) -> &str {
        match self {
            ParameterDefinition::StringParam { name, .. }
            | ParameterDefinition::TextParam { name, .. }
            | ParameterDefinition::BoolParam { name, .. }
            | ParameterDefinition::ChoiceParam { name, .. }
            | ParameterDefinition::PasswordParam { name, .. } => name,
        }
    }

    /// Default as the server would submit it; the first choice for choices.
    pub fn default_value(&self) -> Option<String> {
        match self {
            ParameterDefinition::StringParam { default_value, .. }
            | ParameterDefinition::TextParam { default_value, .. } => default_value.clone(),
            ParameterDefinition::BoolParam { default_value, .. } => {
                Some(default_value.unwrap_or_default().to_string())
            }
            ParameterDefinition::ChoiceParam { choices, .. } => choices
                .as_ref()
                .and_then(|c| c.a.string.first().cloned()),
            ParameterDefinition::PasswordParam { .. } => None,
        }
    }
}

impl JobDefinition {
    pub fn into_parameters(self) -> Vec<ParameterDefinition> {
        self.properties
            .and_then(|p| p.parameters_definition_property)
            .map(|p| p.wrapper.parameters)
            .unwrap_or_default()
    }
}
