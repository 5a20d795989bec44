//! Agent configuration.
//!
//! Each agent is bound at startup to an immutable config: identity, system
//! prompt, sampling temperature, and token budget. Defaults reproduce the
//! two stock agents; prompts can be overridden through the environment.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default system prompt for the Data Specialist agent.
pub const DATA_SPECIALIST_PROMPT: &str = "\
You are a Data Specialist AI agent. When analyzing data, you should:
1. Calculate specific metrics (averages, correlations, patterns)
2. Focus on concrete relationships in the data
3. Identify clear trends between variables
4. Use actual numbers and percentages
5. Avoid generic observations

For example, instead of saying \"sales vary considerably\", say \"sales range from $80 to $200, with an average of $X\".
Instead of \"there may be correlations\", calculate and state the actual correlations.

Format your analysis with specific sections:
- Sales Analysis (with actual calculations)
- Customer Feedback Distribution (with percentages)
- Regional Performance (with specific metrics)
- Cross-variable Correlations (with calculated values)";

/// Default system prompt for the Report Generator agent.
pub const REPORT_GENERATOR_PROMPT: &str = "\
You are a Report Generator AI agent. When creating reports:
1. Focus on the specific data provided
2. Include actual calculations and metrics
3. Draw concrete conclusions
4. Make specific recommendations based on the numbers
5. Avoid generic statements

Your reports should follow this structure:
1. Data Summary
   - Exact counts and distributions
   - Key metrics calculated from the data
2. Specific Findings
   - Calculated correlations
   - Actual performance by region/feedback
3. Actionable Insights
   - Based on the specific numbers
   - Tied to concrete data points

For example, instead of \"sales vary\", say \"sales show a 150% variation from lowest ($80) to highest ($200)\".
Instead of \"mixed feedback\", say \"40% great, 40% poor, 20% medium feedback distribution\".";

// ============================================================================
// TOOL DECLARATIONS
// ============================================================================

/// A tool an agent declares it can use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ToolSpec {
    /// Tool name
    pub name: String,
    /// What the tool does
    pub description: String,
    /// JSON schema for the tool input
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub input_schema: serde_json::Value,
}

// ============================================================================
// AGENT CONFIG
// ============================================================================

/// Immutable configuration for a single agent, validated at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AgentConfig {
    /// Agent identity, used as the role tag in conversations
    pub name: String,
    /// Short description of what the agent does
    pub description: String,
    /// System instruction prefix for every generation call
    pub system_prompt: String,
    /// Sampling temperature in [0, 1]
    pub temperature: f32,
    /// Token budget per generation call
    pub max_tokens: i32,
    /// Declared tools, if any
    pub tools: Option<Vec<ToolSpec>>,
}

impl AgentConfig {
    /// Create a validated agent config.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        system_prompt: impl Into<String>,
        temperature: f32,
        max_tokens: i32,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let system_prompt = system_prompt.into();

        if name.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "name".to_string(),
            });
        }
        if system_prompt.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "system_prompt".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&temperature) {
            return Err(ConfigError::InvalidValue {
                field: "temperature".to_string(),
                value: temperature.to_string(),
                reason: "must be in [0, 1]".to_string(),
            });
        }
        if max_tokens <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_tokens".to_string(),
                value: max_tokens.to_string(),
                reason: "must be positive".to_string(),
            });
        }

        Ok(Self {
            name,
            description: description.into(),
            system_prompt,
            temperature,
            max_tokens,
            tools: None,
        })
    }

    /// Attach tool declarations.
    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Names of the declared tools, empty when none are declared.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|t| t.name.clone())
            .collect()
    }
}

// ============================================================================
// STOCK AGENT CONFIGS
// ============================================================================

/// The two agent configs the pipeline runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfigs {
    pub data_specialist: AgentConfig,
    pub report_generator: AgentConfig,
}

impl AgentConfigs {
    /// Build the stock configs, honoring prompt overrides from the
    /// environment.
    ///
    /// Environment variables:
    /// - `TANDEM_DATA_SPECIALIST_PROMPT`: override the analyst prompt
    /// - `TANDEM_REPORT_GENERATOR_PROMPT`: override the reporter prompt
    pub fn from_env() -> Result<Self, ConfigError> {
        let specialist_prompt = std::env::var("TANDEM_DATA_SPECIALIST_PROMPT")
            .unwrap_or_else(|_| DATA_SPECIALIST_PROMPT.to_string());
        let reporter_prompt = std::env::var("TANDEM_REPORT_GENERATOR_PROMPT")
            .unwrap_or_else(|_| REPORT_GENERATOR_PROMPT.to_string());

        Self::with_prompts(&specialist_prompt, &reporter_prompt)
    }

    /// Build the stock configs with explicit prompts.
    pub fn with_prompts(
        specialist_prompt: &str,
        reporter_prompt: &str,
    ) -> Result<Self, ConfigError> {
        let data_specialist = AgentConfig::new(
            "Data Specialist",
            "Analyzes patterns and correlations in data",
            specialist_prompt,
            0.3,
            1500,
        )?
        .with_tools(vec![ToolSpec {
            name: "analyze_correlation".to_string(),
            description: "Calculate correlation between variables".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "variable1": {"type": "array", "description": "First variable"},
                    "variable2": {"type": "array", "description": "Second variable"}
                }
            }),
        }]);

        let report_generator = AgentConfig::new(
            "Report Generator",
            "Creates structured reports from analysis",
            reporter_prompt,
            0.7,
            2000,
        )?;

        Ok(Self {
            data_specialist,
            report_generator,
        })
    }
}

impl Default for AgentConfigs {
    fn default() -> Self {
        // Compiled-in prompts are non-empty and within range.
        Self::with_prompts(DATA_SPECIALIST_PROMPT, REPORT_GENERATOR_PROMPT)
            .unwrap_or_else(|_| unreachable!("stock agent configs are valid"))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_configs() {
        let configs = AgentConfigs::default();

        assert_eq!(configs.data_specialist.name, "Data Specialist");
        assert_eq!(configs.data_specialist.temperature, 0.3);
        assert_eq!(configs.data_specialist.max_tokens, 1500);
        assert_eq!(
            configs.data_specialist.tool_names(),
            vec!["analyze_correlation".to_string()]
        );

        assert_eq!(configs.report_generator.name, "Report Generator");
        assert_eq!(configs.report_generator.temperature, 0.7);
        assert_eq!(configs.report_generator.max_tokens, 2000);
        assert!(configs.report_generator.tool_names().is_empty());
    }

    #[test]
    fn test_temperature_out_of_range_rejected() {
        let result = AgentConfig::new("a", "b", "prompt", 1.5, 100);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "temperature"
        ));
    }

    #[test]
    fn test_non_positive_max_tokens_rejected() {
        let result = AgentConfig::new("a", "b", "prompt", 0.5, 0);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "max_tokens"
        ));
    }

    #[test]
    fn test_empty_prompt_rejected() {
        let result = AgentConfig::new("a", "b", "", 0.5, 100);
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired { ref field }) if field == "system_prompt"
        ));
    }

    #[test]
    fn test_tool_names_empty_without_tools() {
        let config = AgentConfig::new("a", "b", "prompt", 0.5, 100).unwrap();
        assert!(config.tool_names().is_empty());
    }
}
