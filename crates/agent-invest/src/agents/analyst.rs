//! Analyst roles and the agent that runs one crew stage

use agent_core::{Agent, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::prompts::Prompts;

/// The four analysts, in crew order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalystRole {
    /// Reads the financial metrics
    FinancialAnalyst,
    /// Researches market position on the web
    MarketAnalyst,
    /// Assesses investment risk
    RiskAnalyst,
    /// Writes the final recommendation
    InvestmentAdvisor,
}

impl AnalystRole {
    /// Every role in execution order
    pub const ALL: [Self; 4] = [
        Self::FinancialAnalyst,
        Self::MarketAnalyst,
        Self::RiskAnalyst,
        Self::InvestmentAdvisor,
    ];

    /// Role title given to the model
    pub fn title(self) -> &'static str {
        match self {
            Self::FinancialAnalyst => "Financial Analyst",
            Self::MarketAnalyst => "Market Analyst",
            Self::RiskAnalyst => "Risk Analyst",
            Self::InvestmentAdvisor => "Investment Advisor",
        }
    }

    /// Name of the task this role performs
    pub fn task_name(self) -> &'static str {
        match self {
            Self::FinancialAnalyst => "financial_analysis",
            Self::MarketAnalyst => "market_analysis",
            Self::RiskAnalyst => "risk_assessment",
            Self::InvestmentAdvisor => "investment_recommendation",
        }
    }

    /// Agent name used in logs
    pub fn agent_name(self) -> &'static str {
        match self {
            Self::FinancialAnalyst => "financial_analyst",
            Self::MarketAnalyst => "market_analyst",
            Self::RiskAnalyst => "risk_analyst",
            Self::InvestmentAdvisor => "investment_advisor",
        }
    }

    /// Tool-loop budget, `None` for the tool-less advisor
    pub fn max_iterations(self) -> Option<usize> {
        match self {
            Self::FinancialAnalyst | Self::MarketAnalyst => Some(3),
            Self::RiskAnalyst => Some(10),
            Self::InvestmentAdvisor => None,
        }
    }
}

/// Runs one stage: renders the task with earlier outputs, calls the model,
/// and records the result in the context
pub struct AnalystAgent {
    role: AnalystRole,
    inner: Box<dyn Agent>,
    prompts: Arc<Prompts>,
}

impl AnalystAgent {
    /// Wrap an LLM agent configured for `role`
    pub fn new(role: AnalystRole, inner: Box<dyn Agent>, prompts: Arc<Prompts>) -> Self {
        Self {
            role,
            inner,
            prompts,
        }
    }

    /// The role this agent plays
    pub fn role(&self) -> AnalystRole {
        self.role
    }
}

#[async_trait]
impl Agent for AnalystAgent {
    /// `input` is the ticker; the report date and prior stages come from `context`
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        let date = context.report_date().unwrap_or_default().to_string();
        let prompt =
            self.prompts
                .task_prompt(self.role, &input, &date, context.stage_outputs())?;
        debug!(
            stage = self.role.task_name(),
            prior_stages = context.stage_outputs().len(),
            prompt_length = prompt.len(),
            "Rendered task prompt"
        );

        let output = self.inner.process(prompt, context).await?;
        context.push_stage_output(self.role.task_name(), self.role.title(), output.clone());
        Ok(output)
    }

    fn name(&self) -> &str {
        self.role.agent_name()
    }
}
