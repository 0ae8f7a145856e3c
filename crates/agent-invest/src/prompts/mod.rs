//! Prompt templates for the analyst crew
//!
//! Templates are rendered with minijinja:
//! - `roles`: role texts and the shared system prompt
//! - `tasks`: per-stage task descriptions and expected outputs

mod roles;
mod tasks;

pub use roles::FINAL_ANSWER_PROMPT;

use crate::agents::AnalystRole;
use crate::error::Result;
use agent_core::StageOutput;
use chrono::NaiveDate;
use minijinja::{Environment, context};

/// Date as written in the prompts, e.g. `2025년 01월 10일`
pub fn report_date(date: NaiveDate) -> String {
    date.format("%Y년 %m월 %d일").to_string()
}

/// Compiled prompt templates
pub struct Prompts {
    env: Environment<'static>,
}

impl Prompts {
    /// Compile every template
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("system", roles::SYSTEM_TEMPLATE)?;
        for &(name, source) in tasks::TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// System prompt for a role
    pub fn system_prompt(&self, role: AnalystRole, date: &str, tools: &[String]) -> Result<String> {
        let (goal, backstory) = match role {
            AnalystRole::FinancialAnalyst => (roles::FINANCIAL_GOAL, roles::FINANCIAL_BACKSTORY),
            AnalystRole::MarketAnalyst => (roles::MARKET_GOAL, roles::MARKET_BACKSTORY),
            AnalystRole::RiskAnalyst => (roles::RISK_GOAL, roles::RISK_BACKSTORY),
            AnalystRole::InvestmentAdvisor => (roles::ADVISOR_GOAL, roles::ADVISOR_BACKSTORY),
        };

        Ok(self.env.get_template("system")?.render(context! {
            role => role.title(),
            goal => goal,
            backstory => backstory,
            date => date,
            tools => tools,
        })?)
    }

    /// User message for a stage, with earlier stage outputs appended
    pub fn task_prompt(
        &self,
        role: AnalystRole,
        ticker: &str,
        date: &str,
        prior: &[StageOutput],
    ) -> Result<String> {
        let vars = context! { ticker => ticker, date => date };
        let task = role.task_name();
        let description = self
            .env
            .get_template(&format!("{task}.description"))?
            .render(&vars)?;
        let expected_output = self
            .env
            .get_template(&format!("{task}.expected_output"))?
            .render(&vars)?;

        Ok(self.env.get_template("task")?.render(context! {
            description => description,
            expected_output => expected_output,
            context => prior,
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompts() -> Prompts {
        Prompts::new().unwrap()
    }

    #[test]
    fn test_report_date_format() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(report_date(date), "2025년 01월 09일");
    }

    #[test]
    fn test_system_prompt_mentions_role_and_tools() {
        let prompt = prompts()
            .system_prompt(
                AnalystRole::FinancialAnalyst,
                "2025년 01월 09일",
                &["comprehensive_stock_analysis".to_string()],
            )
            .unwrap();
        assert!(prompt.starts_with("You are Financial Analyst."));
        assert!(prompt.contains("회사의 재무 상태 및 성과 분석"));
        assert!(prompt.contains("날짜: 2025년 01월 09일"));
        assert!(prompt.contains("comprehensive_stock_analysis"));

        let advisor = prompts()
            .system_prompt(AnalystRole::InvestmentAdvisor, "2025년 01월 09일", &[])
            .unwrap();
        assert!(!advisor.contains("tools"));
        assert!(advisor.ends_with("모든 답변은 한국어로 작성하세요."));
    }

    #[test]
    fn test_task_prompt_embeds_ticker_and_context() {
        let prior = vec![StageOutput {
            name: "financial_analysis".to_string(),
            role: "Financial Analyst".to_string(),
            output: "매출 성장률 100.00%".to_string(),
        }];
        let prompt = prompts()
            .task_prompt(AnalystRole::MarketAnalyst, "IREN", "2025년 01월 09일", &prior)
            .unwrap();

        assert!(prompt.starts_with("IREN의 시장 위치를 분석합니다."));
        assert!(prompt.contains("IREN의 시장 위치에 대한 상세한 분석 보고서."));
        assert!(prompt.contains("# 이전 단계 분석 결과"));
        assert!(prompt.contains("## Financial Analyst (financial_analysis)\n매출 성장률 100.00%"));
    }

    #[test]
    fn test_first_task_has_no_context_section() {
        let prompt = prompts()
            .task_prompt(AnalystRole::FinancialAnalyst, "AAPL", "2025년 01월 09일", &[])
            .unwrap();
        assert!(prompt.contains("AAPL에 대한 철저한 재무 분석"));
        assert!(!prompt.contains("이전 단계"));
    }

    #[test]
    fn test_recommendation_lists_report_sections() {
        let prompt = prompts()
            .task_prompt(AnalystRole::InvestmentAdvisor, "AAPL", "2025년 01월 09일", &[])
            .unwrap();
        assert!(prompt.contains("마크다운으로 작성해 주세요"));
        assert!(prompt.contains("9. 재무제표 요약"));
    }
}
