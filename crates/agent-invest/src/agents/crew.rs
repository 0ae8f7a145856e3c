//! Sequential investment crew
//!
//! Runs the four analysts in order. Each stage receives the outputs of all
//! earlier stages; the advisor's output is the final report.

use agent_core::{Agent, Context};
use agent_llm::LLMProvider;
use agent_runtime::{AgentRuntime, ExecutorConfig, SimpleConfig};
use agent_tools::{Tool, ToolRegistry};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::analyst::{AnalystAgent, AnalystRole};
use crate::api::SerperClient;
use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, Result};
use crate::metrics::{MetricsAggregator, normalize_ticker};
use crate::prompts::{FINAL_ANSWER_PROMPT, Prompts, report_date};
use crate::provider::MarketDataProvider;
use crate::tools::{FinancialAnalysisTool, WebSearchTool};

/// One finished stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRecord {
    /// Task name
    pub name: String,
    /// Analyst role
    pub role: String,
    /// When the stage started
    pub started_at: DateTime<Utc>,
    /// When the stage returned
    pub finished_at: DateTime<Utc>,
    /// Text returned by the model
    pub output: String,
}

/// Result of a crew run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewOutput {
    /// Ticker the crew analyzed
    pub ticker: String,
    /// Date embedded in the prompts
    pub report_date: String,
    /// Stage results in execution order
    pub stages: Vec<StageRecord>,
}

impl CrewOutput {
    /// Output of the last stage, the investment recommendation
    pub fn final_output(&self) -> &str {
        self.stages.last().map_or("", |s| s.output.as_str())
    }

    /// Output of a stage by task name
    pub fn stage(&self, name: &str) -> Option<&StageRecord> {
        self.stages.iter().find(|s| s.name == name)
    }

    /// Every stage under its own heading
    pub fn format_report(&self) -> String {
        let mut report = String::new();

        report.push_str(&format!(
            "# {} 투자 분석 보고서 ({})\n\n",
            self.ticker, self.report_date
        ));

        for (i, stage) in self.stages.iter().enumerate() {
            report.push_str(&format!("## {}. {} ({})\n\n", i + 1, stage.role, stage.name));
            report.push_str(stage.output.trim_end());
            report.push_str("\n\n");
        }

        report
    }

    /// Write the final output to `path`, creating its directory
    pub fn write_report(&self, path: &Path) -> Result<()> {
        create_parent(path)?;
        fs::write(path, self.final_output())?;
        Ok(())
    }

    /// Write the whole run as pretty JSON
    pub fn write_run_log(&self, path: &Path) -> Result<()> {
        create_parent(path)?;
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// The four-stage crew
pub struct InvestmentCrew {
    stages: Vec<AnalystAgent>,
    config: AdvisorConfig,
    report_date: String,
}

impl InvestmentCrew {
    /// Build the crew with today's date in its prompts
    pub fn new(
        llm: Arc<dyn LLMProvider>,
        market: Arc<dyn MarketDataProvider>,
        config: AdvisorConfig,
    ) -> Result<Self> {
        Self::for_date(llm, market, config, Local::now().date_naive())
    }

    /// Build the crew with an explicit report date
    pub fn for_date(
        llm: Arc<dyn LLMProvider>,
        market: Arc<dyn MarketDataProvider>,
        config: AdvisorConfig,
        date: NaiveDate,
    ) -> Result<Self> {
        config.validate()?;
        let report_date = report_date(date);
        let prompts = Arc::new(Prompts::new()?);

        let runtime = AgentRuntime::builder()
            .provider(llm)
            .default_model(config.analyst_model.clone())
            .build()?;

        let aggregator = Arc::new(MetricsAggregator::new(market));
        let analysis_tools = Arc::new(ToolRegistry::with_tools([
            Arc::new(FinancialAnalysisTool::new(aggregator)) as Arc<dyn Tool>
        ]));
        let search_tools = match SerperClient::from_config(&config)? {
            Some(client) => Arc::new(ToolRegistry::with_tools([
                Arc::new(WebSearchTool::new(Arc::new(client))) as Arc<dyn Tool>
            ])),
            None => {
                warn!("SERPER_API_KEY not set, market analyst runs without web search");
                Arc::new(ToolRegistry::new())
            }
        };

        let mut stages = Vec::with_capacity(AnalystRole::ALL.len());
        for role in AnalystRole::ALL {
            let inner: Box<dyn Agent> = match role.max_iterations() {
                Some(max_iterations) => {
                    let tools = match role {
                        AnalystRole::MarketAnalyst => search_tools.clone(),
                        _ => analysis_tools.clone(),
                    };
                    let tool_names: Vec<String> = tools
                        .list_tools()
                        .iter()
                        .map(|t| t.name().to_string())
                        .collect();
                    let executor_config = ExecutorConfig {
                        max_iterations,
                        model: config.analyst_model.clone(),
                        system_prompt: Some(prompts.system_prompt(role, &report_date, &tool_names)?),
                        max_tokens: config.max_tokens,
                        temperature: config.temperature,
                        final_answer_prompt: FINAL_ANSWER_PROMPT.to_string(),
                    };
                    Box::new(runtime.create_tool_agent_with_tools(
                        executor_config,
                        role.agent_name(),
                        tools,
                    ))
                }
                None => {
                    let simple_config = SimpleConfig {
                        model: config.advisor_model.clone(),
                        system_prompt: prompts.system_prompt(role, &report_date, &[])?,
                        max_tokens: config.advisor_max_tokens,
                        temperature: None,
                    };
                    Box::new(runtime.create_simple_agent(simple_config, role.agent_name()))
                }
            };
            stages.push(AnalystAgent::new(role, inner, prompts.clone()));
        }

        Ok(Self {
            stages,
            config,
            report_date,
        })
    }

    /// Configuration the crew was built with
    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Run every stage in order, then write the report and run log
    ///
    /// File output is best effort: a failed write is logged and the stage
    /// outputs are still returned.
    pub async fn kickoff(&self, ticker: &str) -> Result<CrewOutput> {
        let ticker = normalize_ticker(ticker)?;
        info!(%ticker, report_date = %self.report_date, "Crew kickoff");

        let mut context = Context::new()
            .with_ticker(&ticker)
            .with_report_date(&self.report_date);

        let mut stages = Vec::with_capacity(self.stages.len());
        for agent in &self.stages {
            let role = agent.role();
            let started_at = Utc::now();
            info!(stage = role.task_name(), role = role.title(), "Stage started");

            let output = agent
                .process(ticker.clone(), &mut context)
                .await
                .map_err(|e| AdvisorError::Stage {
                    stage: role.task_name().to_string(),
                    reason: e.to_string(),
                })?;

            let finished_at = Utc::now();
            info!(
                stage = role.task_name(),
                output_length = output.len(),
                elapsed_ms = (finished_at - started_at).num_milliseconds(),
                "Stage finished"
            );

            stages.push(StageRecord {
                name: role.task_name().to_string(),
                role: role.title().to_string(),
                started_at,
                finished_at,
                output,
            });
        }

        let output = CrewOutput {
            ticker,
            report_date: self.report_date.clone(),
            stages,
        };

        let report_path = self.config.report_path(&output.ticker);
        match output.write_report(&report_path) {
            Ok(()) => info!(path = %report_path.display(), "Report written"),
            Err(e) => error!(path = %report_path.display(), error = %e, "Failed to write report"),
        }

        if let Some(run_log) = &self.config.run_log {
            match output.write_run_log(run_log) {
                Ok(()) => info!(path = %run_log.display(), "Run log written"),
                Err(e) => error!(path = %run_log.display(), error = %e, "Failed to write run log"),
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Frequency, MockMarketDataProvider};
    use crate::statement::{StatementTable, line_items};
    use agent_llm::{
        CompletionRequest, CompletionResponse, ContentBlock, Message, MessageContent, StopReason,
        TokenUsage,
    };
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedLlm {
        responses: Mutex<VecDeque<CompletionResponse>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedLlm {
        fn new(responses: Vec<CompletionResponse>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedLlm {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> agent_llm::Result<CompletionResponse> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| agent_llm::LLMError::RequestFailed("no more responses".into()))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn text(output: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant(output),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }

    fn analysis_call(ticker: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant_blocks(vec![ContentBlock::ToolUse {
                id: "call_1".to_string(),
                name: "comprehensive_stock_analysis".to_string(),
                input: json!({ "ticker": ticker }),
            }]),
            stop_reason: StopReason::ToolUse,
            usage: TokenUsage::default(),
        }
    }

    fn config(dir: &Path) -> AdvisorConfig {
        AdvisorConfig::builder()
            .output_dir(dir.join("outputs"))
            .run_log(Some(dir.join("logs/investment_advisor_run.json")))
            .build()
            .unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 9).unwrap()
    }

    fn first_user_text(request: &CompletionRequest) -> String {
        request.messages[0].text().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_stages_run_in_order_and_report_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let llm = ScriptedLlm::new(vec![
            text("재무 분석 결과"),
            text("시장 분석 결과"),
            text("위험 평가 결과"),
            text("# IREN 투자 추천"),
        ]);
        let market = Arc::new(MockMarketDataProvider::new());
        let crew = InvestmentCrew::for_date(llm.clone(), market, config(dir.path()), date()).unwrap();

        let output = crew.kickoff("iren").await.unwrap();

        let names: Vec<&str> = output.stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "financial_analysis",
                "market_analysis",
                "risk_assessment",
                "investment_recommendation"
            ]
        );
        assert_eq!(output.ticker, "IREN");
        assert_eq!(output.final_output(), "# IREN 투자 추천");
        assert_eq!(output.report_date, "2025년 01월 09일");

        let requests = llm.requests.lock().unwrap();
        assert_eq!(requests.len(), 4);

        // analysts: tools only where configured
        assert_eq!(requests[0].model, "gpt-4o-mini");
        assert_eq!(
            requests[0].tools.as_ref().unwrap()[0].name,
            "comprehensive_stock_analysis"
        );
        assert!(requests[1].tools.is_none());
        assert!(requests[2].tools.is_some());

        // advisor: reasoning model, no tools, no temperature
        assert_eq!(requests[3].model, "o3-mini-2025-01-31");
        assert!(requests[3].tools.is_none());
        assert!(requests[3].temperature.is_none());

        // prior outputs flow forward
        assert!(!first_user_text(&requests[0]).contains("이전 단계"));
        assert!(first_user_text(&requests[1]).contains("재무 분석 결과"));
        let advisor_prompt = first_user_text(&requests[3]);
        for prior in ["재무 분석 결과", "시장 분석 결과", "위험 평가 결과"] {
            assert!(advisor_prompt.contains(prior));
        }
        assert!(requests[0].system.as_ref().unwrap().contains("날짜: 2025년 01월 09일"));

        let report =
            fs::read_to_string(dir.path().join("outputs/investment_advisor_IREN.md")).unwrap();
        assert_eq!(report, "# IREN 투자 추천");

        let log = fs::read_to_string(dir.path().join("logs/investment_advisor_run.json")).unwrap();
        let log: CrewOutput = serde_json::from_str(&log).unwrap();
        assert_eq!(log, output);
    }

    #[tokio::test]
    async fn test_financial_stage_calls_aggregator_tool() {
        let dir = tempfile::tempdir().unwrap();
        let llm = ScriptedLlm::new(vec![
            analysis_call("IREN"),
            text("재무"),
            text("시장"),
            text("위험"),
            text("추천"),
        ]);

        let mut market = MockMarketDataProvider::new();
        market.expect_latest_price().times(1).returning(|_| Ok(None));
        market.expect_financials().times(2).returning(|_, frequency| {
            let period = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
            Ok(match frequency {
                Frequency::Annual => StatementTable::from_cells(
                    "annual financials",
                    [(line_items::TOTAL_REVENUE, period, Some(187_200_000.0))],
                ),
                Frequency::Quarterly => StatementTable::new("quarterly financials"),
            })
        });
        market
            .expect_balance_sheet()
            .times(1)
            .returning(|_| Ok(StatementTable::new("balance sheet")));

        let crew =
            InvestmentCrew::for_date(llm.clone(), Arc::new(market), config(dir.path()), date())
                .unwrap();
        let output = crew.kickoff("IREN").await.unwrap();
        assert_eq!(output.stage("financial_analysis").unwrap().output, "재무");

        let requests = llm.requests.lock().unwrap();
        let tool_message = &requests[1].messages[2];
        match &tool_message.content {
            Some(MessageContent::Blocks(blocks)) => match &blocks[0] {
                ContentBlock::ToolResult { content, .. } => {
                    assert!(content.contains("187,200,000"));
                    assert!(content.contains("연간 데이터"));
                }
                other => panic!("unexpected block {other:?}"),
            },
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failing_stage_aborts_with_stage_name() {
        let dir = tempfile::tempdir().unwrap();
        let llm = ScriptedLlm::new(vec![text("재무 분석 결과")]);
        let crew = InvestmentCrew::for_date(
            llm,
            Arc::new(MockMarketDataProvider::new()),
            config(dir.path()),
            date(),
        )
        .unwrap();

        match crew.kickoff("IREN").await {
            Err(AdvisorError::Stage { stage, reason }) => {
                assert_eq!(stage, "market_analysis");
                assert!(reason.contains("no more responses"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(!dir.path().join("outputs/investment_advisor_IREN.md").exists());
    }

    #[tokio::test]
    async fn test_malformed_ticker_rejected_before_any_llm_call() {
        let dir = tempfile::tempdir().unwrap();
        let llm = ScriptedLlm::new(vec![text("재무"), text("시장"), text("위험"), text("추천")]);
        let crew = InvestmentCrew::for_date(
            llm.clone(),
            Arc::new(MockMarketDataProvider::new()),
            config(dir.path()),
            date(),
        )
        .unwrap();

        for ticker in ["BRK/B", "../x"] {
            assert!(matches!(
                crew.kickoff(ticker).await,
                Err(AdvisorError::InvalidTicker(_))
            ));
        }
        assert!(llm.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unwritable_output_dir_keeps_stage_outputs() {
        let dir = tempfile::tempdir().unwrap();
        // a regular file where the output directory should be
        let blocker = dir.path().join("outputs");
        fs::write(&blocker, "").unwrap();

        let llm = ScriptedLlm::new(vec![text("재무"), text("시장"), text("위험"), text("추천")]);
        let config = AdvisorConfig::builder()
            .output_dir(blocker.join("reports"))
            .run_log(Some(blocker.join("run.json")))
            .build()
            .unwrap();
        let crew = InvestmentCrew::for_date(
            llm.clone(),
            Arc::new(MockMarketDataProvider::new()),
            config,
            date(),
        )
        .unwrap();

        let output = crew.kickoff("BRK-B").await.unwrap();
        assert_eq!(output.ticker, "BRK-B");
        assert_eq!(output.stages.len(), 4);
        assert_eq!(output.final_output(), "추천");
        assert_eq!(llm.requests.lock().unwrap().len(), 4);
        assert!(!blocker.join("reports").exists());
    }

    #[tokio::test]
    async fn test_report_lands_at_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let llm = ScriptedLlm::new(vec![text("재무"), text("시장"), text("위험"), text("추천")]);
        let config = config(dir.path());
        let expected = config.report_path("AAPL");
        let crew = InvestmentCrew::for_date(
            llm,
            Arc::new(MockMarketDataProvider::new()),
            config,
            date(),
        )
        .unwrap();

        crew.kickoff("aapl").await.unwrap();
        assert_eq!(fs::read_to_string(expected).unwrap(), "추천");
    }

    #[test]
    fn test_format_report_concatenates_stages() {
        let at = Utc::now();
        let record = |name: &str, role: &str, output: &str| StageRecord {
            name: name.to_string(),
            role: role.to_string(),
            started_at: at,
            finished_at: at,
            output: output.to_string(),
        };
        let output = CrewOutput {
            ticker: "AAPL".to_string(),
            report_date: "2025년 01월 09일".to_string(),
            stages: vec![
                record("financial_analysis", "Financial Analyst", "재무\n"),
                record("investment_recommendation", "Investment Advisor", "추천"),
            ],
        };

        let report = output.format_report();
        assert!(report.starts_with("# AAPL 투자 분석 보고서 (2025년 01월 09일)\n\n"));
        assert!(report.contains("## 1. Financial Analyst (financial_analysis)\n\n재무\n\n"));
        assert!(report.contains("## 2. Investment Advisor (investment_recommendation)\n\n추천"));
        assert_eq!(output.final_output(), "추천");
    }

    #[test]
    fn test_run_log_without_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let output = CrewOutput {
            ticker: "AAPL".to_string(),
            report_date: String::new(),
            stages: vec![],
        };
        let path = dir.path().join("run.json");
        output.write_run_log(&path).unwrap();
        assert_eq!(output.final_output(), "");
        assert!(path.exists());
    }
}
