//! Task descriptions and expected outputs, one pair per stage

/// (template name, source) pairs registered with the environment
pub const TEMPLATES: &[(&str, &str)] = &[
    ("financial_analysis.description", FINANCIAL_DESCRIPTION),
    ("financial_analysis.expected_output", FINANCIAL_EXPECTED),
    ("market_analysis.description", MARKET_DESCRIPTION),
    ("market_analysis.expected_output", MARKET_EXPECTED),
    ("risk_assessment.description", RISK_DESCRIPTION),
    ("risk_assessment.expected_output", RISK_EXPECTED),
    ("investment_recommendation.description", RECOMMENDATION_DESCRIPTION),
    ("investment_recommendation.expected_output", RECOMMENDATION_EXPECTED),
    ("task", TASK_TEMPLATE),
];

const FINANCIAL_DESCRIPTION: &str = "{{ ticker }}에 대한 철저한 재무 분석을 수행합니다.
주요 재무 지표에 집중하세요.
회사의 재무 건전성 및 성과 추세에 대한 인사이트를 제공합니다. 날짜: {{ date }}";

const FINANCIAL_EXPECTED: &str = "{{ ticker }}의 재무 상태에 대한 종합적인 분석 보고서.
주요 재무 지표, 수익성, 부채 비율 등을 포함하며,
회사의 재무 건전성과 성과 동향에 대한 인사이트를 제공해야 합니다.";

const MARKET_DESCRIPTION: &str = "{{ ticker }}의 시장 위치를 분석합니다.
경쟁 우위, 시장 점유율, 업계 동향을 평가하세요.
회사의 성장 잠재력과 시장 과제에 대한 인사이트를 제공하세요. 날짜: {{ date }}";

const MARKET_EXPECTED: &str = "{{ ticker }}의 시장 위치에 대한 상세한 분석 보고서.
경쟁 우위, 시장 점유율, 산업 동향을 평가하고,
회사의 성장 잠재력과 시장 과제에 대한 인사이트를 포함해야 합니다.";

const RISK_DESCRIPTION: &str = "{{ ticker }}에 대한 투자와 관련된 주요 위험을 파악하고 평가합니다.
시장 위험, 운영 위험, 재무 위험 및 회사별 위험을 고려하세요.
종합적인 위험 프로필을 제공합니다. 날짜: {{ date }}";

const RISK_EXPECTED: &str = "{{ ticker }} 투자와 관련된 주요 리스크에 대한 포괄적인 평가 보고서.
시장 리스크, 운영 리스크, 재무 리스크, 회사 특정 리스크를 고려하여
종합적인 리스크 분석 결과를 제시해야 합니다.";

const RECOMMENDATION_DESCRIPTION: &str = "{{ ticker }}의 재무 분석, 시장 분석, 위험 평가를 바탕으로 종합적인 투자 추천을 제공합니다.
주식의 잠재 수익률, 위험 및 다양한 유형의 투자자에 대한 적합성을 고려하여 마크다운으로 작성해 주세요.
한글로 작성하세요. 날짜: {{ date }}";

const RECOMMENDATION_EXPECTED: &str = "1. 제목 및 기본 정보
- 회사명, 티커, 현재 주가, 목표주가, 투자의견 등

2. 요약(Executive Summary)
- 핵심 투자 포인트와 주요 재무 지표를 간단히 정리

3. 기업 개요
- 회사의 주요 사업 영역, 연혁, 시장 점유율 등

4. 산업 및 시장 분석
- 해당 기업이 속한 산업의 트렌드와 전망

5. 재무 분석
- 매출, 영업이익, 순이익 등 주요 재무지표 분석
- 수익성, 성장성, 안정성 지표 분석

6. 밸류에이션
- P/E, P/B, ROE 등 주요 밸류에이션 지표 분석
- 경쟁사 대비 상대 밸류에이션

7. 투자 의견 및 목표주가
- 투자의견 제시 및 근거 설명
- 목표주가 산정 방법과 근거

8. 투자 위험 요인
- 잠재적인 리스크 요인들을 나열

9. 재무제표 요약
- 최근 몇 년간의 요약 손익계산서, 재무상태표, 현금흐름표";

/// Full user message for a stage: task, expected output, earlier results
const TASK_TEMPLATE: &str = "{{ description }}

기대 결과물:
{{ expected_output }}
{%- if context %}

# 이전 단계 분석 결과
아래 분석 결과를 참고하여 작업을 수행하세요.
{%- for stage in context %}

## {{ stage.role }} ({{ stage.name }})
{{ stage.output }}
{%- endfor %}
{%- endif %}";
