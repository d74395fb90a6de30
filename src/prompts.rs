//! Prompt templates keyed by analysis type and user role.

pub const ANALYSIS_TYPES: [&str; 4] = [
    "Overall Analysis",
    "Risk Analysis",
    "Growth Analysis",
    "Profitability Analysis",
];

pub const USER_ROLES: [&str; 4] = ["Investor", "Analyst", "Auditor", "Other"];

pub const DEFAULT_ANALYSIS_TYPE: &str = "Overall Analysis";

const OVERALL_INVESTOR: &str = r#"As an AI assistant for investors, analyze these financial documents and provide a comprehensive summary following this structure:

**SUMMARY HEADER**
Provide a brief title with company name, document type, and period (e.g., "Q3 2024 Quarterly Report")

**1. KEY FINANCIAL METRICS**
   • Net Profit/Income (with YoY or QoQ comparison)
   • Earnings Per Share (EPS)
   • Revenue (total and growth %)
   • Return on Equity (ROE)
   • Profit Margins (gross, operating, net)
   • Debt-to-Equity Ratio

**2. INCOME AND EXPENSES ANALYSIS**
   • Revenue breakdown by segments/sources
   • Operating expenses and trends
   • Year-over-year or quarter-over-quarter comparisons

**3. BALANCE SHEET HIGHLIGHTS**
   • Total Assets and changes
   • Shareholders' Equity
   • Notable changes from previous periods

**4. CASH FLOW AND LIQUIDITY**
   • Operating, investing and financing cash flows
   • Liquidity and capital ratios

**5. OUTLOOK**
   • Management guidance and forward-looking statements
   • Key risks an investor should monitor

Use specific figures with units, and headers and bullet points throughout."#;

const OVERALL_ANALYST: &str = r#"As a financial analyst, conduct a comprehensive analysis of these financial documents following this detailed structure:

**EXECUTIVE SUMMARY**
Company, document type, period and a two-sentence performance overview.

**1. KEY FINANCIAL STATEMENTS SUMMARY**
   • Income statement highlights with margins
   • Balance sheet analysis
   • Cash flow analysis

**2. RATIO ANALYSIS**
   • Profitability, liquidity, leverage and efficiency ratios
   • Show formulas and period-over-period changes in basis points

**3. SEGMENT PERFORMANCE**
   • Revenue and margin by segment or geography

**4. TRENDS AND VARIANCES**
   • Highlight every variance above 5% and explain its drivers

**5. VALUATION CONSIDERATIONS AND OUTLOOK**
   • Guidance, risks and catalysts

Cite actual figures from the documents; do not estimate."#;

const OVERALL_AUDITOR: &str = r#"As an auditor, review these financial documents with focus on compliance, accuracy, and risk identification:

**AUDIT SUMMARY HEADER**
Document, period and scope of review.

**1. COMPLIANCE & ACCOUNTING STANDARDS**
   • Framework applied (IFRS / US GAAP) and notable standards
   • Revenue recognition, leases, financial instruments

**2. FINANCIAL STATEMENT INTEGRITY**
   • Internal consistency between statements
   • Reconciliation of key balances

**3. RED FLAGS AND UNUSUAL ITEMS**
   • One-off items, related-party transactions, estimate changes

**4. DISCLOSURE ASSESSMENT**
   • Completeness and adequacy of notes

**5. AUDIT CONCLUSION**
   • Areas requiring further testing or monitoring"#;

const OVERALL_OTHER: &str = r#"Analyze these financial documents and provide a comprehensive business-friendly summary:

**OVERVIEW**
What the company does and what period the documents cover.

**1. HOW THE BUSINESS PERFORMED**
   • Revenue, profit and the main reasons for changes

**2. FINANCIAL HEALTH**
   • Assets, debt and cash position in plain language

**3. WHAT TO WATCH**
   • Key risks and opportunities

Explain financial terms in simple language."#;

const RISK_INVESTOR: &str = r#"Focus on investment risks in these financial documents:

1. **Financial Risks**: Debt levels, liquidity concerns
2. **Market Risks**: Competition, market conditions
3. **Operational Risks**: Business model vulnerabilities
4. **Red Flags**: Any concerning trends or disclosures
5. **Risk Mitigation**: What the company is doing about risks

Rate overall investment risk (Low/Medium/High) with justification."#;

const RISK_ANALYST: &str = r#"Conduct detailed risk assessment:

1. **Credit Risk**: Debt structure, covenants, credit ratings
2. **Liquidity Risk**: Cash position, working capital, refinancing needs
3. **Market Risk**: Interest rate, currency and commodity exposure
4. **Operational Risk**: Concentration, supply chain, key dependencies
5. **Sensitivity Analysis**: Impact of adverse scenarios on key metrics

Quantify exposures wherever the documents allow."#;

const RISK_AUDITOR: &str = r#"Audit-focused risk review:

1. **Material Misstatement Risk**: Areas prone to error or fraud
2. **Estimates and Judgements**: Reasonableness of key assumptions
3. **Going Concern**: Indicators and management assessment
4. **Internal Control Weaknesses**: Disclosed or implied deficiencies
5. **Compliance Risks**: Regulatory and legal exposure"#;

const RISK_OTHER: &str = r#"Identify and explain key risks:

1. **Money Risks**: Debt and cash concerns
2. **Business Risks**: Competition and market changes
3. **Warning Signs**: Anything that looks concerning

Explain each risk in simple terms."#;

const GROWTH_INVESTOR: &str = r#"Analyze growth potential and opportunities:

1. **Revenue Growth**: Historical and projected growth rates
2. **Market Expansion**: New markets, products, customers
3. **Investment in Growth**: R&D, capital expenditure, acquisitions
4. **Competitive Position**: Market share trends
5. **Growth Sustainability**: Can current growth continue?

Provide a growth outlook (Strong/Moderate/Weak) with reasoning."#;

const GROWTH_ANALYST: &str = r#"Comprehensive growth analysis:

1. **Growth Decomposition**: Volume, price, mix and FX effects
2. **Segment Growth**: Fastest and slowest growing segments
3. **Organic vs Inorganic**: Contribution from acquisitions
4. **Reinvestment Rate**: Capex and R&D relative to revenue
5. **Forward Indicators**: Backlog, pipeline, guidance

Show compound growth rates where multiple periods are available."#;

const GROWTH_AUDITOR: &str = r#"Review growth-related disclosures:

1. **Revenue Recognition**: Appropriateness for new revenue streams
2. **Acquisition Accounting**: Goodwill and purchase price allocation
3. **Capitalised Costs**: Development costs and capex classification
4. **Forward-Looking Statements**: Support for management projections"#;

const GROWTH_OTHER: &str = r#"Evaluate growth prospects:

1. **Is the business growing?** Sales and customer trends
2. **Where is growth coming from?** Products and markets
3. **What could slow it down?** Main obstacles

Keep the explanation simple and practical."#;

const PROFIT_INVESTOR: &str = r#"Analyze profitability and returns:

1. **Profit Margins**: Gross, operating and net margin trends
2. **Returns**: ROE, ROA and return on invested capital
3. **Earnings Quality**: Recurring vs one-off items
4. **Shareholder Returns**: Dividends and buybacks
5. **Peer Comparison**: Margins relative to industry where mentioned"#;

const PROFIT_ANALYST: &str = r#"Deep-dive profitability analysis:

1. **Margin Bridge**: Drivers of margin change in basis points
2. **Cost Structure**: Fixed vs variable costs, operating leverage
3. **Segment Profitability**: Margin by segment
4. **Return Metrics**: ROE decomposition (DuPont)
5. **Earnings Quality**: Cash conversion and accruals"#;

const PROFIT_AUDITOR: &str = r#"Audit profitability reporting:

1. **Revenue and Cost Cut-off**: Period allocation
2. **Non-GAAP Measures**: Reconciliation to reported figures
3. **Exceptional Items**: Classification and disclosure
4. **Impairments and Provisions**: Adequacy and consistency"#;

const PROFIT_OTHER: &str = r#"Understand profit generation:

1. **Basic Profitability**: Is the company making money?
2. **Profit Trends**: Improving or declining profitability
3. **Profit Sources**: Where profits come from
4. **Profit Margin Health**: How margins compare
5. **Sustainability**: Can current profitability continue?

Explain profitability in simple terms."#;

fn lookup(analysis_type: &str, role: &str) -> Option<&'static str> {
    let prompt = match (analysis_type, role) {
        ("Overall Analysis", "Investor") => OVERALL_INVESTOR,
        ("Overall Analysis", "Analyst") => OVERALL_ANALYST,
        ("Overall Analysis", "Auditor") => OVERALL_AUDITOR,
        ("Overall Analysis", "Other") => OVERALL_OTHER,
        ("Risk Analysis", "Investor") => RISK_INVESTOR,
        ("Risk Analysis", "Analyst") => RISK_ANALYST,
        ("Risk Analysis", "Auditor") => RISK_AUDITOR,
        ("Risk Analysis", "Other") => RISK_OTHER,
        ("Growth Analysis", "Investor") => GROWTH_INVESTOR,
        ("Growth Analysis", "Analyst") => GROWTH_ANALYST,
        ("Growth Analysis", "Auditor") => GROWTH_AUDITOR,
        ("Growth Analysis", "Other") => GROWTH_OTHER,
        ("Profitability Analysis", "Investor") => PROFIT_INVESTOR,
        ("Profitability Analysis", "Analyst") => PROFIT_ANALYST,
        ("Profitability Analysis", "Auditor") => PROFIT_AUDITOR,
        ("Profitability Analysis", "Other") => PROFIT_OTHER,
        _ => return None,
    };
    Some(prompt)
}

/// Prompt for an analysis type and role.
///
/// Unknown analysis types fall back to the overall prompt for the role;
/// custom roles fall back to the overall prompt for "Other".
pub fn prompt_for(analysis_type: &str, role: &str) -> &'static str {
    lookup(analysis_type, role)
        .or_else(|| lookup(DEFAULT_ANALYSIS_TYPE, role))
        .unwrap_or(OVERALL_OTHER)
}
