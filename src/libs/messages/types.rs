#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleJira,
    ConfigModuleReport,
    UnknownTimezone(String),        // timezone name
    InvalidOutputPath(String),      // path
    OutputFormatInferred(String),   // format name

    // === REPORT MESSAGES ===
    ReportHeader(String),           // period label
    FetchingIssues,
    FetchedIssues(usize),           // issue count
    MockModeEnabled,
    NoWorklogsFound(String),        // period label
    AggregationSummary {
        issues: usize,
        entries: usize,
    },
    GrandTotal(String, String),     // hours, days
    ExportCompleted(String),        // path
    ExcelExportCompleted(String, String), // path, sheet names

    // === AUTHENTICATION MESSAGES ===
    TokenCacheDeleted,
    TokenCacheNotFound,
    ApiTokenMissing,

    // === API MESSAGES ===
    JiraFetchFailed(String),        // error message
    JiraPageFetched {
        start_at: u64,
        received: usize,
        total: u64,
    },

    // === PROMPTS ===
    PromptSelectModules,
    PromptJiraLogin,
    PromptJiraUrl,
    PromptApiToken,
    PromptTimezone,
    PromptOutputFile,
    PromptPeriod,
}
