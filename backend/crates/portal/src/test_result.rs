//! Test-case result display

use serde::{Deserialize, Serialize};

pub const HIDDEN_CASE_NOTICE: &str =
    "このテストケースは、管理者によって 入力 及び 期待する出力 が非表示に設定されています。";

/// Judge verdict for one test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Accepted
    AC,
    /// Wrong answer
    WA,
    /// Compile error
    CE,
    /// Runtime error
    RE,
    /// Time limit exceeded
    TLE,
}

/// Dot color, text color and label for a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInfo {
    pub color: &'static str,
    pub text: &'static str,
    pub label: &'static str,
}

impl Verdict {
    pub fn status_info(self) -> StatusInfo {
        let (color, text, label) = match self {
            Verdict::AC => ("bg-green-500", "text-green-600", "正解"),
            Verdict::WA => ("bg-red-500", "text-red-600", "不正解"),
            Verdict::CE => ("bg-yellow-500", "text-yellow-600", "コンパイルエラー"),
            Verdict::RE => ("bg-orange-500", "text-orange-600", "実行時エラー"),
            Verdict::TLE => ("bg-purple-500", "text-purple-600", "時間超過"),
        };
        StatusInfo { color, text, label }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: String,
    pub index: u32,
    pub status: Verdict,
    pub input: String,
    #[serde(default)]
    pub is_hidden: bool,
    pub expected_output: String,
    pub actual_output: String,
    pub error_log: Option<String>,
}

/// One run of the judge over every test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionHistory {
    pub id: u64,
    /// `hh:mm:ss`
    pub timestamp: String,
    pub results: Vec<TestResult>,
    pub is_running: bool,
    pub has_error: bool,
}

impl ExecutionHistory {
    pub fn accepted_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == Verdict::AC)
            .count()
    }

    pub fn all_accepted(&self) -> bool {
        !self.results.is_empty() && self.accepted_count() == self.results.len()
    }
}

/// Input and expected output, absent for hidden cases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseIo {
    pub input: String,
    pub expected_output: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResultView {
    /// `テストケース N`
    pub heading: String,
    pub status: StatusInfo,
    /// Shown as a tooltip next to the heading
    pub notice: Option<&'static str>,
    pub io: Option<CaseIo>,
    pub actual_output: String,
    pub error_log: String,
}

impl From<&TestResult> for TestResultView {
    fn from(result: &TestResult) -> Self {
        let io = (!result.is_hidden).then(|| CaseIo {
            input: result.input.clone(),
            expected_output: result.expected_output.clone(),
        });

        Self {
            heading: format!("テストケース {}", result.index),
            status: result.status.status_info(),
            notice: result.is_hidden.then_some(HIDDEN_CASE_NOTICE),
            io,
            actual_output: result.actual_output.clone(),
            error_log: result.error_log.clone().unwrap_or_default(),
        }
    }
}
