//! The structs
//!

/// The outcome level of a judgement, ordered from good to bad.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Ok,
    Warn,
    Critical,
}
/// The result of a judge, consumed by the reporting layer.
///
/// `message` explains the severity; for an OK quorum it repeats the description.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Verdict {
    pub severity: Severity,
    pub message: String,
    pub description: String,
    /// Only set by [crate::verdict::judge_quorum].
    pub performance: Option<Performance>,
}
/// Performance data of the quorum verdict: the number of nodes that are up, and the thresholds for it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Performance {
    pub label: String,
    pub value: usize,
    pub thresholds: Thresholds,
}
/// The acceptable range for the number of nodes that are up.
///
/// ```text
/// value < critical             -> CRITICAL
/// warning.start..=warning.end  -> WARN
/// otherwise                    -> OK
/// ```
/// For a single node the critical boundary is 0, so the thresholds never flag that node being down;
/// the severity of the quorum [Verdict] does (0 of 1 nodes up is CRITICAL).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub critical: usize,
    pub warning: Option<WarningBand>,
}
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarningBand {
    pub start: usize,
    pub end: usize,
}
