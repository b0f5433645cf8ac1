use listen_core::model::ScoringResult;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub score_label: String,
    pub summary: String,
}

impl From<&ScoringResult> for ResultVm {
    fn from(result: &ScoringResult) -> Self {
        let score_label = result.to_string();
        Self {
            summary: format!("You got {score_label} correct."),
            score_label,
        }
    }
}
