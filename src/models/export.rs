//! 表格导出用的扁平行
//!
//! 每份提交一行汇总，每道题一行明细

use serde::Serialize;

use super::grading::GradingRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionRow {
    pub filename: String,
    pub awarded_marks: f64,
    pub total_marks: u32,
    pub percentage: f64,
    pub feedback: String,
    pub provenance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionRow {
    pub filename: String,
    pub question_number: usize,
    pub attempted: bool,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub feedback: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportRows {
    pub submissions: Vec<SubmissionRow>,
    pub questions: Vec<QuestionRow>,
}

pub fn export_rows(records: &[GradingRecord]) -> ExportRows {
    let submissions = records
        .iter()
        .map(|r| SubmissionRow {
            filename: r.filename.clone(),
            awarded_marks: r.awarded_marks,
            total_marks: r.total_marks,
            percentage: r.percentage,
            feedback: r.feedback.clone(),
            provenance: r.provenance.to_string(),
        })
        .collect();

    let questions = records
        .iter()
        .flat_map(|r| {
            r.questions.iter().map(move |q| QuestionRow {
                filename: r.filename.clone(),
                question_number: q.question_number,
                attempted: q.attempted,
                score: q.score,
                max_score: q.max_score,
                percentage: q.percentage(),
                feedback: q.feedback.clone(),
            })
        })
        .collect();

    ExportRows {
        submissions,
        questions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FailureKind, Provenance, QuestionResult};
    use std::collections::BTreeMap;

    #[test]
    fn test_one_row_per_question() {
        let graded = GradingRecord {
            filename: "alice.txt".to_string(),
            total_marks: 10,
            awarded_marks: 6.0,
            percentage: 60.0,
            feedback: "ok".to_string(),
            criteria_scores: BTreeMap::new(),
            questions: vec![
                QuestionResult {
                    question_number: 1,
                    question_text: String::new(),
                    attempted: true,
                    score: 4.0,
                    max_score: 5.0,
                    feedback: String::new(),
                },
                QuestionResult {
                    question_number: 2,
                    question_text: String::new(),
                    attempted: true,
                    score: 2.0,
                    max_score: 5.0,
                    feedback: String::new(),
                },
            ],
            provenance: Provenance::Repaired,
        };
        let failed = GradingRecord::failed("bob.txt", 10, FailureKind::UnparseableResponse, "??");

        let rows = export_rows(&[graded, failed]);
        assert_eq!(rows.submissions.len(), 2);
        assert_eq!(rows.questions.len(), 2);
        assert_eq!(rows.submissions[0].provenance, "repaired");
        assert_eq!(rows.submissions[1].provenance, "failed:unparseable_response");
        assert_eq!(rows.questions[0].percentage, 80.0);
        assert!(rows.questions.iter().all(|q| q.filename == "alice.txt"));
    }
}
