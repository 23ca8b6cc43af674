//! 数据集构建
//!
//! 每条记录按题号展开为固定长度的题目槽位。题目少于全局最大题数的记录，
//! 多出来的槽位为 `None`（列缺失），不会被当成"未作答"的 `false`

use serde::Serialize;

use crate::models::GradingRecord;

/// 一道题在数据集中的取值
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuestionSlot {
    pub attempted: bool,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
}

/// 数据集中的一行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetRow {
    pub filename: String,
    pub total_marks: u32,
    pub awarded_marks: f64,
    pub percentage: f64,
    /// 长度恒为 `max_questions`，下标 0 对应第 1 题
    pub slots: Vec<Option<QuestionSlot>>,
}

impl DatasetRow {
    /// 第 `n` 题（从 1 开始）的槽位
    pub fn slot(&self, n: usize) -> Option<&QuestionSlot> {
        n.checked_sub(1)
            .and_then(|i| self.slots.get(i))
            .and_then(|s| s.as_ref())
    }

    /// 存在的题目得分率
    pub fn question_percentages(&self) -> Vec<f64> {
        self.slots.iter().flatten().map(|s| s.percentage).collect()
    }

    /// 作答的题数
    pub fn attempted_count(&self) -> usize {
        self.slots.iter().flatten().filter(|s| s.attempted).count()
    }
}

/// 单元格的值
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Integer(u32),
    Number(f64),
    Flag(bool),
}

/// 构建完成后不可变的数据集
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    rows: Vec<DatasetRow>,
    max_questions: usize,
}

impl Dataset {
    /// 从评分记录构建数据集，复杂度 O(R×Q)
    ///
    /// 题目按在记录中的位置放入槽位（第 i 个题目对应第 i 列），与题目自带的编号无关
    pub fn build(records: &[GradingRecord]) -> Self {
        let max_questions = records.iter().map(|r| r.question_count()).max().unwrap_or(0);

        let rows = records
            .iter()
            .map(|record| {
                let mut slots: Vec<Option<QuestionSlot>> = record
                    .questions
                    .iter()
                    .map(|q| {
                        Some(QuestionSlot {
                            attempted: q.attempted,
                            score: q.score,
                            max_score: q.max_score,
                            percentage: q.percentage(),
                        })
                    })
                    .collect();
                slots.resize(max_questions, None);

                DatasetRow {
                    filename: record.filename.clone(),
                    total_marks: record.total_marks,
                    awarded_marks: record.awarded_marks,
                    percentage: record.percentage,
                    slots,
                }
            })
            .collect();

        Self {
            rows,
            max_questions,
        }
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn max_questions(&self) -> usize {
        self.max_questions
    }

    /// 所有记录的总得分率
    pub fn percentages(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.percentage).collect()
    }

    /// 列名：四个基础列，加上每道题的 attempted / score / percentage
    pub fn column_names(&self) -> Vec<String> {
        let mut columns: Vec<String> = ["filename", "total_marks", "awarded_marks", "percentage"]
            .iter()
            .map(|c| c.to_string())
            .collect();

        for i in 1..=self.max_questions {
            columns.push(format!("question_{}_attempted", i));
            columns.push(format!("question_{}_score", i));
            columns.push(format!("question_{}_percentage", i));
        }

        columns
    }

    /// 按列名读取单元格；列不存在或该行缺少这道题时返回 `None`
    pub fn cell(&self, row: usize, column: &str) -> Option<CellValue> {
        let row = self.rows.get(row)?;

        match column {
            "filename" => return Some(CellValue::Text(row.filename.clone())),
            "total_marks" => return Some(CellValue::Integer(row.total_marks)),
            "awarded_marks" => return Some(CellValue::Number(row.awarded_marks)),
            "percentage" => return Some(CellValue::Number(row.percentage)),
            _ => {}
        }

        let rest = column.strip_prefix("question_")?;
        let (index, field) = rest.split_once('_')?;
        let slot = row.slot(index.parse().ok()?)?;

        match field {
            "attempted" => Some(CellValue::Flag(slot.attempted)),
            "score" => Some(CellValue::Number(slot.score)),
            "percentage" => Some(CellValue::Number(slot.percentage)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Provenance, QuestionResult};
    use std::collections::BTreeMap;

    fn record(name: &str, question_scores: &[(f64, f64)]) -> GradingRecord {
        GradingRecord {
            filename: name.to_string(),
            total_marks: 10,
            awarded_marks: 5.0,
            percentage: 50.0,
            feedback: String::new(),
            criteria_scores: BTreeMap::new(),
            questions: question_scores
                .iter()
                .enumerate()
                .map(|(i, (score, max))| QuestionResult {
                    question_number: i + 1,
                    question_text: String::new(),
                    attempted: *score > 0.0,
                    score: *score,
                    max_score: *max,
                    feedback: String::new(),
                })
                .collect(),
            provenance: Provenance::Parsed,
        }
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::build(&[]);
        assert!(ds.is_empty());
        assert_eq!(ds.max_questions(), 0);
        assert_eq!(ds.column_names().len(), 4);
    }

    #[test]
    fn test_missing_slots_are_absent_not_false() {
        let ds = Dataset::build(&[
            record("a", &[(1.0, 2.0), (0.0, 2.0), (2.0, 2.0)]),
            record("b", &[(2.0, 4.0)]),
        ]);

        assert_eq!(ds.max_questions(), 3);
        assert_eq!(ds.column_names().len(), 4 + 3 * 3);

        assert_eq!(ds.cell(0, "question_2_attempted"), Some(CellValue::Flag(false)));
        assert_eq!(ds.cell(1, "question_2_attempted"), None);
        assert_eq!(ds.cell(1, "question_1_percentage"), Some(CellValue::Number(50.0)));
        assert_eq!(ds.rows()[1].slots.len(), 3);
        assert_eq!(ds.rows()[1].question_percentages(), vec![50.0]);
    }

    #[test]
    fn test_cell_unknown_column() {
        let ds = Dataset::build(&[record("a", &[(1.0, 2.0)])]);
        assert_eq!(ds.cell(0, "question_1_max"), None);
        assert_eq!(ds.cell(0, "nope"), None);
        assert_eq!(ds.cell(5, "filename"), None);
        assert_eq!(ds.cell(0, "filename"), Some(CellValue::Text("a".to_string())));
    }
}
