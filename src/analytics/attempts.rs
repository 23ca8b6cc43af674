//! 作答 / 跳过统计

use serde::Serialize;

use super::dataset::Dataset;

/// 某道题的作答情况
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuestionAttempts {
    pub attempted_count: usize,
    pub total_students: usize,
    pub percentage: f64,
}

/// 作答人数最多的题
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MostAttempted {
    /// 没有题目时为 0
    pub question_number: usize,
    pub attempts: usize,
    pub percentage: f64,
}

/// 跳过人数最多的题
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MostSkipped {
    /// 没有题目时为 0
    pub question_number: usize,
    pub skipped_count: usize,
    pub percentage: f64,
}

/// 每道题的作答 / 跳过人数（用于柱状图）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttemptBar {
    pub question_number: usize,
    pub attempted: usize,
    pub skipped: usize,
}

fn ratio(count: usize, total: usize) -> f64 {
    if total > 0 {
        count as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// 第 `n` 题的作答人数，只有该列存在且为 true 才算作答
pub fn attempts(dataset: &Dataset, n: usize) -> QuestionAttempts {
    let total_students = dataset.len();
    let attempted_count = dataset
        .rows()
        .iter()
        .filter(|row| row.slot(n).is_some_and(|s| s.attempted))
        .count();

    QuestionAttempts {
        attempted_count,
        total_students,
        percentage: ratio(attempted_count, total_students),
    }
}

/// 按题号升序扫描，取第一个最大值
fn first_max_by<F>(dataset: &Dataset, count: F) -> Option<(usize, usize)>
where
    F: Fn(&QuestionAttempts) -> usize,
{
    let mut best: Option<(usize, usize)> = None;
    for n in 1..=dataset.max_questions() {
        let value = count(&attempts(dataset, n));
        if best.map_or(true, |(_, current)| value > current) {
            best = Some((n, value));
        }
    }
    best
}

pub fn most_attempted(dataset: &Dataset) -> MostAttempted {
    match first_max_by(dataset, |a| a.attempted_count) {
        Some((question_number, attempts)) => MostAttempted {
            question_number,
            attempts,
            percentage: ratio(attempts, dataset.len()),
        },
        None => MostAttempted {
            question_number: 0,
            attempts: 0,
            percentage: 0.0,
        },
    }
}

pub fn most_skipped(dataset: &Dataset) -> MostSkipped {
    match first_max_by(dataset, |a| a.total_students - a.attempted_count) {
        Some((question_number, skipped_count)) => MostSkipped {
            question_number,
            skipped_count,
            percentage: ratio(skipped_count, dataset.len()),
        },
        None => MostSkipped {
            question_number: 0,
            skipped_count: 0,
            percentage: 0.0,
        },
    }
}

/// 平均每人作答题数
pub fn average_questions_attempted(dataset: &Dataset) -> f64 {
    if dataset.is_empty() {
        return 0.0;
    }
    let total: usize = dataset.rows().iter().map(|row| row.attempted_count()).sum();
    total as f64 / dataset.len() as f64
}

pub fn attempt_series(dataset: &Dataset) -> Vec<AttemptBar> {
    (1..=dataset.max_questions())
        .map(|n| {
            let a = attempts(dataset, n);
            AttemptBar {
                question_number: n,
                attempted: a.attempted_count,
                skipped: a.total_students - a.attempted_count,
            }
        })
        .collect()
}
