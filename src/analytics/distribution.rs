//! 等级分布和高于平均分统计

use serde::Serialize;
use std::fmt;

use super::dataset::Dataset;
use super::stats::{mean, median, population_std_dev};

/// 成绩等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GradeBand {
    A,
    B,
    C,
    D,
    F,
}

impl GradeBand {
    pub const ALL: [GradeBand; 5] = [
        GradeBand::A,
        GradeBand::B,
        GradeBand::C,
        GradeBand::D,
        GradeBand::F,
    ];

    /// 闭区间 [下限, 上限]
    pub fn range(self) -> (u32, u32) {
        match self {
            GradeBand::A => (90, 100),
            GradeBand::B => (80, 89),
            GradeBand::C => (70, 79),
            GradeBand::D => (60, 69),
            GradeBand::F => (0, 59),
        }
    }

    /// 得分率对应的等级
    ///
    /// 先截断到 [0, 100] 再向下取整，所以 89.5 属于 B
    pub fn for_percentage(percentage: f64) -> GradeBand {
        let whole = percentage.clamp(0.0, 100.0).floor() as u32;
        Self::ALL
            .into_iter()
            .find(|band| {
                let (lo, hi) = band.range();
                (lo..=hi).contains(&whole)
            })
            .unwrap_or(GradeBand::F)
    }

    pub fn label(self) -> String {
        let (lo, hi) = self.range();
        format!("{} ({}-{}%)", self, lo, hi)
    }
}

impl fmt::Display for GradeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            GradeBand::A => "A",
            GradeBand::B => "B",
            GradeBand::C => "C",
            GradeBand::D => "D",
            GradeBand::F => "F",
        };
        write!(f, "{}", letter)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeCount {
    pub grade: GradeBand,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeDistribution {
    /// 固定按 A、B、C、D、F 顺序
    pub grades: Vec<GradeCount>,
    pub average: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl GradeDistribution {
    pub fn count(&self, band: GradeBand) -> usize {
        self.grades
            .iter()
            .find(|g| g.grade == band)
            .map_or(0, |g| g.count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AboveAverage {
    pub percentage: f64,
    pub count: usize,
    pub total: usize,
    pub class_average: f64,
}

pub fn grade_distribution(dataset: &Dataset) -> GradeDistribution {
    let percentages = dataset.percentages();

    let grades = GradeBand::ALL
        .into_iter()
        .map(|band| GradeCount {
            grade: band,
            label: band.label(),
            count: percentages
                .iter()
                .filter(|p| GradeBand::for_percentage(**p) == band)
                .count(),
        })
        .collect();

    GradeDistribution {
        grades,
        average: mean(&percentages),
        median: median(&percentages),
        std_dev: population_std_dev(&percentages),
    }
}

pub fn above_average(dataset: &Dataset) -> AboveAverage {
    let percentages = dataset.percentages();
    let class_average = mean(&percentages);
    let count = percentages.iter().filter(|p| **p > class_average).count();
    let total = percentages.len();

    AboveAverage {
        percentage: if total > 0 {
            count as f64 / total as f64 * 100.0
        } else {
            0.0
        },
        count,
        total,
        class_average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(GradeBand::for_percentage(100.0), GradeBand::A);
        assert_eq!(GradeBand::for_percentage(90.0), GradeBand::A);
        assert_eq!(GradeBand::for_percentage(89.5), GradeBand::B);
        assert_eq!(GradeBand::for_percentage(80.0), GradeBand::B);
        assert_eq!(GradeBand::for_percentage(79.99), GradeBand::C);
        assert_eq!(GradeBand::for_percentage(60.0), GradeBand::D);
        assert_eq!(GradeBand::for_percentage(59.9), GradeBand::F);
        assert_eq!(GradeBand::for_percentage(-5.0), GradeBand::F);
        assert_eq!(GradeBand::for_percentage(120.0), GradeBand::A);
    }

    #[test]
    fn test_label() {
        assert_eq!(GradeBand::A.label(), "A (90-100%)");
        assert_eq!(GradeBand::F.label(), "F (0-59%)");
    }
}
