use crate::overview::OverviewMetrics;
use crate::risk::RiskMetrics;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade mapped from the overall 0-100 health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    F,
    D,
    C,
    #[serde(rename = "C+")]
    CPlus,
    B,
    #[serde(rename = "B+")]
    BPlus,
    A,
    #[serde(rename = "A+")]
    APlus,
}

impl Grade {
    /// Fixed thresholds: >=90 A+, >=80 A, >=70 B+, >=60 B, >=50 C+, >=40 C,
    /// >=25 D, else F.
    pub fn from_overall(overall: u8) -> Self {
        match overall {
            90..=u8::MAX => Grade::APlus,
            80..=89 => Grade::A,
            70..=79 => Grade::BPlus,
            60..=69 => Grade::B,
            50..=59 => Grade::CPlus,
            40..=49 => Grade::C,
            25..=39 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite trading-health grade: four 0-25 sub-scores summed to 0-100,
/// with human-readable warnings and recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskHealthScore {
    pub overall: u8,
    pub sharpe_score: u8,
    pub drawdown_score: u8,
    pub consistency_score: u8,
    pub risk_reward_score: u8,
    pub grade: Grade,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Scores the risk profile against fixed bands.
///
/// The check order is fixed (Sharpe, drawdown, consistency, risk/reward,
/// Kelly, loss streak) so the warning and recommendation lists are
/// reproducible for identical inputs.
pub fn risk_health_score(risk: &RiskMetrics, overview: &OverviewMetrics) -> RiskHealthScore {
    let mut warnings = Vec::new();
    let mut recommendations = Vec::new();

    let sharpe_score = if risk.sharpe_ratio > 2.0 {
        25
    } else if risk.sharpe_ratio > 1.5 {
        22
    } else if risk.sharpe_ratio > 1.0 {
        18
    } else if risk.sharpe_ratio > 0.5 {
        12
    } else if risk.sharpe_ratio > 0.0 {
        6
    } else {
        warnings.push("Negative Sharpe ratio indicates poor risk-adjusted returns".to_string());
        0
    };

    let drawdown_pct = risk.max_drawdown_percent.abs();
    let drawdown_score = if drawdown_pct > 30.0 {
        warnings.push("Max drawdown exceeds 30%".to_string());
        5
    } else if drawdown_pct > 20.0 {
        warnings.push("Max drawdown exceeds 20%".to_string());
        10
    } else if drawdown_pct > 10.0 {
        18
    } else if drawdown_pct > 5.0 {
        22
    } else {
        25
    };

    let consistency_score = if overview.win_rate > 60.0 && overview.profit_factor > 1.5 {
        25
    } else if overview.win_rate > 50.0 && overview.profit_factor > 1.2 {
        20
    } else if overview.win_rate > 45.0 && overview.profit_factor > 1.0 {
        15
    } else if overview.win_rate > 40.0 {
        10
    } else {
        recommendations.push("Consider tightening stop losses to improve win rate".to_string());
        5
    };

    let risk_reward_score = if risk.risk_reward_ratio > 2.0 {
        25
    } else if risk.risk_reward_ratio > 1.5 {
        20
    } else if risk.risk_reward_ratio > 1.0 {
        15
    } else if risk.risk_reward_ratio > 0.5 {
        8
    } else {
        recommendations.push("Average wins should exceed average losses".to_string());
        3
    };

    if risk.kelly_percent > 25.0 {
        recommendations.push("Kelly suggests reducing position sizes".to_string());
    }
    if risk.max_consecutive_losses > 5 {
        warnings.push(format!(
            "{} consecutive losses detected",
            risk.max_consecutive_losses
        ));
    }

    let overall = sharpe_score + drawdown_score + consistency_score + risk_reward_score;

    RiskHealthScore {
        overall,
        sharpe_score,
        drawdown_score,
        consistency_score,
        risk_reward_score,
        grade: Grade::from_overall(overall),
        warnings,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overview::overview;
    use crate::risk::risk_metrics;

    fn strong_profile() -> (RiskMetrics, OverviewMetrics) {
        let risk = RiskMetrics {
            sharpe_ratio: 2.5,
            max_drawdown_percent: 3.0,
            risk_reward_ratio: 2.5,
            ..RiskMetrics::default()
        };
        let mut overview = overview(&[]);
        overview.win_rate = 65.0;
        overview.profit_factor = 2.0;
        (risk, overview)
    }

    #[test]
    fn perfect_profile_grades_a_plus() {
        let (risk, overview) = strong_profile();
        let score = risk_health_score(&risk, &overview);

        assert_eq!(score.overall, 100);
        assert_eq!(score.grade, Grade::APlus);
        assert!(score.warnings.is_empty());
        assert!(score.recommendations.is_empty());
    }

    #[test]
    fn degenerate_profile_collects_warnings() {
        let risk = risk_metrics(&[], &[]);
        let overview = overview(&[]);
        let score = risk_health_score(&risk, &overview);

        // Sharpe 0 (warning) + drawdown 25 + consistency 5 (rec) + rr 3 (rec).
        assert_eq!(score.overall, 33);
        assert_eq!(score.grade, Grade::D);
        assert_eq!(
            score.warnings,
            vec!["Negative Sharpe ratio indicates poor risk-adjusted returns".to_string()]
        );
        assert_eq!(score.recommendations.len(), 2);
    }

    #[test]
    fn loss_streak_warning_carries_the_count() {
        let (mut risk, overview) = strong_profile();
        risk.max_consecutive_losses = 7;
        let score = risk_health_score(&risk, &overview);
        assert!(score.warnings.contains(&"7 consecutive losses detected".to_string()));
    }

    #[test]
    fn deep_drawdown_caps_the_sub_score() {
        let (mut risk, overview) = strong_profile();
        risk.max_drawdown_percent = -35.0; // sign is irrelevant
        let score = risk_health_score(&risk, &overview);
        assert_eq!(score.drawdown_score, 5);
        assert!(score.warnings.contains(&"Max drawdown exceeds 30%".to_string()));
    }

    #[test]
    fn grade_mapping_is_monotonic() {
        let mut last = Grade::F;
        for overall in 0..=100_u8 {
            let grade = Grade::from_overall(overall);
            assert!(grade >= last, "grade regressed at overall={overall}");
            last = grade;
        }
    }

    #[test]
    fn infinite_profit_factor_counts_as_consistent() {
        let (mut risk, mut overview) = strong_profile();
        risk.sharpe_ratio = 1.2;
        overview.win_rate = 62.0;
        overview.profit_factor = f64::INFINITY;
        let score = risk_health_score(&risk, &overview);
        assert_eq!(score.consistency_score, 25);
    }
}
