//! Rule-based budget recommendations derived from the monthly spending
//! history of each expense category.
//!
//! Every category with spend (or an active budget) is evaluated against a
//! fixed rule table:
//!
//! - three or more months of data give a high-confidence verdict to create,
//!   increase, decrease or maintain the budget;
//! - one or two months only ever suggest creating a budget, with a larger
//!   buffer and medium confidence.
//!
//! "maintain" verdicts for categories that already have a budget are
//! dropped from the output, so in practice they never surface.

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::CategorySpendingPattern;
use crate::money::{cents_to_dollars, round2};

/// Thresholds and multipliers of the recommendation rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRules {
    /// Months of history needed for a high-confidence verdict.
    pub high_confidence_months: usize,
    /// Buffer over the average when proposing a first budget.
    pub create_buffer: f64,
    /// Buffer used when only a few months of data exist.
    pub limited_data_buffer: f64,
    /// The budget is too low when the average exceeds it by this factor.
    pub increase_trigger: f64,
    /// The budget is too high when the average is below it by this factor.
    pub decrease_trigger: f64,
    /// Buffer over the average when resizing an existing budget.
    pub resize_buffer: f64,
    /// Standard deviation (in currency units, not a ratio) above which a new
    /// budget's reasoning warns about uneven spending.
    pub create_volatility_note: f64,
    /// Same, for budgets that should be increased.
    pub increase_volatility_note: f64,
    /// Maximum number of recommendations returned.
    pub max_results: usize,
}

impl Default for RecommendationRules {
    fn default() -> Self {
        Self {
            high_confidence_months: 3,
            create_buffer: 1.15,
            limited_data_buffer: 1.25,
            increase_trigger: 1.1,
            decrease_trigger: 0.7,
            resize_buffer: 1.1,
            create_volatility_note: 30.0,
            increase_volatility_note: 25.0,
            max_results: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Create,
    Increase,
    Decrease,
    Maintain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Summary statistics over the months in which a category had spend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpendingStats {
    pub average: f64,
    pub max: f64,
    /// Population standard deviation.
    pub volatility: f64,
    pub months: usize,
}

impl SpendingStats {
    /// Only positive monthly totals count; absent months are never filled
    /// in as zero.
    pub fn from_monthly(totals: &[f64]) -> Self {
        let values: Vec<f64> = totals.iter().copied().filter(|v| *v > 0.0).collect();
        if values.is_empty() {
            return Self {
                average: 0.0,
                max: 0.0,
                volatility: 0.0,
                months: 0,
            };
        }

        let n = values.len() as f64;
        let average = values.iter().sum::<f64>() / n;
        let max = values.iter().copied().fold(f64::MIN, f64::max);
        let variance = values.iter().map(|v| (v - average).powi(2)).sum::<f64>() / n;

        Self {
            average,
            max,
            volatility: variance.sqrt(),
            months: values.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub category_id: i64,
    pub category: String,
    pub color: String,
    pub current_budget: f64,
    pub recommended_amount: f64,
    pub avg_monthly_spending: f64,
    pub max_monthly_spending: f64,
    pub spending_volatility: f64,
    pub months_with_data: usize,
    pub recommendation_type: RecommendationType,
    pub confidence: Confidence,
    pub reasoning: String,
    pub potential_savings: f64,
    #[serde(skip)]
    avg_spend_exact: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecommendationSummary {
    pub total_categories: usize,
    pub create_new: usize,
    pub increase_budget: usize,
    pub decrease_budget: usize,
    pub maintain_budget: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub recommendations: Vec<Recommendation>,
    pub summary: RecommendationSummary,
}

/// Round a buffered amount up to whole currency units. The product is
/// first settled to cents so `100 × 1.1` lands on 110, not 111.
fn buffered(average: f64, factor: f64) -> f64 {
    round2(average * factor).ceil()
}

/// Evaluate one category. Returns `None` when the category has neither
/// spend nor a budget and therefore nothing to say.
pub fn evaluate(
    pattern: &CategorySpendingPattern,
    rules: &RecommendationRules,
) -> Option<Recommendation> {
    let totals: Vec<f64> = pattern
        .monthly_totals
        .iter()
        .map(|m| cents_to_dollars(m.total_cents))
        .collect();
    let stats = SpendingStats::from_monthly(&totals);
    let current_budget = cents_to_dollars(pattern.current_budget_cents);

    if stats.average <= 0.0 && current_budget <= 0.0 {
        return None;
    }

    let avg = stats.average;
    let mut recommended = 0.0;
    let mut kind = RecommendationType::Maintain;
    let mut confidence = Confidence::Low;
    let mut reasoning = String::new();

    if stats.months >= rules.high_confidence_months {
        confidence = Confidence::High;

        if current_budget == 0.0 {
            kind = RecommendationType::Create;
            recommended = buffered(avg, rules.create_buffer);
            let note = if stats.volatility > rules.create_volatility_note {
                " Note: Your spending in this category varies significantly."
            } else {
                " This category has consistent spending patterns."
            };
            reasoning = format!(
                "Based on your average monthly spending of ${:.2}.{}",
                avg, note
            );
        } else if avg > current_budget * rules.increase_trigger {
            kind = RecommendationType::Increase;
            recommended = buffered(avg, rules.resize_buffer);
            let note = if stats.volatility > rules.increase_volatility_note {
                " Spending in this category can be unpredictable."
            } else {
                ""
            };
            reasoning = format!(
                "Your current budget (${:.2}) is below your average spending.{}",
                current_budget, note
            );
        } else if avg < current_budget * rules.decrease_trigger {
            kind = RecommendationType::Decrease;
            recommended = buffered(avg, rules.resize_buffer);
            confidence = Confidence::Medium;
            reasoning = format!(
                "Your current budget (${:.2}) may be too high based on your spending patterns.",
                current_budget
            );
        } else {
            recommended = current_budget;
            reasoning = "Your current budget aligns well with your spending patterns.".into();
        }
    } else if stats.months > 0 {
        confidence = Confidence::Medium;
        kind = RecommendationType::Create;
        recommended = buffered(avg, rules.limited_data_buffer);
        reasoning = format!(
            "Based on limited data ({} month{}). Consider monitoring for a few more months.",
            stats.months,
            if stats.months > 1 { "s" } else { "" }
        );
    }

    let potential_savings = if kind == RecommendationType::Decrease {
        round2(current_budget - recommended)
    } else {
        0.0
    };

    Some(Recommendation {
        category_id: pattern.category_id,
        category: pattern.category.clone(),
        color: pattern.color.clone(),
        current_budget,
        recommended_amount: recommended,
        avg_monthly_spending: round2(avg),
        max_monthly_spending: round2(stats.max),
        spending_volatility: round2(stats.volatility),
        months_with_data: stats.months,
        recommendation_type: kind,
        confidence,
        reasoning,
        potential_savings,
        avg_spend_exact: avg,
    })
}

/// Evaluate every category, drop "maintain" verdicts for categories that
/// already have a budget, rank by average spend and cap the list. The
/// summary counts the whole filtered list, before the cap.
pub fn recommend(
    patterns: &[CategorySpendingPattern],
    rules: &RecommendationRules,
) -> RecommendationReport {
    let mut recommendations: Vec<Recommendation> = patterns
        .iter()
        .filter_map(|p| evaluate(p, rules))
        .filter(|r| r.recommendation_type != RecommendationType::Maintain || r.current_budget == 0.0)
        .collect();

    recommendations.sort_by(|a, b| {
        b.avg_spend_exact
            .partial_cmp(&a.avg_spend_exact)
            .unwrap_or(Ordering::Equal)
    });

    let count = |kind: RecommendationType| {
        recommendations
            .iter()
            .filter(|r| r.recommendation_type == kind)
            .count()
    };
    let summary = RecommendationSummary {
        total_categories: recommendations.len(),
        create_new: count(RecommendationType::Create),
        increase_budget: count(RecommendationType::Increase),
        decrease_budget: count(RecommendationType::Decrease),
        maintain_budget: count(RecommendationType::Maintain),
    };

    recommendations.truncate(rules.max_results);

    RecommendationReport {
        recommendations,
        summary,
    }
}
