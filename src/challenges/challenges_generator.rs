use rust_decimal::{Decimal, RoundingStrategy};

use crate::challenge_config::ChallengeConfig;
use crate::constants::{DEFAULT_CHALLENGE_TYPE, MONEY_DECIMALS};

use super::challenges_model::NewChallenge;

/// Produces unpersisted challenge candidates from a user's config.
///
/// The function is a pure mapping from the config: identical inputs yield
/// identical candidates. The candidate count equals the motivation ordinal
/// (1..=5), so it is monotone in motivation, and every target is spread
/// evenly across the configured `[target_min, target_max]` range. Preferred
/// challenge types are cycled across the candidates.
pub fn generate_candidates(config: &ChallengeConfig) -> Vec<NewChallenge> {
    let count = config.motivation.level();
    let span = config.target_max - config.target_min;

    let mut candidates = Vec::with_capacity(count as usize);
    for i in 0..count {
        let fraction = Decimal::from(i + 1) / Decimal::from(count + 1);
        let target = (config.target_min + span * fraction)
            .round_dp_with_strategy(MONEY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
            .clamp(config.target_min, config.target_max);

        let challenge_type = preferred_type(config, i as usize);
        let label = type_label(&challenge_type);

        candidates.push(NewChallenge {
            id: None,
            title: format!("{} challenge", label),
            description: Some(format!(
                "Reach {} by cutting back on {} spending",
                target,
                label.to_lowercase()
            )),
            challenge_type,
            target,
            saved: Decimal::ZERO,
        });
    }

    candidates
}

fn preferred_type(config: &ChallengeConfig, index: usize) -> String {
    if config.preferred_types.is_empty() {
        DEFAULT_CHALLENGE_TYPE.to_string()
    } else {
        config.preferred_types[index % config.preferred_types.len()].clone()
    }
}

fn type_label(challenge_type: &str) -> String {
    let lower = challenge_type.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge_config::Motivation;
    use rust_decimal_macros::dec;

    fn config(motivation: Motivation, types: &[&str]) -> ChallengeConfig {
        let now = chrono::Utc::now().naive_utc();
        ChallengeConfig {
            user_id: "user-1".to_string(),
            motivation,
            target_min: dec!(100),
            target_max: dec!(500),
            preferred_types: types.iter().map(|t| t.to_string()).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn candidate_count_follows_motivation() {
        for (motivation, expected) in [
            (Motivation::VeryLow, 1),
            (Motivation::Low, 2),
            (Motivation::Medium, 3),
            (Motivation::High, 4),
            (Motivation::VeryHigh, 5),
        ] {
            assert_eq!(generate_candidates(&config(motivation, &[])).len(), expected);
        }
    }

    #[test]
    fn targets_stay_inside_the_configured_range() {
        let cfg = config(Motivation::High, &[]);
        let candidates = generate_candidates(&cfg);
        assert!(!candidates.is_empty());
        for candidate in &candidates {
            assert!(candidate.target >= cfg.target_min);
            assert!(candidate.target <= cfg.target_max);
            assert_eq!(candidate.saved, Decimal::ZERO);
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let cfg = config(Motivation::VeryHigh, &["COFFEE", "TRANSPORT"]);
        assert_eq!(generate_candidates(&cfg), generate_candidates(&cfg));
    }

    #[test]
    fn preferred_types_are_cycled() {
        let cfg = config(Motivation::Medium, &["COFFEE", "TRANSPORT"]);
        let types: Vec<String> = generate_candidates(&cfg)
            .into_iter()
            .map(|c| c.challenge_type)
            .collect();
        assert_eq!(types, vec!["COFFEE", "TRANSPORT", "COFFEE"]);
    }

    #[test]
    fn empty_preference_falls_back_to_default_type() {
        let cfg = config(Motivation::VeryLow, &[]);
        let candidates = generate_candidates(&cfg);
        assert_eq!(candidates[0].challenge_type, DEFAULT_CHALLENGE_TYPE);
    }

    #[test]
    fn degenerate_range_yields_the_single_target() {
        let mut cfg = config(Motivation::Medium, &[]);
        cfg.target_max = cfg.target_min;
        for candidate in generate_candidates(&cfg) {
            assert_eq!(candidate.target, cfg.target_min);
        }
    }
}
