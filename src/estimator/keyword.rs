//! Keyword-based estimation backend
//!
//! Heuristic tables in place of a model call: food keywords map to nutrient
//! profiles, activity keywords to burn rates, craving keywords to alternative
//! lists. Deliberately rough; every food estimate is a range and the
//! confidence field says how much to trust it.

use crate::estimator::{
    CravingSuggestions, EstimatorError, FoodEstimate, FoodQuery, MovementEstimate, TextEstimator,
};
use crate::events::types::{Confidence, MovementIntensity};
use async_trait::async_trait;
use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Nutrient profile for one food keyword family
struct FoodProfile {
    keywords: &'static [&'static str],
    calories_min: f64,
    calories_max: f64,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
    fiber_g: f64,
    sugar_g: f64,
}

static FOOD_PROFILES: &[FoodProfile] = &[
    FoodProfile {
        keywords: &["burrito", "bowl"],
        calories_min: 450.0,
        calories_max: 650.0,
        protein_g: 25.0,
        carbs_g: 60.0,
        fat_g: 18.0,
        fiber_g: 12.0,
        sugar_g: 6.0,
    },
    FoodProfile {
        keywords: &["salad"],
        calories_min: 200.0,
        calories_max: 400.0,
        protein_g: 15.0,
        carbs_g: 20.0,
        fat_g: 12.0,
        fiber_g: 8.0,
        sugar_g: 5.0,
    },
    FoodProfile {
        keywords: &["pizza"],
        calories_min: 500.0,
        calories_max: 800.0,
        protein_g: 20.0,
        carbs_g: 65.0,
        fat_g: 25.0,
        fiber_g: 4.0,
        sugar_g: 8.0,
    },
    FoodProfile {
        keywords: &["sandwich", "wrap"],
        calories_min: 350.0,
        calories_max: 550.0,
        protein_g: 22.0,
        carbs_g: 45.0,
        fat_g: 15.0,
        fiber_g: 6.0,
        sugar_g: 6.0,
    },
    FoodProfile {
        keywords: &["smoothie", "shake"],
        calories_min: 200.0,
        calories_max: 400.0,
        protein_g: 10.0,
        carbs_g: 50.0,
        fat_g: 5.0,
        fiber_g: 5.0,
        sugar_g: 30.0,
    },
    FoodProfile {
        keywords: &["oatmeal", "oats"],
        calories_min: 250.0,
        calories_max: 400.0,
        protein_g: 12.0,
        carbs_g: 55.0,
        fat_g: 8.0,
        fiber_g: 10.0,
        sugar_g: 12.0,
    },
    FoodProfile {
        keywords: &["eggs"],
        calories_min: 150.0,
        calories_max: 300.0,
        protein_g: 18.0,
        carbs_g: 5.0,
        fat_g: 12.0,
        fiber_g: 1.0,
        sugar_g: 1.0,
    },
    FoodProfile {
        keywords: &["yogurt"],
        calories_min: 120.0,
        calories_max: 250.0,
        protein_g: 15.0,
        carbs_g: 25.0,
        fat_g: 5.0,
        fiber_g: 2.0,
        sugar_g: 15.0,
    },
    FoodProfile {
        keywords: &["pasta"],
        calories_min: 400.0,
        calories_max: 700.0,
        protein_g: 18.0,
        carbs_g: 75.0,
        fat_g: 15.0,
        fiber_g: 5.0,
        sugar_g: 7.0,
    },
    FoodProfile {
        keywords: &["rice", "grain bowl"],
        calories_min: 350.0,
        calories_max: 550.0,
        protein_g: 15.0,
        carbs_g: 65.0,
        fat_g: 10.0,
        fiber_g: 7.0,
        sugar_g: 4.0,
    },
    FoodProfile {
        keywords: &["snack", "bar"],
        calories_min: 150.0,
        calories_max: 250.0,
        protein_g: 5.0,
        carbs_g: 25.0,
        fat_g: 8.0,
        fiber_g: 3.0,
        sugar_g: 12.0,
    },
];

/// Burn rate for one activity keyword family (kcal per minute, moderate)
struct ActivityProfile {
    keywords: &'static [&'static str],
    activity_type: &'static str,
    burn_per_min: f64,
}

static ACTIVITY_PROFILES: &[ActivityProfile] = &[
    ActivityProfile {
        keywords: &["walk"],
        activity_type: "walking",
        burn_per_min: 3.5,
    },
    ActivityProfile {
        keywords: &["run", "jog"],
        activity_type: "running",
        burn_per_min: 10.0,
    },
    ActivityProfile {
        keywords: &["strength", "weight", "lift"],
        activity_type: "strength training",
        burn_per_min: 6.0,
    },
    ActivityProfile {
        keywords: &["yoga"],
        activity_type: "yoga",
        burn_per_min: 3.0,
    },
    ActivityProfile {
        keywords: &["bike", "cycl"],
        activity_type: "cycling",
        burn_per_min: 8.0,
    },
    ActivityProfile {
        keywords: &["swim"],
        activity_type: "swimming",
        burn_per_min: 9.0,
    },
    ActivityProfile {
        keywords: &["hiit", "cardio"],
        activity_type: "HIIT",
        burn_per_min: 12.0,
    },
];

static FOOD_NOTES: &[&str] = &[
    "Thanks for logging. Data, not drama.",
    "You're building awareness. That's what matters.",
    "Great job adding this entry. Every bit of data helps you notice patterns.",
    "Logged. Remember, these are rough estimates, not exact science.",
    "Nice work tracking. You're learning what works for your body.",
];

static MOVEMENT_NOTES: &[&str] = &[
    "Movement logged. Your body will thank you for listening to it.",
    "Nice work. Rest is just as important as movement.",
    "You showed up for yourself today. That counts.",
    "Logged. Remember, all movement is beneficial movement.",
    "Great job moving today. You're building sustainable habits.",
];

static CRAVING_SUGGESTIONS: &[&str] = &[
    "Cravings are just information. You might be noticing a pattern here.",
    "It's okay to feel this. Sometimes our bodies are asking for specific nutrients, or just comfort.",
    "If you'd like, try one of these options. Or honor the craving. Both are valid.",
    "Your body is communicating. These alternatives might satisfy the same need.",
];

fn duration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d+)\s*(min|minute|minutes|hour|hours)").expect("valid duration pattern")
    })
}

fn pick<R: Rng>(rng: &mut R, pool: &[&str]) -> String {
    pool[rng.gen_range(0..pool.len())].to_string()
}

/// The built-in heuristic estimation backend
#[derive(Debug, Clone, Default)]
pub struct KeywordEstimator;

impl KeywordEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Food estimation with a caller-supplied RNG for the supportive note
    pub fn estimate_food_with_rng<R: Rng>(&self, query: &FoodQuery, rng: &mut R) -> FoodEstimate {
        let lower = query.text.to_lowercase();

        // Generic fallback profile when no keyword matches
        let mut calories_min = 200.0;
        let mut calories_max = 300.0;
        let mut protein_g = 10.0;
        let mut carbs_g = 30.0;
        let mut fat_g = 8.0;
        let mut fiber_g = 3.0;
        let mut sugar_g = 5.0;
        let mut confidence = Confidence::Medium;

        if let Some(profile) = FOOD_PROFILES
            .iter()
            .find(|p| p.keywords.iter().any(|k| lower.contains(k)))
        {
            calories_min = profile.calories_min;
            calories_max = profile.calories_max;
            protein_g = profile.protein_g;
            carbs_g = profile.carbs_g;
            fat_g = profile.fat_g;
            fiber_g = profile.fiber_g;
            sugar_g = profile.sugar_g;
        }

        if query.is_restaurant {
            calories_min = (calories_min * 1.3).round();
            calories_max = (calories_max * 1.5).round();
            confidence = Confidence::Low;
        }

        if query.unsure_portions {
            let range = calories_max - calories_min;
            calories_min = (calories_min - range * 0.2).round();
            calories_max = (calories_max + range * 0.2).round();
            confidence = Confidence::Low;
        }

        debug!(text = %query.text, calories_min, calories_max, "estimated food from keywords");

        FoodEstimate {
            calories_min,
            calories_max,
            protein_g,
            carbs_g,
            fat_g,
            fiber_g,
            sugar_g,
            confidence,
            supportive_note: pick(rng, FOOD_NOTES),
        }
    }

    /// Movement estimation with a caller-supplied RNG
    pub fn estimate_movement_with_rng<R: Rng>(
        &self,
        text: &str,
        intensity: Option<MovementIntensity>,
        rng: &mut R,
    ) -> MovementEstimate {
        let lower = text.to_lowercase();

        let mut duration_min = 30.0;
        if let Some(caps) = duration_regex().captures(text) {
            if let Ok(value) = caps[1].parse::<f64>() {
                duration_min = value;
                if caps[2].to_lowercase().starts_with("hour") {
                    duration_min *= 60.0;
                }
            }
        }

        let (activity_type, mut burn_per_min) = ACTIVITY_PROFILES
            .iter()
            .find(|p| p.keywords.iter().any(|k| lower.contains(k)))
            .map(|p| (p.activity_type.to_string(), p.burn_per_min))
            .unwrap_or_else(|| ("general".to_string(), 4.0));

        match intensity {
            Some(MovementIntensity::Easy) => burn_per_min *= 0.7,
            Some(MovementIntensity::Hard) => burn_per_min *= 1.3,
            Some(MovementIntensity::Moderate) | None => {}
        }

        let estimated_burn_min = (duration_min * burn_per_min * 0.8).round();
        let estimated_burn_max = (duration_min * burn_per_min * 1.2).round();

        debug!(%text, %activity_type, duration_min, "estimated movement from keywords");

        MovementEstimate {
            activity_type,
            duration_min,
            estimated_burn_min,
            estimated_burn_max,
            supportive_note: pick(rng, MOVEMENT_NOTES),
        }
    }

    /// Craving suggestions with a caller-supplied RNG
    pub fn craving_suggestions_with_rng<R: Rng>(
        &self,
        text: &str,
        rng: &mut R,
    ) -> CravingSuggestions {
        let lower = text.to_lowercase();

        let (alternatives, honor_option): (&[&str], &str) = if ["sweet", "sugar", "chocolate", "candy"]
            .iter()
            .any(|k| lower.contains(k))
        {
            (
                &[
                    "Fresh berries with a drizzle of honey",
                    "Greek yogurt with cinnamon and a few dark chocolate chips",
                    "Sliced apple with almond butter",
                    "A small handful of dates",
                ],
                "Have a small piece of your favorite chocolate mindfully",
            )
        } else if ["salty", "chips", "crispy"].iter().any(|k| lower.contains(k)) {
            (
                &[
                    "Roasted chickpeas with sea salt",
                    "Handful of lightly salted nuts",
                    "Popcorn with nutritional yeast",
                    "Veggie sticks with hummus",
                ],
                "Have a small bowl of chips, eaten slowly",
            )
        } else if ["creamy", "rich"].iter().any(|k| lower.contains(k)) {
            (
                &[
                    "Full-fat Greek yogurt with berries",
                    "Avocado on toast",
                    "Smoothie with banana and nut butter",
                    "Cottage cheese with fruit",
                ],
                "Have a small portion of ice cream or your creamy favorite",
            )
        } else if lower.contains("crunchy") {
            (
                &[
                    "Carrot and celery sticks",
                    "Apple slices",
                    "Rice cakes with toppings",
                    "Cucumber with lime and tajin",
                ],
                "Have your crunchy snack of choice in a small portion",
            )
        } else {
            (
                &[
                    "Handful of trail mix",
                    "Sliced veggies with guacamole",
                    "A piece of fruit you enjoy",
                ],
                "Honor what you're truly craving in a mindful portion",
            )
        };

        CravingSuggestions {
            alternatives: alternatives.iter().map(|s| s.to_string()).collect(),
            honor_option: honor_option.to_string(),
            supportive_suggestion: pick(rng, CRAVING_SUGGESTIONS),
        }
    }
}

#[async_trait]
impl TextEstimator for KeywordEstimator {
    async fn estimate_food(&self, query: &FoodQuery) -> Result<FoodEstimate, EstimatorError> {
        Ok(self.estimate_food_with_rng(query, &mut rand::thread_rng()))
    }

    async fn estimate_movement(
        &self,
        text: &str,
        intensity: Option<MovementIntensity>,
    ) -> Result<MovementEstimate, EstimatorError> {
        Ok(self.estimate_movement_with_rng(text, intensity, &mut rand::thread_rng()))
    }

    async fn craving_suggestions(&self, text: &str) -> Result<CravingSuggestions, EstimatorError> {
        Ok(self.craving_suggestions_with_rng(text, &mut rand::thread_rng()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_burrito_profile() {
        let estimate = KeywordEstimator::new()
            .estimate_food_with_rng(&FoodQuery::new("chicken burrito with rice"), &mut rng());
        assert_eq!(estimate.calories_min, 450.0);
        assert_eq!(estimate.calories_max, 650.0);
        assert_eq!(estimate.protein_g, 25.0);
        assert_eq!(estimate.confidence, Confidence::Medium);
        assert!(FOOD_NOTES.contains(&estimate.supportive_note.as_str()));
    }

    #[test]
    fn test_unknown_food_falls_back_to_generic() {
        let estimate =
            KeywordEstimator::new().estimate_food_with_rng(&FoodQuery::new("mystery stew"), &mut rng());
        assert_eq!(estimate.calories_min, 200.0);
        assert_eq!(estimate.calories_max, 300.0);
    }

    #[test]
    fn test_restaurant_widens_range_and_lowers_confidence() {
        let mut query = FoodQuery::new("salad");
        query.is_restaurant = true;

        let estimate = KeywordEstimator::new().estimate_food_with_rng(&query, &mut rng());
        assert_eq!(estimate.calories_min, 260.0);
        assert_eq!(estimate.calories_max, 600.0);
        assert_eq!(estimate.confidence, Confidence::Low);
    }

    #[test]
    fn test_unsure_portions_widen_both_ends() {
        let mut query = FoodQuery::new("salad");
        query.unsure_portions = true;

        // Base 200-400, range 200, widened by 40 each way
        let estimate = KeywordEstimator::new().estimate_food_with_rng(&query, &mut rng());
        assert_eq!(estimate.calories_min, 160.0);
        assert_eq!(estimate.calories_max, 440.0);
        assert_eq!(estimate.confidence, Confidence::Low);
    }

    #[test]
    fn test_movement_duration_in_minutes() {
        let estimate = KeywordEstimator::new().estimate_movement_with_rng(
            "45 min run in the park",
            None,
            &mut rng(),
        );
        assert_eq!(estimate.activity_type, "running");
        assert_eq!(estimate.duration_min, 45.0);
        assert_eq!(estimate.estimated_burn_min, 360.0);
        assert_eq!(estimate.estimated_burn_max, 540.0);
    }

    #[test]
    fn test_movement_duration_in_hours() {
        let estimate =
            KeywordEstimator::new().estimate_movement_with_rng("1 hour yoga", None, &mut rng());
        assert_eq!(estimate.activity_type, "yoga");
        assert_eq!(estimate.duration_min, 60.0);
    }

    #[test]
    fn test_movement_defaults() {
        let estimate = KeywordEstimator::new().estimate_movement_with_rng(
            "moved around a bit",
            None,
            &mut rng(),
        );
        assert_eq!(estimate.activity_type, "general");
        assert_eq!(estimate.duration_min, 30.0);
        // 30 min at 4.0/min
        assert_eq!(estimate.estimated_burn_min, 96.0);
        assert_eq!(estimate.estimated_burn_max, 144.0);
    }

    #[test]
    fn test_intensity_scales_burn() {
        let estimator = KeywordEstimator::new();
        let easy = estimator.estimate_movement_with_rng(
            "30 min walk",
            Some(MovementIntensity::Easy),
            &mut rng(),
        );
        let hard = estimator.estimate_movement_with_rng(
            "30 min walk",
            Some(MovementIntensity::Hard),
            &mut rng(),
        );
        // 30 * 3.5 * 0.7 * 0.8 = 58.8 -> 59; 30 * 3.5 * 1.3 * 0.8 = 109.2 -> 109
        assert_eq!(easy.estimated_burn_min, 59.0);
        assert_eq!(hard.estimated_burn_min, 109.0);
    }

    #[test]
    fn test_sweet_craving_alternatives() {
        let suggestions = KeywordEstimator::new()
            .craving_suggestions_with_rng("chocolate after dinner", &mut rng());
        assert_eq!(suggestions.alternatives.len(), 4);
        assert_eq!(
            suggestions.honor_option,
            "Have a small piece of your favorite chocolate mindfully"
        );
    }

    #[test]
    fn test_uncategorized_craving_gets_default_list() {
        let suggestions =
            KeywordEstimator::new().craving_suggestions_with_rng("something, anything", &mut rng());
        assert_eq!(suggestions.alternatives.len(), 3);
        assert_eq!(
            suggestions.honor_option,
            "Honor what you're truly craving in a mindful portion"
        );
    }

    #[tokio::test]
    async fn test_trait_impl_round_trip() {
        let estimator = KeywordEstimator::new();
        let estimate = estimator
            .estimate_food(&FoodQuery::new("oatmeal with berries"))
            .await
            .unwrap();
        assert_eq!(estimate.calories_min, 250.0);
    }
}
