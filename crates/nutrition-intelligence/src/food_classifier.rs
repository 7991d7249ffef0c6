// ABOUTME: Food classification for fiber estimation and processed-food detection
// ABOUTME: Pluggable classifier trait with a keyword heuristic over Spanish food names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Food classification.
//!
//! The rule engine never inspects food names itself; it asks a
//! [`FoodClassifier`]. [`KeywordFoodClassifier`] is the built-in heuristic and
//! is approximate: fiber is a multiple of the food's quantity chosen by name
//! keyword, not a lookup in a nutrition database.

use nutrition_core::constants::fiber;
use nutrition_core::models::Food;
use serde::{Deserialize, Serialize};

/// High-fiber names (whole grains, oats, legumes, dark greens), accent-folded
const HIGH_FIBER_KEYWORDS: &[&str] = &[
    "integral",
    "avena",
    "legumbre",
    "lenteja",
    "garbanzo",
    "alubia",
    "frijol",
    "brocoli",
    "espinaca",
    "quinoa",
    "chia",
    "salvado",
    "linaza",
];

/// Fruit and vegetable names, accent-folded
const PRODUCE_KEYWORDS: &[&str] = &[
    "fruta",
    "verdura",
    "hortaliza",
    "ensalada",
    "manzana",
    "pera",
    "naranja",
    "mandarina",
    "platano",
    "fresa",
    "frutos rojos",
    "arandano",
    "kiwi",
    "mango",
    "pina",
    "uva",
    "melon",
    "sandia",
    "lechuga",
    "tomate",
    "zanahoria",
    "calabacin",
    "pimiento",
    "pepino",
    "berenjena",
    "coliflor",
    "esparrago",
    "judias verdes",
    "champinon",
    "aguacate",
];

/// Processed-food names, accent-folded
const PROCESSED_KEYWORDS: &[&str] = &[
    "pan blanco",
    "embutido",
    "refresco",
    "bolleria",
    "galleta",
    "salchicha",
    "chorizo",
    "salami",
    "mortadela",
    "jamon york",
    "bacon",
    "nugget",
    "pizza",
    "hamburguesa",
    "patatas fritas",
    "precocinado",
    "cereales azucarados",
    "zumo envasado",
    "bebida energetica",
    "golosina",
    "chuche",
    "margarina",
];

/// Coarse category a food name falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    /// Whole grains, oats, legumes and dark leafy greens
    HighFiber,
    /// Other fruit and vegetables
    Produce,
    /// Anything else
    Other,
}

/// Result of classifying one food
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodClassification {
    /// Estimated fiber contribution (g)
    pub fiber_g: f64,
    /// Whether the food counts toward the processed-food limit
    pub is_processed: bool,
    /// Category driving the fiber estimate
    pub category: FoodCategory,
}

/// Classifies foods for the aggregator
///
/// Implementations must be deterministic: the same food always yields the
/// same classification.
pub trait FoodClassifier: Send + Sync {
    /// Classify a single food
    fn classify(&self, food: &Food) -> FoodClassification;
}

/// Keyword heuristic over lower-cased, accent-folded food names
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordFoodClassifier;

impl KeywordFoodClassifier {
    /// Category for a food name
    #[must_use]
    pub fn categorize(name: &str) -> FoodCategory {
        let normalized = normalize_name(name);
        if contains_any(&normalized, HIGH_FIBER_KEYWORDS) {
            FoodCategory::HighFiber
        } else if contains_any(&normalized, PRODUCE_KEYWORDS) {
            FoodCategory::Produce
        } else {
            FoodCategory::Other
        }
    }

    /// Whether a food name matches a processed-food keyword
    #[must_use]
    pub fn is_processed(name: &str) -> bool {
        contains_any(&normalize_name(name), PROCESSED_KEYWORDS)
    }

    /// Fiber multiplier applied to the quantity for a category
    #[must_use]
    pub const fn fiber_factor(category: FoodCategory) -> f64 {
        match category {
            FoodCategory::HighFiber => fiber::HIGH_FIBER_FACTOR,
            FoodCategory::Produce => fiber::PRODUCE_FACTOR,
            FoodCategory::Other => fiber::BASELINE_FACTOR,
        }
    }
}

impl FoodClassifier for KeywordFoodClassifier {
    fn classify(&self, food: &Food) -> FoodClassification {
        let category = Self::categorize(&food.name);
        // Negative or NaN quantities contribute nothing
        let quantity = if food.quantity.is_finite() {
            food.quantity.max(0.0)
        } else {
            0.0
        };
        FoodClassification {
            fiber_g: quantity * Self::fiber_factor(category),
            is_processed: Self::is_processed(&food.name),
            category,
        }
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

/// Lower-case and strip Spanish diacritics
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}
