//! Attribute filter evaluation.
//!
//! Evaluation is total: no combination of bounds ever errors. An
//! inverted range (min > max) is an active dimension that matches
//! nothing, which keeps filtering side-effect-free and lets the UI send
//! whatever the user typed.

use dinemap_core::{MealType, Restaurant};
use serde::{Deserialize, Serialize};

/// Inclusive price bounds for one meal dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBound {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceBound {
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// A dimension is active when either bound is set.
    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Whether a restaurant's price for this meal satisfies the bounds.
    ///
    /// A missing price fails any active dimension; an inactive
    /// dimension is not consulted by the caller.
    pub fn matches(&self, price: Option<f64>) -> bool {
        let Some(price) = price else {
            return false;
        };
        if let Some(min) = self.min {
            if price < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if price > max {
                return false;
            }
        }
        true
    }
}

/// The full filter set of a bounded query request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestaurantFilter {
    pub brunch: PriceBound,
    pub lunch: PriceBound,
    pub dinner: PriceBound,
    /// Requested cuisine categories; empty means unfiltered.
    pub categories: Vec<String>,
}

impl RestaurantFilter {
    pub fn with_bound(mut self, meal: MealType, bound: PriceBound) -> Self {
        match meal {
            MealType::Brunch => self.brunch = bound,
            MealType::Lunch => self.lunch = bound,
            MealType::Dinner => self.dinner = bound,
        }
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn bound_for(&self, meal: MealType) -> &PriceBound {
        match meal {
            MealType::Brunch => &self.brunch,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
        }
    }

    /// Number of active price dimensions (0..=3).
    pub fn active_price_dimensions(&self) -> usize {
        MealType::ALL
            .iter()
            .filter(|meal| self.bound_for(**meal).is_active())
            .count()
    }

    /// Filter cardinality for entitlement gating.
    ///
    /// The category filter counts as exactly one dimension regardless of
    /// how many categories it lists: one filter panel, one dimension.
    pub fn dimension_count(&self) -> usize {
        let category = usize::from(!self.categories.is_empty());
        self.active_price_dimensions() + category
    }

    pub fn is_empty(&self) -> bool {
        self.dimension_count() == 0
    }

    /// Price filter: OR across active meal dimensions.
    ///
    /// Passes trivially when no dimension is active.
    pub fn matches_price(&self, restaurant: &Restaurant) -> bool {
        let mut any_active = false;
        for meal in MealType::ALL {
            let bound = self.bound_for(meal);
            if !bound.is_active() {
                continue;
            }
            any_active = true;
            if bound.matches(restaurant.price_for(meal)) {
                return true;
            }
        }
        !any_active
    }

    /// Category filter: non-empty intersection with the requested set.
    pub fn matches_categories(&self, restaurant: &Restaurant) -> bool {
        if self.categories.is_empty() {
            return true;
        }
        restaurant
            .categories
            .iter()
            .any(|c| self.categories.iter().any(|wanted| wanted == c))
    }

    /// Combined predicate: price AND category.
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        self.matches_price(restaurant) && self.matches_categories(restaurant)
    }
}
