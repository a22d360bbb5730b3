//! Body metrics shown by the fitness calculator.
//!
//! Every function returns `None` when an input is missing, zero, negative or
//! not finite; the page then shows nothing instead of a bogus number.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little or no exercise)",
            ActivityLevel::Light => "Light (1-3 days/week)",
            ActivityLevel::Moderate => "Moderate (3-5 days/week)",
            ActivityLevel::Active => "Active (6-7 days/week)",
            ActivityLevel::VeryActive => "Very active (physical job or twice daily)",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiResult {
    /// Rounded to one decimal.
    pub value: f64,
    pub category: BmiCategory,
}

fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Harris-Benedict basal metabolic rate in kcal/day.
pub fn bmr(sex: Sex, weight_kg: f64, height_cm: f64, age_years: f64) -> Option<i64> {
    let (w, h, a) = (
        positive(weight_kg)?,
        positive(height_cm)?,
        positive(age_years)?,
    );
    let raw = match sex {
        Sex::Male => 88.362 + 13.397 * w + 4.799 * h - 5.677 * a,
        Sex::Female => 447.593 + 9.247 * w + 3.098 * h - 4.330 * a,
    };
    Some(raw.round() as i64)
}

pub fn tdee(bmr: i64, activity: ActivityLevel) -> i64 {
    (bmr as f64 * activity.multiplier()).round() as i64
}

pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<BmiResult> {
    let w = positive(weight_kg)?;
    let height_m = positive(height_cm)? / 100.0;
    let raw = w / (height_m * height_m);
    Some(BmiResult {
        value: (raw * 10.0).round() / 10.0,
        category: BmiCategory::from_bmi(raw),
    })
}

/// Parses a form field; blanks and garbage read as "not entered".
pub fn parse_input(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().and_then(positive)
}
