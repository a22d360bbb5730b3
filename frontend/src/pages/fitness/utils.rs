use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    api::ApiError,
    utils::fitness::{bmi, bmr, parse_input, tdee, ActivityLevel, BmiResult, Sex},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    LoseWeight,
    Maintain,
    BuildMuscle,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::LoseWeight, Goal::Maintain, Goal::BuildMuscle];

    pub fn key(&self) -> &'static str {
        match self {
            Goal::LoseWeight => "lose_weight",
            Goal::Maintain => "maintain",
            Goal::BuildMuscle => "build_muscle",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Goal::LoseWeight => "Lose weight",
            Goal::Maintain => "Stay in shape",
            Goal::BuildMuscle => "Build muscle",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|goal| goal.key() == key)
    }
}

pub fn sex_key(sex: Sex) -> &'static str {
    match sex {
        Sex::Male => "male",
        Sex::Female => "female",
    }
}

pub fn parse_sex(key: &str) -> Option<Sex> {
    match key {
        "male" => Some(Sex::Male),
        "female" => Some(Sex::Female),
        _ => None,
    }
}

/// Raw calculator fields as typed by the visitor.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorInput {
    pub sex: Sex,
    pub weight_kg: String,
    pub height_cm: String,
    pub age: String,
    pub activity: ActivityLevel,
    pub goal: Goal,
}

impl Default for CalculatorInput {
    fn default() -> Self {
        Self {
            sex: Sex::Female,
            weight_kg: String::new(),
            height_cm: String::new(),
            age: String::new(),
            activity: ActivityLevel::Moderate,
            goal: Goal::Maintain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub bmr: i64,
    pub tdee: i64,
    pub bmi: BmiResult,
}

impl CalculatorInput {
    /// BMI needs only weight and height.
    pub fn bmi(&self) -> Option<BmiResult> {
        bmi(parse_input(&self.weight_kg)?, parse_input(&self.height_cm)?)
    }

    pub fn metrics(&self) -> Option<Metrics> {
        let weight = parse_input(&self.weight_kg)?;
        let height = parse_input(&self.height_cm)?;
        let age = parse_input(&self.age)?;
        let bmr = bmr(self.sex, weight, height, age)?;
        Some(Metrics {
            bmr,
            tdee: tdee(bmr, self.activity),
            bmi: bmi(weight, height)?,
        })
    }
}

pub fn plan_prompt(input: &CalculatorInput, metrics: &Metrics) -> String {
    format!(
        "Create a one-week fitness plan for a {} aged {} years, {} kg, {} cm. \
         Activity level: {}. Goal: {}. Their BMR is {} kcal, TDEE {} kcal and BMI {:.1} ({}). \
         Suggest a daily calorie target, the week's workouts and short nutrition tips.",
        sex_key(input.sex),
        input.age.trim(),
        input.weight_kg.trim(),
        input.height_cm.trim(),
        input.activity.label(),
        input.goal.label(),
        metrics.bmr,
        metrics.tdee,
        metrics.bmi.value,
        metrics.bmi.category.label(),
    )
}

pub fn plan_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "summary": { "type": "string" },
            "daily_calories": { "type": "integer" },
            "workouts": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "day": { "type": "string" },
                        "focus": { "type": "string" },
                        "details": { "type": "string" }
                    }
                }
            },
            "nutrition_tips": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["summary", "daily_calories", "workouts"]
    })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlannedWorkout {
    pub day: String,
    pub focus: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FitnessPlan {
    pub summary: String,
    pub daily_calories: i64,
    pub workouts: Vec<PlannedWorkout>,
    #[serde(default)]
    pub nutrition_tips: Vec<String>,
}

/// The model sometimes answers with the JSON object encoded as a string.
pub fn parse_plan(value: Value) -> Result<FitnessPlan, ApiError> {
    let value = match value {
        Value::String(text) => serde_json::from_str(&text)
            .map_err(|e| ApiError::unknown(format!("Plan was not valid JSON: {}", e)))?,
        other => other,
    };
    serde_json::from_value(value)
        .map_err(|e| ApiError::unknown(format!("Unexpected plan format: {}", e)))
}
