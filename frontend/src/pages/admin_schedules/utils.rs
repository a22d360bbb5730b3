use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    api::{ClassSchedule, Club, GymClass},
    utils::filters::parse_clock,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleForm {
    pub class_id: String,
    pub club_id: String,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub instructor: String,
    pub capacity: String,
}

impl Default for ScheduleForm {
    fn default() -> Self {
        Self {
            class_id: String::new(),
            club_id: String::new(),
            day_of_week: "1".to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            instructor: String::new(),
            capacity: String::new(),
        }
    }
}

impl ScheduleForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_schedule(&self) -> Result<ClassSchedule, String> {
        if self.class_id.is_empty() {
            return Err("Choose a class".into());
        }
        if self.club_id.is_empty() {
            return Err("Choose a club".into());
        }
        let day_of_week = self
            .day_of_week
            .parse::<u8>()
            .ok()
            .filter(|day| *day < 7)
            .ok_or("Choose a day of the week")?;
        let start = parse_clock(&self.start_time).ok_or("Start time must be HH:MM")?;
        let end = parse_clock(&self.end_time).ok_or("End time must be HH:MM")?;
        if end <= start {
            return Err("End time must be after start time".into());
        }
        let capacity = match self.capacity.trim() {
            "" => None,
            raw => Some(
                raw.parse::<u32>()
                    .ok()
                    .filter(|c| *c > 0)
                    .ok_or("Capacity must be a positive number")?,
            ),
        };
        let instructor = Some(self.instructor.trim().to_string()).filter(|s| !s.is_empty());
        Ok(ClassSchedule {
            id: String::new(),
            class_id: self.class_id.clone(),
            club_id: self.club_id.clone(),
            day_of_week,
            start_time: self.start_time.trim().to_string(),
            end_time: self.end_time.trim().to_string(),
            instructor,
            capacity,
        })
    }
}

/// Id to display name for classes and clubs referenced by schedules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleLookups {
    pub classes: Vec<GymClass>,
    pub clubs: Vec<Club>,
}

impl ScheduleLookups {
    pub fn class_names(&self) -> HashMap<String, String> {
        self.classes
            .iter()
            .map(|c| (c.id.clone(), c.name.clone()))
            .collect()
    }

    pub fn club_names(&self) -> HashMap<String, String> {
        self.clubs
            .iter()
            .map(|c| (c.id.clone(), c.name.clone()))
            .collect()
    }
}

pub fn name_or_unknown(names: &HashMap<String, String>, id: &str) -> String {
    names
        .get(id)
        .cloned()
        .unwrap_or_else(|| format!("Unknown ({})", id))
}
