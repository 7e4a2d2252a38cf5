use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SdkError};

// ---------------------------------------------------------------------------
// CreateRecordRequest: The observation fields, as submitted on create/update
// ---------------------------------------------------------------------------

/// Body of `POST /bodyComposition` and `PUT /bodyComposition/{id}`.
///
/// `date` (epoch seconds) and `weight` are mandatory; every other metric
/// defaults to `0` when the server omits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    pub date: i64,
    pub weight: f64,
    #[serde(default)]
    pub body_fat_percentage: f64,
    #[serde(default)]
    pub muscle_mass_percentage: f64,
    #[serde(default)]
    pub muscle_mass: f64,
    #[serde(default)]
    pub subcutaneous_fat: f64,
    #[serde(default)]
    pub visceral_fat: f64,
    #[serde(default)]
    pub body_hydration: f64,
    #[serde(default)]
    pub skeletal_muscle: f64,
    #[serde(default)]
    pub bone_mass: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub bmi: f64,
    #[serde(default)]
    pub bmr: f64,
    #[serde(default)]
    pub metabolic_age: f64,
}

impl CreateRecordRequest {
    /// A request with the given date and weight and every other metric zeroed.
    pub fn new(date: i64, weight: f64) -> Self {
        Self {
            date,
            weight,
            body_fat_percentage: 0.0,
            muscle_mass_percentage: 0.0,
            muscle_mass: 0.0,
            subcutaneous_fat: 0.0,
            visceral_fat: 0.0,
            body_hydration: 0.0,
            skeletal_muscle: 0.0,
            bone_mass: 0.0,
            protein: 0.0,
            bmi: 0.0,
            bmr: 0.0,
            metabolic_age: 0.0,
        }
    }

    /// Field-level problems that must be fixed before submission.
    ///
    /// Empty when the request is submittable.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        if self.date == 0 {
            errors.insert("date".to_string(), "Date is required".to_string());
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            errors.insert(
                "weight".to_string(),
                "Weight is required and must be greater than 0".to_string(),
            );
        }
        errors
    }

    pub fn validate(&self) -> Result<()> {
        let errors = self.field_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SdkError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// MeasurementRecord: One stored observation, as returned by the API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRecord {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(flatten)]
    pub observation: CreateRecordRequest,
}

impl MeasurementRecord {
    pub fn date(&self) -> i64 {
        self.observation.date
    }

    /// The full-record body used to update this record.
    pub fn to_request(&self) -> CreateRecordRequest {
        self.observation.clone()
    }
}
