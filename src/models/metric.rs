use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::record::{CreateRecordRequest, MeasurementRecord};
use crate::error::SdkError;

// ---------------------------------------------------------------------------
// Metric: The thirteen numeric observations carried by every record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Weight,
    BodyFatPercentage,
    MuscleMassPercentage,
    MuscleMass,
    SubcutaneousFat,
    VisceralFat,
    BodyHydration,
    SkeletalMuscle,
    BoneMass,
    Protein,
    Bmi,
    Bmr,
    MetabolicAge,
}

/// Which y-axis a series is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Left,
    Right,
}

impl Metric {
    /// Every metric, in the order the API and the entry form list them.
    pub const ALL: [Metric; 13] = [
        Metric::Weight,
        Metric::BodyFatPercentage,
        Metric::MuscleMassPercentage,
        Metric::MuscleMass,
        Metric::SubcutaneousFat,
        Metric::VisceralFat,
        Metric::BodyHydration,
        Metric::SkeletalMuscle,
        Metric::BoneMass,
        Metric::Protein,
        Metric::Bmi,
        Metric::Bmr,
        Metric::MetabolicAge,
    ];

    /// The JSON field name used by the API.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Weight => "weight",
            Metric::BodyFatPercentage => "bodyFatPercentage",
            Metric::MuscleMassPercentage => "muscleMassPercentage",
            Metric::MuscleMass => "muscleMass",
            Metric::SubcutaneousFat => "subcutaneousFat",
            Metric::VisceralFat => "visceralFat",
            Metric::BodyHydration => "bodyHydration",
            Metric::SkeletalMuscle => "skeletalMuscle",
            Metric::BoneMass => "boneMass",
            Metric::Protein => "protein",
            Metric::Bmi => "bmi",
            Metric::Bmr => "bmr",
            Metric::MetabolicAge => "metabolicAge",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Weight => "Weight (kg)",
            Metric::BodyFatPercentage => "Body Fat %",
            Metric::MuscleMassPercentage => "Muscle Mass %",
            Metric::MuscleMass => "Muscle Mass (kg)",
            Metric::SubcutaneousFat => "Subcutaneous Fat",
            Metric::VisceralFat => "Visceral Fat",
            Metric::BodyHydration => "Water %",
            Metric::SkeletalMuscle => "Skeletal Muscle (kg)",
            Metric::BoneMass => "Bone Mass (kg)",
            Metric::Protein => "Protein %",
            Metric::Bmi => "BMI",
            Metric::Bmr => "BMR (kcal)",
            Metric::MetabolicAge => "Metabolic Age",
        }
    }

    /// Fixed display colour of the metric's line in the custom chart.
    pub fn color(self) -> &'static str {
        match self {
            Metric::Weight => "#6366f1",
            Metric::BodyFatPercentage => "#ef4444",
            Metric::MuscleMassPercentage => "#10b981",
            Metric::MuscleMass => "#3b82f6",
            Metric::SubcutaneousFat => "#f97316",
            Metric::VisceralFat => "#fb7185",
            Metric::BodyHydration => "#22d3ee",
            Metric::SkeletalMuscle => "#8b5cf6",
            Metric::BoneMass => "#f59e0b",
            Metric::Protein => "#a3e635",
            Metric::Bmi => "#64748b",
            Metric::Bmr => "#14b8a6",
            Metric::MetabolicAge => "#eab308",
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Metric::Weight
            | Metric::MuscleMass
            | Metric::SkeletalMuscle
            | Metric::BoneMass
            | Metric::Bmr => Axis::Left,
            Metric::BodyFatPercentage
            | Metric::MuscleMassPercentage
            | Metric::SubcutaneousFat
            | Metric::VisceralFat
            | Metric::BodyHydration
            | Metric::Protein
            | Metric::Bmi
            | Metric::MetabolicAge => Axis::Right,
        }
    }

    /// Polarity: whether an increase in this metric is desirable.
    pub fn higher_is_better(self) -> bool {
        !matches!(
            self,
            Metric::BodyFatPercentage
                | Metric::SubcutaneousFat
                | Metric::VisceralFat
                | Metric::Bmi
                | Metric::MetabolicAge
                | Metric::Weight
        )
    }

    pub fn value(self, record: &MeasurementRecord) -> f64 {
        self.read(&record.observation)
    }

    fn read(self, m: &CreateRecordRequest) -> f64 {
        match self {
            Metric::Weight => m.weight,
            Metric::BodyFatPercentage => m.body_fat_percentage,
            Metric::MuscleMassPercentage => m.muscle_mass_percentage,
            Metric::MuscleMass => m.muscle_mass,
            Metric::SubcutaneousFat => m.subcutaneous_fat,
            Metric::VisceralFat => m.visceral_fat,
            Metric::BodyHydration => m.body_hydration,
            Metric::SkeletalMuscle => m.skeletal_muscle,
            Metric::BoneMass => m.bone_mass,
            Metric::Protein => m.protein,
            Metric::Bmi => m.bmi,
            Metric::Bmr => m.bmr,
            Metric::MetabolicAge => m.metabolic_age,
        }
    }

    /// Read this metric from a create/update request body.
    pub fn get(self, request: &CreateRecordRequest) -> f64 {
        self.read(request)
    }

    /// Write this metric into a create/update request body.
    pub fn set(self, request: &mut CreateRecordRequest, value: f64) {
        let slot = match self {
            Metric::Weight => &mut request.weight,
            Metric::BodyFatPercentage => &mut request.body_fat_percentage,
            Metric::MuscleMassPercentage => &mut request.muscle_mass_percentage,
            Metric::MuscleMass => &mut request.muscle_mass,
            Metric::SubcutaneousFat => &mut request.subcutaneous_fat,
            Metric::VisceralFat => &mut request.visceral_fat,
            Metric::BodyHydration => &mut request.body_hydration,
            Metric::SkeletalMuscle => &mut request.skeletal_muscle,
            Metric::BoneMass => &mut request.bone_mass,
            Metric::Protein => &mut request.protein,
            Metric::Bmi => &mut request.bmi,
            Metric::Bmr => &mut request.bmr,
            Metric::MetabolicAge => &mut request.metabolic_age,
        };
        *slot = value;
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.key() == s)
            .ok_or_else(|| SdkError::InvalidArgument(format!("Unknown metric: {}", s)))
    }
}
