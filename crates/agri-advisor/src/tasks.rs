//! Image Analysis Tasks
//!
//! The four photo-based tools offered on the AI tools panel. Each task owns
//! the instruction sent to the model alongside the farmer's photo.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AiTask {
    DiseaseDetection,
    AgeFinder,
    CropDetails,
    SoilAnalysis,
}

impl AiTask {
    /// All tasks, in tab order
    pub const fn all() -> [Self; 4] {
        [
            Self::DiseaseDetection,
            Self::AgeFinder,
            Self::CropDetails,
            Self::SoilAnalysis,
        ]
    }

    /// Wire identifier (matches the serde form)
    pub const fn id(self) -> &'static str {
        match self {
            Self::DiseaseDetection => "DISEASE_DETECTION",
            Self::AgeFinder => "AGE_FINDER",
            Self::CropDetails => "CROP_DETAILS",
            Self::SoilAnalysis => "SOIL_ANALYSIS",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::DiseaseDetection => "Crop Disease Detector",
            Self::AgeFinder => "Fruit & Veggie Ripeness Finder",
            Self::CropDetails => "Crop Identifier",
            Self::SoilAnalysis => "Soil Health Analyzer",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::DiseaseDetection => {
                "Upload a photo of your crop to get instant disease analysis and advice."
            }
            Self::AgeFinder => {
                "Upload an image of a fruit or vegetable (like a coconut) to find its age or ripeness stage."
            }
            Self::CropDetails => {
                "Not sure what crop it is? Upload a photo to get detailed information."
            }
            Self::SoilAnalysis => "Upload a clear photo of a soil sample for a basic analysis.",
        }
    }

    /// Instruction sent with the photo
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::DiseaseDetection => {
                "You are an expert agricultural botanist. Analyze this image of a plant. \
                 Identify any diseases or pests. Describe the symptoms, suggest potential causes, \
                 and recommend organic and chemical treatment options. Format your response in \
                 clear, easy-to-read markdown with headings for 'Diagnosis', 'Symptoms', \
                 'Potential Causes', and 'Treatment Recommendations'. If the plant appears healthy, \
                 state that clearly and congratulate the user."
            }
            Self::AgeFinder => {
                "You are an expert in horticulture. Analyze this image of a fruit or vegetable. \
                 First, identify the item. Then, estimate its stage of ripeness (e.g., underripe, \
                 perfectly ripe, overripe). Provide visual cues from the image that support your \
                 analysis and suggest the best time for harvest or consumption. Format the \
                 response in markdown."
            }
            Self::CropDetails => {
                "You are an agricultural expert. Identify the crop in this image. Provide a \
                 detailed overview in markdown format, including its common name, scientific \
                 name, ideal growing conditions (soil, climate, watering), common uses, and \
                 typical time from planting to harvest."
            }
            Self::SoilAnalysis => {
                "You are a soil scientist. Analyze the provided image of a soil sample. Based on \
                 visual cues like color, texture, and structure, provide a basic analysis. \
                 Identify the likely soil type (e.g., sandy, clay, loam, silt). Describe its \
                 potential characteristics regarding drainage and fertility. Suggest what types \
                 of crops might grow well in this soil and recommend simple, organic ways to \
                 improve its health. Format your response in markdown."
            }
        }
    }
}

impl std::fmt::Display for AiTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}
