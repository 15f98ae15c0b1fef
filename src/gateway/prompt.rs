//! Instruction text sent to the image generation model

/// Placeholder used when the caller gives no garment description
pub const GENERIC_GARMENT: &str = "the clothing item";

/// Coarse clothing region being replaced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GarmentCategory {
    #[default]
    UpperBody,
    LowerBody,
    Dresses,
}

impl GarmentCategory {
    /// Parse a wire label, falling back to `UpperBody` for anything unrecognized
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some("lower_body") => Self::LowerBody,
            Some("dresses") => Self::Dresses,
            _ => Self::UpperBody,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpperBody => "upper_body",
            Self::LowerBody => "lower_body",
            Self::Dresses => "dresses",
        }
    }
}

/// Human wording for each garment region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionLabels {
    pub upper_body: &'static str,
    pub lower_body: &'static str,
    pub dresses: &'static str,
}

impl RegionLabels {
    pub const fn standard() -> Self {
        Self {
            upper_body: "top/shirt/upper-body garment",
            lower_body: "pants/skirt/lower-body garment",
            dresses: "dress/full-body outfit",
        }
    }

    pub fn label(&self, category: GarmentCategory) -> &'static str {
        match category {
            GarmentCategory::UpperBody => self.upper_body,
            GarmentCategory::LowerBody => self.lower_body,
            GarmentCategory::Dresses => self.dresses,
        }
    }
}

impl Default for RegionLabels {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builds the try-on instruction. Pure: no randomness, no clock.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    regions: RegionLabels,
}

impl PromptBuilder {
    pub fn new(regions: RegionLabels) -> Self {
        Self { regions }
    }

    pub fn build(&self, category: GarmentCategory, description: Option<&str>) -> String {
        let region = self.regions.label(category);
        let garment = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(GENERIC_GARMENT);

        format!(
            "You are a professional virtual try-on AI. Create a realistic photograph of the person \
from the first image wearing the garment from the second image.

GARMENT: {garment}
REGION: {region}

IMAGES:
- Image 1 shows the person. It is the only source for their identity, face, hair, skin tone, \
body shape, pose and background.
- Image 2 shows the garment. It is the only source for the appearance of the new {region}: \
its color, pattern, texture, cut and details. Ignore any person, mannequin or background in image 2.

INSTRUCTIONS:
1. Replace only the {region} the person is wearing with {garment} from image 2.
2. Preserve the person's identity, face, hair, skin tone, body pose and the background exactly \
as they appear in image 1.
3. Do not alter any other clothing, accessories or body parts.
4. Warp the garment to follow the person's pose and body shape with natural fabric draping, \
folds and wrinkles.
5. Match the lighting, shadows and color temperature of image 1 on the garment.
6. The result must look like a natural photograph, not a collage.

OUTPUT: exactly one photorealistic image of the person wearing {garment}."
        )
    }
}
