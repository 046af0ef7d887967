use crate::foundation::core::Size;

/// Output format of a post. Selects the aspect ratio and the format-dependent layout constants.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PostFormat {
    /// 1:1 feed post.
    #[default]
    Square,
    /// 4:5 tall feed post.
    Portrait,
    /// 16:9 wide post.
    Landscape,
}

impl PostFormat {
    /// All formats, in form-control order.
    pub const ALL: [PostFormat; 3] = [Self::Square, Self::Portrait, Self::Landscape];

    /// Stable lowercase name (also the serialized form).
    pub fn name(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    /// Aspect ratio as `(width, height)` terms.
    pub fn aspect_ratio(self) -> (u32, u32) {
        match self {
            Self::Square => (1, 1),
            Self::Portrait => (4, 5),
            Self::Landscape => (16, 9),
        }
    }

    /// Preview size in CSS pixels; export size is this times the capture scale.
    pub fn preview_size(self) -> Size {
        match self {
            Self::Square => Size::new(360.0, 360.0),
            Self::Portrait => Size::new(360.0, 450.0),
            Self::Landscape => Size::new(640.0, 360.0),
        }
    }

    /// Headline base font size in root-em before `headlineSize` scaling.
    pub fn font_base_rem(self) -> f64 {
        match self {
            Self::Square => 3.0,
            Self::Landscape => 3.2,
            Self::Portrait => 3.5,
        }
    }

    /// Fraction of the height covered by the bottom gradient.
    pub fn gradient_fraction(self) -> f64 {
        match self {
            Self::Portrait => 0.80,
            Self::Square | Self::Landscape => 0.85,
        }
    }

    /// Distance of the brand name from the top edge, in CSS pixels.
    pub fn brand_top_px(self) -> f64 {
        match self {
            Self::Square => 24.0,
            Self::Portrait => 40.0,
            Self::Landscape => 20.0,
        }
    }

    /// Resting distance of the headline block from the bottom edge, in CSS pixels.
    pub fn headline_baseline_px(self) -> f64 {
        match self {
            Self::Portrait => 180.0,
            Self::Square | Self::Landscape => 100.0,
        }
    }
}

impl std::str::FromStr for PostFormat {
    type Err = crate::foundation::error::BrandpostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                crate::foundation::error::BrandpostError::validation(format!(
                    "unknown post format \"{s}\" (expected square, portrait or landscape)"
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/format.rs"]
mod tests;
