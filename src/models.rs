//! The four fuzzy colour models and their membership tables.
//!
//! Each model is a static [`ModelDescriptor`]: an ordered table of fuzzy
//! classes, the representative colour of every class, and how its hue channel
//! is produced. The order of a table is the arg-max order of the classifier.

use crate::error::{Result, SegmentationError};
use crate::hsv::HuePrecision;
use crate::membership::Bound::{Closed, Open};
use crate::membership::{FuzzyClass, MembershipFunction, MembershipShape, Segment};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selector for one of the published fuzzy colour models.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColourModel {
    /// Amante & Fonseca (2012), nine trapezoidal classes.
    Amante,
    /// Chamorro-Martinez et al. (2007), twelve trapezoidal classes.
    Chamorro,
    /// Liu & Wang (2016), seven trapezoidal classes.
    LiuWang,
    /// Shamir, ten triangular classes.
    Shamir,
}

/// Static description of a colour model.
#[derive(Debug)]
pub struct ModelDescriptor {
    pub model: ColourModel,
    pub display_name: &'static str,
    pub shape: MembershipShape,
    pub hue_precision: HuePrecision,
    pub supports_colour_correction: bool,
    pub classes: &'static [FuzzyClass],
    pub palette: &'static [[u8; 3]],
}

impl ColourModel {
    pub const ALL: [ColourModel; 4] = [
        ColourModel::Amante,
        ColourModel::Chamorro,
        ColourModel::LiuWang,
        ColourModel::Shamir,
    ];

    pub fn descriptor(self) -> &'static ModelDescriptor {
        match self {
            ColourModel::Amante => &AMANTE,
            ColourModel::Chamorro => &CHAMORRO,
            ColourModel::LiuWang => &LIU_WANG,
            ColourModel::Shamir => &SHAMIR,
        }
    }

    pub fn classes(self) -> &'static [FuzzyClass] {
        self.descriptor().classes
    }

    pub fn class_count(self) -> usize {
        self.classes().len()
    }

    /// Default representative colour of each chromatic class, by label.
    pub fn default_palette(self) -> &'static [[u8; 3]] {
        self.descriptor().palette
    }

    pub fn class_index(self, class_name: &str) -> Option<usize> {
        self.classes()
            .iter()
            .position(|class| class.name.eq_ignore_ascii_case(class_name))
    }

    pub fn class_name(self, label: usize) -> Option<&'static str> {
        self.classes().get(label).map(|class| class.name)
    }

    /// Membership degree of `hue` in the class called `class_name`.
    pub fn evaluate(self, class_name: &str, hue: f64) -> Result<f64> {
        let index = self
            .class_index(class_name)
            .ok_or_else(|| SegmentationError::UnknownClass {
                model: self,
                class: class_name.to_string(),
            })?;
        Ok(self.classes()[index].function.degree(hue))
    }

    /// Degrees of every class for `hue`, in table order.
    pub fn memberships(self, hue: f64) -> Vec<f64> {
        self.classes()
            .iter()
            .map(|class| class.function.degree(hue))
            .collect()
    }
}

impl fmt::Display for ColourModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().display_name)
    }
}

impl FromStr for ColourModel {
    type Err = SegmentationError;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "amante" | "amantefonseca" => Ok(ColourModel::Amante),
            "chamorro" => Ok(ColourModel::Chamorro),
            "liu" | "liuwang" => Ok(ColourModel::LiuWang),
            "shamir" => Ok(ColourModel::Shamir),
            _ => Err(SegmentationError::UnknownModel(s.to_string())),
        }
    }
}

/// Numeric selectors kept for callers that store the model as an integer.
impl TryFrom<u8> for ColourModel {
    type Error = SegmentationError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(ColourModel::Amante),
            1 => Ok(ColourModel::Chamorro),
            2 => Ok(ColourModel::LiuWang),
            3 => Ok(ColourModel::Shamir),
            other => Err(SegmentationError::UnknownModel(other.to_string())),
        }
    }
}

macro_rules! class {
    ($name:literal, [$($segment:expr),+ $(,)?] $(,)?) => {
        FuzzyClass {
            name: $name,
            function: MembershipFunction {
                segments: &[$($segment),+],
            },
        }
    };
}

// Amante & Fonseca, "Fuzzy Color Space Segmentation to Identify the Same
// Dominant Colors as Users", DMS 2012.
static AMANTE: ModelDescriptor = ModelDescriptor {
    model: ColourModel::Amante,
    display_name: "Amante-Fonseca",
    shape: MembershipShape::Trapezoidal,
    hue_precision: HuePrecision::Byte,
    supports_colour_correction: false,
    classes: &[
        class!(
            "red",
            [
                Segment::plateau(Open(0.0), Closed(10.0)),
                Segment::plateau(Open(350.0), Closed(360.0)),
                Segment::falling(Closed(10.0), Closed(20.0)),
                Segment::rising(Closed(335.0), Closed(350.0)),
            ],
        ),
        class!(
            "brown",
            [
                Segment::rising(Open(10.0), Closed(20.0)),
                Segment::plateau(Closed(20.0), Closed(30.0)),
                Segment::falling(Closed(30.0), Closed(35.0)),
            ],
        ),
        class!(
            "orange",
            [
                Segment::rising(Closed(30.0), Closed(34.0)),
                Segment::plateau(Closed(34.0), Closed(42.0)),
                Segment::falling(Closed(42.0), Closed(50.0)),
            ],
        ),
        class!(
            "yellow",
            [
                Segment::rising(Closed(44.0), Closed(50.0)),
                Segment::plateau(Closed(50.0), Closed(70.0)),
                Segment::falling(Closed(70.0), Closed(100.0)),
            ],
        ),
        class!(
            "green",
            [
                Segment::rising(Closed(70.0), Closed(100.0)),
                Segment::plateau(Closed(100.0), Closed(140.0)),
                Segment::falling(Closed(140.0), Closed(160.0)),
            ],
        ),
        class!(
            "cyan",
            [
                Segment::rising(Closed(140.0), Closed(160.0)),
                Segment::plateau(Closed(160.0), Closed(200.0)),
                Segment::falling(Closed(200.0), Closed(220.0)),
            ],
        ),
        class!(
            "blue",
            [
                Segment::rising(Closed(200.0), Closed(220.0)),
                Segment::plateau(Closed(220.0), Closed(260.0)),
                Segment::falling(Closed(260.0), Closed(290.0)),
            ],
        ),
        class!(
            "purple",
            [
                Segment::rising(Closed(260.0), Closed(290.0)),
                Segment::plateau(Closed(290.0), Closed(310.0)),
                Segment::falling(Closed(310.0), Closed(320.0)),
            ],
        ),
        class!(
            "pink",
            [
                Segment::rising(Closed(310.0), Closed(315.0)),
                Segment::plateau(Closed(315.0), Closed(335.0)),
                Segment::falling(Closed(335.0), Closed(350.0)),
            ],
        ),
    ],
    palette: &[
        [255, 33, 36],
        [170, 121, 66],
        [255, 146, 0],
        [255, 251, 0],
        [0, 255, 0],
        [0, 253, 255],
        [0, 0, 255],
        [147, 33, 146],
        [255, 64, 255],
    ],
};

// Chamorro-Martinez, Medina, Barranco, Galan-Perales & Soto-Hidalgo,
// "Retrieving images in fuzzy object-relational databases using dominant
// color descriptors", Fuzzy Sets and Systems 158 (2007).
static CHAMORRO: ModelDescriptor = ModelDescriptor {
    model: ColourModel::Chamorro,
    display_name: "Chamorro",
    shape: MembershipShape::Trapezoidal,
    hue_precision: HuePrecision::Byte,
    supports_colour_correction: false,
    classes: &[
        class!(
            "red",
            [
                Segment::plateau(Open(0.0), Closed(10.0)),
                Segment::plateau(Open(350.0), Closed(360.0)),
                Segment::falling(Closed(10.0), Closed(20.0)),
                Segment::rising(Closed(340.0), Closed(350.0)),
            ],
        ),
        class!(
            "orange",
            [
                Segment::rising(Open(10.0), Closed(20.0)),
                Segment::plateau(Closed(20.0), Closed(40.0)),
                Segment::falling(Closed(40.0), Closed(50.0)),
            ],
        ),
        class!(
            "yellow",
            [
                Segment::rising(Closed(40.0), Closed(50.0)),
                Segment::plateau(Closed(50.0), Closed(70.0)),
                Segment::falling(Closed(70.0), Closed(80.0)),
            ],
        ),
        class!(
            "yellow-green",
            [
                Segment::rising(Closed(70.0), Closed(80.0)),
                Segment::plateau(Closed(80.0), Closed(100.0)),
                Segment::falling(Closed(100.0), Closed(110.0)),
            ],
        ),
        class!(
            "green",
            [
                Segment::rising(Closed(100.0), Closed(110.0)),
                Segment::plateau(Closed(110.0), Closed(130.0)),
                Segment::falling(Closed(130.0), Closed(140.0)),
            ],
        ),
        class!(
            "green-cyan",
            [
                Segment::rising(Closed(130.0), Closed(140.0)),
                Segment::plateau(Closed(140.0), Closed(160.0)),
                Segment::falling(Closed(160.0), Closed(170.0)),
            ],
        ),
        class!(
            "cyan",
            [
                Segment::rising(Closed(160.0), Closed(170.0)),
                Segment::plateau(Closed(170.0), Closed(190.0)),
                Segment::falling(Closed(190.0), Closed(200.0)),
            ],
        ),
        class!(
            "cyan-blue",
            [
                Segment::rising(Closed(190.0), Closed(200.0)),
                Segment::plateau(Closed(200.0), Closed(220.0)),
                Segment::falling(Closed(220.0), Closed(230.0)),
            ],
        ),
        class!(
            "blue",
            [
                Segment::rising(Closed(220.0), Closed(230.0)),
                Segment::plateau(Closed(230.0), Closed(250.0)),
                Segment::falling(Closed(250.0), Closed(260.0)),
            ],
        ),
        class!(
            "blue-magenta",
            [
                Segment::rising(Closed(250.0), Closed(260.0)),
                Segment::plateau(Closed(260.0), Closed(280.0)),
                Segment::falling(Closed(280.0), Closed(290.0)),
            ],
        ),
        class!(
            "magenta",
            [
                Segment::rising(Closed(280.0), Closed(290.0)),
                Segment::plateau(Closed(290.0), Closed(310.0)),
                Segment::falling(Closed(310.0), Closed(320.0)),
            ],
        ),
        class!(
            "magenta-red",
            [
                Segment::rising(Closed(310.0), Closed(320.0)),
                Segment::plateau(Closed(320.0), Closed(340.0)),
                Segment::falling(Closed(340.0), Closed(350.0)),
            ],
        ),
    ],
    palette: &[
        [255, 33, 36],
        [255, 148, 9],
        [255, 255, 13],
        [186, 255, 15],
        [6, 155, 9],
        [12, 255, 116],
        [11, 254, 255],
        [8, 192, 255],
        [0, 0, 255],
        [92, 8, 253],
        [238, 3, 249],
        [254, 6, 180],
    ],
};

// Liu & Wang, "Fuzzy color recognition and segmentation of robot vision
// scene", CISP 2015.
static LIU_WANG: ModelDescriptor = ModelDescriptor {
    model: ColourModel::LiuWang,
    display_name: "Liu-Wang",
    shape: MembershipShape::Trapezoidal,
    hue_precision: HuePrecision::Float,
    supports_colour_correction: true,
    classes: &[
        class!(
            "red",
            [
                Segment::plateau(Closed(0.0), Closed(10.0)),
                Segment::plateau(Open(330.0), Closed(360.0)),
                Segment::falling(Open(10.0), Closed(20.0)),
                Segment::rising(Open(300.0), Closed(330.0)),
            ],
        ),
        class!(
            "orange",
            [
                Segment::rising(Open(10.0), Closed(20.0)),
                Segment::plateau(Open(20.0), Closed(40.0)),
                Segment::falling(Open(40.0), Closed(55.0)),
            ],
        ),
        class!(
            "yellow",
            [
                Segment::rising(Open(40.0), Closed(55.0)),
                Segment::plateau(Open(55.0), Closed(65.0)),
                Segment::falling(Open(65.0), Closed(80.0)),
            ],
        ),
        class!(
            "green",
            [
                Segment::rising(Open(65.0), Closed(80.0)),
                Segment::plateau(Open(80.0), Closed(140.0)),
                Segment::falling(Open(140.0), Closed(170.0)),
            ],
        ),
        class!(
            "cyan",
            [
                Segment::rising(Open(140.0), Closed(170.0)),
                Segment::plateau(Open(170.0), Closed(200.0)),
                Segment::falling(Open(200.0), Closed(210.0)),
            ],
        ),
        class!(
            "blue",
            [
                // The zero branch of the published table owns 200 itself.
                Segment::rising(Open(200.0), Closed(210.0)),
                Segment::plateau(Closed(210.0), Closed(250.0)),
                Segment::falling(Closed(250.0), Closed(270.0)),
            ],
        ),
        class!(
            "purple",
            [
                Segment::rising(Open(250.0), Closed(270.0)),
                Segment::plateau(Open(270.0), Closed(300.0)),
                Segment::falling(Open(300.0), Closed(330.0)),
            ],
        ),
    ],
    palette: &[
        [255, 33, 36],
        [248, 149, 29],
        [239, 233, 17],
        [105, 189, 69],
        [111, 204, 221],
        [59, 83, 164],
        [158, 80, 159],
    ],
};

// Shamir, triangular fuzzy sets over hue.
static SHAMIR: ModelDescriptor = ModelDescriptor {
    model: ColourModel::Shamir,
    display_name: "Shamir",
    shape: MembershipShape::Triangular,
    hue_precision: HuePrecision::Float,
    supports_colour_correction: false,
    classes: &[
        class!(
            "red",
            [
                Segment::falling(Closed(0.0), Closed(30.0)),
                Segment::rising(Closed(330.0), Closed(360.0)),
            ],
        ),
        class!(
            "dark orange",
            [
                Segment::rising(Closed(0.0), Closed(30.0)),
                Segment::falling(Closed(30.0), Closed(45.0)),
            ],
        ),
        class!(
            "light orange",
            [
                Segment::rising(Closed(30.0), Closed(45.0)),
                Segment::falling(Closed(45.0), Closed(60.0)),
            ],
        ),
        class!(
            "yellow",
            [
                Segment::rising(Closed(45.0), Closed(60.0)),
                Segment::falling(Closed(60.0), Closed(90.0)),
            ],
        ),
        class!(
            "light green",
            [
                Segment::rising(Closed(60.0), Closed(75.0)),
                Segment::falling(Closed(75.0), Closed(120.0)),
            ],
        ),
        class!(
            "dark green",
            [
                Segment::rising(Closed(90.0), Closed(120.0)),
                Segment::falling(Closed(120.0), Closed(180.0)),
            ],
        ),
        class!(
            "aqua",
            [
                Segment::rising(Closed(120.0), Closed(180.0)),
                Segment::falling(Closed(180.0), Closed(240.0)),
            ],
        ),
        class!(
            "blue",
            [
                Segment::rising(Closed(180.0), Closed(240.0)),
                Segment::falling(Closed(240.0), Closed(300.0)),
            ],
        ),
        class!(
            "dark purple",
            [
                Segment::rising(Closed(240.0), Closed(300.0)),
                Segment::falling(Closed(300.0), Closed(330.0)),
            ],
        ),
        class!(
            "light purple",
            [
                Segment::rising(Closed(300.0), Closed(330.0)),
                Segment::falling(Closed(330.0), Closed(360.0)),
            ],
        ),
    ],
    palette: &[
        [255, 33, 36],
        [255, 140, 0],
        [255, 165, 0],
        [255, 255, 0],
        [144, 238, 144],
        [0, 100, 0],
        [0, 255, 255],
        [0, 0, 255],
        [128, 0, 128],
        [255, 0, 255],
    ],
};
