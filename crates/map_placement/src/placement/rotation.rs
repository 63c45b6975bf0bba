//! Rotation policies declared by assets and rotations emitted in placement records.
//!
//! Both serialize as either a number (radians) or the string `"full"`.
#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "serde")]
const FULL: &str = "full";

/// How an asset may be rotated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationAllowance {
    /// Draw a rotation uniformly in `[0, bound]` radians at generation time.
    Bounded(f32),
    /// Leave rotation to the renderer, which re-randomizes it at every draw.
    Full,
}

/// Rotation of a placed object around the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rotation {
    /// Fixed angle in radians.
    Fixed(f32),
    /// Resolved by the renderer at draw time.
    Full,
}

impl Rotation {
    /// The fixed angle, if any.
    pub fn angle(&self) -> Option<f32> {
        match self {
            Rotation::Fixed(a) => Some(*a),
            Rotation::Full => None,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Rotation::Full)
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::Fixed(0.0)
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(untagged)]
enum AngleOrTag {
    Angle(f32),
    Tag(String),
}

#[cfg(feature = "serde")]
impl AngleOrTag {
    fn into_angle<E: de::Error>(self) -> std::result::Result<Option<f32>, E> {
        match self {
            AngleOrTag::Angle(a) => Ok(Some(a)),
            AngleOrTag::Tag(t) if t == FULL => Ok(None),
            AngleOrTag::Tag(t) => Err(E::custom(format!(
                "expected a number or \"{FULL}\", found \"{t}\""
            ))),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for RotationAllowance {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            RotationAllowance::Bounded(a) => serializer.serialize_f32(*a),
            RotationAllowance::Full => serializer.serialize_str(FULL),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for RotationAllowance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match AngleOrTag::deserialize(deserializer)?.into_angle::<D::Error>()? {
            Some(a) => RotationAllowance::Bounded(a),
            None => RotationAllowance::Full,
        })
    }
}

#[cfg(feature = "serde")]
impl Serialize for Rotation {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Rotation::Fixed(a) => serializer.serialize_f32(*a),
            Rotation::Full => serializer.serialize_str(FULL),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Rotation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match AngleOrTag::deserialize(deserializer)?.into_angle::<D::Error>()? {
            Some(a) => Rotation::Fixed(a),
            None => Rotation::Full,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_is_none_for_full() {
        assert_eq!(Rotation::Fixed(1.25).angle(), Some(1.25));
        assert_eq!(Rotation::Full.angle(), None);
        assert!(Rotation::Full.is_full());
        assert_eq!(Rotation::default(), Rotation::Fixed(0.0));
    }
}
