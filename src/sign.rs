use serde::Deserialize;

/// One of the twelve outcomes a quiz session can award.
///
/// The `Display` form is the stable lowercase name ("aries") used for the
/// share string and for external asset lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// Every sign, in declaration order. This order is the canonical
    /// enumeration order wherever signs are tallied or listed.
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// File name of the sign's artwork, e.g. "aries.png".
    pub fn asset_file(&self) -> String {
        format!("{self}.png")
    }
}
