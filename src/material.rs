//! Name-based surface dispatch. Mesh material names coming out of the
//! authoring tool are matched against an ordered pattern list; the first rule
//! whose substring appears in the name decides the texture and tiling for
//! that mesh, and anything unmatched falls back to the car's paint.

/// Texture slot a mesh name resolves to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Finish {
    Tire,
    Steel,
    RedLight,
    Lamp,
    Glass,
    /// The per-car paint texture assigned at load time.
    Paint,
}

pub struct Rule {
    pub patterns: &'static [&'static str],
    pub finish: Finish,
    pub tiling: f32,
}

/// Ordered, case-sensitive dispatch table. The orderings differ between scene
/// variants and each variant's own ordering is authoritative; they are kept
/// as separate tables rather than unified.
pub struct RuleSet {
    pub rules: &'static [Rule],
    pub fallback_tiling: f32,
}

/// Resolved surface of one mesh.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Coat {
    pub finish: Finish,
    pub tiling: f32,
}

impl RuleSet {
    pub fn resolve(&self, name: &str) -> Coat {
        for rule in self.rules {
            if rule.patterns.iter().any(|pattern| name.contains(pattern)) {
                return Coat {
                    finish: rule.finish,
                    tiling: rule.tiling,
                };
            }
        }
        Coat {
            finish: Finish::Paint,
            tiling: self.fallback_tiling,
        }
    }
}

/// Material mapping for showroom slots past the first: tires before trim,
/// then lights and glass; everything else is body paint with a grain repeat.
pub const SHOWROOM: RuleSet = RuleSet {
    rules: &[
        Rule {
            patterns: &["Black", "Tire", "Rubber"],
            finish: Finish::Tire,
            tiling: 1.0,
        },
        Rule {
            patterns: &["steel", "Chrome"],
            finish: Finish::Steel,
            tiling: 1.0,
        },
        Rule {
            patterns: &["Red"],
            finish: Finish::RedLight,
            tiling: 1.0,
        },
        Rule {
            patterns: &["Light"],
            finish: Finish::Lamp,
            tiling: 1.0,
        },
        Rule {
            patterns: &["glass", "Window"],
            finish: Finish::Glass,
            tiling: 1.0,
        },
    ],
    fallback_tiling: 4.0,
};

/// The first showroom slot is skinned: its paint texture is UV-mapped over
/// the whole body and only the glass is swapped out.
pub const SHOWPIECE: RuleSet = RuleSet {
    rules: &[Rule {
        patterns: &["Glass"],
        finish: Finish::Glass,
        tiling: 1.0,
    }],
    fallback_tiling: 1.0,
};

/// Ordering used by the single-car demo; `Black` is checked before
/// `Material`, so default-named groups land on untiled paint.
pub const SINGLE_CAR: RuleSet = RuleSet {
    rules: &[
        Rule {
            patterns: &["Black"],
            finish: Finish::Tire,
            tiling: 1.0,
        },
        Rule {
            patterns: &["Material"],
            finish: Finish::Paint,
            tiling: 1.0,
        },
        Rule {
            patterns: &["Glass", "Window"],
            finish: Finish::Glass,
            tiling: 1.0,
        },
    ],
    fallback_tiling: 4.0,
};

#[cfg(test)]
mod tests {
    use super::{Finish, SHOWPIECE, SHOWROOM, SINGLE_CAR};

    #[test]
    fn chrome_bumper_resolves_to_steel() {
        assert_eq!(SHOWROOM.resolve("Chrome_Bumper_01").finish, Finish::Steel);
    }

    #[test]
    fn tire_rule_precedes_steel_rule() {
        // "Black" sits in the first rule, so a name matching both is a tire
        assert_eq!(SHOWROOM.resolve("Black_steel_Rim").finish, Finish::Tire);
        assert_eq!(SHOWROOM.resolve("Tire_Black_Rubber").finish, Finish::Tire);
    }

    #[test]
    fn unmatched_name_falls_back_to_tiled_paint() {
        let coat = SHOWROOM.resolve("CarPaint_Body");
        assert_eq!(coat.finish, Finish::Paint);
        assert!((coat.tiling - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn red_lights_win_over_plain_lights() {
        assert_eq!(SHOWROOM.resolve("Red_Light_Left").finish, Finish::RedLight);
        assert_eq!(SHOWROOM.resolve("Head_Light").finish, Finish::Lamp);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(SHOWROOM.resolve("front_glass").finish, Finish::Glass);
        // "Windshield" contains neither "glass" nor "Window"
        assert_eq!(SHOWROOM.resolve("Windshield").finish, Finish::Paint);
        assert_eq!(SHOWROOM.resolve("GLASS").finish, Finish::Paint);
    }

    #[test]
    fn showpiece_skins_everything_but_glass() {
        let body = SHOWPIECE.resolve("Chrome_Bumper_01");
        assert_eq!(body.finish, Finish::Paint);
        assert!((body.tiling - 1.0).abs() < f32::EPSILON);
        assert_eq!(SHOWPIECE.resolve("Front_Glass").finish, Finish::Glass);
    }

    #[test]
    fn single_car_checks_black_before_material() {
        assert_eq!(SINGLE_CAR.resolve("Black_Material").finish, Finish::Tire);
        let default_group = SINGLE_CAR.resolve("Material.001");
        assert_eq!(default_group.finish, Finish::Paint);
        assert!((default_group.tiling - 1.0).abs() < f32::EPSILON);
    }
}
