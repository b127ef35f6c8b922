use eframe::egui::Color32;

const MWC_Z_SEED: i32 = 987_654_321;

/// Hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn to_color32(self) -> Color32 {
        let h = self.hue.rem_euclid(360.0) / 360.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        if s <= f64::EPSILON {
            let v = channel(l);
            return Color32::from_rgb(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Color32::from_rgb(
            channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            channel(hue_to_rgb(p, q, h)),
            channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        )
    }
}

impl std::fmt::Display for Hsl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "hsl({:.1},{:.1}%,{:.1}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

pub fn key_hash(key: &str) -> i32 {
    key.encode_utf16()
        .fold(0i32, |acc, unit| acc.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Multiply-with-carry generator over two signed 32-bit words.
struct Mwc {
    w: i32,
    z: i32,
}

impl Mwc {
    fn seeded(seed: i32) -> Self {
        Self {
            w: seed,
            z: MWC_Z_SEED,
        }
    }

    fn next_unit(&mut self) -> f64 {
        self.z = (36969 * i64::from(self.z & 0xffff) + i64::from(self.z >> 16)) as i32;
        self.w = (18000 * i64::from(self.w & 0xffff) + i64::from(self.w >> 16)) as i32;
        let result = (i64::from(self.z.wrapping_shl(16)) + i64::from(self.w)) as i32;
        f64::from(result) / 4_294_967_296.0 + 0.5
    }

    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_unit() * (max - min)
    }
}

pub fn color(key: &str, invert: bool) -> Hsl {
    let mut rng = Mwc::seeded(key_hash(key));

    let hue = rng.range(1.0, 360.0);
    let saturation = rng.range(0.0, 100.0);
    let lightness = rng.range(0.0, 100.0);

    Hsl {
        hue,
        saturation: if invert { 100.0 - saturation } else { saturation },
        lightness,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorPair {
    pub fill: Hsl,
    pub halo: Hsl,
}

impl ColorPair {
    pub fn for_key(key: &str) -> Self {
        Self {
            fill: color(key, false),
            halo: color(key, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_gives_same_color() {
        for key in ["10.0.0.1:9", "1.2.3.4", "", "builder-07.lan:8097"] {
            assert_eq!(color(key, false), color(key, false));
            assert_eq!(color(key, true), color(key, true));
        }
    }

    #[test]
    fn inverted_color_mirrors_saturation_only() {
        for key in ["10.0.0.1:9", "10.0.0.2:9", "1.2.3.4", "alice"] {
            let normal = color(key, false);
            let inverted = color(key, true);
            assert_eq!(normal.hue, inverted.hue);
            assert_eq!(normal.lightness, inverted.lightness);
            assert!((inverted.saturation - (100.0 - normal.saturation)).abs() < 1e-9);
        }
    }

    #[test]
    fn components_stay_in_range() {
        for index in 0..500 {
            let key = format!("10.0.{}.{}:{}", index / 256, index % 256, 8000 + index);
            let hsl = color(&key, false);
            assert!((1.0..360.0).contains(&hsl.hue), "{key}: {hsl}");
            assert!((0.0..100.0).contains(&hsl.saturation), "{key}: {hsl}");
            assert!((0.0..100.0).contains(&hsl.lightness), "{key}: {hsl}");
        }
    }

    #[test]
    fn hash_folds_utf16_units_with_wrapping() {
        assert_eq!(key_hash(""), 0);
        assert_eq!(key_hash("a"), 97);
        assert_eq!(key_hash("ab"), 97 * 31 + 98);
        // long keys overflow 32 bits and must wrap rather than panic
        let long = "x".repeat(64);
        assert_eq!(key_hash(&long), key_hash(&long));
    }

    #[test]
    fn neighbouring_keys_get_different_hues() {
        let a = color("10.0.0.1:9", false);
        let b = color("10.0.0.2:9", false);
        assert_ne!(a, b);
    }

    #[test]
    fn hsl_converts_to_expected_rgb() {
        let red = Hsl {
            hue: 0.0,
            saturation: 100.0,
            lightness: 50.0,
        };
        assert_eq!(red.to_color32(), Color32::from_rgb(255, 0, 0));

        let grey = Hsl {
            hue: 200.0,
            saturation: 0.0,
            lightness: 50.0,
        };
        assert_eq!(grey.to_color32(), Color32::from_rgb(128, 128, 128));
    }
}
