use atelier_texture::{Finish, MaterialDescriptor, PatternDescriptor, PatternKind, Rgb, StitchKind, StitchingDescriptor};

/// Selectable materials, patterns and stitching styles. The first entry of
/// each list is the default selection.
#[derive(Clone, Debug)]
pub struct Catalog {
    pub materials: Vec<MaterialDescriptor>,
    pub patterns: Vec<PatternDescriptor>,
    pub stitchings: Vec<StitchingDescriptor>,
}

impl Default for Catalog {
    fn default() -> Self {
        let material = |name: &str, hex: u32, finish: Finish| {
            let rgb = Rgb::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8);
            MaterialDescriptor::new(name, rgb, finish)
        };

        Self {
            materials: vec![
                material("Anchorage", 0x2c3e50, Finish::Pebbled),
                material("Leon", 0x34495e, Finish::Smooth),
                material("Marlin", 0x7f8c8d, Finish::Leather),
                material("Navy Blue", 0x1e3a8a, Finish::Smooth),
                material("Charcoal", 0x374151, Finish::Pebbled),
                material("Cream", 0xfef3c7, Finish::Smooth),
                material("Burgundy", 0x7c2d12, Finish::Leather),
                material("Forest Green", 0x166534, Finish::Pebbled),
            ],
            patterns: vec![
                PatternDescriptor::new("None", PatternKind::None),
                PatternDescriptor::new("Diamond", PatternKind::Diamond),
                PatternDescriptor::new("Quilted", PatternKind::Quilted),
                PatternDescriptor::new("Perforated", PatternKind::Perforated),
            ],
            stitchings: vec![
                StitchingDescriptor::new("None", StitchKind::None),
                StitchingDescriptor::new("Straight", StitchKind::Straight),
                StitchingDescriptor::new("Cross", StitchKind::Cross),
                StitchingDescriptor::new("Zigzag", StitchKind::Zigzag),
            ],
        }
    }
}

impl Catalog {
    pub fn material_index(&self, name: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn pattern_index(&self, name: &str) -> Option<usize> {
        self.patterns.iter().position(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn stitching_index(&self, name: &str) -> Option<usize> {
        self.stitchings.iter().position(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn is_valid(&self) -> bool {
        !self.materials.is_empty() && !self.patterns.is_empty() && !self.stitchings.is_empty()
    }
}

/// `seat_back` -> `Seat Back`
pub fn display_name(part: &str) -> String {
    let mut previous_is_word = false;
    part.chars()
        .map(|c| if c == '_' { ' ' } else { c })
        .flat_map(|c| {
            let is_word = c.is_alphanumeric();
            let out: Vec<char> = if is_word && !previous_is_word { c.to_uppercase().collect() } else { vec![c] };
            previous_is_word = is_word;
            out
        })
        .collect()
}
