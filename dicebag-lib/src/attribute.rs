use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Rule modifier that applies to a dice roll or to an upcoming run of
/// dice rolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Crit,
    Spell,
    Half,
    Advantage,
    Disadvantage,
    DropHigh,
    DropLow,
    Minus,
    Roll,
    Hit,
    Dmg,
}

impl Attribute {
    const fn bit(self) -> u16 {
        1 << self as u16
    }

    /// Canonical keyword, the one printed back to the user
    pub fn keyword(self) -> &'static str {
        match self {
            Attribute::Crit => "crit",
            Attribute::Spell => "spell",
            Attribute::Half => "half",
            Attribute::Advantage => "adv",
            Attribute::Disadvantage => "dis",
            Attribute::DropHigh => "drophigh",
            Attribute::DropLow => "droplow",
            Attribute::Minus => "minus",
            Attribute::Roll => "roll",
            Attribute::Hit => "hit",
            Attribute::Dmg => "dmg",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

// `Minus` is absent on purpose, it only comes from a leading `-` on a
// dice token.
static KEYWORDS: Lazy<HashMap<&'static str, Attribute>> = Lazy::new(|| {
    HashMap::from([
        ("crit", Attribute::Crit),
        ("spell", Attribute::Spell),
        ("half", Attribute::Half),
        ("adv", Attribute::Advantage),
        ("advantage", Attribute::Advantage),
        ("dis", Attribute::Disadvantage),
        ("disadvantage", Attribute::Disadvantage),
        ("drophigh", Attribute::DropHigh),
        ("droplow", Attribute::DropLow),
        ("roll", Attribute::Roll),
        ("hit", Attribute::Hit),
        ("dmg", Attribute::Dmg),
    ])
});

/// Case insensitive keyword lookup
pub fn from_keyword(keyword: &str) -> Option<Attribute> {
    KEYWORDS.get(keyword.to_ascii_lowercase().as_str()).copied()
}

/// Set of attributes active on a dice roll. Advantage and disadvantage
/// evict each other on insertion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeSet(u16);

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, attrib: Attribute) {
        match attrib {
            Attribute::Advantage => self.remove(Attribute::Disadvantage),
            Attribute::Disadvantage => self.remove(Attribute::Advantage),
            _ => (),
        }
        self.0 |= attrib.bit();
    }

    pub fn remove(&mut self, attrib: Attribute) {
        self.0 &= !attrib.bit();
    }

    pub fn has(&self, attrib: Attribute) -> bool {
        self.0 & attrib.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn with(mut self, attrib: Attribute) -> Self {
        self.insert(attrib);
        self
    }
}
