//! Elements and per-combatant affinity tables.

/// Damage element carried by a skill or item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Element {
    /// Non-elemental; affinity lookups always answer neutral.
    Neutral,
    Fire,
    Ice,
    Lightning,
    Earth,
    Holy,
    Dark,
}

impl Element {
    /// All elements that can carry an affinity entry.
    pub const ALL: [Element; 7] = [
        Element::Neutral,
        Element::Fire,
        Element::Ice,
        Element::Lightning,
        Element::Earth,
        Element::Holy,
        Element::Dark,
    ];
}

/// Declared reaction of a combatant to one element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Affinity {
    Weak,
    #[default]
    Neutral,
    Resist,
    Immune,
}

/// Elemental affinity table for one combatant.
///
/// Elements without an entry are neutral. The table is plain content data;
/// the multiplier each affinity maps to lives in the balance tables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affinities {
    #[cfg_attr(feature = "serde", serde(default))]
    entries: Vec<(Element, Affinity)>,
}

impl Affinities {
    /// Creates an all-neutral table.
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Returns the affinity toward the given element.
    pub fn of(&self, element: Element) -> Affinity {
        self.entries
            .iter()
            .find(|(e, _)| *e == element)
            .map(|(_, a)| *a)
            .unwrap_or_default()
    }

    /// Sets the affinity for an element, replacing any previous entry.
    pub fn set(&mut self, element: Element, affinity: Affinity) {
        if let Some(entry) = self.entries.iter_mut().find(|(e, _)| *e == element) {
            entry.1 = affinity;
        } else {
            self.entries.push((element, affinity));
        }
    }

    /// Builder-style convenience used by content declarations.
    #[must_use]
    pub fn with(mut self, element: Element, affinity: Affinity) -> Self {
        self.set(element, affinity);
        self
    }
}
