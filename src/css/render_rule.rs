//! Resolved per-property style table.

use std::fmt;

use strum::{EnumCount, IntoEnumIterator};

use crate::css::matcher::MatchedStyleRule;
use crate::css::model::Declaration;
use crate::css::properties::PropertyType;
use crate::css::value::{Argb, CssValue};

/// The final values of every property set by a combination of rules.
///
/// One slot per [`PropertyType`]. A slot holds the values of the last
/// declaration applied for that property, or nothing if no rule set it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRule {
    slots: Vec<Option<Vec<CssValue>>>,
}

impl Default for RenderRule {
    fn default() -> Self {
        Self {
            slots: vec![None; PropertyType::COUNT],
        }
    }
}

impl RenderRule {
    /// An empty table: no property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cascade the declarations of `matched`, which must already be in
    /// cascade order. Later declarations overwrite earlier ones.
    pub fn from_matches(matched: &[MatchedStyleRule<'_>]) -> Self {
        let mut rule = Self::new();
        for declaration in matched.iter().flat_map(|m| &m.rule.declarations) {
            rule.apply(declaration);
        }
        rule
    }

    /// Overwrite the property's slot with this declaration's values.
    pub fn apply(&mut self, declaration: &Declaration) {
        self.slots[declaration.property.index()] = Some(declaration.values.clone());
    }

    /// All values of a property.
    pub fn get(&self, property: PropertyType) -> Option<&[CssValue]> {
        self.slots[property.index()].as_deref()
    }

    /// The first value of a property.
    pub fn value(&self, property: PropertyType) -> Option<&CssValue> {
        self.get(property).and_then(<[CssValue]>::first)
    }

    pub fn is_set(&self, property: PropertyType) -> bool {
        self.slots[property.index()].is_some()
    }

    /// The color of a property.
    ///
    /// # Panics
    ///
    /// Panics if the property is set to something other than a color.
    pub fn color(&self, property: PropertyType) -> Option<Argb> {
        self.value(property).map(CssValue::color)
    }

    /// The pixel length of a property, if it holds a length or number.
    pub fn length(&self, property: PropertyType) -> Option<i32> {
        self.value(property).and_then(CssValue::as_length)
    }

    /// Set properties in property order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyType, &[CssValue])> + '_ {
        PropertyType::iter()
            .zip(&self.slots)
            .filter_map(|(property, slot)| slot.as_deref().map(|values| (property, values)))
    }

    /// Number of properties set.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// One `property: values;` line per set property.
impl fmt::Display for RenderRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (property, values) in self.iter() {
            write!(f, "{property}:")?;
            for value in values {
                write!(f, " {value}")?;
            }
            writeln!(f, ";")?;
        }
        Ok(())
    }
}
