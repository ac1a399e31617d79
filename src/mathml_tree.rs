//! MathML tree node definitions
//!
//! These objects store data about MathML nodes. MathML handles its own
//! layout, so unlike an HTML tree nothing here tracks heights or depths.

use core::fmt::{self, Debug, Write as _};

use bon::bon;
use strum::AsRefStr;

use crate::ParseError;
use crate::tree::VirtualNode;
use crate::units::make_em;
use crate::utils::escape_into;

fn map_fmt(result: fmt::Result) -> Result<(), ParseError> {
    result.map_err(ParseError::from)
}

/// MathML element names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum MathNodeType {
    Math,
    Annotation,
    Semantics,
    Mtext,
    Mn,
    Mo,
    Mi,
    Mspace,
    Msup,
    Msub,
    Msubsup,
    Mrow,
    Mstyle,
}

/// The Unicode space character for widths MathML renderers know by name,
/// in em.
#[must_use]
pub fn get_space_character(width: f64) -> Option<String> {
    if (0.05555..=0.05556).contains(&width) {
        Some("\u{200a}".to_owned()) // &VeryThinSpace;
    } else if (0.1666..=0.1667).contains(&width) {
        Some("\u{2009}".to_owned()) // &ThinSpace;
    } else if (0.2222..=0.2223).contains(&width) {
        Some("\u{2005}".to_owned()) // &MediumSpace;
    } else if (0.2777..=0.2778).contains(&width) {
        Some("\u{2005}\u{200a}".to_owned()) // &ThickSpace;
    } else if (-0.05556..=-0.05555).contains(&width) {
        Some("\u{200a}\u{2063}".to_owned()) // &NegativeVeryThinSpace;
    } else if (-0.1667..=-0.1666).contains(&width) {
        Some("\u{2009}\u{2063}".to_owned()) // &NegativeThinSpace;
    } else if (-0.2223..=-0.2222).contains(&width) {
        Some("\u{205f}\u{2063}".to_owned()) // &NegativeMediumSpace;
    } else if (-0.2778..=-0.2777).contains(&width) {
        Some("\u{2005}\u{2063}".to_owned()) // &NegativeThickSpace;
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MathDomNode {
    Math(MathNode),
    Text(TextNode),
    Space(SpaceNode),
}

/// A MathML element.
///
/// Attributes keep their insertion order so the markup is stable.
#[derive(Clone, PartialEq)]
pub struct MathNode {
    pub node_type: MathNodeType,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<MathDomNode>,
    pub classes: Vec<String>,
}

impl Debug for MathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MathNode")
            .field("node_type", &self.node_type)
            .field("attributes", &self.attributes)
            .field(
                "children",
                &format_args!("{} children", self.children.len()),
            )
            .field("classes", &self.classes)
            .finish()
    }
}

#[bon]
impl MathNode {
    #[builder]
    pub fn new(
        node_type: MathNodeType,
        attributes: Option<Vec<(String, String)>>,
        children: Option<Vec<MathDomNode>>,
        classes: Option<Vec<String>>,
    ) -> Self {
        Self {
            node_type,
            attributes: attributes.unwrap_or_default(),
            children: children.unwrap_or_default(),
            classes: classes.unwrap_or_default(),
        }
    }

    #[must_use]
    pub const fn with_children(node_type: MathNodeType, children: Vec<MathDomNode>) -> Self {
        Self {
            node_type,
            attributes: Vec::new(),
            children,
            classes: Vec::new(),
        }
    }

    /// Sets an attribute, replacing any earlier value for the same key.
    pub fn set_attribute<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.attributes.push((key, value));
        }
    }

    #[must_use]
    pub fn get_attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn to_text(&self) -> String {
        self.children.iter().map(MathDomNode::to_text).collect()
    }
}

impl VirtualNode for MathNode {
    fn write_markup(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), ParseError> {
        map_fmt(write!(fmt, "<{}", self.node_type.as_ref()))?;

        if !self.classes.is_empty() {
            map_fmt(fmt.write_str(" class=\""))?;
            let mut first = true;
            for class in &self.classes {
                if !first {
                    map_fmt(fmt.write_char(' '))?;
                }
                first = false;
                map_fmt(escape_into(fmt, class))?;
            }
            map_fmt(fmt.write_char('"'))?;
        }

        for (key, value) in &self.attributes {
            map_fmt(write!(fmt, " {key}=\""))?;
            map_fmt(escape_into(fmt, value))?;
            map_fmt(fmt.write_char('"'))?;
        }

        map_fmt(fmt.write_char('>'))?;

        for child in &self.children {
            child.write_markup(fmt)?;
        }

        map_fmt(write!(fmt, "</{}>", self.node_type.as_ref()))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub text: String,
}

impl VirtualNode for TextNode {
    fn write_markup(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), ParseError> {
        map_fmt(escape_into(fmt, &self.text))
    }
}

/// Horizontal space of a given width in em.
///
/// Widths with a named Unicode space are written as that character inside
/// `<mtext>`; anything else becomes `<mspace>`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceNode {
    pub width: f64,
    pub character: Option<String>,
}

impl SpaceNode {
    #[must_use]
    pub fn new(width: f64) -> Self {
        let character = get_space_character(width);
        Self { width, character }
    }

    fn to_text(&self) -> String {
        self.character.clone().unwrap_or_else(|| " ".to_owned())
    }
}

impl VirtualNode for SpaceNode {
    fn write_markup(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), ParseError> {
        if let Some(character) = &self.character {
            map_fmt(fmt.write_str("<mtext>"))?;
            map_fmt(escape_into(fmt, character))?;
            map_fmt(fmt.write_str("</mtext>"))?;
        } else {
            map_fmt(fmt.write_str("<mspace width=\""))?;
            map_fmt(fmt.write_str(&make_em(self.width)))?;
            map_fmt(fmt.write_str("\"/>"))?;
        }
        Ok(())
    }
}

impl MathDomNode {
    /// The text content of the subtree, spaces included.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Math(node) => node.to_text(),
            Self::Text(node) => node.text.clone(),
            Self::Space(node) => node.to_text(),
        }
    }
}

impl VirtualNode for MathDomNode {
    fn write_markup(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), ParseError> {
        match self {
            Self::Math(node) => node.write_markup(fmt),
            Self::Text(node) => node.write_markup(fmt),
            Self::Space(node) => node.write_markup(fmt),
        }
    }
}

impl From<MathNode> for MathDomNode {
    fn from(node: MathNode) -> Self {
        Self::Math(node)
    }
}

impl From<TextNode> for MathDomNode {
    fn from(node: TextNode) -> Self {
        Self::Text(node)
    }
}

impl From<SpaceNode> for MathDomNode {
    fn from(node: SpaceNode) -> Self {
        Self::Space(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thin_space_is_a_character() {
        let space = SpaceNode::new(3.0 / 18.0);
        assert_eq!(space.character.as_deref(), Some("\u{2009}"));
        assert_eq!(
            MathDomNode::from(space).to_markup().unwrap(),
            "<mtext>\u{2009}</mtext>"
        );
    }

    #[test]
    fn test_other_widths_use_mspace() {
        let space = SpaceNode::new(0.5);
        assert_eq!(space.character, None);
        assert_eq!(space.to_markup().unwrap(), "<mspace width=\"0.5em\"/>");
    }

    #[test]
    fn test_attributes_keep_order_and_replace() {
        let mut node = MathNode::builder()
            .node_type(MathNodeType::Mi)
            .children(vec![MathDomNode::Text(TextNode {
                text: "k<".to_owned(),
            })])
            .build();
        node.set_attribute("mathvariant", "italic");
        node.set_attribute("mathcolor", "red");
        node.set_attribute("mathvariant", "normal");
        assert_eq!(node.get_attribute("mathvariant"), Some("normal"));
        assert_eq!(
            node.to_markup().unwrap(),
            "<mi mathvariant=\"normal\" mathcolor=\"red\">k&lt;</mi>"
        );
    }

    #[test]
    fn test_text_content() {
        let node: MathDomNode = MathNode::with_children(
            MathNodeType::Mrow,
            vec![
                MathNode::with_children(MathNodeType::Mn, vec![TextNode { text: "5".to_owned() }.into()])
                    .into(),
                SpaceNode::new(0.5).into(),
            ],
        )
        .into();
        assert_eq!(node.to_markup().unwrap(), "<mrow><mn>5</mn><mspace width=\"0.5em\"/></mrow>");
        assert_eq!(node.to_text(), "5 ");
    }
}
