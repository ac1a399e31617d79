//! The `\si` and `\SI` entry points

use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::define_function::{FunctionContext, ord_argument};
use crate::parser::ParseNodeError;
use crate::parser::parse_node::{NodeType, ParseNode, ParseNodeSiQuantity, ParseNodeSiUnits};
use crate::types::{ArgType, ParseError};

/// The two entry points, keyed by their command names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
pub enum SiCommand {
    /// `\si{units}`
    #[strum(serialize = "\\si")]
    Units,
    /// `\SI{number}{units}`
    #[strum(serialize = "\\SI")]
    Quantity,
}

impl SiCommand {
    /// One argument type per mandatory argument. The unit field is always
    /// [`ArgType::Units`].
    #[must_use]
    pub fn arg_types(self) -> Vec<ArgType> {
        match self {
            Self::Units => vec![ArgType::Units],
            Self::Quantity => vec![ArgType::Original, ArgType::Units],
        }
    }

    /// The parse node type the handler produces.
    #[must_use]
    pub const fn node_type(self) -> NodeType {
        match self {
            Self::Units => NodeType::SiUnits,
            Self::Quantity => NodeType::SiQuantity,
        }
    }

    /// The command name with its backslash.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Builds the node for this command from its parsed arguments.
    ///
    /// The number of `\SI` is kept as parsed; it is never evaluated or
    /// checked against the units.
    pub fn build(
        self,
        context: &FunctionContext,
        mut args: Vec<ParseNode>,
    ) -> Result<ParseNode, ParseError> {
        let units = match args.pop() {
            Some(ParseNode::SiUnits(units)) => units,
            other => {
                return Err(ParseNodeError::TypeMismatch {
                    expected: NodeType::SiUnits,
                    actual: other.map_or_else(
                        || "null".to_owned(),
                        |node| NodeType::from(&node).to_string(),
                    ),
                }
                .into());
            }
        };

        match self {
            Self::Units => Ok(ParseNode::SiUnits(ParseNodeSiUnits {
                mode: context.parser.mode,
                loc: context.loc(),
                ..units
            })),
            Self::Quantity => {
                let number = args
                    .first()
                    .map(ord_argument)
                    .unwrap_or_default();
                Ok(ParseNode::SiQuantity(Box::new(ParseNodeSiQuantity {
                    mode: context.parser.mode,
                    loc: context.loc(),
                    number,
                    space: context.parser.settings.quantity_space.clone(),
                    units,
                })))
            }
        }
    }
}
